//! Measure, ACI and IA sections.

use qpp_model::{Node, TemplateId};

use super::registry::NodeDecoder;
use super::reporting_parameters::ensure_reporting_parameters;
use crate::raw::RawElement;

pub const CATEGORY: &str = "category";

/// One decoder type serves all three sections; only the template and the
/// category label differ.
pub struct SectionDecoder {
    template: TemplateId,
    category: &'static str,
}

impl SectionDecoder {
    pub fn quality() -> Self {
        Self {
            template: TemplateId::MeasureSection,
            category: "quality",
        }
    }

    pub fn aci() -> Self {
        Self {
            template: TemplateId::AciSection,
            category: "aci",
        }
    }

    pub fn ia() -> Self {
        Self {
            template: TemplateId::IaSection,
            category: "ia",
        }
    }

    pub fn category(&self) -> &'static str {
        self.category
    }
}

impl NodeDecoder for SectionDecoder {
    fn template(&self) -> TemplateId {
        self.template
    }

    fn description(&self) -> &'static str {
        "Report section"
    }

    fn decode(&self, _element: &RawElement, node: &mut Node) {
        node.put_value(CATEGORY, self.category);
    }

    fn finish(&self, node: &mut Node) {
        ensure_reporting_parameters(node);
    }
}
