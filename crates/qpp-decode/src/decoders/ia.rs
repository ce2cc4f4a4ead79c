//! Improvement Activity entries.

use qpp_model::{Node, TemplateId};

use super::common::{external_document_extension, put_optional};
use super::quality::MEASURE_ID;
use super::registry::NodeDecoder;
use crate::raw::RawElement;

pub const MEASURE_PERFORMED: &str = "measurePerformed";

pub struct IaMeasureDecoder;

impl NodeDecoder for IaMeasureDecoder {
    fn template(&self) -> TemplateId {
        TemplateId::IaMeasure
    }

    fn description(&self) -> &'static str {
        "Improvement activity performed"
    }

    fn decode(&self, element: &RawElement, node: &mut Node) {
        put_optional(node, MEASURE_ID, external_document_extension(element));
        // The Y/N answer sits in the nested "measure performed" observation.
        let performed = element
            .descend_attribute(&["component", "observation", "value"], "code")
            .map(str::to_uppercase);
        put_optional(node, MEASURE_PERFORMED, performed.as_deref());
    }
}
