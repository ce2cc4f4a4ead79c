//! Reporting parameters act: the performance period of a section.

use qpp_model::{Node, NodePath, TemplateId};

use super::registry::NodeDecoder;
use crate::raw::RawElement;

pub const PERFORMANCE_START: &str = "performanceStart";
pub const PERFORMANCE_END: &str = "performanceEnd";

/// Performance period assumed when a section carries no reporting parameters.
pub const DEFAULT_PERFORMANCE_START: &str = "20170101";
pub const DEFAULT_PERFORMANCE_END: &str = "20171231";

/// Element name recorded in the path of a synthesized reporting parameters node.
const DEFAULT_ELEMENT: &str = "reportingParameters";

pub struct ReportingParametersDecoder;

impl NodeDecoder for ReportingParametersDecoder {
    fn template(&self) -> TemplateId {
        TemplateId::ReportingParametersAct
    }

    fn description(&self) -> &'static str {
        "Reporting parameters act"
    }

    fn decode(&self, element: &RawElement, node: &mut Node) {
        for (key, bound) in [(PERFORMANCE_START, "low"), (PERFORMANCE_END, "high")] {
            if let Some(value) = element.descend_attribute(&["effectiveTime", bound], "value") {
                node.put_value(key, value.trim());
            }
        }
    }
}

/// Attach a default reporting parameters act to `section` unless it already
/// has one.
pub(super) fn ensure_reporting_parameters(section: &mut Node) {
    if section.count_children(&[TemplateId::ReportingParametersAct]) > 0 {
        return;
    }
    let path: NodePath = section
        .path()
        .child(DEFAULT_ELEMENT, section.children().len());
    let mut parameters = Node::new(TemplateId::ReportingParametersAct, path);
    parameters.put_value(PERFORMANCE_START, DEFAULT_PERFORMANCE_START);
    parameters.put_value(PERFORMANCE_END, DEFAULT_PERFORMANCE_END);
    parameters.mark_default(section.template().as_str());
    tracing::debug!(
        section = %section.template(),
        path = %section.path(),
        "added default reporting parameters"
    );
    section.add_child(parameters);
}
