//! Improvement Activity rules.

use qpp_decode::decoders::{MEASURE_ID, MEASURE_PERFORMED};
use qpp_model::{Node, TemplateId};

use super::common::report_duplicate_measures;
use crate::context::ValidationContext;
use crate::registry::NodeValidator;

pub const IA_MEASURE_ID_MISSING: &str = "The improvement activity must have a measure id";
pub const MEASURE_PERFORMED_INVALID: &str =
    "The improvement activity must state whether it was performed (Y or N)";

pub struct IaMeasureValidator;

impl NodeValidator for IaMeasureValidator {
    fn template(&self) -> TemplateId {
        TemplateId::IaMeasure
    }

    fn validate_node(&self, node: &Node, context: &mut ValidationContext<'_>) {
        context
            .thoroughly_check(node)
            .value(IA_MEASURE_ID_MISSING, MEASURE_ID)
            .value_in(MEASURE_PERFORMED_INVALID, MEASURE_PERFORMED, &["Y", "N"]);
    }

    fn validate_group(&self, nodes: &[&Node], context: &mut ValidationContext<'_>) {
        report_duplicate_measures(nodes, context);
    }
}
