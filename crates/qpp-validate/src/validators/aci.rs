//! Advancing Care Information rules.

use qpp_decode::decoders::MEASURE_ID;
use qpp_model::{Node, TemplateId};

use super::common::report_duplicate_measures;
use crate::context::ValidationContext;
use crate::registry::NodeValidator;

pub const ACI_MEASURE_ID_MISSING: &str = "The ACI measure must have a measure id";
pub const ONE_NUMERATOR_REQUIRED: &str = "The ACI measure must have exactly one numerator";
pub const ONE_DENOMINATOR_REQUIRED: &str = "The ACI measure must have exactly one denominator";
pub const NUMERATOR_COUNT_REQUIRED: &str =
    "The ACI numerator must have exactly one aggregate count";
pub const DENOMINATOR_COUNT_REQUIRED: &str =
    "The ACI denominator must have exactly one aggregate count";

pub struct AciNumeratorDenominatorValidator;

impl NodeValidator for AciNumeratorDenominatorValidator {
    fn template(&self) -> TemplateId {
        TemplateId::AciNumeratorDenominator
    }

    fn validate_node(&self, node: &Node, context: &mut ValidationContext<'_>) {
        context
            .thoroughly_check(node)
            .value(ACI_MEASURE_ID_MISSING, MEASURE_ID)
            .child_exact(ONE_NUMERATOR_REQUIRED, 1, &[TemplateId::AciNumerator])
            .child_exact(ONE_DENOMINATOR_REQUIRED, 1, &[TemplateId::AciDenominator]);
    }

    fn validate_group(&self, nodes: &[&Node], context: &mut ValidationContext<'_>) {
        report_duplicate_measures(nodes, context);
    }
}

/// Numerator and denominator each wrap exactly one aggregate count.
pub struct AciCountValidator {
    template: TemplateId,
    message: &'static str,
}

impl AciCountValidator {
    pub fn numerator() -> Self {
        Self {
            template: TemplateId::AciNumerator,
            message: NUMERATOR_COUNT_REQUIRED,
        }
    }

    pub fn denominator() -> Self {
        Self {
            template: TemplateId::AciDenominator,
            message: DENOMINATOR_COUNT_REQUIRED,
        }
    }
}

impl NodeValidator for AciCountValidator {
    fn template(&self) -> TemplateId {
        self.template
    }

    fn validate_node(&self, node: &Node, context: &mut ValidationContext<'_>) {
        context
            .check(node)
            .child_exact(self.message, 1, &[TemplateId::AggregateCount]);
    }
}
