//! Document-level rules.

use qpp_decode::decoders::{PROGRAM_NAME, TAX_ID};
use qpp_model::{Node, TemplateId};

use crate::context::ValidationContext;
use crate::registry::NodeValidator;

pub const PROGRAM_NAME_MISSING: &str = "Clinical Document must have a program name";
pub const INCORRECT_PROGRAM_NAME: &str =
    "Clinical Document program name must be one of MIPS or CPCPLUS";
pub const TAX_ID_MISSING: &str =
    "Clinical Document must have a Taxpayer Identification Number (TIN)";
pub const ONE_SECTION_REQUIRED: &str =
    "Clinical Document must have at least one ACI, IA or eCQM section";

pub const VALID_PROGRAM_NAMES: [&str; 2] = ["mips", "cpcplus"];

const SECTIONS: [TemplateId; 3] = [
    TemplateId::AciSection,
    TemplateId::IaSection,
    TemplateId::MeasureSection,
];

pub struct ClinicalDocumentValidator;

impl NodeValidator for ClinicalDocumentValidator {
    fn template(&self) -> TemplateId {
        TemplateId::ClinicalDocument
    }

    fn validate_node(&self, node: &Node, context: &mut ValidationContext<'_>) {
        context
            .check(node)
            .value(PROGRAM_NAME_MISSING, PROGRAM_NAME)
            .value_in(INCORRECT_PROGRAM_NAME, PROGRAM_NAME, &VALID_PROGRAM_NAMES);
        context
            .thoroughly_check(node)
            .value(TAX_ID_MISSING, TAX_ID)
            .child_minimum(ONE_SECTION_REQUIRED, 1, &SECTIONS);
    }
}
