//! Section rules shared by the quality, ACI and IA sections.

use qpp_model::{Node, TemplateId};

use super::common::report_extra_nodes;
use crate::context::ValidationContext;
use crate::registry::NodeValidator;

/// A section needs at least one entry of its kind and a reporting period,
/// and may appear only once per document.
pub struct SectionValidator {
    template: TemplateId,
    entry: TemplateId,
    entry_required: &'static str,
    reporting_parameters_required: &'static str,
    only_one_section: &'static str,
}

impl SectionValidator {
    pub const QUALITY_ENTRY_REQUIRED: &'static str =
        "The Quality Measure Section must have at least one Measure Reference and Results";
    pub const QUALITY_REPORTING_PARAMETERS_REQUIRED: &'static str =
        "The Quality Measure Section must have a Reporting Parameters Act";
    pub const QUALITY_ONLY_ONE: &'static str =
        "Only one Quality Measure Section is allowed per document";

    pub const ACI_ENTRY_REQUIRED: &'static str =
        "The ACI Section must have at least one ACI Numerator Denominator measure";
    pub const ACI_REPORTING_PARAMETERS_REQUIRED: &'static str =
        "The ACI Section must have a Reporting Parameters Act";
    pub const ACI_ONLY_ONE: &'static str = "Only one ACI Section is allowed per document";

    pub const IA_ENTRY_REQUIRED: &'static str =
        "The IA Section must have at least one Improvement Activity";
    pub const IA_REPORTING_PARAMETERS_REQUIRED: &'static str =
        "The IA Section must have a Reporting Parameters Act";
    pub const IA_ONLY_ONE: &'static str = "Only one IA Section is allowed per document";

    pub fn quality() -> Self {
        Self {
            template: TemplateId::MeasureSection,
            entry: TemplateId::MeasureReferenceResults,
            entry_required: Self::QUALITY_ENTRY_REQUIRED,
            reporting_parameters_required: Self::QUALITY_REPORTING_PARAMETERS_REQUIRED,
            only_one_section: Self::QUALITY_ONLY_ONE,
        }
    }

    pub fn aci() -> Self {
        Self {
            template: TemplateId::AciSection,
            entry: TemplateId::AciNumeratorDenominator,
            entry_required: Self::ACI_ENTRY_REQUIRED,
            reporting_parameters_required: Self::ACI_REPORTING_PARAMETERS_REQUIRED,
            only_one_section: Self::ACI_ONLY_ONE,
        }
    }

    pub fn ia() -> Self {
        Self {
            template: TemplateId::IaSection,
            entry: TemplateId::IaMeasure,
            entry_required: Self::IA_ENTRY_REQUIRED,
            reporting_parameters_required: Self::IA_REPORTING_PARAMETERS_REQUIRED,
            only_one_section: Self::IA_ONLY_ONE,
        }
    }
}

impl NodeValidator for SectionValidator {
    fn template(&self) -> TemplateId {
        self.template
    }

    fn validate_node(&self, node: &Node, context: &mut ValidationContext<'_>) {
        context
            .thoroughly_check(node)
            .child_minimum(self.entry_required, 1, &[self.entry])
            .child_minimum(
                self.reporting_parameters_required,
                1,
                &[TemplateId::ReportingParametersAct],
            );
    }

    fn validate_group(&self, nodes: &[&Node], context: &mut ValidationContext<'_>) {
        report_extra_nodes(self.only_one_section, nodes, context);
    }
}
