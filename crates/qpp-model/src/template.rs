//! QRDA III template identifiers.
//!
//! Every node in a decoded document carries exactly one [`TemplateId`]. The
//! identifier selects the decoder and validator bound to the node, so adding
//! a variant forces every registry `match` to handle it.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Structural role of a node, keyed by its HL7 template OID.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TemplateId {
    ClinicalDocument,
    ReportingParametersAct,
    MeasureSection,
    MeasureReferenceResults,
    MeasureData,
    AggregateCount,
    PerformanceRate,
    AciSection,
    AciNumeratorDenominator,
    AciNumerator,
    AciDenominator,
    IaSection,
    IaMeasure,
    /// A templated element with an unknown OID, or an untemplated document root.
    Unrecognized,
}

impl TemplateId {
    /// Every identifier, in declaration order.
    pub const ALL: [TemplateId; 14] = [
        TemplateId::ClinicalDocument,
        TemplateId::ReportingParametersAct,
        TemplateId::MeasureSection,
        TemplateId::MeasureReferenceResults,
        TemplateId::MeasureData,
        TemplateId::AggregateCount,
        TemplateId::PerformanceRate,
        TemplateId::AciSection,
        TemplateId::AciNumeratorDenominator,
        TemplateId::AciNumerator,
        TemplateId::AciDenominator,
        TemplateId::IaSection,
        TemplateId::IaMeasure,
        TemplateId::Unrecognized,
    ];

    /// HL7 template OID root. `None` for [`TemplateId::Unrecognized`].
    pub fn root(self) -> Option<&'static str> {
        let root = match self {
            TemplateId::ClinicalDocument => "2.16.840.1.113883.10.20.27.1.1",
            TemplateId::ReportingParametersAct => "2.16.840.1.113883.10.20.17.3.8",
            TemplateId::MeasureSection => "2.16.840.1.113883.10.20.27.2.1",
            TemplateId::MeasureReferenceResults => "2.16.840.1.113883.10.20.27.3.1",
            TemplateId::MeasureData => "2.16.840.1.113883.10.20.27.3.5",
            TemplateId::AggregateCount => "2.16.840.1.113883.10.20.27.3.3",
            TemplateId::PerformanceRate => "2.16.840.1.113883.10.20.27.3.14",
            TemplateId::AciSection => "2.16.840.1.113883.10.20.27.2.5",
            TemplateId::AciNumeratorDenominator => "2.16.840.1.113883.10.20.27.3.28",
            TemplateId::AciNumerator => "2.16.840.1.113883.10.20.27.3.31",
            TemplateId::AciDenominator => "2.16.840.1.113883.10.20.27.3.32",
            TemplateId::IaSection => "2.16.840.1.113883.10.20.27.2.4",
            TemplateId::IaMeasure => "2.16.840.1.113883.10.20.27.3.33",
            TemplateId::Unrecognized => return None,
        };
        Some(root)
    }

    /// Template version extension, when the template is versioned.
    pub fn extension(self) -> Option<&'static str> {
        match self {
            TemplateId::ClinicalDocument
            | TemplateId::MeasureSection
            | TemplateId::AciSection
            | TemplateId::AciNumeratorDenominator
            | TemplateId::IaSection
            | TemplateId::IaMeasure => Some("2017-06-01"),
            TemplateId::MeasureReferenceResults
            | TemplateId::MeasureData
            | TemplateId::PerformanceRate
            | TemplateId::AciNumerator
            | TemplateId::AciDenominator => Some("2016-09-01"),
            TemplateId::ReportingParametersAct
            | TemplateId::AggregateCount
            | TemplateId::Unrecognized => None,
        }
    }

    /// Resolve a `templateId` element's `root`/`extension` pair.
    ///
    /// Roots must match exactly. Extensions are compared only when both the
    /// element and the known template carry one.
    pub fn from_template_id(root: &str, extension: Option<&str>) -> Option<TemplateId> {
        let root = root.trim();
        TemplateId::ALL.into_iter().find(|template| {
            if template.root() != Some(root) {
                return false;
            }
            match (template.extension(), extension.map(str::trim)) {
                (Some(expected), Some(actual)) => expected == actual,
                _ => true,
            }
        })
    }

    /// Stable upper-case name used in logs and reports.
    pub fn as_str(self) -> &'static str {
        match self {
            TemplateId::ClinicalDocument => "CLINICAL_DOCUMENT",
            TemplateId::ReportingParametersAct => "REPORTING_PARAMETERS_ACT",
            TemplateId::MeasureSection => "MEASURE_SECTION",
            TemplateId::MeasureReferenceResults => "MEASURE_REFERENCE_RESULTS",
            TemplateId::MeasureData => "MEASURE_DATA",
            TemplateId::AggregateCount => "AGGREGATE_COUNT",
            TemplateId::PerformanceRate => "PERFORMANCE_RATE",
            TemplateId::AciSection => "ACI_SECTION",
            TemplateId::AciNumeratorDenominator => "ACI_NUMERATOR_DENOMINATOR",
            TemplateId::AciNumerator => "ACI_NUMERATOR",
            TemplateId::AciDenominator => "ACI_DENOMINATOR",
            TemplateId::IaSection => "IA_SECTION",
            TemplateId::IaMeasure => "IA_MEASURE",
            TemplateId::Unrecognized => "UNRECOGNIZED",
        }
    }

    /// True for the three top-level report sections.
    pub fn is_section(self) -> bool {
        matches!(
            self,
            TemplateId::AciSection | TemplateId::IaSection | TemplateId::MeasureSection
        )
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
