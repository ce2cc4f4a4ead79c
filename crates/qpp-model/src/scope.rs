//! Template scopes: named subsets of templates a conversion may be limited to.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::template::TemplateId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QrdaScope {
    ClinicalDocument,
    AciSection,
    AciNumeratorDenominator,
    IaSection,
    IaMeasure,
    MeasureSection,
    MeasureReferenceResults,
    MeasureData,
}

impl QrdaScope {
    pub const ALL: [QrdaScope; 8] = [
        QrdaScope::ClinicalDocument,
        QrdaScope::AciSection,
        QrdaScope::AciNumeratorDenominator,
        QrdaScope::IaSection,
        QrdaScope::IaMeasure,
        QrdaScope::MeasureSection,
        QrdaScope::MeasureReferenceResults,
        QrdaScope::MeasureData,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            QrdaScope::ClinicalDocument => "CLINICAL_DOCUMENT",
            QrdaScope::AciSection => "ACI_SECTION",
            QrdaScope::AciNumeratorDenominator => "ACI_NUMERATOR_DENOMINATOR",
            QrdaScope::IaSection => "IA_SECTION",
            QrdaScope::IaMeasure => "IA_MEASURE",
            QrdaScope::MeasureSection => "MEASURE_SECTION",
            QrdaScope::MeasureReferenceResults => "MEASURE_REFERENCE_RESULTS",
            QrdaScope::MeasureData => "MEASURE_DATA",
        }
    }

    /// Templates of this scope's subtree.
    pub fn templates(self) -> BTreeSet<TemplateId> {
        let mut templates = BTreeSet::new();
        self.collect_templates(&mut templates);
        templates
    }

    /// Union of the subtrees of every scope given.
    pub fn templates_for(scopes: &[QrdaScope]) -> BTreeSet<TemplateId> {
        let mut templates = BTreeSet::new();
        for scope in scopes {
            scope.collect_templates(&mut templates);
        }
        templates
    }

    fn collect_templates(self, into: &mut BTreeSet<TemplateId>) {
        match self {
            QrdaScope::ClinicalDocument => {
                into.extend(
                    TemplateId::ALL
                        .into_iter()
                        .filter(|template| *template != TemplateId::Unrecognized),
                );
            }
            QrdaScope::AciSection => {
                into.extend([TemplateId::AciSection, TemplateId::ReportingParametersAct]);
                QrdaScope::AciNumeratorDenominator.collect_templates(into);
            }
            QrdaScope::AciNumeratorDenominator => {
                into.extend([
                    TemplateId::AciNumeratorDenominator,
                    TemplateId::AciNumerator,
                    TemplateId::AciDenominator,
                    TemplateId::AggregateCount,
                ]);
            }
            QrdaScope::IaSection => {
                into.extend([TemplateId::IaSection, TemplateId::ReportingParametersAct]);
                QrdaScope::IaMeasure.collect_templates(into);
            }
            QrdaScope::IaMeasure => {
                into.insert(TemplateId::IaMeasure);
            }
            QrdaScope::MeasureSection => {
                into.extend([TemplateId::MeasureSection, TemplateId::ReportingParametersAct]);
                QrdaScope::MeasureReferenceResults.collect_templates(into);
            }
            QrdaScope::MeasureReferenceResults => {
                into.extend([
                    TemplateId::MeasureReferenceResults,
                    TemplateId::PerformanceRate,
                ]);
                QrdaScope::MeasureData.collect_templates(into);
            }
            QrdaScope::MeasureData => {
                into.extend([TemplateId::MeasureData, TemplateId::AggregateCount]);
            }
        }
    }

    /// Parse every value, failing on the first one that names no scope.
    ///
    /// An empty input means "no filter" and yields `None`.
    pub fn parse_filter<S: AsRef<str>>(
        values: &[S],
    ) -> Result<Option<BTreeSet<TemplateId>>, ModelError> {
        if values.is_empty() {
            return Ok(None);
        }
        let scopes = values
            .iter()
            .map(|value| value.as_ref().parse::<QrdaScope>())
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Some(QrdaScope::templates_for(&scopes)))
    }
}

impl FromStr for QrdaScope {
    type Err = ModelError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_uppercase().replace('-', "_");
        QrdaScope::ALL
            .into_iter()
            .find(|scope| scope.as_str() == normalized)
            .ok_or_else(|| ModelError::InvalidScope {
                value: value.to_string(),
            })
    }
}

impl fmt::Display for QrdaScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
