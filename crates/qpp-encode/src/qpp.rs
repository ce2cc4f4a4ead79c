//! QPP submission JSON.
//!
//! Each ACI, IA and quality section becomes one measurement set; its
//! reporting parameters give the performance period and its entries give
//! the measurements.

use std::io::Write;

use chrono::{Datelike, NaiveDate};
use qpp_decode::decoders::{
    AGGREGATE_COUNT, CATEGORY, ENTITY_TYPE, MEASURE_ID, MEASURE_PERFORMED, NPI, PERFORMANCE_END,
    PERFORMANCE_START, POPULATION_TYPE, PROGRAM_NAME, TAX_ID,
};
use qpp_model::{Node, TemplateId};
use serde::Serialize;

use crate::encoder::OutputEncoder;
use crate::error::{EncodeError, Result};

pub const SUBMISSION_METHOD: &str = "electronicHealthRecord";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub program_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub taxpayer_identification_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub national_provider_identifier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub performance_year: Option<i32>,
    pub measurement_sets: Vec<MeasurementSet>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MeasurementSet {
    pub category: String,
    pub submission_method: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub performance_start: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub performance_end: Option<NaiveDate>,
    pub measurements: Vec<Measurement>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Measurement {
    pub measure_id: String,
    pub value: MeasurementValue,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MeasurementValue {
    Quality(QualityValue),
    Aci(AciValue),
    Ia(bool),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityValue {
    pub is_end_to_end_reported: bool,
    pub eligible_population: u64,
    pub performance_met: u64,
    pub performance_not_met: u64,
    pub eligible_population_exclusion: u64,
    pub eligible_population_exception: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AciValue {
    pub numerator: u64,
    pub denominator: u64,
}

/// Encoder for the QPP submission format.
#[derive(Debug, Clone, Copy, Default)]
pub struct QppJsonEncoder;

impl QppJsonEncoder {
    /// Build the submission model without serializing it.
    pub fn submission(&self, root: &Node) -> Result<Submission> {
        if root.template() != TemplateId::ClinicalDocument {
            return Err(EncodeError::NotAClinicalDocument {
                template: root.template(),
            });
        }

        let measurement_sets = root
            .pre_order()
            .filter(|node| node.template().is_section())
            .map(measurement_set)
            .collect::<Result<Vec<_>>>()?;
        let performance_year = measurement_sets
            .iter()
            .find_map(|set| set.performance_start)
            .map(|start| start.year());

        Ok(Submission {
            program_name: owned(root, PROGRAM_NAME),
            entity_type: owned(root, ENTITY_TYPE),
            taxpayer_identification_number: owned(root, TAX_ID),
            national_provider_identifier: owned(root, NPI),
            performance_year,
            measurement_sets,
        })
    }
}

impl OutputEncoder for QppJsonEncoder {
    fn name(&self) -> &'static str {
        "qpp-json"
    }

    fn encode(&self, root: &Node, sink: &mut dyn Write) -> Result<()> {
        let submission = self.submission(root)?;
        serde_json::to_writer_pretty(&mut *sink, &submission)?;
        sink.write_all(b"\n")?;
        tracing::debug!(
            measurement_sets = submission.measurement_sets.len(),
            "encoded submission"
        );
        Ok(())
    }
}

fn owned(node: &Node, key: &str) -> Option<String> {
    node.value(key).map(str::to_string)
}

fn measurement_set(section: &Node) -> Result<MeasurementSet> {
    let parameters = section
        .children()
        .iter()
        .find(|child| child.template() == TemplateId::ReportingParametersAct);
    let (performance_start, performance_end) = match parameters {
        Some(parameters) => (
            date(parameters, PERFORMANCE_START)?,
            date(parameters, PERFORMANCE_END)?,
        ),
        None => (None, None),
    };

    let mut measurements = Vec::new();
    for child in section.children() {
        let value = match child.template() {
            TemplateId::MeasureReferenceResults => MeasurementValue::Quality(quality(child)?),
            TemplateId::AciNumeratorDenominator => MeasurementValue::Aci(aci(child)?),
            TemplateId::IaMeasure => {
                MeasurementValue::Ia(child.value(MEASURE_PERFORMED) == Some("Y"))
            }
            _ => continue,
        };
        measurements.push(Measurement {
            measure_id: child.value(MEASURE_ID).unwrap_or_default().to_string(),
            value,
        });
    }

    Ok(MeasurementSet {
        category: section.value(CATEGORY).unwrap_or_default().to_string(),
        submission_method: SUBMISSION_METHOD,
        performance_start,
        performance_end,
        measurements,
    })
}

fn quality(results: &Node) -> Result<QualityValue> {
    let mut denominator = 0u64;
    let mut numerator = 0u64;
    let mut exclusions = 0u64;
    let mut exceptions = 0u64;
    for data in results.children() {
        if data.template() != TemplateId::MeasureData {
            continue;
        }
        let slot = match data.value(POPULATION_TYPE) {
            Some("DENOM") => &mut denominator,
            Some("NUMER") => &mut numerator,
            Some("DENEX") => &mut exclusions,
            Some("DENEXCEP") => &mut exceptions,
            _ => continue,
        };
        let count = aggregate_count(data)?;
        *slot = slot
            .checked_add(count)
            .ok_or_else(|| EncodeError::InvalidValue {
                key: AGGREGATE_COUNT,
                value: count.to_string(),
                path: data.path().clone(),
            })?;
    }
    Ok(QualityValue {
        is_end_to_end_reported: true,
        eligible_population: denominator,
        performance_met: numerator,
        performance_not_met: denominator
            .saturating_sub(numerator)
            .saturating_sub(exclusions)
            .saturating_sub(exceptions),
        eligible_population_exclusion: exclusions,
        eligible_population_exception: exceptions,
    })
}

fn aci(measure: &Node) -> Result<AciValue> {
    let count_of = |template: TemplateId| -> Result<u64> {
        match measure
            .children()
            .iter()
            .find(|child| child.template() == template)
        {
            Some(child) => aggregate_count(child),
            None => Ok(0),
        }
    };
    Ok(AciValue {
        numerator: count_of(TemplateId::AciNumerator)?,
        denominator: count_of(TemplateId::AciDenominator)?,
    })
}

/// Count of the first aggregate count child; absent counts are zero.
fn aggregate_count(parent: &Node) -> Result<u64> {
    let Some(count) = parent.find_first(TemplateId::AggregateCount) else {
        return Ok(0);
    };
    let Some(value) = count.value(AGGREGATE_COUNT) else {
        return Ok(0);
    };
    value.trim().parse().map_err(|_| EncodeError::InvalidValue {
        key: AGGREGATE_COUNT,
        value: value.to_string(),
        path: count.path().clone(),
    })
}

fn date(node: &Node, key: &'static str) -> Result<Option<NaiveDate>> {
    let Some(value) = node.value(key) else {
        return Ok(None);
    };
    value
        .trim()
        .get(..8)
        .and_then(|digits| NaiveDate::parse_from_str(digits, "%Y%m%d").ok())
        .map(Some)
        .ok_or_else(|| EncodeError::InvalidValue {
            key,
            value: value.to_string(),
            path: node.path().clone(),
        })
}
