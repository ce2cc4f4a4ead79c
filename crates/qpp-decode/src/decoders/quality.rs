//! eCQM entries of the measure section.

use qpp_model::{Node, TemplateId};

use super::common::{external_document_extension, put_optional};
use super::registry::NodeDecoder;
use crate::raw::RawElement;

pub const MEASURE_ID: &str = "measureId";
pub const POPULATION_TYPE: &str = "type";
pub const POPULATION_ID: &str = "populationId";
pub const AGGREGATE_COUNT: &str = "aggregateCount";
pub const PERFORMANCE_RATE: &str = "performanceRate";
pub const NULL_FLAVOR: &str = "nullFlavor";

/// Measure reference and results organizer. The measure id is the eCQM
/// version-specific UUID.
pub struct MeasureReferenceResultsDecoder;

impl NodeDecoder for MeasureReferenceResultsDecoder {
    fn template(&self) -> TemplateId {
        TemplateId::MeasureReferenceResults
    }

    fn description(&self) -> &'static str {
        "Measure reference and results"
    }

    fn decode(&self, element: &RawElement, node: &mut Node) {
        put_optional(node, MEASURE_ID, external_document_extension(element));
    }
}

/// One population (IPOP, DENOM, NUMER, ...) of a measure.
pub struct MeasureDataDecoder;

impl NodeDecoder for MeasureDataDecoder {
    fn template(&self) -> TemplateId {
        TemplateId::MeasureData
    }

    fn description(&self) -> &'static str {
        "Measure data population"
    }

    fn decode(&self, element: &RawElement, node: &mut Node) {
        put_optional(node, POPULATION_TYPE, element.descend_attribute(&["value"], "code"));
        put_optional(
            node,
            POPULATION_ID,
            element.descend_attribute(&["reference", "externalObservation", "id"], "root"),
        );
    }
}

pub struct AggregateCountDecoder;

impl NodeDecoder for AggregateCountDecoder {
    fn template(&self) -> TemplateId {
        TemplateId::AggregateCount
    }

    fn description(&self) -> &'static str {
        "Aggregate count"
    }

    fn decode(&self, element: &RawElement, node: &mut Node) {
        put_optional(node, AGGREGATE_COUNT, element.descend_attribute(&["value"], "value"));
    }
}

pub struct PerformanceRateDecoder;

impl NodeDecoder for PerformanceRateDecoder {
    fn template(&self) -> TemplateId {
        TemplateId::PerformanceRate
    }

    fn description(&self) -> &'static str {
        "Performance rate"
    }

    fn decode(&self, element: &RawElement, node: &mut Node) {
        let Some(value) = element.child("value") else {
            return;
        };
        put_optional(node, PERFORMANCE_RATE, value.attribute("value"));
        put_optional(node, NULL_FLAVOR, value.attribute("nullFlavor"));
    }
}
