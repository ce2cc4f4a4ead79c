//! eCQM rules: measure reference results and their populations.

use qpp_decode::decoders::{
    AGGREGATE_COUNT, MEASURE_ID, NULL_FLAVOR, PERFORMANCE_RATE, POPULATION_TYPE,
};
use qpp_model::{Node, TemplateId};

use super::common::report_duplicate_measures;
use crate::context::ValidationContext;
use crate::measures::SubPopulation;
use crate::registry::NodeValidator;

pub const MEASURE_GUID_MISSING: &str = "The measure reference results must have a measure GUID";
pub const NO_CHILD_MEASURE: &str = "The measure reference results must have at least one measure";
/// Template for a missing population; `{}` is the population name.
pub const REQUIRED_CHILD_MEASURE: &str = "The eCQM measure requires a {}";
pub const DENEX: &str = "denominator exclusion";
pub const DENEXCEP: &str = "denominator exception";

pub const POPULATION_TYPE_MISSING: &str = "The measure data must have a population type";
pub const POPULATION_TYPE_INVALID: &str =
    "The measure data population type must be one of IPOP, DENOM, NUMER, DENEX or DENEXCEP";
pub const ONE_AGGREGATE_COUNT: &str = "The measure data must have exactly one aggregate count";
pub const VALID_POPULATION_TYPES: [&str; 5] = ["IPOP", "DENOM", "NUMER", "DENEX", "DENEXCEP"];

pub const AGGREGATE_COUNT_MISSING: &str = "The aggregate count must have a value";
pub const AGGREGATE_COUNT_INVALID: &str = "The aggregate count must be a non-negative integer";

pub const PERFORMANCE_RATE_MISSING: &str = "The performance rate must have a value";
pub const PERFORMANCE_RATE_INVALID: &str =
    "The performance rate must be a number between 0 and 1";

pub fn required_child_measure(population: &str) -> String {
    REQUIRED_CHILD_MEASURE.replace("{}", population)
}

pub struct MeasureReferenceResultsValidator;

impl MeasureReferenceResultsValidator {
    fn validate_sub_population(
        node: &Node,
        sub_population: &SubPopulation,
        context: &mut ValidationContext<'_>,
    ) {
        let required = [
            (&sub_population.denominator_exclusions_uuid, "DENEX", DENEX),
            (&sub_population.denominator_exceptions_uuid, "DENEXCEP", DENEXCEP),
        ];
        for (uuid, population, label) in required {
            if uuid.is_none() {
                continue;
            }
            context.thoroughly_check(node).children_matching(
                &required_child_measure(label),
                1,
                |child| child.value(POPULATION_TYPE) == Some(population),
            );
        }
    }
}

impl NodeValidator for MeasureReferenceResultsValidator {
    fn template(&self) -> TemplateId {
        TemplateId::MeasureReferenceResults
    }

    fn validate_node(&self, node: &Node, context: &mut ValidationContext<'_>) {
        context
            .thoroughly_check(node)
            .value(MEASURE_GUID_MISSING, MEASURE_ID)
            .child_minimum(NO_CHILD_MEASURE, 1, &[TemplateId::MeasureData]);

        let measures = context.measures();
        let Some(config) = node.value(MEASURE_ID).and_then(|id| measures.get(id)) else {
            return;
        };
        for sub_population in &config.sub_population {
            Self::validate_sub_population(node, sub_population, context);
        }
    }

    fn validate_group(&self, nodes: &[&Node], context: &mut ValidationContext<'_>) {
        report_duplicate_measures(nodes, context);
    }
}

pub struct MeasureDataValidator;

impl NodeValidator for MeasureDataValidator {
    fn template(&self) -> TemplateId {
        TemplateId::MeasureData
    }

    fn validate_node(&self, node: &Node, context: &mut ValidationContext<'_>) {
        context
            .check(node)
            .value(POPULATION_TYPE_MISSING, POPULATION_TYPE)
            .value_in(POPULATION_TYPE_INVALID, POPULATION_TYPE, &VALID_POPULATION_TYPES);
        context
            .check(node)
            .child_exact(ONE_AGGREGATE_COUNT, 1, &[TemplateId::AggregateCount]);
    }
}

pub struct AggregateCountValidator;

impl NodeValidator for AggregateCountValidator {
    fn template(&self) -> TemplateId {
        TemplateId::AggregateCount
    }

    fn validate_node(&self, node: &Node, context: &mut ValidationContext<'_>) {
        context
            .check(node)
            .value(AGGREGATE_COUNT_MISSING, AGGREGATE_COUNT)
            .satisfies(AGGREGATE_COUNT_INVALID, |node| {
                node.value(AGGREGATE_COUNT)
                    .is_some_and(|count| count.trim().parse::<u64>().is_ok())
            });
    }
}

pub struct PerformanceRateValidator;

impl NodeValidator for PerformanceRateValidator {
    fn template(&self) -> TemplateId {
        TemplateId::PerformanceRate
    }

    fn validate_node(&self, node: &Node, context: &mut ValidationContext<'_>) {
        // A rate that cannot be computed is reported as nullFlavor="NA".
        if node.value(NULL_FLAVOR) == Some("NA") {
            return;
        }
        context
            .check(node)
            .value(PERFORMANCE_RATE_MISSING, PERFORMANCE_RATE)
            .satisfies(PERFORMANCE_RATE_INVALID, |node| {
                node.value(PERFORMANCE_RATE)
                    .and_then(|rate| rate.trim().parse::<f64>().ok())
                    .is_some_and(|rate| (0.0..=1.0).contains(&rate))
            });
    }
}
