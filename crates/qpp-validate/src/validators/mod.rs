//! Built-in validators, one per known template.

mod aci;
mod clinical_document;
mod common;
mod ia;
mod quality;
mod reporting_parameters;
mod section;

pub use aci::{
    ACI_MEASURE_ID_MISSING, AciCountValidator, AciNumeratorDenominatorValidator,
    DENOMINATOR_COUNT_REQUIRED, NUMERATOR_COUNT_REQUIRED, ONE_DENOMINATOR_REQUIRED,
    ONE_NUMERATOR_REQUIRED,
};
pub use clinical_document::{
    ClinicalDocumentValidator, INCORRECT_PROGRAM_NAME, ONE_SECTION_REQUIRED, PROGRAM_NAME_MISSING,
    TAX_ID_MISSING, VALID_PROGRAM_NAMES,
};
pub use common::DUPLICATE_MEASURE_ID;
pub use ia::{
    IA_MEASURE_ID_MISSING, IaMeasureValidator, MEASURE_PERFORMED_INVALID,
};
pub use quality::{
    AGGREGATE_COUNT_INVALID, AGGREGATE_COUNT_MISSING, AggregateCountValidator, DENEX, DENEXCEP,
    MEASURE_GUID_MISSING, MeasureDataValidator, MeasureReferenceResultsValidator,
    NO_CHILD_MEASURE, ONE_AGGREGATE_COUNT, PERFORMANCE_RATE_INVALID, PERFORMANCE_RATE_MISSING,
    POPULATION_TYPE_INVALID, POPULATION_TYPE_MISSING, PerformanceRateValidator,
    REQUIRED_CHILD_MEASURE, VALID_POPULATION_TYPES, required_child_measure,
};
pub use reporting_parameters::{
    INVALID_PERFORMANCE_DATE, PERFORMANCE_END_MISSING, PERFORMANCE_PERIOD_REVERSED,
    PERFORMANCE_START_MISSING, ReportingParametersValidator, parse_performance_date,
};
pub use section::SectionValidator;
