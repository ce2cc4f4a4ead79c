//! Template decoders.
//!
//! | Template                  | Decoder                            |
//! |---------------------------|------------------------------------|
//! | `ClinicalDocument`        | [`ClinicalDocumentDecoder`]        |
//! | `ReportingParametersAct`  | [`ReportingParametersDecoder`]     |
//! | `MeasureSection`          | [`SectionDecoder::quality`]        |
//! | `AciSection`              | [`SectionDecoder::aci`]            |
//! | `IaSection`               | [`SectionDecoder::ia`]             |
//! | `MeasureReferenceResults` | [`MeasureReferenceResultsDecoder`] |
//! | `MeasureData`             | [`MeasureDataDecoder`]             |
//! | `AggregateCount`          | [`AggregateCountDecoder`]          |
//! | `PerformanceRate`         | [`PerformanceRateDecoder`]         |
//! | `AciNumeratorDenominator` | [`AciNumeratorDenominatorDecoder`] |
//! | `IaMeasure`               | [`IaMeasureDecoder`]               |
//! | anything else             | [`DefaultDecoder`]                 |

mod aci;
mod clinical_document;
mod common;
mod default;
mod ia;
mod quality;
mod registry;
mod reporting_parameters;
mod section;

pub use aci::AciNumeratorDenominatorDecoder;
pub use clinical_document::{
    ClinicalDocumentDecoder, ENTITY_TYPE, NPI, NPI_ROOT, PROGRAM_NAME, TAX_ID, TIN_ROOT,
};
pub use default::DefaultDecoder;
pub use ia::{IaMeasureDecoder, MEASURE_PERFORMED};
pub use quality::{
    AGGREGATE_COUNT, AggregateCountDecoder, MEASURE_ID, MeasureDataDecoder,
    MeasureReferenceResultsDecoder, NULL_FLAVOR, POPULATION_ID, POPULATION_TYPE,
    PERFORMANCE_RATE, PerformanceRateDecoder,
};
pub use registry::{DecoderRegistry, NodeDecoder, default_registry};
pub use reporting_parameters::{
    DEFAULT_PERFORMANCE_END, DEFAULT_PERFORMANCE_START, PERFORMANCE_END, PERFORMANCE_START,
    ReportingParametersDecoder,
};
pub use section::{CATEGORY, SectionDecoder};
