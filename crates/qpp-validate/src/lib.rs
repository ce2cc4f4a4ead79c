//! Validation of decoded QRDA III trees.
//!
//! [`ValidationEngine`] runs the validators of a [`ValidatorRegistry`] over a
//! [`qpp_model::Node`] tree in two phases (per template group, then per
//! node) and returns every problem found as a
//! [`qpp_model::ValidationError`]. Validators express their rules through
//! the fluent [`Checker`] obtained from the [`ValidationContext`].

mod context;
mod engine;
pub mod measures;
mod registry;
pub mod validators;

pub use context::{Checker, ValidationContext};
pub use engine::{NOT_A_QRDA_DOCUMENT, ValidationEngine};
pub use measures::{
    MeasureConfig, MeasureConfigError, MeasureConfigs, SubPopulation, load_default_measure_configs,
    standards_root,
};
pub use registry::{NodeValidator, ValidatorRegistry, default_validator_registry};

use qpp_model::{ConversionConfig, Node, ValidationError};

/// Validate `root` with the standard validators under `config`'s scope.
pub fn validate_document(
    root: &Node,
    config: &ConversionConfig,
    measures: &MeasureConfigs,
) -> Vec<ValidationError> {
    ValidationEngine::new(default_validator_registry(), measures)
        .with_scope(config.scope.as_ref())
        .validate(root)
}
