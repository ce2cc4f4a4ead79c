//! Per-invocation conversion settings.

use std::collections::BTreeSet;
use std::path::PathBuf;

use crate::template::TemplateId;

/// Settings for one batch of conversions.
///
/// Built once from the invocation and shared by reference with every file
/// task; nothing mutates it after construction.
#[derive(Debug, Clone)]
pub struct ConversionConfig {
    /// Bypass the validation phase entirely.
    pub skip_validation: bool,
    /// Strip synthesized default nodes before validation.
    pub skip_defaults: bool,
    /// Templates eligible for decoding and validation; `None` means all.
    pub scope: Option<BTreeSet<TemplateId>>,
    /// Directory receiving success and error artifacts.
    pub output_dir: PathBuf,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            skip_validation: false,
            skip_defaults: false,
            scope: None,
            output_dir: PathBuf::from("."),
        }
    }
}

impl ConversionConfig {
    #[must_use]
    pub fn with_skip_validation(mut self, enable: bool) -> Self {
        self.skip_validation = enable;
        self
    }

    #[must_use]
    pub fn with_skip_defaults(mut self, enable: bool) -> Self {
        self.skip_defaults = enable;
        self
    }

    #[must_use]
    pub fn with_scope(mut self, scope: Option<BTreeSet<TemplateId>>) -> Self {
        self.scope = scope;
        self
    }

    #[must_use]
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Whether `template` passes the scope filter.
    pub fn in_scope(&self, template: TemplateId) -> bool {
        self.scope
            .as_ref()
            .is_none_or(|scope| scope.contains(&template))
    }
}
