//! Single-file conversion: decode, validate, then encode or report.

use std::any::Any;
use std::io::{ErrorKind, Write};
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::path::Path;

use qpp_decode::{DecoderRegistry, decode_with, default_registry, xml};
use qpp_encode::{ErrorReport, OutputEncoder};
use qpp_model::ConversionConfig;
use qpp_validate::{MeasureConfigs, ValidationEngine, ValidatorRegistry, default_validator_registry};
use tempfile::NamedTempFile;
use tracing::{debug, error, info, info_span, warn};

use crate::naming::{error_output_path, qpp_output_path, source_identifier};
use crate::outcome::{ConversionError, FileReport, Outcome};

/// Converts one file at a time; shared by reference across batch tasks.
#[derive(Clone, Copy)]
pub struct Converter<'a> {
    decoders: &'a DecoderRegistry,
    validators: &'a ValidatorRegistry,
    measures: &'a MeasureConfigs,
    encoder: &'a dyn OutputEncoder,
    config: &'a ConversionConfig,
}

impl<'a> Converter<'a> {
    /// Converter using the standard decoder and validator registries.
    pub fn new(
        config: &'a ConversionConfig,
        measures: &'a MeasureConfigs,
        encoder: &'a dyn OutputEncoder,
    ) -> Self {
        Self {
            decoders: default_registry(),
            validators: default_validator_registry(),
            measures,
            encoder,
            config,
        }
    }

    #[must_use]
    pub fn with_registries(
        mut self,
        decoders: &'a DecoderRegistry,
        validators: &'a ValidatorRegistry,
    ) -> Self {
        self.decoders = decoders;
        self.validators = validators;
        self
    }

    pub fn config(&self) -> &'a ConversionConfig {
        self.config
    }

    /// Convert `input`. Never panics; every failure becomes an [`Outcome`].
    pub fn convert(&self, input: &Path) -> FileReport {
        let span = info_span!("convert", file = %input.display());
        let _guard = span.enter();

        let outcome = match catch_unwind(AssertUnwindSafe(|| self.run(input))) {
            Ok(Ok(outcome)) => outcome,
            Ok(Err(failure)) => {
                error!(kind = failure.kind(), error = %failure, "conversion failed");
                Outcome::Failed(failure)
            }
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                error!(%message, "conversion panicked");
                Outcome::Failed(ConversionError::Unexpected { message })
            }
        };
        FileReport {
            input: input.to_path_buf(),
            outcome,
        }
    }

    fn run(&self, input: &Path) -> Result<Outcome, ConversionError> {
        if !input.is_file() {
            warn!("input no longer exists, skipping");
            return Ok(Outcome::Skipped);
        }

        let raw = xml::parse_file(input)?;
        let root = decode_with(self.decoders, &raw, self.config);
        info!(template = %root.template(), "decoded");

        let errors = if self.config.skip_validation {
            debug!("validation skipped");
            Vec::new()
        } else {
            ValidationEngine::new(self.validators, self.measures)
                .with_scope(self.config.scope.as_ref())
                .validate(&root)
        };

        if errors.is_empty() {
            let output = qpp_output_path(input, &self.config.output_dir);
            let mut buffer = Vec::new();
            self.encoder.encode(&root, &mut buffer)?;
            write_atomically(&output, &buffer)?;
            remove_stale(&error_output_path(input, &self.config.output_dir))?;
            info!(output = %output.display(), encoder = self.encoder.name(), "converted");
            return Ok(Outcome::Converted { output });
        }

        let report = error_output_path(input, &self.config.output_dir);
        let mut buffer = Vec::new();
        ErrorReport::new(source_identifier(input), errors.clone()).write_to(&mut buffer)?;
        write_atomically(&report, &buffer)?;
        remove_stale(&qpp_output_path(input, &self.config.output_dir))?;
        info!(errors = errors.len(), report = %report.display(), "rejected");
        Ok(Outcome::Rejected { report, errors })
    }
}

/// Write through a temporary file in the destination directory, then rename,
/// so a reader never sees a partial artifact.
fn write_atomically(path: &Path, contents: &[u8]) -> Result<(), ConversionError> {
    let io_error = |source| ConversionError::Io {
        path: path.to_path_buf(),
        source,
    };
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir).map_err(io_error)?;
    let mut file = NamedTempFile::new_in(dir).map_err(io_error)?;
    file.write_all(contents).map_err(io_error)?;
    file.persist(path).map_err(|persist| io_error(persist.error))?;
    Ok(())
}

/// Drop the artifact a previous run left under the other suffix, so each
/// input has exactly one artifact.
fn remove_stale(path: &Path) -> Result<(), ConversionError> {
    match std::fs::remove_file(path) {
        Ok(()) => {
            debug!(stale = %path.display(), "removed stale artifact");
            Ok(())
        }
        Err(source) if source.kind() == ErrorKind::NotFound => Ok(()),
        Err(source) => Err(ConversionError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        return (*message).to_string();
    }
    if let Some(message) = payload.downcast_ref::<String>() {
        return message.clone();
    }
    "panic with a non-string payload".to_string()
}
