//! JSON error report written when a document fails validation.

use std::io::Write;

use qpp_model::ValidationError;
use serde::Serialize;

use crate::error::Result;

/// `{"sourceIdentifier": ..., "errors": [{"message": ..., "path": ...}]}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorReport {
    pub source_identifier: String,
    pub errors: Vec<ValidationError>,
}

impl ErrorReport {
    pub fn new(source_identifier: impl Into<String>, errors: Vec<ValidationError>) -> Self {
        Self {
            source_identifier: source_identifier.into(),
            errors,
        }
    }

    /// Pretty JSON followed by a newline.
    pub fn write_to(&self, sink: &mut dyn Write) -> Result<()> {
        serde_json::to_writer_pretty(&mut *sink, self)?;
        sink.write_all(b"\n")?;
        Ok(())
    }
}
