//! Per-file results.

use std::path::PathBuf;

use qpp_decode::DecodeError;
use qpp_encode::EncodeError;
use qpp_model::ValidationError;
use thiserror::Error;

/// Why a file produced no artifact.
#[derive(Debug, Error)]
pub enum ConversionError {
    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Encode(#[from] EncodeError),

    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("output {} would also be written for {}", output.display(), other.display())]
    OutputCollision { output: PathBuf, other: PathBuf },

    #[error("unexpected failure: {message}")]
    Unexpected { message: String },
}

impl ConversionError {
    /// Stable label for summaries and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Decode(_) => "decode",
            Self::Encode(_) => "encode",
            Self::Io { .. } => "io",
            Self::OutputCollision { .. } => "output-collision",
            Self::Unexpected { .. } => "unexpected",
        }
    }
}

#[derive(Debug)]
pub enum Outcome {
    /// QPP JSON written to `output`.
    Converted { output: PathBuf },
    /// Validation failed; the error report was written to `report`.
    Rejected {
        report: PathBuf,
        errors: Vec<ValidationError>,
    },
    /// The input vanished between resolution and conversion.
    Skipped,
    Failed(ConversionError),
}

impl Outcome {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Converted { .. } => "converted",
            Self::Rejected { .. } => "rejected",
            Self::Skipped => "skipped",
            Self::Failed(_) => "failed",
        }
    }

    pub fn is_converted(&self) -> bool {
        matches!(self, Self::Converted { .. })
    }

    /// Artifact written for this file, if any.
    pub fn artifact(&self) -> Option<&PathBuf> {
        match self {
            Self::Converted { output } => Some(output),
            Self::Rejected { report, .. } => Some(report),
            Self::Skipped | Self::Failed(_) => None,
        }
    }
}

#[derive(Debug)]
pub struct FileReport {
    pub input: PathBuf,
    pub outcome: Outcome,
}
