use qpp_model::{NodePath, TemplateId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("failed to write output: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize output: {0}")]
    Json(#[from] serde_json::Error),

    #[error("cannot encode a document whose root is {template}")]
    NotAClinicalDocument { template: TemplateId },

    #[error("invalid {key} value '{value}' at {path}")]
    InvalidValue {
        key: &'static str,
        value: String,
        path: NodePath,
    },
}

pub type Result<T> = std::result::Result<T, EncodeError>;
