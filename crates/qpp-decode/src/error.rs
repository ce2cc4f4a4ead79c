use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("The file is not a valid XML document: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("The file is not a valid XML document: {message}")]
    Malformed { message: String },
}

impl DecodeError {
    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DecodeError>;
