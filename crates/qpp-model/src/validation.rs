use std::fmt;

use serde::Serialize;

use crate::path::NodePath;

/// A domain-rule violation found while validating one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    message: String,
    path: NodePath,
}

impl ValidationError {
    pub fn new(message: impl Into<String>, path: NodePath) -> Self {
        Self {
            message: message.into(),
            path,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn path(&self) -> &NodePath {
        &self.path
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (at {})", self.message, self.path)
    }
}
