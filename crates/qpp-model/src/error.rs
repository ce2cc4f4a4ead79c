use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("A given template scope was invalid: {value}")]
    InvalidScope { value: String },
}

pub type Result<T> = std::result::Result<T, ModelError>;
