use thiserror::Error;

/// Failure to read an enumerated form value such as a condition grade.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind}: {value:?}")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

impl ParseEnumError {
    pub fn new(kind: &'static str, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }
}

/// Errors raised outside of form validation: configuration and serving.
///
/// Validation problems are never reported through this type; they are
/// data inside a [`crate::models::ValidationResult`].
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid configuration for {key}: {message}")]
    Config { key: &'static str, message: String },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
