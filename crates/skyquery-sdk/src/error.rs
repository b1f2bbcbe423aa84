//! SDK error types

use thiserror::Error;

/// SDK error type
#[derive(Error, Debug)]
pub enum SdkError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Predicate evaluation or extraction error
    #[error("Query error: {0}")]
    Core(#[from] skyquery_core::CoreError),

    /// Request building, dispatch or mapping error
    #[error("Runtime error: {0}")]
    Runtime(#[from] skyquery_runtime::RuntimeError),

    /// YAML configuration could not be read
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// `single` found no results
    #[error("Sequence contains no elements")]
    NoElements,

    /// `single` or `single_or_default` found several results
    #[error("Sequence contains more than one element ({0})")]
    MoreThanOneElement(usize),
}

impl SdkError {
    /// The underlying runtime error, if any
    pub fn as_runtime(&self) -> Option<&skyquery_runtime::RuntimeError> {
        match self {
            SdkError::Runtime(e) => Some(e),
            _ => None,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(
            self,
            SdkError::Runtime(skyquery_runtime::RuntimeError::Cancelled)
        )
    }
}

/// Result type for SDK operations
pub type Result<T> = std::result::Result<T, SdkError>;
