//! Error types for skyquery Core

use thiserror::Error;

/// Core error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// A variable referenced by the predicate was never bound
    #[error("Unbound variable: {0}")]
    UnboundVariable(String),

    /// Member access on a value that has no such member
    #[error("Member '{member}' not found on {target}")]
    MemberNotFound { target: String, member: String },

    /// A computed value failed while being forced
    #[error("Evaluation failed: {0}")]
    Evaluation(String),

    /// Predicate shape the extractor does not understand
    #[error("Unsupported predicate: {0}")]
    UnsupportedPredicate(String),

    #[error("Type error: {0}")]
    TypeError(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;
