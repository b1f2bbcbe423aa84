//! skyquery Core - Predicate and value types for declarative API queries
//!
//! This crate provides the caller-facing half of the query pipeline:
//! - Value types for literals and captured variables
//! - Predicate tree (AND/Equals over named fields)
//! - Partial evaluation of captured variables into literals
//! - Parameter extraction into a name -> string map
//! - Error types

pub mod ast;
pub mod error;
pub mod eval;
pub mod types;

// Re-export commonly used types
pub use ast::{CompareOp, Predicate, ValueExpr};
pub use error::{CoreError, Result};
pub use eval::{Captures, ParameterExtractor, ParameterMap, PartialEvaluator};
pub use types::{QueryEnum, TimestampFormat, Value};
