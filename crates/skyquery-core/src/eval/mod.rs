//! Predicate evaluation
//!
//! Two passes run before a request can be built: partial evaluation folds
//! every caller-side expression into a literal, then extraction reads the
//! `field == literal` pairs out of the folded tree.

pub mod extract;
pub mod partial;

pub use extract::{ParameterExtractor, ParameterMap};
pub use partial::{Captures, PartialEvaluator};
