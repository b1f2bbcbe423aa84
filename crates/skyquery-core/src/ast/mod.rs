//! Abstract Syntax Tree for skyquery filters

pub mod operator;
pub mod predicate;
pub mod value_expr;

pub use operator::CompareOp;
pub use predicate::{FieldRef, Predicate};
pub use value_expr::{Computed, ValueExpr};
