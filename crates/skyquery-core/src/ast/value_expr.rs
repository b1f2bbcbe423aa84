//! Value expression nodes
//!
//! The right-hand side of a comparison. Everything except `Field` is
//! independent of the query's open parameter and gets folded to a literal by
//! the partial evaluator.

use crate::error::Result;
use crate::types::Value;
use std::fmt;
use std::sync::Arc;

/// Value expression AST node
#[derive(Debug, Clone, PartialEq)]
pub enum ValueExpr {
    /// Field of the entity being queried (e.g. `feed.Limit`)
    Field(String),

    /// Literal value
    Literal(Value),

    /// Captured variable, resolved from `Captures`
    Variable(String),

    /// Member access (e.g. `settings.limit`)
    Member {
        target: Box<ValueExpr>,
        member: String,
    },

    /// Caller-supplied computation, forced during partial evaluation
    Computed(Computed),
}

/// Deferred, fallible computation embedded in a predicate
#[derive(Clone)]
pub struct Computed {
    label: String,
    func: Arc<dyn Fn() -> Result<Value> + Send + Sync>,
}

impl Computed {
    pub fn new<F>(label: impl Into<String>, func: F) -> Self
    where
        F: Fn() -> Result<Value> + Send + Sync + 'static,
    {
        Self {
            label: label.into(),
            func: Arc::new(func),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Run the computation
    pub fn invoke(&self) -> Result<Value> {
        (self.func)()
    }
}

impl fmt::Debug for Computed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Computed").field("label", &self.label).finish()
    }
}

impl PartialEq for Computed {
    fn eq(&self, other: &Self) -> bool {
        self.label == other.label && Arc::ptr_eq(&self.func, &other.func)
    }
}

impl ValueExpr {
    /// Create a field reference
    pub fn field(name: impl Into<String>) -> Self {
        ValueExpr::Field(name.into())
    }

    /// Create a literal expression
    pub fn literal(value: impl Into<Value>) -> Self {
        ValueExpr::Literal(value.into())
    }

    /// Create a captured-variable reference
    pub fn var(name: impl Into<String>) -> Self {
        ValueExpr::Variable(name.into())
    }

    /// Access a member of this expression's value
    pub fn member(self, member: impl Into<String>) -> Self {
        ValueExpr::Member {
            target: Box::new(self),
            member: member.into(),
        }
    }

    /// Wrap a fallible closure
    pub fn computed<F>(label: impl Into<String>, func: F) -> Self
    where
        F: Fn() -> Result<Value> + Send + Sync + 'static,
    {
        ValueExpr::Computed(Computed::new(label, func))
    }

    /// True if any node refers to the query's open parameter
    pub fn references_parameter(&self) -> bool {
        match self {
            ValueExpr::Field(_) => true,
            ValueExpr::Member { target, .. } => target.references_parameter(),
            ValueExpr::Literal(_) | ValueExpr::Variable(_) | ValueExpr::Computed(_) => false,
        }
    }

    pub fn as_literal(&self) -> Option<&Value> {
        match self {
            ValueExpr::Literal(v) => Some(v),
            _ => None,
        }
    }

    /// Field name when this is a plain field reference
    pub fn as_field(&self) -> Option<&str> {
        match self {
            ValueExpr::Field(name) => Some(name),
            _ => None,
        }
    }
}

impl fmt::Display for ValueExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueExpr::Field(name) => write!(f, "it.{}", name),
            ValueExpr::Literal(v) => write!(f, "{}", v),
            ValueExpr::Variable(name) => write!(f, "{}", name),
            ValueExpr::Member { target, member } => write!(f, "{}.{}", target, member),
            ValueExpr::Computed(c) => write!(f, "{}()", c.label()),
        }
    }
}
