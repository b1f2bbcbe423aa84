//! Predicate AST nodes
//!
//! A caller's filter, e.g.
//!
//! ```rust
//! use skyquery_core::Predicate;
//!
//! let limit = 25;
//! let filter = Predicate::field("Algorithm").eq("reverse-chronological")
//!     & Predicate::field("Limit").eq(limit)
//!     & Predicate::field("Cursor").eq_var("cursor");
//! ```
//!
//! The tree accepts any comparison and any boolean combinator. Whether a
//! shape can be turned into a request is decided later, by the extractor.

use super::operator::CompareOp;
use super::value_expr::ValueExpr;
use crate::types::Value;
use std::fmt;
use std::ops::{BitAnd, BitOr, Not};

/// Predicate AST node
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// Conjunction
    And(Box<Predicate>, Box<Predicate>),

    /// Disjunction (never translatable)
    Or(Box<Predicate>, Box<Predicate>),

    /// Negation (never translatable)
    Not(Box<Predicate>),

    /// Comparison between two value expressions
    Compare {
        left: ValueExpr,
        op: CompareOp,
        right: ValueExpr,
    },
}

/// Left-hand side of a comparison under construction
#[derive(Debug, Clone)]
pub struct FieldRef(String);

impl FieldRef {
    pub fn name(&self) -> &str {
        &self.0
    }

    fn compare(self, op: CompareOp, right: ValueExpr) -> Predicate {
        Predicate::Compare {
            left: ValueExpr::Field(self.0),
            op,
            right,
        }
    }

    /// `field == literal`
    pub fn eq(self, value: impl Into<Value>) -> Predicate {
        self.compare(CompareOp::Eq, ValueExpr::Literal(value.into()))
    }

    /// `field == variable`
    pub fn eq_var(self, name: impl Into<String>) -> Predicate {
        self.compare(CompareOp::Eq, ValueExpr::Variable(name.into()))
    }

    /// `field == <arbitrary expression>`
    pub fn eq_expr(self, expr: ValueExpr) -> Predicate {
        self.compare(CompareOp::Eq, expr)
    }

    pub fn ne(self, value: impl Into<Value>) -> Predicate {
        self.compare(CompareOp::Ne, ValueExpr::Literal(value.into()))
    }

    pub fn gt(self, value: impl Into<Value>) -> Predicate {
        self.compare(CompareOp::Gt, ValueExpr::Literal(value.into()))
    }

    pub fn ge(self, value: impl Into<Value>) -> Predicate {
        self.compare(CompareOp::Ge, ValueExpr::Literal(value.into()))
    }

    pub fn lt(self, value: impl Into<Value>) -> Predicate {
        self.compare(CompareOp::Lt, ValueExpr::Literal(value.into()))
    }

    pub fn le(self, value: impl Into<Value>) -> Predicate {
        self.compare(CompareOp::Le, ValueExpr::Literal(value.into()))
    }
}

impl Predicate {
    /// Start a comparison on a field of the queried entity
    pub fn field(name: impl Into<String>) -> FieldRef {
        FieldRef(name.into())
    }

    /// Create a comparison from explicit operands
    pub fn compare(left: ValueExpr, op: CompareOp, right: ValueExpr) -> Self {
        Predicate::Compare { left, op, right }
    }

    /// Conjoin with another predicate
    pub fn and(self, other: Predicate) -> Self {
        Predicate::And(Box::new(self), Box::new(other))
    }

    /// Disjoin with another predicate
    pub fn or(self, other: Predicate) -> Self {
        Predicate::Or(Box::new(self), Box::new(other))
    }

    /// Negate this predicate
    pub fn negate(self) -> Self {
        Predicate::Not(Box::new(self))
    }

    /// Conjoin a list of predicates, left-associative
    pub fn all(predicates: impl IntoIterator<Item = Predicate>) -> Option<Self> {
        predicates.into_iter().reduce(Predicate::and)
    }

    /// True when no value expression is left to evaluate
    pub fn is_fully_evaluated(&self) -> bool {
        match self {
            Predicate::And(l, r) | Predicate::Or(l, r) => {
                l.is_fully_evaluated() && r.is_fully_evaluated()
            }
            Predicate::Not(inner) => inner.is_fully_evaluated(),
            Predicate::Compare { left, right, .. } => {
                let done = |e: &ValueExpr| e.references_parameter() || e.as_literal().is_some();
                done(left) && done(right)
            }
        }
    }
}

impl BitAnd for Predicate {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        self.and(rhs)
    }
}

impl BitOr for Predicate {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.or(rhs)
    }
}

impl Not for Predicate {
    type Output = Self;

    fn not(self) -> Self::Output {
        self.negate()
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Predicate::And(l, r) => write!(f, "{} && {}", l, r),
            Predicate::Or(l, r) => write!(f, "({} || {})", l, r),
            Predicate::Not(inner) => write!(f, "!({})", inner),
            Predicate::Compare { left, op, right } => write!(f, "{} {} {}", left, op, right),
        }
    }
}
