//! Partial evaluator
//!
//! Rewrites a predicate so that every value expression which does not touch
//! the query's open parameter becomes a literal. Runs bottom-up, the same
//! way a constant folder does, but it resolves captured variables and forces
//! computed values instead of folding arithmetic.

use crate::ast::{Predicate, ValueExpr};
use crate::error::{CoreError, Result};
use crate::types::Value;
use std::collections::HashMap;

/// Variables captured by the caller when building a predicate
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Captures {
    vars: HashMap<String, Value>,
}

impl Captures {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a variable, replacing any previous binding
    pub fn bind(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.vars.insert(name.into(), value.into());
    }

    /// Builder-style `bind`
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.bind(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.vars.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

/// Partial evaluator
#[derive(Debug, Default)]
pub struct PartialEvaluator<'a> {
    captures: Option<&'a Captures>,
}

impl<'a> PartialEvaluator<'a> {
    /// Evaluator with no captured variables
    pub fn new() -> Self {
        Self { captures: None }
    }

    /// Evaluator resolving variables from `captures`
    pub fn with_captures(captures: &'a Captures) -> Self {
        Self {
            captures: Some(captures),
        }
    }

    /// Evaluate a predicate into one whose value expressions are literals
    ///
    /// Errors raised while forcing a computed value propagate unchanged.
    pub fn evaluate(&self, predicate: &Predicate) -> Result<Predicate> {
        match predicate {
            Predicate::And(left, right) => Ok(Predicate::And(
                Box::new(self.evaluate(left)?),
                Box::new(self.evaluate(right)?),
            )),
            Predicate::Or(left, right) => Ok(Predicate::Or(
                Box::new(self.evaluate(left)?),
                Box::new(self.evaluate(right)?),
            )),
            Predicate::Not(inner) => Ok(Predicate::Not(Box::new(self.evaluate(inner)?))),
            Predicate::Compare { left, op, right } => Ok(Predicate::Compare {
                left: self.evaluate_expr(left)?,
                op: *op,
                right: self.evaluate_expr(right)?,
            }),
        }
    }

    /// Evaluate a single value expression
    pub fn evaluate_expr(&self, expr: &ValueExpr) -> Result<ValueExpr> {
        if expr.references_parameter() {
            return Ok(expr.clone());
        }

        match expr {
            ValueExpr::Literal(_) => Ok(expr.clone()),
            _ => self.force(expr).map(ValueExpr::Literal),
        }
    }

    /// Compute the value of a parameter-free expression
    fn force(&self, expr: &ValueExpr) -> Result<Value> {
        match expr {
            ValueExpr::Literal(value) => Ok(value.clone()),

            ValueExpr::Variable(name) => self
                .captures
                .and_then(|c| c.get(name))
                .cloned()
                .ok_or_else(|| CoreError::UnboundVariable(name.clone())),

            ValueExpr::Member { target, member } => {
                let target_value = self.force(target)?;
                target_value
                    .member(member)
                    .cloned()
                    .ok_or_else(|| CoreError::MemberNotFound {
                        target: target.to_string(),
                        member: member.clone(),
                    })
            }

            ValueExpr::Computed(computed) => {
                tracing::trace!("forcing computed value '{}'", computed.label());
                computed.invoke()
            }

            ValueExpr::Field(name) => Err(CoreError::TypeError(format!(
                "field '{}' cannot be evaluated before the query runs",
                name
            ))),
        }
    }
}
