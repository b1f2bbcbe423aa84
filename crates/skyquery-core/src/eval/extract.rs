//! Parameter extraction
//!
//! Walks an evaluated predicate and collects `field == literal` pairs for the
//! fields an entity recognizes. Only conjunctions of equalities are
//! translatable; anything else is rejected rather than silently dropped.

use crate::ast::{CompareOp, Predicate, ValueExpr};
use crate::error::{CoreError, Result};
use crate::types::{TimestampFormat, Value};
use std::collections::{HashMap, HashSet};

/// Field name to invariant string value
pub type ParameterMap = HashMap<String, String>;

/// Collects recognized `field == literal` pairs from a predicate
#[derive(Debug, Clone)]
pub struct ParameterExtractor {
    recognized: HashSet<String>,
    timestamps: TimestampFormat,
}

impl ParameterExtractor {
    /// Create an extractor for the given field names
    pub fn new<I, S>(recognized: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            recognized: recognized.into_iter().map(Into::into).collect(),
            timestamps: TimestampFormat::default(),
        }
    }

    /// Use a specific format for datetime literals
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamps = format;
        self
    }

    pub fn recognizes(&self, field: &str) -> bool {
        self.recognized.contains(field)
    }

    /// Extract parameters from an evaluated predicate
    ///
    /// When a field appears more than once the last equality wins.
    pub fn extract(&self, predicate: &Predicate) -> Result<ParameterMap> {
        let mut params = ParameterMap::new();
        self.walk(predicate, &mut params)?;
        Ok(params)
    }

    fn walk(&self, predicate: &Predicate, params: &mut ParameterMap) -> Result<()> {
        match predicate {
            Predicate::And(left, right) => {
                self.walk(left, params)?;
                self.walk(right, params)
            }
            Predicate::Or(..) => Err(CoreError::UnsupportedPredicate(format!(
                "disjunction is not supported: {}",
                predicate
            ))),
            Predicate::Not(..) => Err(CoreError::UnsupportedPredicate(format!(
                "negation is not supported: {}",
                predicate
            ))),
            Predicate::Compare { left, op, right } => {
                if *op != CompareOp::Eq {
                    return Err(CoreError::UnsupportedPredicate(format!(
                        "operator '{}' is not supported: {}",
                        op, predicate
                    )));
                }

                let (field, value) = Self::field_and_literal(left, right).ok_or_else(|| {
                    CoreError::UnsupportedPredicate(format!(
                        "expected a field compared with a literal: {}",
                        predicate
                    ))
                })?;

                if self.recognized.contains(field) {
                    let text = value.to_parameter_string(&self.timestamps);
                    tracing::trace!("extracted parameter {} = {}", field, text);
                    params.insert(field.to_string(), text);
                } else {
                    tracing::debug!("ignoring unrecognized field '{}'", field);
                }
                Ok(())
            }
        }
    }

    fn field_and_literal<'p>(
        left: &'p ValueExpr,
        right: &'p ValueExpr,
    ) -> Option<(&'p str, &'p Value)> {
        match (left, right) {
            (ValueExpr::Field(name), ValueExpr::Literal(value))
            | (ValueExpr::Literal(value), ValueExpr::Field(name)) => Some((name.as_str(), value)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::{Captures, PartialEvaluator};

    fn feed_extractor() -> ParameterExtractor {
        ParameterExtractor::new(["Type", "Algorithm", "Limit", "Cursor"])
    }

    #[test]
    fn test_extracts_conjunction_of_equalities() {
        let p = Predicate::field("Type").eq(0)
            & Predicate::field("Algorithm").eq("123")
            & Predicate::field("Limit").eq(25)
            & Predicate::field("Cursor").eq("456");

        let params = feed_extractor().extract(&p).unwrap();

        assert_eq!(params.len(), 4);
        assert_eq!(params["Type"], "0");
        assert_eq!(params["Algorithm"], "123");
        assert_eq!(params["Limit"], "25");
        assert_eq!(params["Cursor"], "456");
    }

    #[test]
    fn test_literal_on_left_is_accepted() {
        let p = Predicate::compare(
            ValueExpr::literal("reverse-chronological"),
            CompareOp::Eq,
            ValueExpr::field("Algorithm"),
        );
        let params = feed_extractor().extract(&p).unwrap();
        assert_eq!(params["Algorithm"], "reverse-chronological");
    }

    #[test]
    fn test_unrecognized_fields_are_ignored() {
        let p = Predicate::field("Algorithm").eq("abc") & Predicate::field("Language").eq("en");
        let params = feed_extractor().extract(&p).unwrap();

        assert_eq!(params.len(), 1);
        assert!(!params.contains_key("Language"));
    }

    #[test]
    fn test_last_write_wins() {
        let p = Predicate::field("Limit").eq(10) & Predicate::field("Limit").eq(20);
        let params = feed_extractor().extract(&p).unwrap();
        assert_eq!(params["Limit"], "20");
    }

    #[test]
    fn test_disjunction_is_rejected() {
        let p = Predicate::field("Limit").eq(10) | Predicate::field("Limit").eq(20);
        let err = feed_extractor().extract(&p).unwrap_err();
        assert!(matches!(err, CoreError::UnsupportedPredicate(_)));
    }

    #[test]
    fn test_negation_and_other_operators_are_rejected() {
        let not = !Predicate::field("Limit").eq(10);
        assert!(matches!(
            feed_extractor().extract(&not),
            Err(CoreError::UnsupportedPredicate(_))
        ));

        let gt = Predicate::field("Algorithm").eq("a") & Predicate::field("Limit").gt(10);
        match feed_extractor().extract(&gt) {
            Err(CoreError::UnsupportedPredicate(msg)) => assert!(msg.contains(">")),
            other => panic!("Expected UnsupportedPredicate, got {:?}", other),
        }
    }

    #[test]
    fn test_unevaluated_operand_is_rejected() {
        let p = Predicate::field("Cursor").eq_var("cursor");
        assert!(matches!(
            feed_extractor().extract(&p),
            Err(CoreError::UnsupportedPredicate(_))
        ));
    }

    #[test]
    fn test_datetime_uses_configured_format() {
        use chrono::{TimeZone, Utc};

        let dt = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        let extractor = ParameterExtractor::new(["Since"])
            .with_timestamp_format(TimestampFormat("%Y-%m-%d".to_string()));

        let params = extractor
            .extract(&Predicate::field("Since").eq(dt))
            .unwrap();
        assert_eq!(params["Since"], "2024-01-02");
    }

    #[test]
    fn test_evaluate_then_extract() {
        let captures = Captures::new()
            .with("algorithm", "123")
            .with("limit", 25);

        let p = Predicate::field("Algorithm").eq_var("algorithm")
            & Predicate::field("Limit").eq_var("limit");

        let evaluated = PartialEvaluator::with_captures(&captures)
            .evaluate(&p)
            .unwrap();
        let params = feed_extractor().extract(&evaluated).unwrap();

        assert_eq!(params["Algorithm"], "123");
        assert_eq!(params["Limit"], "25");
    }
}
