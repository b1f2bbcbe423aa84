//! Static per-entity metadata

use crate::error::{Result, RuntimeError};
use crate::net::BuiltRequest;
use skyquery_core::{ParameterMap, TimestampFormat};

/// Value of `name`, unless it is missing or whitespace-only
pub fn supplied<'p>(params: &'p ParameterMap, name: &str) -> Option<&'p str> {
    params
        .get(name)
        .map(String::as_str)
        .filter(|v| !v.trim().is_empty())
}

/// Post-hoc check on a supplied field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validator {
    /// Inclusive integer range
    Range { min: i64, max: i64 },
    /// Enum member, given by name or declaration ordinal
    Enum(&'static [&'static str]),
}

impl Validator {
    pub fn accepts(&self, value: &str) -> bool {
        let value = value.trim();
        match self {
            Validator::Range { min, max } => value
                .parse::<i64>()
                .map(|n| (*min..=*max).contains(&n))
                .unwrap_or(false),
            Validator::Enum(variants) => {
                variants.iter().any(|v| *v == value)
                    || value
                        .parse::<usize>()
                        .map(|i| i < variants.len())
                        .unwrap_or(false)
            }
        }
    }
}

/// One recognized field of an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Name used in predicates (e.g. "Limit")
    pub name: &'static str,
    /// Query-string name, `None` for fields that only select the endpoint
    pub query_name: Option<&'static str>,
    pub required: bool,
    pub validator: Option<Validator>,
}

impl FieldSpec {
    pub const fn selector(name: &'static str) -> Self {
        Self {
            name,
            query_name: None,
            required: false,
            validator: None,
        }
    }

    pub const fn query(name: &'static str, query_name: &'static str) -> Self {
        Self {
            name,
            query_name: Some(query_name),
            required: false,
            validator: None,
        }
    }

    pub const fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub const fn validated(mut self, validator: Validator) -> Self {
        self.validator = Some(validator);
        self
    }
}

/// Entity descriptor
///
/// Field order is the order parameters appear in the query string.
#[derive(Debug)]
pub struct EntityDescriptor {
    pub tag: &'static str,
    pub fields: &'static [FieldSpec],
    /// strftime pattern for datetime parameters
    pub timestamp_format: &'static str,
}

impl EntityDescriptor {
    /// Names usable in a predicate
    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|f| f.name)
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn timestamps(&self) -> TimestampFormat {
        TimestampFormat(self.timestamp_format.to_string())
    }

    /// Check supplied parameters
    ///
    /// Validators run before the required-field pass, so an out-of-range
    /// value is reported even when another required field is also missing.
    pub fn validate(&self, params: &ParameterMap) -> Result<()> {
        for field in self.fields {
            if let (Some(validator), Some(value)) = (field.validator, supplied(params, field.name)) {
                if !validator.accepts(value) {
                    return Err(RuntimeError::OutOfRange {
                        field: field.name.to_string(),
                        value: value.to_string(),
                    });
                }
            }
        }

        for field in self.fields.iter().filter(|f| f.required) {
            if supplied(params, field.name).is_none() {
                return Err(RuntimeError::MissingParameter(field.name.to_string()));
            }
        }

        Ok(())
    }

    /// Append every supplied query field, in descriptor order
    pub fn append_query(&self, request: &mut BuiltRequest, params: &ParameterMap) {
        for field in self.fields {
            if let (Some(query_name), Some(value)) = (field.query_name, supplied(params, field.name)) {
                request.push(query_name, value.trim());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static FIELDS: &[FieldSpec] = &[
        FieldSpec::selector("Kind").validated(Validator::Enum(&["Alpha", "Beta"])),
        FieldSpec::query("Name", "name").required(),
        FieldSpec::query("Size", "size").validated(Validator::Range { min: 1, max: 10 }),
    ];

    static TEST: EntityDescriptor = EntityDescriptor {
        tag: "Test",
        fields: FIELDS,
        timestamp_format: skyquery_core::types::ISO8601,
    };

    fn params(pairs: &[(&str, &str)]) -> ParameterMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_enum_validator_accepts_name_or_ordinal() {
        let v = Validator::Enum(&["Alpha", "Beta"]);
        assert!(v.accepts("Beta"));
        assert!(v.accepts("1"));
        assert!(!v.accepts("2"));
        assert!(!v.accepts("Gamma"));
    }

    #[test]
    fn test_range_validator() {
        let v = Validator::Range { min: 1, max: 100 };
        assert!(v.accepts("1"));
        assert!(v.accepts("100"));
        assert!(!v.accepts("0"));
        assert!(!v.accepts("101"));
        assert!(!v.accepts("many"));
    }

    #[test]
    fn test_validators_run_before_required_check() {
        let err = TEST.validate(&params(&[("Size", "11")])).unwrap_err();
        assert!(matches!(err, RuntimeError::OutOfRange { ref field, .. } if field == "Size"));

        let err = TEST.validate(&params(&[("Size", "5")])).unwrap_err();
        assert!(matches!(err, RuntimeError::MissingParameter(ref f) if f == "Name"));
    }

    #[test]
    fn test_whitespace_value_is_not_supplied() {
        let err = TEST
            .validate(&params(&[("Name", "   "), ("Size", "3")]))
            .unwrap_err();
        assert!(matches!(err, RuntimeError::MissingParameter(ref f) if f == "Name"));

        // blank optional values are skipped, not range-checked
        assert!(TEST.validate(&params(&[("Name", "n"), ("Size", " ")])).is_ok());
    }

    #[test]
    fn test_append_query_uses_descriptor_order() {
        let mut req = BuiltRequest::get("https://example.com/x");
        TEST.append_query(
            &mut req,
            &params(&[("Size", "3"), ("Kind", "Alpha"), ("Name", "n")]),
        );
        assert_eq!(req.query_string(), "name=n&size=3");
    }
}
