//! Literal value types for skyquery predicates
//!
//! `Value` is what a predicate compares a field against once every captured
//! variable has been resolved. Each variant has exactly one culture-invariant
//! text form, used when the value lands in a parameter map.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// ISO-8601 with a literal `Z`, the default wire timestamp
pub const ISO8601: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Literal value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    /// Enum member, stringified as its ordinal
    Enum {
        type_name: String,
        variant: String,
        ordinal: i64,
    },
    DateTime(DateTime<Utc>),
    /// Record captured by the caller, reachable through member access
    Object(BTreeMap<String, Value>),
}

/// An enum that can appear on the right-hand side of a predicate
pub trait QueryEnum {
    /// Name of the enum type (e.g. "FeedType")
    fn type_name() -> &'static str;

    /// Name of this member (e.g. "Timeline")
    fn variant_name(&self) -> &'static str;

    /// Declaration ordinal of this member
    fn ordinal(&self) -> i64;
}

/// Format used for `Value::DateTime` when building parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimestampFormat(pub String);

impl Default for TimestampFormat {
    fn default() -> Self {
        TimestampFormat(ISO8601.to_string())
    }
}

impl Value {
    /// Build an enum value from any `QueryEnum`
    pub fn enumeration<E: QueryEnum>(value: &E) -> Self {
        Value::Enum {
            type_name: E::type_name().to_string(),
            variant: value.variant_name().to_string(),
            ordinal: value.ordinal(),
        }
    }

    /// Short type label, used in error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::String(_) => "string",
            Value::Enum { .. } => "enum",
            Value::DateTime(_) => "datetime",
            Value::Object(_) => "object",
        }
    }

    /// Look up a member on an object value
    pub fn member(&self, name: &str) -> Option<&Value> {
        match self {
            Value::Object(fields) => fields.get(name),
            _ => None,
        }
    }

    /// Invariant text form for a query parameter
    pub fn to_parameter_string(&self, timestamps: &TimestampFormat) -> String {
        match self {
            Value::Null => String::new(),
            Value::Bool(b) => b.to_string(),
            Value::Int(i) => i.to_string(),
            Value::Float(f) => f.to_string(),
            Value::String(s) => s.clone(),
            Value::Enum { ordinal, .. } => ordinal.to_string(),
            Value::DateTime(dt) => dt.format(&timestamps.0).to_string(),
            Value::Object(_) => self.to_string(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(n) => write!(f, "{}", n),
            Value::String(s) => write!(f, "\"{}\"", s),
            Value::Enum {
                type_name, variant, ..
            } => write!(f, "{}::{}", type_name, variant),
            Value::DateTime(dt) => write!(f, "{}", dt.to_rfc3339()),
            Value::Object(fields) => {
                write!(f, "{{")?;
                for (i, (k, v)) in fields.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}: {}", k, v)?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i as i64)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<u32> for Value {
    fn from(i: u32) -> Self {
        Value::Int(i as i64)
    }
}

impl From<u64> for Value {
    fn from(i: u64) -> Self {
        match i64::try_from(i) {
            Ok(v) => Value::Int(v),
            Err(_) => Value::String(i.to_string()),
        }
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(dt: DateTime<Utc>) -> Self {
        Value::DateTime(dt)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => v.into(),
            None => Value::Null,
        }
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(n.as_f64().unwrap_or(0.0)),
            },
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => Value::String(
                items
                    .iter()
                    .map(|v| v.to_string())
                    .collect::<Vec<_>>()
                    .join(","),
            ),
            serde_json::Value::Object(obj) => {
                Value::Object(obj.into_iter().map(|(k, v)| (k, v.into())).collect())
            }
        }
    }
}
