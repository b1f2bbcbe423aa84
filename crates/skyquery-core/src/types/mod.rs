//! Type system for skyquery values

pub mod value;

pub use value::{QueryEnum, TimestampFormat, Value, ISO8601};
