//! Response mapping
//!
//! Turns a success body into result records and writes back the inputs the
//! server does not echo.

use crate::entity::EntityKind;
use crate::error::{Result, RuntimeError};
use serde::de::DeserializeOwned;
use skyquery_core::ParameterMap;

/// A record type that can be the target of a query
pub trait QueryEntity: DeserializeOwned + Default + Send + Sized + 'static {
    /// Typed form of the parameters this entity was queried with
    type Inputs: Clone + Send + Sync;

    /// Entity kind whose descriptor and builder serve this record
    fn kind() -> EntityKind;

    /// Read typed inputs from an already validated parameter map
    fn inputs(params: &ParameterMap) -> Result<Self::Inputs>;

    /// Overwrite input fields with what was asked for
    fn back_fill(&mut self, inputs: &Self::Inputs);
}

/// Map a success body into records
///
/// An empty, whitespace-only or `null` body yields one record carrying only
/// the inputs.
pub fn map_response<T: QueryEntity>(body: &str, inputs: &T::Inputs) -> Result<Vec<T>> {
    let trimmed = body.trim();

    let mut record = if trimmed.is_empty() || trimmed == "null" {
        tracing::debug!("empty {} response, returning inputs only", T::kind());
        T::default()
    } else {
        serde_json::from_str::<T>(trimmed).map_err(|e| {
            tracing::warn!("failed to deserialize {} response: {}", T::kind(), e);
            RuntimeError::MalformedResponse(e.to_string())
        })?
    };

    record.back_fill(inputs);
    Ok(vec![record])
}
