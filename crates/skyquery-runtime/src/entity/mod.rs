//! Supported entity kinds
//!
//! The set of entities is closed. Each kind owns a static descriptor and one
//! arm in `EntityKind::build`.

pub mod descriptor;

pub use descriptor::{supplied, EntityDescriptor, FieldSpec, Validator};

use crate::error::{Result, RuntimeError};
use crate::feed::{FeedRequest, FeedType};
use crate::net::BuiltRequest;
use skyquery_core::types::ISO8601;
use skyquery_core::ParameterMap;
use std::fmt;

static FEED_FIELDS: &[FieldSpec] = &[
    FieldSpec::selector("Type")
        .required()
        .validated(Validator::Enum(FeedType::NAMES)),
    FieldSpec::query("Algorithm", "algorithm").required(),
    FieldSpec::query("Limit", "limit").validated(Validator::Range { min: 1, max: 100 }),
    FieldSpec::query("Cursor", "cursor"),
];

/// Feed retrieval (timeline)
pub static FEED: EntityDescriptor = EntityDescriptor {
    tag: "Feed",
    fields: FEED_FIELDS,
    timestamp_format: ISO8601,
};

/// Entity kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Feed,
}

impl EntityKind {
    /// Resolve an entity tag
    pub fn from_tag(tag: &str) -> Result<Self> {
        match tag {
            "Feed" => Ok(EntityKind::Feed),
            other => Err(RuntimeError::UnsupportedEntity(other.to_string())),
        }
    }

    pub fn descriptor(&self) -> &'static EntityDescriptor {
        match self {
            EntityKind::Feed => &FEED,
        }
    }

    /// Validate parameters and build the request for this entity
    pub fn build(&self, base_url: &str, params: &ParameterMap) -> Result<BuiltRequest> {
        let descriptor = self.descriptor();
        descriptor.validate(params)?;

        let mut request = match self {
            EntityKind::Feed => {
                let inputs = FeedRequest::from_params(params)?;
                BuiltRequest::get(format!("{}xrpc/{}", base_url, inputs.feed_type.operation()))
            }
        };
        descriptor.append_query(&mut request, params);

        tracing::debug!("built {} request: {}", descriptor.tag, request.endpoint());
        Ok(request)
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.descriptor().tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_tag() {
        assert_eq!(EntityKind::from_tag("Feed").unwrap(), EntityKind::Feed);

        let err = EntityKind::from_tag("Trends").unwrap_err();
        assert!(matches!(err, RuntimeError::UnsupportedEntity(ref t) if t == "Trends"));
    }

    #[test]
    fn test_feed_requires_type_and_algorithm() {
        let mut params = ParameterMap::new();
        params.insert("Algorithm".to_string(), "123".to_string());
        let err = EntityKind::Feed.build("https://bsky.social/", &params).unwrap_err();
        assert!(matches!(err, RuntimeError::MissingParameter(ref f) if f == "Type"));

        params.insert("Type".to_string(), "0".to_string());
        params.insert("Algorithm".to_string(), "   ".to_string());
        params.insert("Limit".to_string(), "25".to_string());
        let err = EntityKind::Feed.build("https://bsky.social/", &params).unwrap_err();
        assert!(matches!(err, RuntimeError::MissingParameter(ref f) if f == "Algorithm"));
    }

    #[test]
    fn test_feed_descriptor_fields() {
        let names: Vec<_> = FEED.field_names().collect();
        assert_eq!(names, vec!["Type", "Algorithm", "Limit", "Cursor"]);
        assert!(FEED.field("Algorithm").unwrap().required);
        assert!(FEED.field("Language").is_none());
    }
}
