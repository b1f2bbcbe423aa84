//! Feed query entity

use super::feed_type::FeedType;
use super::records::FeedItem;
use crate::entity::{supplied, EntityKind};
use crate::error::{Result, RuntimeError};
use crate::mapper::QueryEntity;
use serde::{Deserialize, Serialize};
use skyquery_core::ParameterMap;

/// Result of a feed query
///
/// `feed_type`, `algorithm`, `limit` and `cursor` are the inputs of the
/// query; they never come from the response body. The response's own
/// `cursor` lands in `next_cursor`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeedQuery {
    #[serde(skip)]
    pub feed_type: FeedType,
    #[serde(skip)]
    pub algorithm: Option<String>,
    #[serde(skip)]
    pub limit: Option<u32>,
    #[serde(skip)]
    pub cursor: Option<String>,

    #[serde(default)]
    pub feed: Vec<FeedItem>,
    /// Cursor for the next page
    #[serde(rename = "cursor")]
    pub next_cursor: Option<String>,
}

/// Typed feed query inputs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedRequest {
    pub feed_type: FeedType,
    pub algorithm: String,
    pub limit: Option<u32>,
    pub cursor: Option<String>,
}

impl FeedRequest {
    /// Read inputs from a validated parameter map
    pub fn from_params(params: &ParameterMap) -> Result<Self> {
        let raw_type = supplied(params, "Type")
            .ok_or_else(|| RuntimeError::MissingParameter("Type".to_string()))?;
        let feed_type = FeedType::parse(raw_type).ok_or_else(|| RuntimeError::OutOfRange {
            field: "Type".to_string(),
            value: raw_type.to_string(),
        })?;

        let algorithm = supplied(params, "Algorithm")
            .map(|v| v.trim().to_string())
            .ok_or_else(|| RuntimeError::MissingParameter("Algorithm".to_string()))?;

        let limit = supplied(params, "Limit")
            .map(|raw| {
                raw.trim().parse::<u32>().map_err(|_| RuntimeError::OutOfRange {
                    field: "Limit".to_string(),
                    value: raw.to_string(),
                })
            })
            .transpose()?;

        Ok(Self {
            feed_type,
            algorithm,
            limit,
            cursor: supplied(params, "Cursor").map(|v| v.trim().to_string()),
        })
    }
}

impl QueryEntity for FeedQuery {
    type Inputs = FeedRequest;

    fn kind() -> EntityKind {
        EntityKind::Feed
    }

    fn inputs(params: &ParameterMap) -> Result<FeedRequest> {
        FeedRequest::from_params(params)
    }

    fn back_fill(&mut self, inputs: &FeedRequest) {
        self.feed_type = inputs.feed_type;
        self.algorithm = Some(inputs.algorithm.clone());
        self.limit = inputs.limit;
        self.cursor = inputs.cursor.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapper::map_response;

    fn params(pairs: &[(&str, &str)]) -> ParameterMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_inputs_from_params() {
        let req = FeedRequest::from_params(&params(&[
            ("Type", "0"),
            ("Algorithm", "123"),
            ("Limit", "25"),
            ("Cursor", "456"),
        ]))
        .unwrap();

        assert_eq!(req.feed_type, FeedType::Timeline);
        assert_eq!(req.algorithm, "123");
        assert_eq!(req.limit, Some(25));
        assert_eq!(req.cursor.as_deref(), Some("456"));
    }

    #[test]
    fn test_blank_inputs_are_treated_as_missing() {
        let err = FeedRequest::from_params(&params(&[("Type", "0"), ("Algorithm", "   ")]))
            .unwrap_err();
        assert!(matches!(err, RuntimeError::MissingParameter(ref f) if f == "Algorithm"));

        let err = FeedRequest::from_params(&params(&[("Algorithm", "abc")])).unwrap_err();
        assert!(matches!(err, RuntimeError::MissingParameter(ref f) if f == "Type"));

        let req = FeedRequest::from_params(&params(&[
            ("Type", "Timeline"),
            ("Algorithm", "abc"),
            ("Cursor", " "),
        ]))
        .unwrap();
        assert_eq!(req.cursor, None);
    }

    #[test]
    fn test_response_cursor_does_not_overwrite_input_cursor() {
        let inputs = FeedRequest {
            algorithm: "abc".to_string(),
            cursor: Some("input".to_string()),
            ..FeedRequest::default()
        };
        let body = r#"{"feed": [], "cursor": "next-page"}"#;

        let results = map_response::<FeedQuery>(body, &inputs).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].cursor.as_deref(), Some("input"));
        assert_eq!(results[0].next_cursor.as_deref(), Some("next-page"));
    }

    #[test]
    fn test_empty_body_yields_inputs_only() {
        let inputs = FeedRequest {
            algorithm: "abc".to_string(),
            limit: Some(10),
            ..FeedRequest::default()
        };

        for body in ["", "   ", "null"] {
            let results = map_response::<FeedQuery>(body, &inputs).unwrap();
            assert_eq!(results.len(), 1);
            assert!(results[0].feed.is_empty());
            assert_eq!(results[0].algorithm.as_deref(), Some("abc"));
            assert_eq!(results[0].limit, Some(10));
        }
    }

    #[test]
    fn test_malformed_body() {
        let err = map_response::<FeedQuery>("{\"feed\": 42}", &FeedRequest::default()).unwrap_err();
        assert!(matches!(err, RuntimeError::MalformedResponse(_)));
    }
}
