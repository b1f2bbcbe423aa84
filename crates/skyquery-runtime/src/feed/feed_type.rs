//! Feed type selector

use serde::{Deserialize, Serialize};
use skyquery_core::{QueryEnum, Value};
use std::fmt;

/// Which feed to retrieve
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeedType {
    /// The signed-in account's home timeline
    #[default]
    Timeline,
}

impl FeedType {
    /// Member names in declaration order
    pub const NAMES: &'static [&'static str] = &["Timeline"];

    const ALL: &'static [FeedType] = &[FeedType::Timeline];

    /// Parse a member name or declaration ordinal
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if let Some(i) = Self::NAMES.iter().position(|n| *n == value) {
            return Self::ALL.get(i).copied();
        }
        value
            .parse::<usize>()
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
    }

    /// XRPC operation serving this feed
    pub fn operation(&self) -> &'static str {
        match self {
            FeedType::Timeline => "app.bsky.feed.getTimeline",
        }
    }
}

impl QueryEnum for FeedType {
    fn type_name() -> &'static str {
        "FeedType"
    }

    fn variant_name(&self) -> &'static str {
        match self {
            FeedType::Timeline => "Timeline",
        }
    }

    fn ordinal(&self) -> i64 {
        *self as i64
    }
}

impl From<FeedType> for Value {
    fn from(feed_type: FeedType) -> Self {
        Value::enumeration(&feed_type)
    }
}

impl fmt::Display for FeedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.variant_name())
    }
}
