//! Feed data records
//!
//! Shapes of `app.bsky.feed.defs` views as returned by `getTimeline`. Fields
//! the server may omit are optional or defaulted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One entry of a feed: a post plus optional reply context and reason
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeedItem {
    pub post: Option<PostView>,
    pub reply: Option<ReplyContext>,
    pub reason: Option<Reason>,
}

/// Hydrated post
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostView {
    #[serde(rename = "$type", skip_serializing_if = "Option::is_none")]
    pub view_type: Option<String>,
    pub uri: Option<String>,
    pub cid: Option<String>,
    pub author: Option<Author>,
    pub record: Option<PostRecord>,
    #[serde(default)]
    pub reply_count: i64,
    #[serde(default)]
    pub repost_count: i64,
    #[serde(default)]
    pub like_count: i64,
    #[serde(default)]
    pub quote_count: i64,
    pub indexed_at: Option<DateTime<Utc>>,
    pub viewer: Option<PostViewer>,
    #[serde(default)]
    pub labels: Vec<Label>,
    pub embed: Option<serde_json::Value>,
}

/// Account that wrote a post or caused a repost
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub did: Option<String>,
    pub handle: Option<String>,
    pub display_name: Option<String>,
    pub avatar: Option<String>,
    pub associated: Option<serde_json::Value>,
    pub viewer: Option<AccountViewer>,
    #[serde(default)]
    pub labels: Vec<Label>,
    pub created_at: Option<DateTime<Utc>>,
}

/// Relationship between the signed-in account and another account
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountViewer {
    #[serde(default)]
    pub muted: bool,
    #[serde(default)]
    pub blocked_by: bool,
    pub following: Option<String>,
    pub followed_by: Option<String>,
}

/// Signed-in account's state on a post
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostViewer {
    #[serde(default)]
    pub thread_muted: bool,
    #[serde(default)]
    pub embedding_disabled: bool,
    pub like: Option<String>,
    pub repost: Option<String>,
}

/// Stored `app.bsky.feed.post` record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostRecord {
    #[serde(rename = "$type")]
    pub record_type: Option<String>,
    pub text: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub langs: Vec<String>,
    pub reply: Option<ReplyRef>,
    pub facets: Option<Vec<Facet>>,
    pub embed: Option<serde_json::Value>,
}

/// Root and parent of a reply, as strong references
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReplyRef {
    pub root: StrongRef,
    pub parent: StrongRef,
}

/// URI plus content hash of a record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrongRef {
    pub uri: String,
    pub cid: String,
}

impl StrongRef {
    pub fn new(uri: impl Into<String>, cid: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            cid: cid.into(),
        }
    }
}

/// Hydrated root and parent of a reply shown in a feed
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReplyContext {
    pub root: Option<PostView>,
    pub parent: Option<PostView>,
}

/// Why an item is in the feed (e.g. a repost)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reason {
    #[serde(rename = "$type")]
    pub reason_type: Option<String>,
    pub by: Option<Author>,
    pub indexed_at: Option<DateTime<Utc>>,
}

/// Moderation label
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Label {
    pub ver: Option<i64>,
    pub src: Option<String>,
    pub uri: Option<String>,
    pub cid: Option<String>,
    pub val: Option<String>,
    #[serde(default)]
    pub neg: bool,
    pub cts: Option<DateTime<Utc>>,
    pub exp: Option<DateTime<Utc>>,
}

/// Rich-text annotation over a byte range of post text
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Facet {
    pub index: ByteSlice,
    pub features: Vec<serde_json::Value>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ByteSlice {
    pub byte_start: usize,
    pub byte_end: usize,
}
