//! Post creation

use super::records::{Facet, ReplyRef};
use crate::error::{Result, RuntimeError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Record collection and `$type` of a post
pub const POST_COLLECTION: &str = "app.bsky.feed.post";

/// XRPC operation used to create records
pub const CREATE_RECORD: &str = "com.atproto.repo.createRecord";

/// New post, built up with `with_*` methods
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostRequest {
    pub text: String,
    pub facets: Option<Vec<Facet>>,
    pub reply: Option<ReplyRef>,
    pub embed: Option<serde_json::Value>,
    pub langs: Option<Vec<String>>,
    pub labels: Option<Vec<String>>,
    pub tags: Option<Vec<String>>,
    /// Defaults to the time the record is built
    pub created_at: Option<DateTime<Utc>>,
}

impl PostRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn with_facets(mut self, facets: Vec<Facet>) -> Self {
        self.facets = Some(facets);
        self
    }

    pub fn with_reply(mut self, reply: ReplyRef) -> Self {
        self.reply = Some(reply);
        self
    }

    pub fn with_embed(mut self, embed: serde_json::Value) -> Self {
        self.embed = Some(embed);
        self
    }

    pub fn with_langs(mut self, langs: Vec<String>) -> Self {
        self.langs = Some(langs);
        self
    }

    pub fn with_labels(mut self, labels: Vec<String>) -> Self {
        self.labels = Some(labels);
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = Some(tags);
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Build the `createRecord` body for `repo`
    pub fn into_create_record(self, repo: impl Into<String>) -> Result<CreateRecordRequest> {
        if self.text.trim().is_empty() {
            return Err(RuntimeError::MissingParameter("text".to_string()));
        }

        Ok(CreateRecordRequest {
            repo: repo.into(),
            collection: POST_COLLECTION.to_string(),
            record: NewPostRecord {
                record_type: POST_COLLECTION.to_string(),
                text: self.text,
                created_at: self.created_at.unwrap_or_else(Utc::now),
                facets: self.facets,
                reply: self.reply,
                embed: self.embed,
                langs: self.langs,
                labels: self.labels,
                tags: self.tags,
            },
        })
    }
}

/// Body of `com.atproto.repo.createRecord` for a post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateRecordRequest {
    pub repo: String,
    pub collection: String,
    pub record: NewPostRecord,
}

/// Post record as written; absent options are left out of the JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPostRecord {
    #[serde(rename = "$type")]
    pub record_type: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facets: Option<Vec<Facet>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply: Option<ReplyRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub embed: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub langs: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

/// Response of a successful `createRecord`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub uri: Option<String>,
    pub cid: Option<String>,
    pub commit: Option<CommitMeta>,
    pub validation_status: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitMeta {
    pub cid: String,
    pub rev: String,
}
