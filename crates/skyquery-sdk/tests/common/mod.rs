//! Common test utilities for SDK integration tests

#![allow(dead_code)]

use mockito::{Matcher, Mock, Server};
use skyquery_sdk::{FeedType, Predicate, Session, SkyContext, SkyContextBuilder};

pub const TIMELINE_PATH: &str = "/xrpc/app.bsky.feed.getTimeline";
pub const CREATE_RECORD_PATH: &str = "/xrpc/com.atproto.repo.createRecord";

pub const TEST_DID: &str = "did:plc:testuser";
pub const TEST_JWT: &str = "test_access_jwt";

pub fn session() -> Session {
    Session::new(TEST_DID, "tester.bsky.social").with_access_jwt(TEST_JWT)
}

/// Home timeline filter with the given algorithm
pub fn timeline(algorithm: &str) -> Predicate {
    Predicate::field("Type").eq(FeedType::Timeline) & Predicate::field("Algorithm").eq(algorithm)
}

/// Context pointed at a mock server
pub fn context(server: &Server) -> SkyContext {
    SkyContextBuilder::new()
        .with_base_url(server.url())
        .with_user_agent("skyquery-sdk-tests")
        .with_session(session())
        .build()
        .expect("Failed to build context")
}

/// Feed body with one post per text
pub fn feed_json(texts: &[&str], cursor: &str) -> String {
    let items: Vec<serde_json::Value> = texts
        .iter()
        .enumerate()
        .map(|(i, text)| {
            serde_json::json!({
                "post": {
                    "uri": format!("at://{}/app.bsky.feed.post/{}", TEST_DID, i),
                    "cid": format!("cid-{}", i),
                    "author": { "did": TEST_DID, "handle": "tester.bsky.social" },
                    "record": {
                        "$type": "app.bsky.feed.post",
                        "text": text,
                        "createdAt": "2024-12-06T00:53:27.014Z"
                    },
                    "indexedAt": "2024-12-06T00:53:27.312Z"
                }
            })
        })
        .collect();

    serde_json::json!({ "feed": items, "cursor": cursor }).to_string()
}

/// Timeline mock answering any query string
pub async fn mock_timeline(server: &mut Server, status: usize, body: &str) -> Mock {
    server
        .mock("GET", TIMELINE_PATH)
        .match_query(Matcher::Any)
        .with_status(status)
        .with_header("content-type", "application/json")
        .with_body(body)
        .create_async()
        .await
}
