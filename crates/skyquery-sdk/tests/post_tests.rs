//! Integration tests for creating posts

mod common;

use chrono::{TimeZone, Utc};
use common::{context, CREATE_RECORD_PATH, TEST_DID, TEST_JWT};
use mockito::{Matcher, Server};
use skyquery_runtime::feed::{ReplyRef, StrongRef};
use skyquery_sdk::{
    BearerSigner, CancelSource, PostRequest, RuntimeError, SdkError, SkyContextBuilder,
};
use std::sync::Arc;

#[tokio::test]
async fn test_post_sends_create_record() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", CREATE_RECORD_PATH)
        .match_header("authorization", format!("Bearer {}", TEST_JWT).as_str())
        .match_header("cache-control", "no-cache")
        .match_header("content-type", "application/json")
        .match_body(Matcher::PartialJson(serde_json::json!({
            "repo": TEST_DID,
            "collection": "app.bsky.feed.post",
            "record": {
                "$type": "app.bsky.feed.post",
                "text": "Hello from skyquery",
                "langs": ["en"]
            }
        })))
        .with_status(200)
        .with_body(
            r#"{
                "uri": "at://did:plc:testuser/app.bsky.feed.post/3ld6oa4nnhk2c",
                "cid": "bafyreia5ktrnxw3k2x4q",
                "commit": {"cid": "bafyreicommit", "rev": "3ld6oa4o5fs2c"},
                "validationStatus": "valid"
            }"#,
        )
        .create_async()
        .await;

    let ctx = context(&server);
    let response = ctx
        .post(PostRequest::new("Hello from skyquery").with_langs(vec!["en".to_string()]))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(
        response.uri.as_deref(),
        Some("at://did:plc:testuser/app.bsky.feed.post/3ld6oa4nnhk2c")
    );
    assert_eq!(response.cid.as_deref(), Some("bafyreia5ktrnxw3k2x4q"));
    assert_eq!(response.commit.unwrap().rev, "3ld6oa4o5fs2c");
    assert_eq!(response.validation_status.as_deref(), Some("valid"));
    assert!(ctx.raw_result().unwrap().contains("3ld6oa4nnhk2c"));
}

#[tokio::test]
async fn test_reply_carries_strong_refs() {
    let mut server = Server::new_async().await;
    let root = StrongRef::new("at://did:plc:other/app.bsky.feed.post/root", "cid-root");
    let parent = StrongRef::new("at://did:plc:other/app.bsky.feed.post/parent", "cid-parent");

    let mock = server
        .mock("POST", CREATE_RECORD_PATH)
        .match_body(Matcher::PartialJson(serde_json::json!({
            "record": {
                "reply": {
                    "root": {"uri": root.uri, "cid": root.cid},
                    "parent": {"uri": parent.uri, "cid": parent.cid}
                }
            }
        })))
        .with_status(200)
        .with_body(r#"{"uri": "at://x", "cid": "y"}"#)
        .create_async()
        .await;

    let ctx = context(&server);
    ctx.post(PostRequest::new("agreed").with_reply(ReplyRef { root, parent }))
        .await
        .unwrap();

    mock.assert_async().await;
}

#[test]
fn test_created_at_is_kept() {
    let at = Utc.with_ymd_and_hms(2024, 12, 6, 0, 53, 27).unwrap();
    let body = PostRequest::new("dated")
        .with_created_at(at)
        .into_create_record(TEST_DID)
        .unwrap();

    let json = serde_json::to_value(&body).unwrap();
    let created: chrono::DateTime<Utc> =
        serde_json::from_value(json["record"]["createdAt"].clone()).unwrap();
    assert_eq!(created, at);
    assert!(json["record"].get("facets").is_none());
}

#[tokio::test]
async fn test_blank_text_is_rejected_locally() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let ctx = context(&server);
    let err = ctx.post(PostRequest::new("   ")).await.unwrap_err();

    assert!(matches!(
        err,
        SdkError::Runtime(RuntimeError::MissingParameter(ref f)) if f == "text"
    ));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_post_without_session_fails_to_sign() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let ctx = SkyContextBuilder::new()
        .with_base_url(server.url())
        .with_signer(Arc::new(BearerSigner::new()))
        .build()
        .unwrap();

    let err = ctx.post(PostRequest::new("hello")).await.unwrap_err();
    assert!(matches!(err, SdkError::Runtime(RuntimeError::Signing(_))));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_post_rejected_by_server() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("POST", CREATE_RECORD_PATH)
        .with_status(400)
        .with_body(r#"{"error":"InvalidRequest","message":"Record/text must not be longer than 300 graphemes"}"#)
        .create_async()
        .await;

    let ctx = context(&server);
    let err = ctx.post(PostRequest::new("too long")).await.unwrap_err();

    let runtime = err.as_runtime().expect("runtime error");
    assert!(matches!(runtime, RuntimeError::Http(_)));
    assert_eq!(runtime.status(), Some(400));
}

#[tokio::test]
async fn test_post_cancelled_before_dispatch() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let ctx = context(&server);
    let source = CancelSource::new();
    source.cancel();

    let err = ctx
        .post_with_cancellation(PostRequest::new("never sent"), &source.signal())
        .await
        .unwrap_err();

    assert!(err.is_cancelled());
    mock.assert_async().await;
}
