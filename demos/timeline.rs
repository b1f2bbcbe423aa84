//! Timeline query example
//!
//! This example demonstrates:
//! - Building a SkyContext from an existing session
//! - Filtering the timeline with literals and bound variables
//! - Reading rate-limit metadata from the last response
//!
//! Set `BSKY_DID`, `BSKY_HANDLE` and `BSKY_ACCESS_JWT` before running:
//!
//! ```text
//! RUST_LOG=skyquery_runtime=debug cargo run --example timeline
//! ```

use skyquery_sdk::{FeedType, Predicate, Session, SkyContextBuilder};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("=== Timeline Example ===\n");

    let session = Session::new(std::env::var("BSKY_DID")?, std::env::var("BSKY_HANDLE")?)
        .with_access_jwt(std::env::var("BSKY_ACCESS_JWT")?);

    let ctx = SkyContextBuilder::new()
        .with_base_url("https://bsky.social")
        .with_user_agent("skyquery-timeline-demo")
        .with_session(session)
        .build()?;

    let limit = 10;
    let timeline = ctx
        .feed()
        .filter(
            Predicate::field("Type").eq(FeedType::Timeline)
                & Predicate::field("Algorithm").eq("reverse-chronological")
                & Predicate::field("Limit").eq_var("limit"),
        )
        .bind("limit", limit)
        .single()
        .await?;

    for item in &timeline.feed {
        let Some(post) = &item.post else { continue };
        let handle = post
            .author
            .as_ref()
            .and_then(|a| a.handle.as_deref())
            .unwrap_or("<unknown>");
        let text = post
            .record
            .as_ref()
            .and_then(|r| r.text.as_deref())
            .unwrap_or("");
        println!("@{}: {}", handle, text);
        println!("  likes: {}  reposts: {}\n", post.like_count, post.repost_count);
    }

    if let Some(cursor) = &timeline.next_cursor {
        println!("Next cursor: {}", cursor);
    }

    if let Some(meta) = ctx.last_response() {
        println!(
            "Rate limit: {:?} of {:?} remaining",
            meta.rate_limit.remaining, meta.rate_limit.limit
        );
    }

    Ok(())
}
