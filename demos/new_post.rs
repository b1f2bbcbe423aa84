//! Post creation example
//!
//! Set `BSKY_DID`, `BSKY_HANDLE` and `BSKY_ACCESS_JWT` before running, and
//! pass the post text as the first argument:
//!
//! ```text
//! cargo run --example new_post -- "Hello from skyquery"
//! ```

use skyquery_sdk::{PostRequest, SdkError, Session, SkyContextBuilder};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let text = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "Hello from skyquery".to_string());

    let session = Session::new(std::env::var("BSKY_DID")?, std::env::var("BSKY_HANDLE")?)
        .with_access_jwt(std::env::var("BSKY_ACCESS_JWT")?);

    let ctx = SkyContextBuilder::new()
        .with_base_url("https://bsky.social")
        .with_session(session)
        .build()?;

    match ctx.post(PostRequest::new(text).with_langs(vec!["en".to_string()])).await {
        Ok(response) => {
            println!("Created {}", response.uri.as_deref().unwrap_or("<no uri>"));
            println!("  cid: {}", response.cid.as_deref().unwrap_or("<no cid>"));
        }
        Err(SdkError::Runtime(err)) if err.query_failure().is_some() => {
            if let Some(failure) = err.query_failure() {
                eprintln!("Server rejected the post ({}): {}", failure.status, failure.message);
                if let Some(link) = &failure.help_link {
                    eprintln!("  see {}", link);
                }
            }
        }
        Err(err) => return Err(err.into()),
    }

    Ok(())
}
