//! skyquery SDK
//!
//! High-level API for querying the Bluesky API with declarative filters.
//!
//! ```rust,ignore
//! use skyquery_sdk::{FeedType, Predicate, Session, SkyContextBuilder};
//!
//! let ctx = SkyContextBuilder::new().with_session(session).build()?;
//! let timeline = ctx
//!     .feed()
//!     .filter(Predicate::field("Type").eq(FeedType::Timeline))
//!     .filter(Predicate::field("Algorithm").eq("reverse-chronological"))
//!     .filter(Predicate::field("Limit").eq_var("limit"))
//!     .bind("limit", 25)
//!     .single()
//!     .await?;
//! ```

pub mod builder;
pub mod config;
pub mod context;
pub mod error;
pub mod query;

// Re-export main types
pub use builder::SkyContextBuilder;
pub use config::ClientConfig;
pub use context::SkyContext;
pub use error::{Result, SdkError};
pub use query::Query;

// Re-export commonly used types from dependencies
pub use skyquery_core::{Captures, CompareOp, Predicate, Value, ValueExpr};
pub use skyquery_runtime::{
    BearerSigner, CancelSignal, CancelSource, FeedQuery, FeedType, PostRequest, PostResponse,
    RequestSigner, ResponseMeta, RuntimeError, Session,
};
