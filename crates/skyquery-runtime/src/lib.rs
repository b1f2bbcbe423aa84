//! skyquery Runtime - Request building, execution and response mapping
//!
//! This crate turns extracted parameters into HTTP traffic:
//! - Entity descriptors and the per-entity request builder
//! - Query-string encoding
//! - The signing contract and a bearer-token signer
//! - The execution engine (timeouts, cancellation, streaming)
//! - Error body parsing into a single record shape
//! - Response mapping back into typed records

pub mod cancel;
pub mod entity;
pub mod error;
pub mod error_record;
pub mod executor;
pub mod feed;
pub mod mapper;
pub mod net;
pub mod signing;

// Re-export commonly used types
pub use cancel::{CancelSignal, CancelSource};
pub use entity::{EntityDescriptor, EntityKind, FieldSpec, Validator};
pub use error::{QueryFailure, Result, RuntimeError, HELP_LINK};
pub use error_record::{ErrorEntry, ErrorRecord};
pub use executor::{Executor, ExecutorConfig, RateLimitInfo, ResponseMeta, StreamControl};
pub use feed::{FeedQuery, FeedRequest, FeedType, PostRequest, PostResponse};
pub use mapper::{map_response, QueryEntity};
pub use net::{BuiltRequest, HttpMethod, QueryParameter};
pub use signing::{BearerSigner, RequestSigner, Session};
