//! Feed entity: timeline retrieval and post creation

pub mod feed_type;
pub mod post;
pub mod query;
pub mod records;

pub use feed_type::FeedType;
pub use post::{CommitMeta, CreateRecordRequest, NewPostRecord, PostRequest, PostResponse};
pub use query::{FeedQuery, FeedRequest};
pub use records::{
    AccountViewer, Author, ByteSlice, Facet, FeedItem, Label, PostRecord, PostView, PostViewer,
    Reason, ReplyContext, ReplyRef, StrongRef,
};
