//! Wire-level helpers

pub mod request;
pub mod url;

pub use request::{BuiltRequest, HttpMethod, QueryParameter};
pub use url::encode_param;
