//! Runtime error types

use crate::error_record::ErrorRecord;
use std::fmt;
use thiserror::Error;

/// Where callers are sent for help on authorization and rate-limit failures
pub const HELP_LINK: &str = "https://github.com/skyquery-rs/skyquery/wiki/FAQ";

/// Runtime error
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// A required field was not supplied
    #[error("Missing required parameter: {0}")]
    MissingParameter(String),

    /// A field failed its validator
    #[error("Parameter {field} is out of range: {value}")]
    OutOfRange { field: String, value: String },

    /// No descriptor exists for the entity kind
    #[error("Unsupported entity: {0}")]
    UnsupportedEntity(String),

    /// HTTP 401
    #[error("Unauthorized: {0}")]
    Unauthorized(QueryFailure),

    /// HTTP 429
    #[error("Rate limited: {0}")]
    RateLimited(QueryFailure),

    /// Any other status >= 400
    #[error("HTTP request failed: {0}")]
    Http(QueryFailure),

    /// Success body could not be deserialized
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// The caller's cancel signal fired
    #[error("Request cancelled")]
    Cancelled,

    /// A timeout elapsed
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// Connection, TLS or protocol failure
    #[error("Transport error: {0}")]
    Transport(String),

    /// The signer could not produce an authorization value
    #[error("Signing failed: {0}")]
    Signing(String),

    /// Invalid client configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl RuntimeError {
    /// The failure details for errors raised after a response arrived
    pub fn query_failure(&self) -> Option<&QueryFailure> {
        match self {
            RuntimeError::Unauthorized(f) | RuntimeError::RateLimited(f) | RuntimeError::Http(f) => {
                Some(f)
            }
            _ => None,
        }
    }

    /// HTTP status for errors raised after a response arrived
    pub fn status(&self) -> Option<u16> {
        self.query_failure().map(|f| f.status)
    }
}

impl From<reqwest::Error> for RuntimeError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            RuntimeError::Timeout(err.to_string())
        } else if err.is_builder() {
            RuntimeError::Config(err.to_string())
        } else {
            RuntimeError::Transport(err.to_string())
        }
    }
}

/// Non-2xx response, with its body parsed into an `ErrorRecord`
#[derive(Debug, Clone, PartialEq)]
pub struct QueryFailure {
    /// HTTP status code
    pub status: u16,
    /// Status-specific reason phrase
    pub reason: String,
    /// Human-readable summary
    pub message: String,
    /// Set for 401 and 429
    pub help_link: Option<String>,
    /// Parsed error body
    pub record: ErrorRecord,
}

impl QueryFailure {
    /// Classify a failed response
    pub fn from_response(status: u16, canonical_reason: Option<&str>, body: &str) -> RuntimeError {
        let record = ErrorRecord::parse(body);
        let canonical = canonical_reason.unwrap_or("Unknown").to_string();

        match status {
            401 => RuntimeError::Unauthorized(QueryFailure {
                status,
                reason: canonical,
                message: format!(
                    "{} - Please visit the FAQ (at the HelpLink) for help on resolving this error.",
                    record.summary()
                ),
                help_link: Some(HELP_LINK.to_string()),
                record,
            }),
            429 => RuntimeError::RateLimited(QueryFailure {
                status,
                reason: format!("{} (HTTP 429 - Too Many Requests)", canonical),
                message: format!(
                    "{} - Please visit the FAQ (at the HelpLink) for help on resolving this error.",
                    record.summary()
                ),
                help_link: Some(HELP_LINK.to_string()),
                record,
            }),
            _ => RuntimeError::Http(QueryFailure {
                status,
                reason: canonical,
                message: record.title.clone().unwrap_or_else(|| record.summary()),
                help_link: None,
                record,
            }),
        }
    }
}

impl fmt::Display for QueryFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}: {}", self.status, self.reason, self.message)
    }
}

/// Result type for runtime operations
pub type Result<T> = std::result::Result<T, RuntimeError>;
