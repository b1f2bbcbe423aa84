//! Built requests

use super::url::encode_param;
use serde::{Deserialize, Serialize};
use std::fmt;

/// HTTP method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    GET,
    POST,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HttpMethod::GET => write!(f, "GET"),
            HttpMethod::POST => write!(f, "POST"),
        }
    }
}

/// Name/value pair in a query string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryParameter {
    pub name: String,
    pub value: String,
}

impl QueryParameter {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Endpoint plus ordered query parameters, ready to dispatch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltRequest {
    endpoint: String,
    parameters: Vec<QueryParameter>,
    pub method: HttpMethod,
    /// Long-lived connection delivering a sequence of messages
    pub streaming: bool,
}

impl BuiltRequest {
    pub fn get(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            parameters: Vec::new(),
            method: HttpMethod::GET,
            streaming: false,
        }
    }

    pub fn post(endpoint: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::POST,
            ..Self::get(endpoint)
        }
    }

    pub fn with_streaming(mut self, streaming: bool) -> Self {
        self.streaming = streaming;
        self
    }

    /// Append a parameter, replacing the value if the name is already present
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.parameters.iter_mut().find(|p| p.name == name) {
            Some(existing) => existing.value = value,
            None => self.parameters.push(QueryParameter { name, value }),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn parameters(&self) -> &[QueryParameter] {
        &self.parameters
    }

    /// Encoded query string, skipping blank values
    pub fn query_string(&self) -> String {
        self.parameters
            .iter()
            .filter(|p| !p.value.trim().is_empty())
            .map(|p| format!("{}={}", encode_param(&p.name), encode_param(&p.value)))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Endpoint with the query string appended when non-empty
    pub fn full_url(&self) -> String {
        let query = self.query_string();
        if query.is_empty() {
            self.endpoint.clone()
        } else {
            format!("{}?{}", self.endpoint, query)
        }
    }
}
