//! Configuration types for SkyContext

use crate::error::{Result, SdkError};
use serde::{Deserialize, Serialize};
use skyquery_runtime::ExecutorConfig;
use std::time::Duration;

/// Default service endpoint
pub const DEFAULT_BASE_URL: &str = "https://bsky.social/";

/// Client configuration
///
/// Every field has a default, so a YAML file only needs the keys it changes:
///
/// ```yaml
/// base_url: https://bsky.social
/// timeout_ms: 30000
/// proxy: http://localhost:8080
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Service base URL, always ending in `/`
    pub base_url: String,

    /// `User-Agent` sent with every request
    pub user_agent: String,

    /// Connect/overall timeout in milliseconds
    pub timeout_ms: u64,

    /// Body read timeout in milliseconds
    pub read_write_timeout_ms: u64,

    /// Optional proxy URL
    pub proxy: Option<String>,

    /// Request gzip-compressed responses
    pub enable_compression: bool,

    /// Do not keep the raw body of the last query
    pub exclude_raw_json: bool,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new() -> Self {
        let executor = ExecutorConfig::default();
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: executor.user_agent,
            timeout_ms: executor.timeout.as_millis() as u64,
            read_write_timeout_ms: executor.read_write_timeout.as_millis() as u64,
            proxy: None,
            enable_compression: executor.enable_compression,
            exclude_raw_json: false,
        }
    }

    /// Load configuration from YAML
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: ClientConfig = serde_yaml::from_str(yaml)?;
        config.validated()
    }

    /// Set base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = normalize_base_url(&base_url.into());
        self
    }

    /// Set user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set connect/overall timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = timeout.as_millis() as u64;
        self
    }

    /// Set body read timeout
    pub fn with_read_write_timeout(mut self, timeout: Duration) -> Self {
        self.read_write_timeout_ms = timeout.as_millis() as u64;
        self
    }

    /// Route requests through a proxy
    pub fn with_proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    /// Enable response compression
    pub fn enable_compression(mut self, enable: bool) -> Self {
        self.enable_compression = enable;
        self
    }

    /// Skip keeping the raw body of the last query
    pub fn exclude_raw_json(mut self, exclude: bool) -> Self {
        self.exclude_raw_json = exclude;
        self
    }

    /// Normalize and check the configuration
    pub fn validated(mut self) -> Result<Self> {
        if self.base_url.trim().is_empty() {
            return Err(SdkError::Config("base_url must not be empty".to_string()));
        }
        if self.timeout_ms == 0 || self.read_write_timeout_ms == 0 {
            return Err(SdkError::Config("timeouts must be greater than zero".to_string()));
        }
        self.base_url = normalize_base_url(&self.base_url);
        Ok(self)
    }

    /// Settings for the execution engine
    pub fn executor_config(&self) -> ExecutorConfig {
        ExecutorConfig {
            user_agent: self.user_agent.clone(),
            timeout: Duration::from_millis(self.timeout_ms),
            read_write_timeout: Duration::from_millis(self.read_write_timeout_ms),
            proxy: self.proxy.clone(),
            enable_compression: self.enable_compression,
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn normalize_base_url(url: &str) -> String {
    let trimmed = url.trim();
    if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{}/", trimmed)
    }
}
