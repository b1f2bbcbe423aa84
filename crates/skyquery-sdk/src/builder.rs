//! Builder pattern for SkyContext

use crate::config::ClientConfig;
use crate::context::SkyContext;
use crate::error::{Result, SdkError};
use skyquery_runtime::{BearerSigner, RequestSigner, Session};
use std::sync::Arc;
use std::time::Duration;

/// Builder for SkyContext
///
/// # Example
///
/// ```rust,ignore
/// use skyquery_sdk::{Session, SkyContextBuilder};
///
/// let ctx = SkyContextBuilder::new()
///     .with_base_url("https://bsky.social")
///     .with_session(Session::new(did, handle).with_access_jwt(jwt))
///     .build()?;
/// ```
#[derive(Default)]
pub struct SkyContextBuilder {
    config: ClientConfig,
    signer: Option<Arc<dyn RequestSigner>>,
}

impl SkyContextBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole configuration
    pub fn with_config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    /// Load configuration from YAML
    pub fn with_yaml_config(mut self, yaml: &str) -> Result<Self> {
        self.config = ClientConfig::from_yaml(yaml)?;
        Ok(self)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.config = self.config.with_base_url(base_url);
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config = self.config.with_user_agent(user_agent);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.with_timeout(timeout);
        self
    }

    pub fn with_read_write_timeout(mut self, timeout: Duration) -> Self {
        self.config = self.config.with_read_write_timeout(timeout);
        self
    }

    pub fn with_proxy(mut self, proxy: impl Into<String>) -> Self {
        self.config = self.config.with_proxy(proxy);
        self
    }

    pub fn enable_compression(mut self, enable: bool) -> Self {
        self.config = self.config.enable_compression(enable);
        self
    }

    pub fn exclude_raw_json(mut self, exclude: bool) -> Self {
        self.config = self.config.exclude_raw_json(exclude);
        self
    }

    /// Use a custom signer
    pub fn with_signer(mut self, signer: Arc<dyn RequestSigner>) -> Self {
        self.signer = Some(signer);
        self
    }

    /// Sign with the bearer token of an existing session
    pub fn with_session(mut self, session: Session) -> Self {
        self.signer = Some(Arc::new(BearerSigner::with_session(session)));
        self
    }

    /// Build the context
    pub fn build(self) -> Result<SkyContext> {
        let signer = self
            .signer
            .ok_or_else(|| SdkError::Config("a request signer or session is required".to_string()))?;
        SkyContext::new(self.config, signer)
    }
}
