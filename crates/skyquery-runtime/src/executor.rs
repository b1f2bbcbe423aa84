//! Execution engine
//!
//! Dispatches built requests over HTTP, one request per call. Every call
//! signs the request, waits for the response under the caller's cancel
//! signal, and routes statuses >= 400 to the error parser.

use crate::cancel::CancelSignal;
use crate::error::{QueryFailure, Result, RuntimeError};
use crate::net::{BuiltRequest, HttpMethod};
use crate::signing::RequestSigner;
use reqwest::header::{HeaderMap, AUTHORIZATION, CACHE_CONTROL};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Default connect and response-header timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(100_000);

/// Default body read timeout
pub const DEFAULT_READ_WRITE_TIMEOUT: Duration = Duration::from_millis(300_000);

/// Executor configuration
///
/// `timeout` bounds connecting and waiting for the response headers;
/// `read_write_timeout` separately bounds reading the body.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutorConfig {
    pub user_agent: String,
    pub timeout: Duration,
    pub read_write_timeout: Duration,
    pub proxy: Option<String>,
    pub enable_compression: bool,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            user_agent: format!("skyquery/{}", env!("CARGO_PKG_VERSION")),
            timeout: DEFAULT_TIMEOUT,
            read_write_timeout: DEFAULT_READ_WRITE_TIMEOUT,
            proxy: None,
            enable_compression: true,
        }
    }
}

/// Rate-limit headers of the last response
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RateLimitInfo {
    pub limit: Option<i64>,
    pub remaining: Option<i64>,
    /// Epoch seconds when the window resets
    pub reset: Option<i64>,
    /// Seconds to wait, from `retry-after`
    pub retry_after: Option<i64>,
}

impl RateLimitInfo {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let read = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse::<i64>().ok())
        };

        Self {
            limit: read("x-rate-limit-limit"),
            remaining: read("x-rate-limit-remaining"),
            reset: read("x-rate-limit-reset"),
            retry_after: read("retry-after"),
        }
    }
}

/// Metadata of the most recent response
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResponseMeta {
    pub url: String,
    pub status: u16,
    pub headers: BTreeMap<String, String>,
    pub rate_limit: RateLimitInfo,
}

impl ResponseMeta {
    fn from_response(url: &str, response: &reqwest::Response) -> Self {
        let headers = response
            .headers()
            .iter()
            .filter_map(|(k, v)| v.to_str().ok().map(|v| (k.as_str().to_string(), v.to_string())))
            .collect();

        Self {
            url: url.to_string(),
            status: response.status().as_u16(),
            headers,
            rate_limit: RateLimitInfo::from_headers(response.headers()),
        }
    }
}

/// Outcome of a streaming callback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamControl {
    Continue,
    /// Close the connection and return
    Close,
}

/// HTTP execution engine
pub struct Executor {
    client: reqwest::Client,
    config: ExecutorConfig,
    signer: Arc<dyn RequestSigner>,
    last_response: Mutex<Option<ResponseMeta>>,
}

impl Executor {
    pub fn new(config: ExecutorConfig, signer: Arc<dyn RequestSigner>) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .connect_timeout(config.timeout)
            .gzip(config.enable_compression && signer.supports_compression());

        if let Some(proxy) = &config.proxy {
            let proxy = reqwest::Proxy::all(proxy)
                .map_err(|e| RuntimeError::Config(format!("invalid proxy '{}': {}", proxy, e)))?;
            builder = builder.proxy(proxy);
        }

        let client = builder
            .build()
            .map_err(|e| RuntimeError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            config,
            signer,
            last_response: Mutex::new(None),
        })
    }

    pub fn config(&self) -> &ExecutorConfig {
        &self.config
    }

    pub fn signer(&self) -> &Arc<dyn RequestSigner> {
        &self.signer
    }

    /// Metadata of the most recent response, if any
    pub fn last_response(&self) -> Option<ResponseMeta> {
        self.last_response
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Dispatch a request and return the success body
    pub async fn query(&self, request: &BuiltRequest, cancel: &CancelSignal) -> Result<String> {
        if request.streaming {
            return Err(RuntimeError::Config(format!(
                "{} is a streaming request; use Executor::stream",
                request.endpoint()
            )));
        }

        let url = request.full_url();
        let auth = self
            .signer
            .sign(request.method, &url, request.parameters())
            .await?;

        let builder = match request.method {
            HttpMethod::GET => self.client.get(&url),
            HttpMethod::POST => self.client.post(&url).header(CACHE_CONTROL, "no-cache"),
        }
        .header(AUTHORIZATION, auth);

        tracing::debug!("dispatching {} {}", request.method, url);
        let response = self.send(builder, cancel).await?;
        self.finish(&url, response, cancel).await
    }

    /// POST a JSON body and return the success body
    pub async fn send_json<B: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &B,
        cancel: &CancelSignal,
    ) -> Result<String> {
        let auth = self.signer.sign(HttpMethod::POST, url, &[]).await?;

        let builder = self
            .client
            .post(url)
            .header(AUTHORIZATION, auth)
            .header(CACHE_CONTROL, "no-cache")
            .json(body);

        tracing::debug!("dispatching POST {}", url);
        let response = self.send(builder, cancel).await?;
        self.finish(url, response, cancel).await
    }

    /// Open a streaming request and feed each newline-delimited message to
    /// `on_message` until the server ends the stream, the callback closes
    /// it, or `cancel` fires
    pub async fn stream<F>(
        &self,
        request: &BuiltRequest,
        cancel: &CancelSignal,
        mut on_message: F,
    ) -> Result<()>
    where
        F: FnMut(&str) -> StreamControl + Send,
    {
        if !request.streaming {
            return Err(RuntimeError::Config(format!(
                "{} is not a streaming request; use Executor::query",
                request.endpoint()
            )));
        }

        let url = request.full_url();
        let auth = self
            .signer
            .sign(request.method, &url, request.parameters())
            .await?;

        let builder = match request.method {
            HttpMethod::GET => self.client.get(&url),
            HttpMethod::POST => self.client.post(&url),
        }
        .header(AUTHORIZATION, auth);

        tracing::info!("opening stream {}", url);
        let mut response = self.send(builder, cancel).await?;
        self.record(&url, &response);

        let status = response.status();
        if status.as_u16() >= 400 {
            let body = self.read_body(response, cancel).await?;
            return Err(QueryFailure::from_response(
                status.as_u16(),
                status.canonical_reason(),
                &body,
            ));
        }

        let mut buffer: Vec<u8> = Vec::new();
        loop {
            let chunk = tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    tracing::info!("stream {} cancelled", url);
                    return Err(RuntimeError::Cancelled);
                }
                chunk = response.chunk() => chunk?,
            };

            let Some(chunk) = chunk else {
                break;
            };
            buffer.extend_from_slice(&chunk);

            while let Some(pos) = buffer.iter().position(|b| *b == b'\n') {
                let line: Vec<u8> = buffer.drain(..=pos).collect();
                if deliver(&line, &mut on_message) == StreamControl::Close {
                    tracing::info!("stream {} closed by caller", url);
                    return Ok(());
                }
            }
        }

        if !buffer.is_empty() {
            deliver(&buffer, &mut on_message);
        }
        tracing::info!("stream {} ended", url);
        Ok(())
    }

    async fn send(
        &self,
        builder: reqwest::RequestBuilder,
        cancel: &CancelSignal,
    ) -> Result<reqwest::Response> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::debug!("request cancelled before a response arrived");
                Err(RuntimeError::Cancelled)
            }
            response = tokio::time::timeout(self.config.timeout, builder.send()) => match response {
                Ok(response) => response.map_err(RuntimeError::from),
                Err(_) => Err(RuntimeError::Timeout(format!(
                    "no response within {:?}",
                    self.config.timeout
                ))),
            },
        }
    }

    async fn finish(
        &self,
        url: &str,
        response: reqwest::Response,
        cancel: &CancelSignal,
    ) -> Result<String> {
        self.record(url, &response);
        let status = response.status();
        let body = self.read_body(response, cancel).await?;

        if status.as_u16() >= 400 {
            let err = QueryFailure::from_response(status.as_u16(), status.canonical_reason(), &body);
            tracing::warn!("{} failed: {}", url, err);
            return Err(err);
        }

        Ok(body)
    }

    async fn read_body(&self, response: reqwest::Response, cancel: &CancelSignal) -> Result<String> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(RuntimeError::Cancelled),
            body = tokio::time::timeout(self.config.read_write_timeout, response.text()) => match body {
                Ok(text) => text.map_err(RuntimeError::from),
                Err(_) => Err(RuntimeError::Timeout(format!(
                    "reading the response body took longer than {:?}",
                    self.config.read_write_timeout
                ))),
            },
        }
    }

    fn record(&self, url: &str, response: &reqwest::Response) {
        let meta = ResponseMeta::from_response(url, response);
        *self.last_response.lock().unwrap_or_else(|e| e.into_inner()) = Some(meta);
    }
}

fn deliver<F>(line: &[u8], on_message: &mut F) -> StreamControl
where
    F: FnMut(&str) -> StreamControl,
{
    let text = String::from_utf8_lossy(line);
    let message = text.trim_end_matches(['\r', '\n']);
    if message.trim().is_empty() {
        return StreamControl::Continue;
    }
    on_message(message)
}
