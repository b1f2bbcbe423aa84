//! SkyContext - the main entry point
//!
//! A context owns the configuration and the execution engine. Each query
//! runs the whole pipeline once: partial evaluation, parameter extraction,
//! request building, dispatch and response mapping.

use crate::config::ClientConfig;
use crate::error::Result;
use crate::query::Query;
use skyquery_core::{Captures, ParameterExtractor, ParameterMap, PartialEvaluator, Predicate};
use skyquery_runtime::feed::post::CREATE_RECORD;
use skyquery_runtime::{
    map_response, BuiltRequest, CancelSignal, EntityKind, Executor, FeedQuery, PostRequest,
    PostResponse, QueryEntity, RequestSigner, ResponseMeta, RuntimeError,
};
use std::sync::{Arc, Mutex};

/// Client context
pub struct SkyContext {
    config: ClientConfig,
    executor: Executor,
    raw_result: Mutex<Option<String>>,
}

impl SkyContext {
    /// Create a context; see also `SkyContextBuilder`
    pub fn new(config: ClientConfig, signer: Arc<dyn RequestSigner>) -> Result<Self> {
        let config = config.validated()?;
        let executor = Executor::new(config.executor_config(), signer)?;

        tracing::debug!("created context for {}", config.base_url);
        Ok(Self {
            config,
            executor,
            raw_result: Mutex::new(None),
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Start a feed query
    pub fn feed(&self) -> Query<'_, FeedQuery> {
        self.query()
    }

    /// Start a query for any supported entity
    pub fn query<T: QueryEntity>(&self) -> Query<'_, T> {
        Query::new(self)
    }

    /// Build, without dispatching, the request an entity tag and predicate
    /// translate to
    pub fn build_request(
        &self,
        tag: &str,
        predicate: &Predicate,
        captures: &Captures,
    ) -> Result<BuiltRequest> {
        let kind = EntityKind::from_tag(tag)?;
        let params = Self::extract(kind, Some(predicate), captures)?;
        Ok(kind.build(self.base_url(), &params)?)
    }

    /// Create a post
    pub async fn post(&self, request: PostRequest) -> Result<PostResponse> {
        self.post_with_cancellation(request, &CancelSignal::never())
            .await
    }

    /// Create a post, giving up when `cancel` fires
    pub async fn post_with_cancellation(
        &self,
        request: PostRequest,
        cancel: &CancelSignal,
    ) -> Result<PostResponse> {
        let repo = self
            .executor
            .signer()
            .session_did()
            .ok_or_else(|| RuntimeError::Signing("no signed-in session to post as".to_string()))?;
        let body = request.into_create_record(repo)?;

        let url = format!("{}xrpc/{}", self.config.base_url, CREATE_RECORD);
        let text = self.executor.send_json(&url, &body, cancel).await?;
        self.store_raw(&text);

        let response = if text.trim().is_empty() {
            PostResponse::default()
        } else {
            serde_json::from_str(&text)
                .map_err(|e| RuntimeError::MalformedResponse(e.to_string()))?
        };

        tracing::info!("created post {}", response.uri.as_deref().unwrap_or("<unknown>"));
        Ok(response)
    }

    /// Metadata of the last response
    pub fn last_response(&self) -> Option<ResponseMeta> {
        self.executor.last_response()
    }

    /// Raw body of the last successful call, unless `exclude_raw_json` is set
    pub fn raw_result(&self) -> Option<String> {
        self.raw_result
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    pub(crate) fn request_for<T: QueryEntity>(
        &self,
        predicate: Option<&Predicate>,
        captures: &Captures,
    ) -> Result<(BuiltRequest, T::Inputs)> {
        let kind = T::kind();
        let params = Self::extract(kind, predicate, captures)?;
        let request = kind.build(self.base_url(), &params)?;
        let inputs = T::inputs(&params)?;
        Ok((request, inputs))
    }

    pub(crate) async fn execute<T: QueryEntity>(
        &self,
        predicate: Option<&Predicate>,
        captures: &Captures,
        cancel: &CancelSignal,
    ) -> Result<Vec<T>> {
        let (request, inputs) = self.request_for::<T>(predicate, captures)?;

        let body = self.executor.query(&request, cancel).await?;
        self.store_raw(&body);

        let results = map_response::<T>(&body, &inputs)?;
        tracing::debug!("{} query returned {} result(s)", T::kind(), results.len());
        Ok(results)
    }

    fn extract(
        kind: EntityKind,
        predicate: Option<&Predicate>,
        captures: &Captures,
    ) -> Result<ParameterMap> {
        let Some(predicate) = predicate else {
            return Ok(ParameterMap::new());
        };

        let descriptor = kind.descriptor();
        let evaluated = PartialEvaluator::with_captures(captures).evaluate(predicate)?;
        let params = ParameterExtractor::new(descriptor.field_names())
            .with_timestamp_format(descriptor.timestamps())
            .extract(&evaluated)?;
        Ok(params)
    }

    fn store_raw(&self, body: &str) {
        let mut raw = self.raw_result.lock().unwrap_or_else(|e| e.into_inner());
        *raw = if self.config.exclude_raw_json {
            None
        } else {
            Some(body.to_string())
        };
    }
}
