//! Query consumption shapes

use crate::context::SkyContext;
use crate::error::{Result, SdkError};
use skyquery_core::{Captures, Predicate, Value};
use skyquery_runtime::{BuiltRequest, CancelSignal, QueryEntity};
use std::marker::PhantomData;

/// A pending query against one entity
///
/// Nothing is sent until one of the consuming methods (`to_list`,
/// `first_or_default`, `single`, `single_or_default`) is awaited.
pub struct Query<'a, T: QueryEntity> {
    ctx: &'a SkyContext,
    predicate: Option<Predicate>,
    captures: Captures,
    cancel: CancelSignal,
    _entity: PhantomData<T>,
}

impl<'a, T: QueryEntity> Query<'a, T> {
    pub(crate) fn new(ctx: &'a SkyContext) -> Self {
        Self {
            ctx,
            predicate: None,
            captures: Captures::new(),
            cancel: CancelSignal::never(),
            _entity: PhantomData,
        }
    }

    /// Add a filter; repeated calls are AND-combined
    pub fn filter(mut self, predicate: Predicate) -> Self {
        self.predicate = Some(match self.predicate.take() {
            Some(existing) => existing & predicate,
            None => predicate,
        });
        self
    }

    /// Bind a variable referenced by the filter
    pub fn bind(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.captures.bind(name, value);
        self
    }

    /// Replace all bound variables
    pub fn with_captures(mut self, captures: Captures) -> Self {
        self.captures = captures;
        self
    }

    /// Give up when `signal` fires
    pub fn with_cancellation(mut self, signal: CancelSignal) -> Self {
        self.cancel = signal;
        self
    }

    pub fn predicate(&self) -> Option<&Predicate> {
        self.predicate.as_ref()
    }

    /// The request this query would send
    pub fn request(&self) -> Result<BuiltRequest> {
        let (request, _) = self
            .ctx
            .request_for::<T>(self.predicate.as_ref(), &self.captures)?;
        Ok(request)
    }

    /// Every result
    pub async fn to_list(self) -> Result<Vec<T>> {
        self.ctx
            .execute::<T>(self.predicate.as_ref(), &self.captures, &self.cancel)
            .await
    }

    /// The first result, if any
    pub async fn first_or_default(self) -> Result<Option<T>> {
        Ok(self.to_list().await?.into_iter().next())
    }

    /// The only result; fails for zero or several
    pub async fn single(self) -> Result<T> {
        self.single_or_default().await?.ok_or(SdkError::NoElements)
    }

    /// The only result, or `None`; fails for several
    pub async fn single_or_default(self) -> Result<Option<T>> {
        let mut results = self.to_list().await?;
        match results.len() {
            0 => Ok(None),
            1 => Ok(results.pop()),
            n => Err(SdkError::MoreThanOneElement(n)),
        }
    }
}
