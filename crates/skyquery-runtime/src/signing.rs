//! Request signing
//!
//! The executor calls a `RequestSigner` once per dispatched request and puts
//! the returned value in the `Authorization` header. How credentials are
//! acquired or refreshed is up to the signer.

use crate::error::{Result, RuntimeError};
use crate::net::{HttpMethod, QueryParameter};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::RwLock;

/// Produces authorization header values
#[async_trait]
pub trait RequestSigner: Send + Sync {
    /// Authorization value for one request
    async fn sign(&self, method: HttpMethod, url: &str, params: &[QueryParameter])
        -> Result<String>;

    /// DID of the signed-in account, used as the repo of record writes
    fn session_did(&self) -> Option<String> {
        None
    }

    /// Whether responses may be requested compressed
    fn supports_compression(&self) -> bool {
        true
    }
}

/// Authenticated session, as returned by `com.atproto.server.createSession`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub did: String,
    pub handle: String,
    pub email: Option<String>,
    pub access_jwt: Option<String>,
    pub refresh_jwt: Option<String>,
}

impl Session {
    pub fn new(did: impl Into<String>, handle: impl Into<String>) -> Self {
        Self {
            did: did.into(),
            handle: handle.into(),
            ..Self::default()
        }
    }

    pub fn with_access_jwt(mut self, token: impl Into<String>) -> Self {
        self.access_jwt = Some(token.into());
        self
    }

    pub fn with_refresh_jwt(mut self, token: impl Into<String>) -> Self {
        self.refresh_jwt = Some(token.into());
        self
    }
}

/// Signs with `Bearer <access jwt>` from the current session
#[derive(Debug, Default)]
pub struct BearerSigner {
    session: RwLock<Option<Session>>,
}

impl BearerSigner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(session: Session) -> Self {
        Self {
            session: RwLock::new(Some(session)),
        }
    }

    /// Replace the current session, e.g. after a refresh
    pub fn set_session(&self, session: Option<Session>) {
        let mut guard = self.session.write().unwrap_or_else(|e| e.into_inner());
        *guard = session;
    }

    pub fn session(&self) -> Option<Session> {
        self.session
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

#[async_trait]
impl RequestSigner for BearerSigner {
    async fn sign(
        &self,
        _method: HttpMethod,
        _url: &str,
        _params: &[QueryParameter],
    ) -> Result<String> {
        let token = self
            .session
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .as_ref()
            .and_then(|s| s.access_jwt.clone())
            .filter(|t| !t.trim().is_empty());

        match token {
            Some(token) => Ok(format!("Bearer {}", token)),
            None => Err(RuntimeError::Signing(
                "no access token in the current session".to_string(),
            )),
        }
    }

    fn session_did(&self) -> Option<String> {
        self.session().map(|s| s.did).filter(|d| !d.is_empty())
    }
}
