//! The session **port** and the provider service built on top of it.
//!
//! The auth backend owns sessions; this crate only reads them. A
//! [`SessionSource`] is the boundary to that backend, and the
//! [`SessionProvider`] is what the routing layer is handed: it caches the
//! last snapshot and makes refreshing an explicit call.
//!
//! **Architectural Note:**
//! Gates and guards depend on the provider, never on a concrete source,
//! so the HTTP adapter and the fixed adapter are interchangeable.

use std::sync::Arc;

use async_trait::async_trait;
use eagle_common::access::{Credentials, Session};
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::debug;

mod fixed;
mod http;

pub use fixed::FixedSessionSource;
pub use http::HttpSessionSource;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("auth service unreachable: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("auth service answered with status {0}")]
    Status(u16),
    #[error("malformed session payload: {0}")]
    Payload(String),
    #[error("login rejected: {0}")]
    LoginRejected(String),
    #[error("auth service unavailable: {0}")]
    Unavailable(String),
}

/// Read access to the external authentication collaborator.
#[async_trait]
pub trait SessionSource: Send + Sync {
    async fn get_session(&self) -> Result<Session, SessionError>;

    async fn login(&self, credentials: &Credentials) -> Result<(), SessionError>;

    async fn logout(&self) -> Result<(), SessionError>;
}

/// Session service injected into gates and guards.
pub struct SessionProvider {
    source: Arc<dyn SessionSource>,
    current: RwLock<Option<Session>>,
}

impl SessionProvider {
    pub fn new(source: Arc<dyn SessionSource>) -> Self {
        Self {
            source,
            current: RwLock::new(None),
        }
    }

    /// The cached session, fetching it first if nothing is cached.
    pub async fn session(&self) -> Result<Session, SessionError> {
        if let Some(session) = self.current.read().await.as_ref() {
            return Ok(session.clone());
        }
        self.refresh().await
    }

    /// Always asks the source and replaces the cached snapshot.
    ///
    /// A failed lookup clears the cache rather than keeping a snapshot that
    /// may no longer be valid.
    pub async fn refresh(&self) -> Result<Session, SessionError> {
        match self.source.get_session().await {
            Ok(session) => {
                debug!(
                    authenticated = session.authenticated,
                    tier = %session.tier,
                    "session refreshed"
                );
                *self.current.write().await = Some(session.clone());
                Ok(session)
            }
            Err(e) => {
                *self.current.write().await = None;
                Err(e)
            }
        }
    }

    pub async fn login(&self, credentials: &Credentials) -> Result<Session, SessionError> {
        self.source.login(credentials).await?;
        self.refresh().await
    }

    pub async fn logout(&self) -> Result<(), SessionError> {
        let result = self.source.logout().await;
        *self.current.write().await = None;
        result
    }

    /// Drops the cached snapshot so the next [`Self::session`] call refetches.
    pub async fn invalidate(&self) {
        *self.current.write().await = None;
    }
}
