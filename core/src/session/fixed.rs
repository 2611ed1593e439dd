//! An in-process session source.
//!
//! Serves a preset session (or a preset failure) and a small table of
//! accounts for login. Used by the CLI simulations and by tests.

use std::collections::HashMap;

use async_trait::async_trait;
use eagle_common::access::{Credentials, Session};
use tokio::sync::RwLock;

use super::{SessionError, SessionSource};

enum SourceState {
    Ready(Session),
    Failing(String),
}

pub struct FixedSessionSource {
    state: RwLock<SourceState>,
    accounts: HashMap<String, (String, Session)>,
}

impl FixedSessionSource {
    pub fn new(session: Session) -> Self {
        Self {
            state: RwLock::new(SourceState::Ready(session)),
            accounts: HashMap::new(),
        }
    }

    pub fn anonymous() -> Self {
        Self::new(Session::anonymous())
    }

    /// Every call fails as if the auth service were unreachable.
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            state: RwLock::new(SourceState::Failing(reason.into())),
            accounts: HashMap::new(),
        }
    }

    pub fn with_account(mut self, credentials: Credentials, session: Session) -> Self {
        self.accounts
            .insert(credentials.email, (credentials.password, session));
        self
    }

    async fn ensure_available(&self) -> Result<(), SessionError> {
        match &*self.state.read().await {
            SourceState::Failing(reason) => Err(SessionError::Unavailable(reason.clone())),
            SourceState::Ready(_) => Ok(()),
        }
    }
}

#[async_trait]
impl SessionSource for FixedSessionSource {
    async fn get_session(&self) -> Result<Session, SessionError> {
        match &*self.state.read().await {
            SourceState::Ready(session) => Ok(session.clone()),
            SourceState::Failing(reason) => Err(SessionError::Unavailable(reason.clone())),
        }
    }

    async fn login(&self, credentials: &Credentials) -> Result<(), SessionError> {
        self.ensure_available().await?;
        let Some((password, session)) = self.accounts.get(&credentials.email) else {
            return Err(SessionError::LoginRejected(format!(
                "no account for {}",
                credentials.email
            )));
        };
        if *password != credentials.password {
            return Err(SessionError::LoginRejected("wrong password".to_string()));
        }
        *self.state.write().await = SourceState::Ready(session.clone());
        Ok(())
    }

    async fn logout(&self) -> Result<(), SessionError> {
        self.ensure_available().await?;
        *self.state.write().await = SourceState::Ready(Session::anonymous());
        Ok(())
    }
}
