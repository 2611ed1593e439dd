use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use eagle_common::access::{Credentials, Session, Tier, ZoneCatalog};
use eagle_core::gate::ZoneGate;
use eagle_core::session::{FixedSessionSource, SessionError, SessionProvider, SessionSource};
use tokio::sync::Mutex;

pub fn member(tier: Tier) -> Session {
    Session::member(tier, "profile-test")
}

pub fn gate_with(source: Arc<dyn SessionSource>) -> Arc<ZoneGate> {
    let provider = Arc::new(SessionProvider::new(source));
    Arc::new(ZoneGate::new(provider, Arc::new(ZoneCatalog::builtin())))
}

pub fn gate_for(session: Session) -> Arc<ZoneGate> {
    gate_with(Arc::new(FixedSessionSource::new(session)))
}

/// Answers each lookup after its own scripted delay, in call order.
pub struct DelayedSessionSource {
    session: Session,
    delays: Mutex<VecDeque<Duration>>,
}

impl DelayedSessionSource {
    pub fn new(session: Session, delays: &[Duration]) -> Self {
        Self {
            session,
            delays: Mutex::new(delays.iter().copied().collect()),
        }
    }
}

#[async_trait]
impl SessionSource for DelayedSessionSource {
    async fn get_session(&self) -> Result<Session, SessionError> {
        let delay = self.delays.lock().await.pop_front().unwrap_or_default();
        tokio::time::sleep(delay).await;
        Ok(self.session.clone())
    }

    async fn login(&self, _credentials: &Credentials) -> Result<(), SessionError> {
        Ok(())
    }

    async fn logout(&self) -> Result<(), SessionError> {
        Ok(())
    }
}
