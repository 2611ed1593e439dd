//! # Protected Layout Gate
//!
//! Drives the per-page-load lifecycle around the policy:
//!
//! ```text
//! INITIALIZING -> { AUTHORIZED, DENIED, UNAUTHENTICATED }
//! ```
//!
//! While the session lookup is in flight the gate only ever exposes
//! `Initializing`, so zone content is never shown before a decision.
//! Each evaluation takes a ticket; a lookup that resolves after a newer
//! navigation has started is discarded instead of published.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use eagle_common::access::{Route, Tier, ZoneCatalog, ZoneId};
use eagle_common::{info, warn};
use serde::Serialize;
use tokio::sync::watch;
use tracing::debug;

use crate::policy::{self, Decision, Denial, RedirectTarget, ZoneAccess};
use crate::session::SessionProvider;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateState {
    /// Session status unknown; render a loading indicator.
    Initializing { path: String },
    Authorized {
        path: String,
        zone: Option<ZoneId>,
        access: ZoneAccess,
    },
    /// Show the denial notice, then redirect.
    Denied {
        path: String,
        redirect: RedirectTarget,
        denial: Denial,
    },
    /// Redirect to `/login` immediately.
    Unauthenticated { path: String },
    /// A bare `/hub` visit; redirect without a notice.
    Redirecting {
        path: String,
        redirect: RedirectTarget,
    },
}

/// What the page framework is handed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase", rename_all_fields = "camelCase")]
pub enum RenderState {
    Loading,
    Denied {
        required_tier: Tier,
        current_tier: Tier,
        message: String,
    },
    Authorized {
        path: String,
        zone: Option<ZoneId>,
        access: ZoneAccess,
    },
}

impl GateState {
    pub fn path(&self) -> &str {
        match self {
            GateState::Initializing { path }
            | GateState::Authorized { path, .. }
            | GateState::Denied { path, .. }
            | GateState::Unauthenticated { path }
            | GateState::Redirecting { path, .. } => path,
        }
    }

    /// Where this state sends the caller next, if anywhere.
    pub fn redirect(&self) -> Option<RedirectTarget> {
        match self {
            GateState::Denied { redirect, .. } | GateState::Redirecting { redirect, .. } => {
                Some(*redirect)
            }
            GateState::Unauthenticated { .. } => Some(RedirectTarget::Login),
            GateState::Initializing { .. } | GateState::Authorized { .. } => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, GateState::Initializing { .. })
    }

    pub fn render(&self) -> RenderState {
        match self {
            GateState::Authorized { path, zone, access } => RenderState::Authorized {
                path: path.clone(),
                zone: *zone,
                access: *access,
            },
            GateState::Denied { denial, .. } => RenderState::Denied {
                required_tier: denial.required_tier,
                current_tier: denial.current_tier,
                message: denial.message.clone(),
            },
            // nothing is shown while waiting or on the way out
            GateState::Initializing { .. }
            | GateState::Unauthenticated { .. }
            | GateState::Redirecting { .. } => RenderState::Loading,
        }
    }
}

/// A published decision together with the ticket it was issued under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub ticket: u64,
    pub state: GateState,
}

pub struct ZoneGate {
    provider: Arc<SessionProvider>,
    catalog: Arc<ZoneCatalog>,
    latest: AtomicU64,
    state: watch::Sender<GateState>,
}

impl ZoneGate {
    pub fn new(provider: Arc<SessionProvider>, catalog: Arc<ZoneCatalog>) -> Self {
        let (state, _) = watch::channel(GateState::Initializing {
            path: String::new(),
        });
        Self {
            provider,
            catalog,
            latest: AtomicU64::new(0),
            state,
        }
    }

    pub fn provider(&self) -> &Arc<SessionProvider> {
        &self.provider
    }

    pub fn catalog(&self) -> &Arc<ZoneCatalog> {
        &self.catalog
    }

    /// The state currently shown to the page.
    pub fn state(&self) -> GateState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<GateState> {
        self.state.subscribe()
    }

    pub fn is_current(&self, ticket: u64) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket
    }

    /// Evaluates a navigation to `path`.
    ///
    /// Returns `None` when a newer navigation started before this one
    /// resolved; its result is dropped and never published.
    pub async fn evaluate(&self, path: &str) -> Option<Verdict> {
        let ticket = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        let route = Route::parse(path);
        let path = route.path();

        if !route.is_protected() {
            let state = GateState::Authorized {
                path,
                zone: None,
                access: ZoneAccess::Full,
            };
            return self.publish(ticket, state);
        }

        self.publish(ticket, GateState::Initializing { path: path.clone() })?;

        let state = match self.provider.session().await {
            Ok(session) => {
                let decision = policy::authorize_route(&session, &route, &self.catalog);
                state_for(path, &route, decision)
            }
            Err(e) => {
                warn!("Session lookup failed, treating caller as signed out: {e}");
                GateState::Unauthenticated { path }
            }
        };

        self.publish(ticket, state)
    }

    fn publish(&self, ticket: u64, state: GateState) -> Option<Verdict> {
        let mut published = false;
        // the ticket check runs under the channel's write lock so a stale
        // result cannot slip in after a newer one
        self.state.send_if_modified(|current| {
            if self.latest.load(Ordering::SeqCst) != ticket {
                return false;
            }
            *current = state.clone();
            published = true;
            true
        });

        if !published {
            debug!(path = state.path(), ticket, "discarding stale gate decision");
            return None;
        }
        if let GateState::Denied { denial, .. } = &state {
            info!(path = state.path(), "{}", denial.message);
        }
        Some(Verdict { ticket, state })
    }
}

fn state_for(path: String, route: &Route, decision: Decision) -> GateState {
    match decision {
        Decision::Allow { access } => GateState::Authorized {
            path,
            zone: route.zone(),
            access,
        },
        Decision::Redirect {
            target: RedirectTarget::Login,
        } => GateState::Unauthenticated { path },
        Decision::Redirect { target } => GateState::Redirecting {
            path,
            redirect: target,
        },
        Decision::DenyWithRedirect { target, denial } => GateState::Denied {
            path,
            redirect: target,
            denial,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::FixedSessionSource;
    use eagle_common::access::Session;

    fn gate_for(session: Session) -> ZoneGate {
        let provider = SessionProvider::new(Arc::new(FixedSessionSource::new(session)));
        ZoneGate::new(Arc::new(provider), Arc::new(ZoneCatalog::builtin()))
    }

    #[tokio::test]
    async fn authorizes_own_zone() {
        let gate = gate_for(Session::member(Tier::Diamond, "p-1"));
        let verdict = gate.evaluate("/hub/diamond").await.unwrap();
        assert_eq!(
            verdict.state,
            GateState::Authorized {
                path: "/hub/diamond".to_string(),
                zone: Some(ZoneId::Diamond),
                access: ZoneAccess::Full,
            }
        );
        assert_eq!(gate.state(), verdict.state);
    }

    #[tokio::test]
    async fn denial_renders_both_tiers() {
        let gate = gate_for(Session::member(Tier::Basic, "p-1"));
        let verdict = gate.evaluate("/hub/infinity").await.unwrap();
        assert_eq!(
            verdict.state.redirect(),
            Some(RedirectTarget::Zone(ZoneId::Basic))
        );

        let rendered = serde_json::to_value(verdict.state.render()).unwrap();
        assert_eq!(rendered["type"], "denied");
        assert_eq!(rendered["requiredTier"], "Infinity");
        assert_eq!(rendered["currentTier"], "Basic");
    }

    #[tokio::test]
    async fn lookup_failure_fails_closed() {
        let provider = SessionProvider::new(Arc::new(FixedSessionSource::failing("timeout")));
        let gate = ZoneGate::new(Arc::new(provider), Arc::new(ZoneCatalog::builtin()));

        let verdict = gate.evaluate("/hub/infinity").await.unwrap();
        assert_eq!(
            verdict.state,
            GateState::Unauthenticated {
                path: "/hub/infinity".to_string()
            }
        );
        assert_eq!(verdict.state.render(), RenderState::Loading);
    }

    #[tokio::test]
    async fn public_routes_skip_the_lookup() {
        let provider = SessionProvider::new(Arc::new(FixedSessionSource::failing("timeout")));
        let gate = ZoneGate::new(Arc::new(provider), Arc::new(ZoneCatalog::builtin()));

        let verdict = gate.evaluate("/login").await.unwrap();
        assert!(matches!(verdict.state, GateState::Authorized { zone: None, .. }));
    }

    #[test]
    fn loading_renders_as_bare_type() {
        let rendered = serde_json::to_string(&RenderState::Loading).unwrap();
        assert_eq!(rendered, r#"{"type":"loading"}"#);
    }
}
