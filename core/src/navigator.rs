//! Follows the redirects a [`ZoneGate`] asks for.
//!
//! A denial is shown for `denial_delay` before the redirect fires; an
//! unauthenticated or bare-hub visit redirects immediately. Each hop is a
//! fresh evaluation, so a navigation started elsewhere in the meantime
//! cancels the pending redirect.

use std::sync::Arc;
use std::time::Duration;

use eagle_common::error;
use tracing::debug;

use crate::gate::{GateState, ZoneGate};

/// Own-zone roots always authorize and `/login` is public, so real chains
/// are at most two hops long.
const MAX_HOPS: usize = 4;

/// Where a visit ended up, with every state it passed through.
#[derive(Debug, Clone)]
pub struct Landing {
    pub trail: Vec<GateState>,
}

impl Landing {
    pub fn state(&self) -> Option<&GateState> {
        self.trail.last()
    }

    pub fn path(&self) -> Option<&str> {
        self.state().map(GateState::path)
    }

    pub fn was_redirected(&self) -> bool {
        self.trail.len() > 1
    }
}

pub struct Navigator {
    gate: Arc<ZoneGate>,
    denial_delay: Duration,
}

impl Navigator {
    pub fn new(gate: Arc<ZoneGate>, denial_delay: Duration) -> Self {
        Self { gate, denial_delay }
    }

    pub fn gate(&self) -> &Arc<ZoneGate> {
        &self.gate
    }

    /// Visits `path` and follows redirects until a page authorizes.
    ///
    /// Returns `None` if a newer navigation superseded this one.
    pub async fn visit(&self, path: &str) -> Option<Landing> {
        let mut trail: Vec<GateState> = Vec::new();
        let mut next = path.to_string();

        for _ in 0..MAX_HOPS {
            let verdict = self.gate.evaluate(&next).await?;
            let redirect = verdict.state.redirect();
            let delay = matches!(verdict.state, GateState::Denied { .. });
            trail.push(verdict.state);

            let Some(target) = redirect else {
                return Some(Landing { trail });
            };

            if delay {
                tokio::time::sleep(self.denial_delay).await;
                if !self.gate.is_current(verdict.ticket) {
                    debug!(from = %next, "navigation superseded during denial notice");
                    return None;
                }
            }
            next = target.path();
        }

        error!("Redirect loop: gave up on {path} after {MAX_HOPS} hops");
        Some(Landing { trail })
    }
}
