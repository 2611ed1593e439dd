//! Server-side enforcement for API routes.
//!
//! Applies the same zone and feature rules as the page gate to paths of the
//! form `/api/hub/<zone>/...`, so tier checks do not rely on the front-end
//! alone. Failures map onto HTTP 401, 403 and 404.
//!
//! Paths are canonicalised before classification. A hub path that does not
//! name a known zone has no API behind it and is refused rather than passed.

use std::sync::Arc;

use eagle_common::access::route::canonical_path;
use eagle_common::access::{Route, Session, ZoneCatalog};
use eagle_common::warn;
use thiserror::Error;

use crate::policy::{self, Decision, Denial, RedirectTarget};
use crate::session::SessionProvider;

pub const API_PREFIX: &str = "/api";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    #[error("authentication required")]
    Unauthenticated,
    #[error("{}", .0.message)]
    Forbidden(Denial),
    #[error("no such resource: {0}")]
    NotFound(String),
}

impl AccessError {
    pub fn status_code(&self) -> u16 {
        match self {
            AccessError::Unauthenticated => 401,
            AccessError::Forbidden(_) => 403,
            AccessError::NotFound(_) => 404,
        }
    }
}

/// Checks an already resolved session against an API path.
pub fn check(session: &Session, api_path: &str, catalog: &ZoneCatalog) -> Result<(), AccessError> {
    let canonical = canonical_path(api_path);
    let path = match canonical.strip_prefix(API_PREFIX) {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => rest,
        _ => canonical.as_str(),
    };
    let route = Route::parse(path);

    if route.is_protected() && !session.authenticated {
        return Err(AccessError::Unauthenticated);
    }

    match policy::authorize_route(session, &route, catalog) {
        Decision::Allow { .. } => Ok(()),
        Decision::Redirect {
            target: RedirectTarget::Login,
        } => Err(AccessError::Unauthenticated),
        // bare or unknown hub segment
        Decision::Redirect { .. } => Err(AccessError::NotFound(route.path())),
        Decision::DenyWithRedirect { denial, .. } => Err(AccessError::Forbidden(denial)),
    }
}

pub struct ApiGuard {
    provider: Arc<SessionProvider>,
    catalog: Arc<ZoneCatalog>,
}

impl ApiGuard {
    pub fn new(provider: Arc<SessionProvider>, catalog: Arc<ZoneCatalog>) -> Self {
        Self { provider, catalog }
    }

    /// Resolves the caller's session and checks it against `api_path`.
    pub async fn enforce(&self, api_path: &str) -> Result<Session, AccessError> {
        let session = match self.provider.session().await {
            Ok(session) => session,
            Err(e) => {
                warn!("Session lookup failed for {api_path}: {e}");
                return Err(AccessError::Unauthenticated);
            }
        };
        check(&session, api_path, &self.catalog)?;
        Ok(session)
    }
}
