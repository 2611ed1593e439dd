//! # Eagle Core
//!
//! Tier-based access control for the member dashboards.
//!
//! * **[`policy`]**: pure zone and feature decisions. The single source of truth.
//! * **[`session`]**: the session port, its adapters, and the provider service.
//! * **[`gate`]**: per-page lifecycle around the policy, with a stale-decision guard.
//! * **[`navigator`]**: follows denial and login redirects.
//! * **[`sidebar`]**: lock-annotated navigation items.
//! * **[`guard`]**: the same rules enforced at the API boundary.

pub mod gate;
pub mod guard;
pub mod navigator;
pub mod policy;
pub mod session;
pub mod sidebar;
