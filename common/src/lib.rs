//! # Eagle Common
//!
//! Shared vocabulary for the dashboard access layer.
//!
//! * **[`access`]**: subscription tiers, sessions, dashboard zones and routes.
//! * **[`config`]**: runtime options handed down from the front-end.
//! * **[`macros`]**: status logging macros used across the workspace.

pub mod access;
pub mod config;
pub mod macros;

#[doc(hidden)]
pub use tracing as __tracing;
