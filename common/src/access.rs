//! # Access Model
//!
//! Plain data describing who is asking ([`session`]), what they pay for
//! ([`tier`]) and where they want to go ([`zone`], [`route`]).
//!
//! Nothing in here decides anything. The policy lives in `eagle-core`.

pub mod route;
pub mod session;
pub mod tier;
pub mod zone;

pub use route::Route;
pub use session::{Credentials, Session};
pub use tier::Tier;
pub use zone::{DashboardZone, PremiumFeature, ZoneCatalog, ZoneId};
