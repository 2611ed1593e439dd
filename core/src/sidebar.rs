//! Navigation items for a zone's sidebar.
//!
//! Locked features stay in the list with `locked = true`; the front-end
//! renders them as inert links with a lock indicator.

use eagle_common::access::{Session, Tier, ZoneCatalog, ZoneId};
use serde::Serialize;

use crate::policy::{self, FeatureDecision};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavItem {
    pub label: String,
    pub href: String,
    pub required_tier: Tier,
    pub locked: bool,
}

pub fn sidebar(session: &Session, zone: ZoneId, catalog: &ZoneCatalog) -> Vec<NavItem> {
    let Some(dashboard) = catalog.zone(zone) else {
        return Vec::new();
    };

    dashboard
        .features
        .iter()
        .map(|feature| NavItem {
            label: feature.label.clone(),
            href: format!("{}/{}", zone.root_path(), feature.route),
            required_tier: feature.required_tier,
            locked: policy::authorize_feature(session, feature) == FeatureDecision::Locked,
        })
        .collect()
}
