use std::collections::BTreeMap;

use eagle_common::access::{PremiumFeature, Session, Tier, ZoneCatalog, ZoneId};
use eagle_common::config::Config;
use eagle_core::policy::{self, ZoneAccess};
use serde_json::{Value, json};

use crate::gprint;
use crate::terminal::format::{self, Detail};
use crate::terminal::print;

pub fn matrix(catalog: &ZoneCatalog, cfg: &Config, as_json: bool) -> anyhow::Result<()> {
    let features: Vec<&PremiumFeature> = unique_features(catalog);

    if as_json {
        print::print(&serde_json::to_string_pretty(&to_json(catalog, &features))?);
        return Ok(());
    }

    for (idx, tier) in Tier::ALL.into_iter().enumerate() {
        let session = Session::member(tier, "matrix");
        print::tree_head(idx, tier.name());

        let mut details: Vec<Detail> = ZoneId::ALL
            .into_iter()
            .map(|zone| {
                let access: ZoneAccess = policy::zone_access(tier, zone);
                (zone.slug().to_string(), format::access(access))
            })
            .collect();

        if cfg.quiet == 0 {
            details.extend(features.iter().map(|feature| {
                let decision = policy::authorize_feature(&session, feature);
                (feature.label.clone(), format::feature_decision(decision))
            }));
        }

        print::as_tree_one_level(details);
        if idx + 1 != Tier::ALL.len() {
            gprint!();
        }
    }
    Ok(())
}

/// Features keyed by route, first occurrence wins.
fn unique_features(catalog: &ZoneCatalog) -> Vec<&PremiumFeature> {
    let mut by_route: BTreeMap<&str, &PremiumFeature> = BTreeMap::new();
    for zone in catalog.zones() {
        for feature in &zone.features {
            by_route.entry(feature.route.as_str()).or_insert(feature);
        }
    }
    by_route.into_values().collect()
}

fn to_json(catalog: &ZoneCatalog, features: &[&PremiumFeature]) -> Value {
    let rows: Vec<Value> = Tier::ALL
        .into_iter()
        .map(|tier| {
            let session = Session::member(tier, "matrix");
            let zones: BTreeMap<&str, ZoneAccess> = ZoneId::ALL
                .into_iter()
                .map(|zone| (zone.slug(), policy::zone_access(tier, zone)))
                .collect();
            let unlocks: BTreeMap<&str, _> = features
                .iter()
                .map(|feature| {
                    (
                        feature.route.as_str(),
                        policy::authorize_feature(&session, feature),
                    )
                })
                .collect();
            json!({ "tier": tier, "home": policy::zone_for_tier(tier), "zones": zones, "features": unlocks })
        })
        .collect();

    json!({ "zones": catalog.zones().len(), "matrix": rows })
}
