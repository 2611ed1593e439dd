//! # Dashboard Zones
//!
//! The four tier-named dashboard roots and the premium features inside them.
//!
//! The [`ZoneCatalog`] is loaded once (built-in or from TOML), validated,
//! and then shared read-only for the lifetime of the process.

use std::collections::HashSet;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use super::tier::Tier;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoneId {
    Basic,
    Diamond,
    Infinity,
    Script,
}

impl ZoneId {
    pub const ALL: [ZoneId; 4] = [
        ZoneId::Basic,
        ZoneId::Diamond,
        ZoneId::Infinity,
        ZoneId::Script,
    ];

    pub fn slug(self) -> &'static str {
        match self {
            ZoneId::Basic => "basic",
            ZoneId::Diamond => "diamond",
            ZoneId::Infinity => "infinity",
            ZoneId::Script => "script",
        }
    }

    /// The subscription tier the zone is named after.
    pub fn tier(self) -> Tier {
        match self {
            ZoneId::Basic => Tier::Basic,
            ZoneId::Diamond => Tier::Diamond,
            ZoneId::Infinity => Tier::Infinity,
            ZoneId::Script => Tier::Script,
        }
    }

    /// Path of the zone root, e.g. `/hub/diamond`.
    pub fn root_path(self) -> String {
        format!("/hub/{}", self.slug())
    }
}

impl fmt::Display for ZoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for ZoneId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ZoneId::ALL
            .into_iter()
            .find(|zone| zone.slug() == s)
            .ok_or_else(|| format!("unknown zone: {s}"))
    }
}

/// A sub-route gated independently of its enclosing zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PremiumFeature {
    pub route: String,
    pub label: String,
    #[serde(deserialize_with = "strict_tier")]
    pub required_tier: Tier,
}

impl PremiumFeature {
    pub fn new(route: &str, label: &str, required_tier: Tier) -> Self {
        Self {
            route: route.to_string(),
            label: label.to_string(),
            required_tier,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardZone {
    pub id: ZoneId,
    #[serde(deserialize_with = "strict_tier")]
    pub required_tier: Tier,
    #[serde(default)]
    pub features: Vec<PremiumFeature>,
}

impl DashboardZone {
    /// Feature routes match case-insensitively.
    pub fn feature(&self, route: &str) -> Option<&PremiumFeature> {
        self.features
            .iter()
            .find(|feature| feature.route.eq_ignore_ascii_case(route))
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read zone catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed zone catalog: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("zone '{0}' is defined more than once")]
    DuplicateZone(ZoneId),
    #[error("zone '{0}' is missing from the catalog")]
    MissingZone(ZoneId),
    #[error("zone '{zone}' lists feature '{route}' more than once")]
    DuplicateFeature { zone: ZoneId, route: String },
    #[error("zone '{0}' cannot require tier None")]
    UngatedZone(ZoneId),
    #[error("zone '{zone}' must require tier {expected}, not {found}")]
    TierMismatch {
        zone: ZoneId,
        expected: Tier,
        found: Tier,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneCatalog {
    zones: Vec<DashboardZone>,
}

impl ZoneCatalog {
    /// The catalog shipped with the platform.
    pub fn builtin() -> Self {
        let ai_advisor = || PremiumFeature::new("ai-advisor", "AI Advisor", Tier::Infinity);
        let trading_scripts =
            || PremiumFeature::new("trading-scripts", "Trading Scripts", Tier::Script);

        Self {
            zones: vec![
                DashboardZone {
                    id: ZoneId::Basic,
                    required_tier: Tier::Basic,
                    features: vec![
                        PremiumFeature::new("watchlist", "Watchlist", Tier::Basic),
                        PremiumFeature::new("alerts", "Trade Alerts", Tier::Basic),
                        ai_advisor(),
                        trading_scripts(),
                    ],
                },
                DashboardZone {
                    id: ZoneId::Diamond,
                    required_tier: Tier::Diamond,
                    features: vec![
                        PremiumFeature::new("options-flow", "Options Flow", Tier::Diamond),
                        PremiumFeature::new("swing-trades", "Swing Trades", Tier::Diamond),
                        ai_advisor(),
                        trading_scripts(),
                    ],
                },
                DashboardZone {
                    id: ZoneId::Infinity,
                    required_tier: Tier::Infinity,
                    features: vec![
                        ai_advisor(),
                        PremiumFeature::new("dark-pool", "Dark Pool Prints", Tier::Infinity),
                        trading_scripts(),
                    ],
                },
                DashboardZone {
                    id: ZoneId::Script,
                    required_tier: Tier::Script,
                    features: vec![
                        trading_scripts(),
                        PremiumFeature::new("script-library", "Script Library", Tier::Script),
                        ai_advisor(),
                    ],
                },
            ],
        }
    }

    pub fn from_toml(toml_str: &str) -> Result<Self, CatalogError> {
        let catalog: ZoneCatalog = toml::from_str(toml_str)?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml(&raw)
    }

    /// Every zone exactly once, gated at its namesake tier, with no feature
    /// route repeated (ignoring case).
    pub fn validate(&self) -> Result<(), CatalogError> {
        let mut seen: HashSet<ZoneId> = HashSet::new();
        for zone in &self.zones {
            if !seen.insert(zone.id) {
                return Err(CatalogError::DuplicateZone(zone.id));
            }
            if zone.required_tier == Tier::None {
                return Err(CatalogError::UngatedZone(zone.id));
            }
            if zone.required_tier != zone.id.tier() {
                return Err(CatalogError::TierMismatch {
                    zone: zone.id,
                    expected: zone.id.tier(),
                    found: zone.required_tier,
                });
            }
            let mut routes: HashSet<String> = HashSet::new();
            for feature in &zone.features {
                if !routes.insert(feature.route.to_ascii_lowercase()) {
                    return Err(CatalogError::DuplicateFeature {
                        zone: zone.id,
                        route: feature.route.clone(),
                    });
                }
            }
        }

        match ZoneId::ALL.into_iter().find(|id| !seen.contains(id)) {
            Some(missing) => Err(CatalogError::MissingZone(missing)),
            None => Ok(()),
        }
    }

    /// Looks up a zone. Validated catalogs always contain every [`ZoneId`].
    pub fn zone(&self, id: ZoneId) -> Option<&DashboardZone> {
        self.zones.iter().find(|zone| zone.id == id)
    }

    pub fn zones(&self) -> &[DashboardZone] {
        &self.zones
    }

    /// Required tier of a zone root, falling back to the zone's namesake tier.
    pub fn required_tier(&self, id: ZoneId) -> Tier {
        self.zone(id).map_or(id.tier(), |zone| zone.required_tier)
    }
}

impl Default for ZoneCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Tiers in configuration must be spelled correctly; a typo must not
/// silently turn into an ungated feature.
fn strict_tier<'de, D>(deserializer: D) -> Result<Tier, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    raw.parse::<Tier>().map_err(serde::de::Error::custom)
}
