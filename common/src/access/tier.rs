//! # Subscription Tiers
//!
//! A [`Tier`] is what a member pays for. Tiers are *not* totally ordered:
//! `Script` shares the rank of `Basic` but belongs to its own lineage, so
//! comparisons must go through the policy in `eagle-core` rather than `Ord`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Tier {
    #[default]
    None,
    Basic,
    Script,
    Diamond,
    Infinity,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown tier '{0}' (expected one of: none, basic, script, diamond, infinity)")]
pub struct UnknownTier(pub String);

impl Tier {
    pub const ALL: [Tier; 5] = [
        Tier::None,
        Tier::Basic,
        Tier::Script,
        Tier::Diamond,
        Tier::Infinity,
    ];

    /// Base rank from the hierarchy table. `Script` aliases `Basic`.
    pub fn rank(self) -> u8 {
        match self {
            Tier::None => 0,
            Tier::Basic | Tier::Script => 1,
            Tier::Diamond => 2,
            Tier::Infinity => 3,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Tier::None => "None",
            Tier::Basic => "Basic",
            Tier::Script => "Script",
            Tier::Diamond => "Diamond",
            Tier::Infinity => "Infinity",
        }
    }

    /// Lenient parse for values coming from the backend.
    ///
    /// Anything outside the enumeration collapses to [`Tier::None`].
    /// Matching is on the whole value, never on substrings.
    pub fn from_claim(raw: &str) -> Self {
        match raw.parse::<Tier>() {
            Ok(tier) => tier,
            Err(UnknownTier(value)) => {
                if !value.is_empty() {
                    crate::warn!("Unrecognised tier '{value}', falling back to None");
                }
                Tier::None
            }
        }
    }
}

impl FromStr for Tier {
    type Err = UnknownTier;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "none" | "free" => Ok(Tier::None),
            "basic" => Ok(Tier::Basic),
            "script" => Ok(Tier::Script),
            "diamond" => Ok(Tier::Diamond),
            "infinity" => Ok(Tier::Infinity),
            _ => Err(UnknownTier(trimmed.to_string())),
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<String> for Tier {
    fn from(raw: String) -> Self {
        Tier::from_claim(&raw)
    }
}

impl From<Tier> for String {
    fn from(tier: Tier) -> Self {
        tier.name().to_string()
    }
}
