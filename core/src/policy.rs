//! # Tier Access Policy
//!
//! The single place that answers "may this session see this zone or
//! feature, and if not, where should it go instead".
//!
//! Every function here is pure. Re-evaluating the same `(session, target)`
//! always produces the same answer.

use eagle_common::access::route::LOGIN_PATH;
use eagle_common::access::{PremiumFeature, Route, Session, Tier, ZoneCatalog, ZoneId};
use serde::Serialize;

/// How much of a zone a session may see.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoneAccess {
    /// The zone renders with the session's own feature unlocks.
    Full,
    /// The zone renders, but nothing beyond the session's tier unlocks.
    Preview,
    Denied,
}

/// Where a redirect sends the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase", tag = "kind", content = "zone")]
pub enum RedirectTarget {
    Login,
    Zone(ZoneId),
}

impl RedirectTarget {
    pub fn path(self) -> String {
        match self {
            RedirectTarget::Login => LOGIN_PATH.to_string(),
            RedirectTarget::Zone(zone) => zone.root_path(),
        }
    }
}

/// Why a session was turned away, in the words shown to the member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Denial {
    pub required_tier: Tier,
    pub current_tier: Tier,
    pub message: String,
}

impl Denial {
    pub fn for_zone(zone: ZoneId, required_tier: Tier, current_tier: Tier) -> Self {
        Self {
            required_tier,
            current_tier,
            message: format!(
                "Access Denied: the {zone} dashboard requires a {required_tier} subscription, \
                 but your current tier is {current_tier}."
            ),
        }
    }

    pub fn for_feature(feature: &PremiumFeature, current_tier: Tier) -> Self {
        Self {
            required_tier: feature.required_tier,
            current_tier,
            message: format!(
                "Access Denied: {} requires a {} subscription, but your current tier is {}.",
                feature.label, feature.required_tier, current_tier
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "decision")]
pub enum Decision {
    Allow { access: ZoneAccess },
    Redirect { target: RedirectTarget },
    DenyWithRedirect { target: RedirectTarget, denial: Denial },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FeatureDecision {
    Unlocked,
    /// Rendered with a lock indicator, never hidden.
    Locked,
}

/// The zone a tier calls home.
pub fn zone_for_tier(tier: Tier) -> ZoneId {
    match tier {
        Tier::None | Tier::Basic => ZoneId::Basic,
        Tier::Diamond => ZoneId::Diamond,
        Tier::Infinity => ZoneId::Infinity,
        Tier::Script => ZoneId::Script,
    }
}

/// Zone-level override table.
///
/// `Infinity` sees everything, `Diamond` may preview `basic`, everyone
/// else only sees their own zone.
pub fn zone_access(tier: Tier, zone: ZoneId) -> ZoneAccess {
    if zone == zone_for_tier(tier) {
        return ZoneAccess::Full;
    }
    match (tier, zone) {
        (Tier::Infinity, _) => ZoneAccess::Full,
        (Tier::Diamond, ZoneId::Basic) => ZoneAccess::Preview,
        _ => ZoneAccess::Denied,
    }
}

/// Whether holding `held` satisfies a `required` tier.
///
/// `Script` content is its own lineage: only `Script` and `Infinity` reach
/// it, regardless of rank. Everything else is a rank comparison in which
/// `Script` counts as `Basic`.
pub fn satisfies(held: Tier, required: Tier) -> bool {
    match (held, required) {
        (Tier::Infinity, _) => true,
        (_, Tier::None) => true,
        (Tier::Script, Tier::Script) => true,
        (_, Tier::Script) => false,
        (held, required) => held.rank() >= required.rank(),
    }
}

pub fn authorize_zone(session: &Session, zone: ZoneId, catalog: &ZoneCatalog) -> Decision {
    if !session.authenticated {
        return Decision::Redirect {
            target: RedirectTarget::Login,
        };
    }

    match zone_access(session.tier, zone) {
        ZoneAccess::Denied => Decision::DenyWithRedirect {
            target: RedirectTarget::Zone(zone_for_tier(session.tier)),
            denial: Denial::for_zone(zone, catalog.required_tier(zone), session.tier),
        },
        access => Decision::Allow { access },
    }
}

/// Lock state of a feature for this session.
///
/// Evaluated against the session's own tier, independent of which zone
/// is currently rendering the feature.
pub fn authorize_feature(session: &Session, feature: &PremiumFeature) -> FeatureDecision {
    if session.authenticated && satisfies(session.tier, feature.required_tier) {
        FeatureDecision::Unlocked
    } else {
        FeatureDecision::Locked
    }
}

/// Full evaluation of a route, as a protected layout would perform it.
///
/// Public routes are always allowed. Feature routes apply the zone check
/// first and then refuse a direct visit to a locked feature.
pub fn authorize_route(session: &Session, route: &Route, catalog: &ZoneCatalog) -> Decision {
    match route {
        Route::Public { .. } => Decision::Allow {
            access: ZoneAccess::Full,
        },
        Route::HubIndex => {
            let target = if session.authenticated {
                RedirectTarget::Zone(zone_for_tier(session.tier))
            } else {
                RedirectTarget::Login
            };
            Decision::Redirect { target }
        }
        Route::Zone { zone } => authorize_zone(session, *zone, catalog),
        Route::Feature { zone, feature } => {
            let decision = authorize_zone(session, *zone, catalog);
            if !matches!(decision, Decision::Allow { .. }) {
                return decision;
            }
            let Some(feature) = catalog.zone(*zone).and_then(|z| z.feature(feature)) else {
                // not a gated feature, the zone check is all there is
                return decision;
            };
            match authorize_feature(session, feature) {
                FeatureDecision::Unlocked => decision,
                FeatureDecision::Locked => Decision::DenyWithRedirect {
                    target: RedirectTarget::Zone(zone_for_tier(session.tier)),
                    denial: Denial::for_feature(feature, session.tier),
                },
            }
        }
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;

    fn member(tier: Tier) -> Session {
        Session::member(tier, "profile-1")
    }

    fn redirect_zone(decision: &Decision) -> Option<ZoneId> {
        match decision {
            Decision::DenyWithRedirect {
                target: RedirectTarget::Zone(zone),
                ..
            } => Some(*zone),
            _ => None,
        }
    }

    #[test]
    fn anonymous_sessions_go_to_login() {
        let catalog = ZoneCatalog::builtin();
        for zone in ZoneId::ALL {
            assert_eq!(
                authorize_zone(&Session::anonymous(), zone, &catalog),
                Decision::Redirect {
                    target: RedirectTarget::Login
                }
            );
        }
    }

    #[test]
    fn lower_tiers_bounce_back_to_basic() {
        let catalog = ZoneCatalog::builtin();
        for tier in [Tier::None, Tier::Basic] {
            for zone in [ZoneId::Infinity, ZoneId::Diamond, ZoneId::Script] {
                let decision = authorize_zone(&member(tier), zone, &catalog);
                assert_eq!(redirect_zone(&decision), Some(ZoneId::Basic), "{tier} -> {zone}");
            }
            assert_eq!(
                authorize_zone(&member(tier), ZoneId::Basic, &catalog),
                Decision::Allow {
                    access: ZoneAccess::Full
                }
            );
        }
    }

    #[test]
    fn infinity_sees_every_zone() {
        let catalog = ZoneCatalog::builtin();
        for zone in ZoneId::ALL {
            assert_eq!(
                authorize_zone(&member(Tier::Infinity), zone, &catalog),
                Decision::Allow {
                    access: ZoneAccess::Full
                }
            );
        }
    }

    #[test]
    fn diamond_previews_basic_but_not_script() {
        let catalog = ZoneCatalog::builtin();
        let diamond = member(Tier::Diamond);
        assert_eq!(
            authorize_zone(&diamond, ZoneId::Basic, &catalog),
            Decision::Allow {
                access: ZoneAccess::Preview
            }
        );
        let decision = authorize_zone(&diamond, ZoneId::Script, &catalog);
        assert_eq!(redirect_zone(&decision), Some(ZoneId::Diamond));
    }

    #[test]
    fn script_is_kept_out_of_diamond() {
        let catalog = ZoneCatalog::builtin();
        let decision = authorize_zone(&member(Tier::Script), ZoneId::Diamond, &catalog);
        assert_eq!(redirect_zone(&decision), Some(ZoneId::Script));
    }

    #[test]
    fn denial_names_both_tiers() {
        let catalog = ZoneCatalog::builtin();
        let decision = authorize_zone(&member(Tier::Basic), ZoneId::Infinity, &catalog);
        let Decision::DenyWithRedirect { denial, .. } = decision else {
            panic!("expected a denial, got {decision:?}");
        };
        assert_eq!(denial.required_tier, Tier::Infinity);
        assert_eq!(denial.current_tier, Tier::Basic);
        assert!(denial.message.contains("Infinity"));
        assert!(denial.message.contains("Basic"));
    }

    #[test]
    fn feature_unlocks_follow_session_tier() {
        let advisor = PremiumFeature::new("ai-advisor", "AI Advisor", Tier::Infinity);
        let scripts = PremiumFeature::new("trading-scripts", "Trading Scripts", Tier::Script);
        let watchlist = PremiumFeature::new("watchlist", "Watchlist", Tier::Basic);

        assert_eq!(authorize_feature(&member(Tier::Diamond), &advisor), FeatureDecision::Locked);
        assert_eq!(authorize_feature(&member(Tier::Basic), &advisor), FeatureDecision::Locked);
        assert_eq!(authorize_feature(&member(Tier::Infinity), &advisor), FeatureDecision::Unlocked);

        assert_eq!(authorize_feature(&member(Tier::Script), &scripts), FeatureDecision::Unlocked);
        assert_eq!(authorize_feature(&member(Tier::Diamond), &scripts), FeatureDecision::Locked);
        assert_eq!(authorize_feature(&member(Tier::Infinity), &scripts), FeatureDecision::Unlocked);

        assert_eq!(authorize_feature(&member(Tier::Diamond), &watchlist), FeatureDecision::Unlocked);
        assert_eq!(authorize_feature(&member(Tier::None), &watchlist), FeatureDecision::Locked);
        assert_eq!(authorize_feature(&Session::anonymous(), &watchlist), FeatureDecision::Locked);
    }

    #[test]
    fn locked_feature_route_redirects_home() {
        let catalog = ZoneCatalog::builtin();
        let route = Route::parse("/hub/basic/ai-advisor");
        let decision = authorize_route(&member(Tier::Diamond), &route, &catalog);
        assert_eq!(redirect_zone(&decision), Some(ZoneId::Diamond));

        let decision = authorize_route(&member(Tier::Infinity), &route, &catalog);
        assert!(matches!(decision, Decision::Allow { .. }));
    }

    #[test]
    fn hub_index_sends_members_home() {
        let catalog = ZoneCatalog::builtin();
        assert_eq!(
            authorize_route(&member(Tier::Script), &Route::HubIndex, &catalog),
            Decision::Redirect {
                target: RedirectTarget::Zone(ZoneId::Script)
            }
        );
        assert_eq!(
            authorize_route(&Session::anonymous(), &Route::HubIndex, &catalog),
            Decision::Redirect {
                target: RedirectTarget::Login
            }
        );
    }

    #[test]
    fn evaluation_is_idempotent() {
        let catalog = ZoneCatalog::builtin();
        let session = member(Tier::Script);
        for zone in ZoneId::ALL {
            assert_eq!(
                authorize_zone(&session, zone, &catalog),
                authorize_zone(&session, zone, &catalog)
            );
        }
    }
}
