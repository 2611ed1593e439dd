#![cfg(test)]
use std::sync::Arc;

use eagle_common::access::{Session, Tier, ZoneCatalog, ZoneId};
use eagle_core::gate::{GateState, RenderState};
use eagle_core::guard::{AccessError, ApiGuard};
use eagle_core::policy::{
    self, Decision, FeatureDecision, RedirectTarget, ZoneAccess,
};
use eagle_core::session::{FixedSessionSource, SessionProvider};

use crate::utils::{gate_for, gate_with, member};

fn bounced_to(decision: &Decision) -> Option<ZoneId> {
    match decision {
        Decision::DenyWithRedirect {
            target: RedirectTarget::Zone(zone),
            ..
        } => Some(*zone),
        _ => None,
    }
}

#[test]
fn entry_tiers_are_confined_to_basic() {
    let catalog = ZoneCatalog::builtin();
    for tier in [Tier::None, Tier::Basic] {
        for zone in [ZoneId::Infinity, ZoneId::Diamond, ZoneId::Script] {
            let decision = policy::authorize_zone(&member(tier), zone, &catalog);
            assert_eq!(
                bounced_to(&decision),
                Some(ZoneId::Basic),
                "{tier} requesting {zone} gave {decision:?}"
            );
        }
    }
}

#[test]
fn infinity_is_allowed_everywhere() {
    let catalog = ZoneCatalog::builtin();
    for zone in ZoneId::ALL {
        assert!(matches!(
            policy::authorize_zone(&member(Tier::Infinity), zone, &catalog),
            Decision::Allow { .. }
        ));
    }
}

#[test]
fn diamond_preview_keeps_infinity_features_locked() {
    let catalog = ZoneCatalog::builtin();
    let diamond = member(Tier::Diamond);

    assert_eq!(
        policy::authorize_zone(&diamond, ZoneId::Basic, &catalog),
        Decision::Allow {
            access: ZoneAccess::Preview
        }
    );

    let basic = catalog.zone(ZoneId::Basic).unwrap();
    let gated: Vec<_> = basic
        .features
        .iter()
        .filter(|feature| feature.required_tier == Tier::Infinity)
        .collect();
    assert!(!gated.is_empty());
    for feature in gated {
        assert_eq!(
            policy::authorize_feature(&diamond, feature),
            FeatureDecision::Locked
        );
    }
}

#[test]
fn script_cannot_enter_diamond() {
    let catalog = ZoneCatalog::builtin();
    let decision = policy::authorize_zone(&member(Tier::Script), ZoneId::Diamond, &catalog);
    assert_eq!(bounced_to(&decision), Some(ZoneId::Script));
}

#[test]
fn repeated_evaluation_is_identical() {
    let catalog = ZoneCatalog::builtin();
    for tier in Tier::ALL {
        let session = member(tier);
        for zone in ZoneId::ALL {
            let first = policy::authorize_zone(&session, zone, &catalog);
            let second = policy::authorize_zone(&session, zone, &catalog);
            assert_eq!(first, second);
        }
    }
}

#[tokio::test]
async fn failing_lookup_never_authorizes() {
    let gate = gate_with(Arc::new(FixedSessionSource::failing("connection refused")));

    for zone in ZoneId::ALL {
        let verdict = gate.evaluate(&zone.root_path()).await.unwrap();
        assert!(
            matches!(verdict.state, GateState::Unauthenticated { .. }),
            "{zone} gave {:?}",
            verdict.state
        );
    }
    assert!(!matches!(gate.state(), GateState::Authorized { .. }));
}

#[tokio::test]
async fn denied_render_contract_names_both_tiers() {
    let gate = gate_for(member(Tier::Basic));
    let verdict = gate.evaluate("/hub/infinity").await.unwrap();

    match verdict.state.render() {
        RenderState::Denied {
            required_tier,
            current_tier,
            message,
        } => {
            assert_eq!(required_tier, Tier::Infinity);
            assert_eq!(current_tier, Tier::Basic);
            assert!(message.contains("Infinity") && message.contains("Basic"));
        }
        other => panic!("expected a denial, got {other:?}"),
    }

    let rendered = serde_json::to_value(verdict.state.render()).unwrap();
    assert_eq!(rendered["type"], "denied");
}

#[tokio::test]
async fn api_guard_matches_page_policy() {
    let provider = Arc::new(SessionProvider::new(Arc::new(FixedSessionSource::new(
        Session::member(Tier::Diamond, "p-api"),
    ))));
    let guard = ApiGuard::new(provider, Arc::new(ZoneCatalog::builtin()));

    assert!(guard.enforce("/api/hub/diamond/options-flow").await.is_ok());
    assert!(guard.enforce("/api/hub/basic/watchlist").await.is_ok());

    let err = guard.enforce("/api/hub/script").await.unwrap_err();
    assert!(matches!(err, AccessError::Forbidden(_)));
    assert_eq!(err.status_code(), 403);
}

#[tokio::test]
async fn api_guard_refuses_disguised_hub_paths() {
    let provider = Arc::new(SessionProvider::new(Arc::new(FixedSessionSource::new(
        member(Tier::None),
    ))));
    let guard = ApiGuard::new(provider, Arc::new(ZoneCatalog::builtin()));

    for path in ["/api/hub/Diamond/options-flow", "/api/hub/diamonds/x"] {
        let err = guard.enforce(path).await.unwrap_err();
        assert_eq!(err.status_code(), 404, "{path}");
    }

    let err = guard
        .enforce("/api/./hub/infinity/dark-pool")
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), 403);

    let anonymous = ApiGuard::new(
        Arc::new(SessionProvider::new(Arc::new(FixedSessionSource::anonymous()))),
        Arc::new(ZoneCatalog::builtin()),
    );
    assert_eq!(
        anonymous.enforce("/api/./hub/infinity/dark-pool").await,
        Err(AccessError::Unauthenticated)
    );
}
