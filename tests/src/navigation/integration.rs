#![cfg(test)]
use std::sync::Arc;
use std::time::Duration;

use eagle_common::access::{Credentials, Session, Tier, ZoneId};
use eagle_core::gate::{GateState, RenderState};
use eagle_core::navigator::Navigator;
use eagle_core::policy::ZoneAccess;
use eagle_core::session::{FixedSessionSource, SessionProvider};

use crate::utils::{DelayedSessionSource, gate_for, gate_with, member};

const SHORT_NOTICE: Duration = Duration::from_millis(10);

/// Navigation A starts first but its lookup resolves after B's.
#[tokio::test]
async fn late_lookup_does_not_override_newer_navigation() {
    let source = DelayedSessionSource::new(
        member(Tier::Basic),
        &[Duration::from_millis(150), Duration::from_millis(10)],
    );
    let gate = gate_with(Arc::new(source));

    let gate_a = Arc::clone(&gate);
    let first = tokio::spawn(async move { gate_a.evaluate("/hub/diamond").await });

    tokio::time::sleep(Duration::from_millis(30)).await;
    let second = gate.evaluate("/hub/basic").await;

    let first = first.await.unwrap();
    assert!(first.is_none(), "stale evaluation was published: {first:?}");
    assert!(second.is_some());

    assert_eq!(
        gate.state(),
        GateState::Authorized {
            path: "/hub/basic".to_string(),
            zone: Some(ZoneId::Basic),
            access: ZoneAccess::Full,
        }
    );
}

#[tokio::test]
async fn loading_is_shown_until_the_lookup_resolves() {
    let source = DelayedSessionSource::new(member(Tier::Diamond), &[Duration::from_millis(100)]);
    let gate = gate_with(Arc::new(source));
    let mut states = gate.subscribe();

    let gate_bg = Arc::clone(&gate);
    let pending = tokio::spawn(async move { gate_bg.evaluate("/hub/diamond").await });

    states.changed().await.unwrap();
    assert_eq!(states.borrow_and_update().render(), RenderState::Loading);

    pending.await.unwrap().unwrap();
    assert!(matches!(
        gate.state().render(),
        RenderState::Authorized { .. }
    ));
}

#[tokio::test]
async fn basic_member_requesting_infinity_is_denied_then_sent_home() {
    let navigator = Navigator::new(gate_for(member(Tier::Basic)), SHORT_NOTICE);
    let landing = navigator.visit("/hub/infinity").await.unwrap();

    let rendered: Vec<RenderState> = landing.trail.iter().map(|s| s.render()).collect();
    assert!(matches!(
        &rendered[0],
        RenderState::Denied {
            required_tier: Tier::Infinity,
            current_tier: Tier::Basic,
            ..
        }
    ));
    assert_eq!(landing.path(), Some("/hub/basic"));
    assert!(matches!(
        rendered.last(),
        Some(RenderState::Authorized { .. })
    ));
}

#[tokio::test]
async fn newer_navigation_cancels_pending_denial_redirect() {
    let gate = gate_for(member(Tier::Script));
    let navigator = Arc::new(Navigator::new(Arc::clone(&gate), Duration::from_millis(200)));

    let denied = {
        let navigator = Arc::clone(&navigator);
        tokio::spawn(async move { navigator.visit("/hub/diamond").await })
    };
    tokio::time::sleep(Duration::from_millis(50)).await;
    let landing = navigator.visit("/hub/script/script-library").await.unwrap();

    assert!(denied.await.unwrap().is_none());
    assert_eq!(landing.path(), Some("/hub/script/script-library"));
    assert_eq!(gate.state().path(), "/hub/script/script-library");
}

#[tokio::test]
async fn login_refreshes_what_the_gate_sees() {
    let creds = Credentials::new("dana@example.com", "pw");
    let source = Arc::new(
        FixedSessionSource::anonymous()
            .with_account(creds.clone(), Session::member(Tier::Infinity, "p-dana")),
    );
    let provider = Arc::new(SessionProvider::new(source));
    let gate = Arc::new(eagle_core::gate::ZoneGate::new(
        Arc::clone(&provider),
        Arc::new(eagle_common::access::ZoneCatalog::builtin()),
    ));
    let navigator = Navigator::new(Arc::clone(&gate), SHORT_NOTICE);

    let before = navigator.visit("/hub/infinity").await.unwrap();
    assert_eq!(before.path(), Some("/login"));

    provider.login(&creds).await.unwrap();
    let after = navigator.visit("/hub/infinity").await.unwrap();
    assert!(!after.was_redirected());

    provider.logout().await.unwrap();
    let signed_out = navigator.visit("/hub/infinity/dark-pool").await.unwrap();
    assert_eq!(signed_out.path(), Some("/login"));
}
