use colored::*;
use eagle_common::access::{Tier, ZoneId};
use eagle_core::gate::GateState;
use eagle_core::policy::{FeatureDecision, ZoneAccess};
use eagle_core::sidebar::NavItem;

use crate::terminal::colors;

pub type Detail = (String, ColoredString);

pub fn tier(tier: Tier) -> ColoredString {
    let color = match tier {
        Tier::None => colors::TIER_NONE,
        Tier::Basic => colors::TIER_BASIC,
        Tier::Script => colors::TIER_SCRIPT,
        Tier::Diamond => colors::TIER_DIAMOND,
        Tier::Infinity => colors::TIER_INFINITY,
    };
    tier.name().color(color).bold()
}

pub fn zone(zone: Option<ZoneId>) -> ColoredString {
    match zone {
        Some(zone) => zone.root_path().color(colors::PATH),
        None => "public".normal(),
    }
}

pub fn access(access: ZoneAccess) -> ColoredString {
    match access {
        ZoneAccess::Full => "full".green().bold(),
        ZoneAccess::Preview => "preview".yellow().bold(),
        ZoneAccess::Denied => "denied".red().bold(),
    }
}

pub fn feature_decision(decision: FeatureDecision) -> ColoredString {
    match decision {
        FeatureDecision::Unlocked => "unlocked".color(colors::UNLOCKED),
        FeatureDecision::Locked => "locked".color(colors::LOCKED),
    }
}

pub fn state_label(state: &GateState) -> ColoredString {
    match state {
        GateState::Initializing { .. } => "INITIALIZING".blue().bold(),
        GateState::Authorized { .. } => "AUTHORIZED".green().bold(),
        GateState::Denied { .. } => "DENIED".red().bold(),
        GateState::Unauthenticated { .. } => "UNAUTHENTICATED".yellow().bold(),
        GateState::Redirecting { .. } => "REDIRECTING".cyan().bold(),
    }
}

pub fn state_to_details(state: &GateState) -> Vec<Detail> {
    let mut details: Vec<Detail> = vec![
        ("Path".to_string(), state.path().color(colors::PATH)),
        ("State".to_string(), state_label(state)),
    ];

    match state {
        GateState::Authorized { zone: z, access: a, .. } => {
            details.push(("Zone".to_string(), zone(*z)));
            details.push(("Access".to_string(), access(*a)));
        }
        GateState::Denied { denial, .. } => {
            details.push(("Required".to_string(), tier(denial.required_tier)));
            details.push(("Current".to_string(), tier(denial.current_tier)));
            details.push(("Notice".to_string(), denial.message.normal()));
        }
        GateState::Initializing { .. }
        | GateState::Unauthenticated { .. }
        | GateState::Redirecting { .. } => {}
    }

    if let Some(target) = state.redirect() {
        details.push(("Redirect".to_string(), target.path().color(colors::PATH)));
    }

    details
}

pub fn nav_item_to_detail(item: &NavItem) -> Detail {
    let lock: ColoredString = if item.locked {
        format!("locked, needs {}", item.required_tier).color(colors::LOCKED)
    } else {
        "open".color(colors::UNLOCKED)
    };
    (item.label.clone(), format!("{} {}", item.href.color(colors::PATH), lock).normal())
}
