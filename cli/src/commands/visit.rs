use std::sync::Arc;
use std::time::Duration;

use colored::*;
use eagle_common::access::ZoneCatalog;
use eagle_common::config::Config;
use eagle_core::gate::{RenderState, ZoneGate};
use eagle_core::navigator::{Landing, Navigator};
use eagle_core::session::SessionProvider;
use serde_json::{Value, json};

use crate::commands::SessionArgs;
use crate::gprint;
use crate::terminal::{colors, format, print, spinner};

const OVERLAP_STAGGER: Duration = Duration::from_millis(50);

type Outcome = (String, Option<Landing>);

pub async fn visit(
    paths: &[String],
    overlap: bool,
    session_args: &SessionArgs,
    catalog: Arc<ZoneCatalog>,
    cfg: &Config,
    json: bool,
) -> anyhow::Result<()> {
    let provider = Arc::new(SessionProvider::new(session_args.source()?));
    let gate = Arc::new(ZoneGate::new(provider, catalog));
    let navigator = Arc::new(Navigator::new(gate, cfg.denial_delay));

    let outcomes: Vec<Outcome> = if overlap {
        spinner::start(format!("Navigating to {} paths at once...", paths.len()));
        let outcomes = visit_overlapping(&navigator, paths).await;
        spinner::stop();
        outcomes?
    } else {
        let mut outcomes = Vec::with_capacity(paths.len());
        for path in paths {
            spinner::start(format!("Navigating to {path}..."));
            let landing = navigator.visit(path).await;
            spinner::stop();
            outcomes.push((path.clone(), landing));
        }
        outcomes
    };

    if json {
        let report: Vec<Value> = outcomes.iter().map(outcome_to_json).collect();
        print::print(&serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    for (idx, (path, landing)) in outcomes.iter().enumerate() {
        print_outcome(idx, path, landing.as_ref(), cfg);
        if idx + 1 != outcomes.len() {
            gprint!();
        }
    }
    Ok(())
}

/// Starts every navigation shortly after the previous one, without waiting
/// for it to finish. Only the newest may land.
async fn visit_overlapping(
    navigator: &Arc<Navigator>,
    paths: &[String],
) -> anyhow::Result<Vec<Outcome>> {
    let mut handles = Vec::with_capacity(paths.len());

    for path in paths {
        let navigator = Arc::clone(navigator);
        let path = path.clone();
        handles.push(tokio::spawn(async move {
            let landing = navigator.visit(&path).await;
            (path, landing)
        }));
        tokio::time::sleep(OVERLAP_STAGGER).await;
    }

    let mut outcomes = Vec::with_capacity(handles.len());
    for handle in handles {
        outcomes.push(handle.await?);
    }
    Ok(outcomes)
}

fn print_outcome(idx: usize, path: &str, landing: Option<&Landing>, cfg: &Config) {
    print::tree_head(idx, path);

    let Some(landing) = landing else {
        print::print_status(format!(
            "{} by a later navigation",
            "superseded".color(colors::ACCENT).bold()
        ));
        return;
    };

    let states = if cfg.quiet > 1 {
        &landing.trail[landing.trail.len().saturating_sub(1)..]
    } else {
        &landing.trail[..]
    };

    for state in states {
        print::as_tree_one_level(format::state_to_details(state));
    }

    if cfg.quiet == 0 && landing.was_redirected() {
        if let Some(final_path) = landing.path() {
            print::print_status(format!("landed on {}", final_path.color(colors::PATH)));
        }
    }
}

fn outcome_to_json((path, landing): &Outcome) -> Value {
    match landing {
        None => json!({ "requested": path, "superseded": true }),
        Some(landing) => {
            let trail: Vec<RenderState> = landing.trail.iter().map(|s| s.render()).collect();
            json!({
                "requested": path,
                "superseded": false,
                "landed": landing.path(),
                "trail": trail,
            })
        }
    }
}
