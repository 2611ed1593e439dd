use std::sync::Arc;

use eagle_common::access::ZoneCatalog;
use eagle_common::config::Config;
use eagle_core::gate::ZoneGate;
use eagle_core::session::SessionProvider;

use crate::commands::SessionArgs;
use crate::terminal::{format, print, spinner};

pub async fn check(
    path: &str,
    session_args: &SessionArgs,
    catalog: Arc<ZoneCatalog>,
    cfg: &Config,
    json: bool,
) -> anyhow::Result<()> {
    let provider = Arc::new(SessionProvider::new(session_args.source()?));
    let gate = ZoneGate::new(provider, catalog);

    spinner::start(format!("Resolving session for {path}..."));
    let verdict = gate.evaluate(path).await;
    spinner::stop();

    let Some(verdict) = verdict else {
        anyhow::bail!("evaluation of {path} was superseded");
    };

    if json {
        print::print(&serde_json::to_string_pretty(&verdict.state.render())?);
        return Ok(());
    }

    if cfg.quiet < 2 {
        print::tree_head(0, path);
    }
    print::as_tree_one_level(format::state_to_details(&verdict.state));
    Ok(())
}
