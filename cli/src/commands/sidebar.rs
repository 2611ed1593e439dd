use std::sync::Arc;

use colored::*;
use eagle_common::access::{ZoneCatalog, ZoneId};
use eagle_common::config::Config;
use eagle_core::policy::{self, Decision};
use eagle_core::session::SessionProvider;
use eagle_core::sidebar::{self, NavItem};

use crate::commands::SessionArgs;
use crate::terminal::{format, print, spinner};

pub async fn sidebar(
    zone: ZoneId,
    session_args: &SessionArgs,
    catalog: Arc<ZoneCatalog>,
    cfg: &Config,
    json: bool,
) -> anyhow::Result<()> {
    let provider = SessionProvider::new(session_args.source()?);

    spinner::start("Resolving session...");
    let session = provider.session().await;
    spinner::stop();
    let session = session?;

    let items: Vec<NavItem> = sidebar::sidebar(&session, zone, &catalog);

    if json {
        print::print(&serde_json::to_string_pretty(&items)?);
        return Ok(());
    }

    if cfg.quiet == 0 {
        print::aligned_line("Member", format::tier(session.tier));
        match policy::authorize_zone(&session, zone, &catalog) {
            Decision::Allow { access } => print::aligned_line("Zone", format::access(access)),
            Decision::Redirect { target } | Decision::DenyWithRedirect { target, .. } => {
                print::aligned_line(
                    "Zone",
                    format!("{} (redirects to {})", "denied".red().bold(), target.path()),
                )
            }
        }
    }

    print::tree_head(0, &zone.root_path());
    print::as_tree_one_level(items.iter().map(format::nav_item_to_detail).collect());
    Ok(())
}
