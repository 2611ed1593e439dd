pub mod account;
pub mod check;
pub mod matrix;
pub mod sidebar;
pub mod visit;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{ArgAction, Args, Parser, Subcommand};
use eagle_common::access::{Session, Tier, ZoneCatalog, ZoneId};
use eagle_common::config::Config;
use eagle_core::session::{FixedSessionSource, HttpSessionSource, SessionSource};

const SIMULATED_PROFILE: &str = "cli-simulated";

#[derive(Parser)]
#[command(name = "eagle")]
#[command(about = "Tier access control for the Eagle Investors member hub.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// Reduce output (-q hides headers, -qq prints outcomes only)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub quiet: u8,

    /// Do not print the banner
    #[arg(long, global = true)]
    pub no_banner: bool,

    /// Zone catalog to load instead of the built-in one (TOML)
    #[arg(long, value_name = "FILE", global = true)]
    pub zones: Option<PathBuf>,

    /// How long a denial notice is shown before redirecting
    #[arg(long, value_name = "MS", default_value_t = 1_500, global = true)]
    pub denial_delay_ms: u64,

    /// Print render states as JSON
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Evaluate a single path without following redirects
    #[command(alias = "c")]
    Check {
        path: String,
        #[command(flatten)]
        session: SessionArgs,
    },
    /// Navigate to one or more paths, following denial and login redirects
    #[command(alias = "v")]
    Visit {
        #[arg(required = true)]
        paths: Vec<String>,
        /// Start every navigation before the previous one has finished
        #[arg(long)]
        overlap: bool,
        #[command(flatten)]
        session: SessionArgs,
    },
    /// Show a zone's navigation items with their lock state
    #[command(alias = "s")]
    Sidebar {
        zone: ZoneId,
        #[command(flatten)]
        session: SessionArgs,
    },
    /// Print the zone access table for every tier
    #[command(alias = "m")]
    Matrix,
    /// Sign in against the auth API and print the issued token
    Login {
        #[command(flatten)]
        backend: BackendArgs,
        #[arg(long)]
        email: String,
        #[arg(long, env = "EAGLE_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Revoke a token at the auth API
    Logout {
        #[command(flatten)]
        backend: BackendArgs,
    },
    /// Show the session the auth API reports for a token
    Session {
        #[command(flatten)]
        backend: BackendArgs,
    },
}

#[derive(Args, Debug, Clone)]
pub struct BackendArgs {
    /// Base URL of the auth API
    #[arg(long, env = "EAGLE_BACKEND")]
    pub backend: String,

    /// Bearer token for the auth API
    #[arg(long, env = "EAGLE_TOKEN", hide_env_values = true)]
    pub token: Option<String>,
}

impl BackendArgs {
    pub fn source(&self) -> anyhow::Result<HttpSessionSource> {
        Ok(HttpSessionSource::new(&self.backend, self.token.clone())?)
    }
}

/// Where the session comes from: simulated locally or resolved remotely.
#[derive(Args, Debug, Clone)]
pub struct SessionArgs {
    /// Simulate a signed-in member with this tier
    #[arg(short, long, conflicts_with_all = ["anonymous", "offline", "backend"])]
    pub tier: Option<Tier>,

    /// Simulate a signed-out visitor
    #[arg(long, conflicts_with_all = ["offline", "backend"])]
    pub anonymous: bool,

    /// Simulate an unreachable auth service
    #[arg(long, conflicts_with = "backend")]
    pub offline: bool,

    /// Resolve the session from the auth API at this base URL
    #[arg(long, env = "EAGLE_BACKEND")]
    pub backend: Option<String>,

    /// Bearer token for the auth API
    #[arg(long, env = "EAGLE_TOKEN", hide_env_values = true)]
    pub token: Option<String>,
}

impl SessionArgs {
    pub fn source(&self) -> anyhow::Result<Arc<dyn SessionSource>> {
        if let Some(url) = &self.backend {
            return Ok(Arc::new(HttpSessionSource::new(url, self.token.clone())?));
        }
        if self.offline {
            return Ok(Arc::new(FixedSessionSource::failing(
                "auth service unreachable (simulated)",
            )));
        }
        if self.anonymous {
            return Ok(Arc::new(FixedSessionSource::anonymous()));
        }
        match self.tier {
            Some(tier) => Ok(Arc::new(FixedSessionSource::new(Session::member(
                tier,
                SIMULATED_PROFILE,
            )))),
            None => anyhow::bail!("pass one of --tier, --anonymous, --offline or --backend"),
        }
    }
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn config(&self) -> Config {
        Config {
            quiet: self.quiet,
            no_banner: self.no_banner,
            denial_delay: Duration::from_millis(self.denial_delay_ms),
        }
    }

    pub fn catalog(&self) -> anyhow::Result<Arc<ZoneCatalog>> {
        let catalog = match &self.zones {
            Some(path) => ZoneCatalog::load(path)?,
            None => ZoneCatalog::builtin(),
        };
        Ok(Arc::new(catalog))
    }
}
