mod commands;
mod terminal;

use commands::{CommandLine, Commands, account, check, matrix, sidebar, visit};
use terminal::{logging, print};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    logging::init_logging();

    let cfg = commands.config();
    let catalog = commands.catalog()?;
    let json = commands.json;

    print::banner(cfg.no_banner, cfg.quiet);

    let result = match commands.command {
        Commands::Check { path, session } => {
            print::header("checking access", cfg.quiet);
            check::check(&path, &session, catalog, &cfg, json).await
        }
        Commands::Visit {
            paths,
            overlap,
            session,
        } => {
            print::header("navigating", cfg.quiet);
            visit::visit(&paths, overlap, &session, catalog, &cfg, json).await
        }
        Commands::Sidebar { zone, session } => {
            print::header("sidebar", cfg.quiet);
            sidebar::sidebar(zone, &session, catalog, &cfg, json).await
        }
        Commands::Matrix => {
            print::header("access matrix", cfg.quiet);
            matrix::matrix(&catalog, &cfg, json)
        }
        Commands::Login {
            backend,
            email,
            password,
        } => {
            print::header("signing in", cfg.quiet);
            account::login(&backend, email, password).await
        }
        Commands::Logout { backend } => {
            print::header("signing out", cfg.quiet);
            account::logout(&backend).await
        }
        Commands::Session { backend } => {
            print::header("current session", cfg.quiet);
            account::session(&backend).await
        }
    };

    terminal::spinner::stop();
    if result.is_ok() && cfg.quiet == 0 {
        print::end_of_program();
    }
    result
}
