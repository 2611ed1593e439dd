use colored::*;
use eagle_common::access::{Credentials, Session};
use eagle_common::success;
use eagle_core::session::{SessionProvider, SessionSource};
use std::sync::Arc;

use crate::commands::BackendArgs;
use crate::terminal::{colors, format, print, spinner};

pub async fn login(backend: &BackendArgs, email: String, password: String) -> anyhow::Result<()> {
    let source = Arc::new(backend.source()?);
    let provider = SessionProvider::new(source.clone() as Arc<dyn SessionSource>);
    let credentials = Credentials::new(email, password);

    spinner::start(format!("Signing in as {}...", credentials.email));
    let session = provider.login(&credentials).await;
    spinner::stop();
    let session = session?;

    success!("Signed in as {}", credentials.email);
    print_session(&session);
    if let Some(token) = source.token().await {
        print::aligned_line("Token", token.color(colors::ACCENT));
    }
    Ok(())
}

pub async fn logout(backend: &BackendArgs) -> anyhow::Result<()> {
    let provider = SessionProvider::new(Arc::new(backend.source()?));

    spinner::start("Signing out...");
    let result = provider.logout().await;
    spinner::stop();
    result?;

    success!("Signed out");
    Ok(())
}

pub async fn session(backend: &BackendArgs) -> anyhow::Result<()> {
    let provider = SessionProvider::new(Arc::new(backend.source()?));

    spinner::start("Resolving session...");
    let session = provider.refresh().await;
    spinner::stop();

    print_session(&session?);
    Ok(())
}

fn print_session(session: &Session) {
    let status: ColoredString = if session.authenticated {
        "signed in".green().bold()
    } else {
        "signed out".yellow().bold()
    };
    print::aligned_line("Status", status);
    print::aligned_line("Tier", format::tier(session.tier));
    if !session.profile_id.is_empty() {
        print::aligned_line("Profile", session.profile_id.as_str());
    }
    print::aligned_line(
        "Home",
        eagle_core::policy::zone_for_tier(session.tier)
            .root_path()
            .color(colors::PATH),
    );
}
