//! Login handling shared by every command.

use orderdesk_console::{Console, ConsoleConfig};
use tracing::info;

use super::CliError;
use crate::output;

/// Build the console and log in with the configured credentials.
pub async fn connect(config: ConsoleConfig) -> Result<Console, CliError> {
    let credentials = config
        .credentials()
        .cloned()
        .ok_or(CliError::MissingCredentials)?;

    let console = Console::new(config)?;
    console.gateway().login(&credentials).await?;
    info!(email = %credentials.email, "Logged in");

    Ok(console)
}

/// Log in, report the outcome, and log out again.
pub async fn login_check(config: ConsoleConfig) -> Result<(), CliError> {
    let api_url = config.api_url.clone();
    let console = connect(config).await?;
    output::line(&format!("Login OK ({api_url})"));
    console.gateway().logout().await;
    Ok(())
}
