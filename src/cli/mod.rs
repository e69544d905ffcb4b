//! CLI module for shipdesk.
//!
//! ```ignore
//! use shipdesk::cli::{parse_args, run_command};
//!
//! let command = parse_args(std::env::args());
//! run_command(command, client, &mut std::io::stdout()).await?;
//! ```

pub mod args;
pub mod version;

pub use args::{parse_args, CliCommand, USAGE};
pub use version::{version_line, VERSION};

use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::Result;
use std::io::Write;
use std::sync::Arc;
use tokio::sync::broadcast;

use crate::api::ApiClient;
use crate::awb::AwbNumber;
use crate::error::ApiError;
use crate::session::SessionEvent;
use crate::tracking::TrackingPoller;

/// Environment variable consulted before prompting for a password.
pub const PASSWORD_ENV: &str = "SHIPDESK_PASSWORD";

/// Run `command` against `client`, writing user-facing output to `out`.
pub async fn run_command<W: Write>(
    command: CliCommand,
    client: Arc<ApiClient>,
    out: &mut W,
) -> Result<()> {
    match command {
        CliCommand::Version => writeln!(out, "{}", version_line())?,
        CliCommand::Help => writeln!(out, "{}", USAGE)?,
        CliCommand::Invalid(message) => return Err(eyre!("{}\n\n{}", message, USAGE)),
        CliCommand::Login { email } => {
            let password = read_password()?;
            client.login(&email, &password).await?;
            writeln!(out, "Signed in as {}", email.trim())?;
        }
        CliCommand::Logout => {
            client.logout().await?;
            writeln!(out, "Signed out")?;
        }
        CliCommand::Refresh => {
            client.refresh_session().await?;
            writeln!(out, "Session refreshed")?;
        }
        CliCommand::Get { path } => {
            let response = client.get(&path).await?;
            let body = response
                .text()
                .wrap_err("Response body is not valid UTF-8")?;
            writeln!(out, "{}", body)?;
        }
        CliCommand::Track { awb, watch } => {
            let awb = AwbNumber::parse(&awb)?;
            let poller = TrackingPoller::new(client);
            if watch {
                let mut write_error = None;
                poller
                    .poll(&awb, |info| {
                        if let Err(e) = writeln!(out, "{}", info) {
                            write_error.get_or_insert(e);
                        }
                    })
                    .await?;
                if let Some(e) = write_error {
                    return Err(e.into());
                }
            } else {
                let info = poller.fetch(&awb).await?;
                writeln!(out, "{}", info)?;
            }
        }
    }
    Ok(())
}

/// Print whatever session events the command produced. Returns true if an
/// expiry was reported.
pub fn report_session_events<W: Write>(
    events: &mut broadcast::Receiver<SessionEvent>,
    out: &mut W,
) -> bool {
    let mut expired = false;
    while let Ok(event) = events.try_recv() {
        if let SessionEvent::Expired { login_path } = event {
            let _ = writeln!(out, "Your session has expired. Sign in again ({}).", login_path);
            expired = true;
        }
    }
    expired
}

/// Text to print for a failed command, or `None` when the user has already
/// seen it through the notifier or the expiry message.
pub fn failure_message(err: &ApiError, expiry_reported: bool) -> Option<String> {
    tracing::debug!(category = %err.category(), "Command failed: {}", err);
    match err {
        ApiError::Forbidden | ApiError::NetworkUnavailable(_) | ApiError::Server { .. } => None,
        ApiError::Unauthorized if expiry_reported => None,
        ApiError::Unauthorized => Some(err.user_message()),
        ApiError::Credentials(_) | ApiError::InvalidRequest(_) | ApiError::Decode(_) => Some(
            format!("{}\n  {}", err.user_message(), err.category().recovery_hint()),
        ),
    }
}

/// Password from [`PASSWORD_ENV`], or a hidden prompt.
fn read_password() -> Result<String> {
    if let Ok(password) = std::env::var(PASSWORD_ENV) {
        return Ok(password);
    }
    rpassword::prompt_password("Password: ").wrap_err("Failed to read password")
}
