//! Notifier implementations for terminal hosts.
//!
//! [`ConsoleNotifier`] prints to stderr. [`OsNotifier`] raises a macOS
//! Notification Center banner through `osascript` and falls back to the log
//! on other platforms.

use crate::traits::{Notifier, Severity};

/// Writes each notification as one line on stderr.
#[derive(Debug, Clone, Default)]
pub struct ConsoleNotifier;

impl ConsoleNotifier {
    pub fn new() -> Self {
        Self
    }

    fn format_line(severity: Severity, message: &str) -> String {
        match severity {
            Severity::Info => format!("[info] {}", message),
            Severity::Error => format!("[error] {}", message),
        }
    }
}

impl Notifier for ConsoleNotifier {
    fn notify(&self, severity: Severity, message: &str) {
        eprintln!("{}", Self::format_line(severity, message));
    }
}

/// Native OS notification banner.
///
/// Dispatch happens on a blocking worker so the caller never waits on
/// `osascript`. Requires a running tokio runtime.
#[derive(Debug, Clone)]
pub struct OsNotifier {
    title: String,
}

impl OsNotifier {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }
}

impl Default for OsNotifier {
    fn default() -> Self {
        Self::new("shipdesk")
    }
}

impl Notifier for OsNotifier {
    fn notify(&self, severity: Severity, message: &str) {
        tracing::debug!("Sending OS notification ({}): {}", severity, message);

        let title = self.title.clone();
        let body = message.to_string();
        tokio::task::spawn_blocking(move || {
            send_notification(&title, &body);
        });
    }
}

#[cfg(target_os = "macos")]
fn send_notification(title: &str, body: &str) {
    use std::process::Command;

    // AppleScript string literals need quotes and backslashes escaped
    let escaped_title = title.replace('\\', "\\\\").replace('"', "\\\"");
    let escaped_body = body.replace('\\', "\\\\").replace('"', "\\\"");

    let script = format!(
        "display notification \"{}\" with title \"{}\"",
        escaped_body, escaped_title
    );

    match Command::new("osascript").arg("-e").arg(&script).output() {
        Ok(output) if !output.status.success() => {
            let stderr = String::from_utf8_lossy(&output.stderr);
            tracing::warn!("osascript notification failed: {}", stderr.trim());
        }
        Err(e) => {
            tracing::warn!("Failed to spawn osascript: {}", e);
        }
        _ => {
            tracing::debug!("OS notification sent successfully");
        }
    }
}

#[cfg(not(target_os = "macos"))]
fn send_notification(title: &str, body: &str) {
    tracing::info!(target: "shipdesk::notify", "{}: {}", title, body);
}
