//! Completion alerts for the Pomodoro timer.
//! Terminal bell everywhere, plus a system notification on macOS.
use crate::domain::Mode;
use anyhow::{Context, Result};
use std::io::Write;
use tracing::debug;

#[cfg(target_os = "macos")]
use std::process::Command;

/// Alert fired when a countdown finishes
pub trait Notifier {
    fn alert(&self, finished: Mode, next: Mode) -> Result<()>;
}

/// Text for the alert when `finished` hands over to `next`
pub fn alert_message(finished: Mode, next: Mode) -> String {
    if finished.is_break() {
        format!("{} is over. Back to work!", finished.label())
    } else {
        format!("Work session done. Time for a {}.", next.label().to_lowercase())
    }
}

/// Default notifier used by the Pomodoro window
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemNotifier;

impl Notifier for SystemNotifier {
    fn alert(&self, finished: Mode, next: Mode) -> Result<()> {
        let message = alert_message(finished, next);
        debug!(%message, "sending alert");

        let mut stdout = std::io::stdout();
        stdout.write_all(b"\x07").context("Failed to ring terminal bell")?;
        stdout.flush().context("Failed to ring terminal bell")?;

        #[cfg(target_os = "macos")]
        {
            let script = format!(r#"display notification "{}" with title "Pomodoro""#, message);
            let status = Command::new("osascript")
                .arg("-e")
                .arg(&script)
                .output()
                .context("Failed to run osascript")?
                .status;
            if !status.success() {
                anyhow::bail!("osascript exited with {}", status);
            }
        }

        Ok(())
    }
}
