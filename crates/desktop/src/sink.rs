//! Presentation over the tray channel and desktop tools.

use std::sync::{Arc, Mutex};

use aptfetch_monitor::{PresentationError, PresentationSink};
use aptfetch_tray::{TrayHandle, TrayIcon};

use crate::spawn_detached;

/// Programs used for notifications and dialogs.
#[derive(Debug, Clone)]
pub struct DesktopConfig {
    /// Application name attached to notifications.
    pub app_name: String,
    /// Notification sender, `notify-send` compatible.
    pub notify_program: String,
    /// Dialog program, `zenity` compatible.
    pub dialog_program: String,
}

impl Default for DesktopConfig {
    fn default() -> Self {
        Self {
            app_name: "apt-fetch".into(),
            notify_program: "notify-send".into(),
            dialog_program: "zenity".into(),
        }
    }
}

/// [`PresentationSink`] backed by a [`TrayHandle`] and desktop tools.
pub struct DesktopSink {
    config: DesktopConfig,
    tray: Arc<Mutex<TrayHandle>>,
}

impl DesktopSink {
    pub fn new(config: DesktopConfig, tray: Arc<Mutex<TrayHandle>>) -> Self {
        Self { config, tray }
    }

    fn with_tray(&self, f: impl FnOnce(&mut TrayHandle)) {
        match self.tray.lock() {
            Ok(mut tray) => f(&mut tray),
            Err(_) => tracing::error!("tray handle lock poisoned"),
        }
    }

    fn dialog(&self, kind: &str, text: &str) -> Result<(), PresentationError> {
        let text_arg = format!("--text={text}");
        spawn_detached(
            &self.config.dialog_program,
            &[kind, "--no-markup", &text_arg],
        )
    }
}

impl PresentationSink for DesktopSink {
    fn set_icon(&self, icon: TrayIcon) {
        self.with_tray(|tray| tray.set_icon(icon));
    }

    fn set_tooltip(&self, text: &str) {
        self.with_tray(|tray| tray.set_tooltip(text));
    }

    fn notify(&self, title: &str, body: &str) {
        tracing::info!(title, "desktop notification");
        let result = spawn_detached(
            &self.config.notify_program,
            &[
                "--urgency=normal",
                "--expire-time=0",
                "--app-name",
                &self.config.app_name,
                title,
                body,
            ],
        );
        if let Err(e) = result {
            tracing::warn!("failed to send notification: {e}");
        }
    }

    fn show_info(&self, text: &str) -> Result<(), PresentationError> {
        self.dialog("--info", text)
    }

    fn show_error(&self, text: &str) {
        if let Err(e) = self.dialog("--error", text) {
            tracing::warn!(text, "failed to open error dialog: {e}");
        }
    }

    fn notifications_toggled(&self, enabled: bool) {
        self.with_tray(|tray| {
            tray.set_notifications(enabled);
            tray.close_menu();
        });
    }
}
