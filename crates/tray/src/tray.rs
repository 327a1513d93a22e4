//! Tray handle, events, and update types.
//!
//! The panel front-end (a desktop shell applet, or the console front-end in
//! [`crate::console`]) runs on its own thread. This module defines the
//! channel-based interface the monitor core uses to talk to it, independent
//! of the rendering backend.

use std::sync::mpsc;

use crate::icon::TrayIcon;
use crate::menu::{MenuAction, MenuState};

/// Configuration for the panel icon.
#[derive(Debug, Clone)]
pub struct TrayConfig {
    /// Applet display name shown in the menu header.
    pub applet_name: String,
    /// Initial notification switch state.
    pub notifications_enabled: bool,
}

impl Default for TrayConfig {
    fn default() -> Self {
        Self {
            applet_name: "apt-fetch".into(),
            notifications_enabled: true,
        }
    }
}

/// Events emitted by the tray to the monitor core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrayEvent {
    /// User clicked "Status".
    StatusRequested,
    /// User flipped the Notifications switch to the given value.
    NotificationsToggled(bool),
    /// User clicked "Update Manager".
    UpdateManagerRequested,
    /// User clicked "About".
    AboutRequested,
    /// User clicked "Quit" or the applet was removed from the panel.
    QuitRequested,
}

/// Updates sent from the monitor core to the tray.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrayUpdate {
    /// Panel icon changed.
    IconChanged(TrayIcon),
    /// Tooltip text changed.
    TooltipChanged(String),
    /// Notification switch state changed.
    NotificationsToggled(bool),
    /// Pop the menu down.
    CloseMenu,
    /// Request tray shutdown.
    Shutdown,
}

impl MenuAction {
    /// Converts a menu click into the event sent to the core.
    pub fn into_event(self, state: &MenuState) -> TrayEvent {
        match self {
            MenuAction::Status => TrayEvent::StatusRequested,
            MenuAction::ToggleNotifications => {
                TrayEvent::NotificationsToggled(!state.notifications_enabled)
            }
            MenuAction::UpdateManager => TrayEvent::UpdateManagerRequested,
            MenuAction::About => TrayEvent::AboutRequested,
            MenuAction::Quit => TrayEvent::QuitRequested,
        }
    }
}

impl MenuState {
    /// Mirrors an update into the state a front-end renders from.
    pub fn apply(&mut self, update: &TrayUpdate) {
        match update {
            TrayUpdate::IconChanged(icon) => self.icon = *icon,
            TrayUpdate::TooltipChanged(text) => self.tooltip.clone_from(text),
            TrayUpdate::NotificationsToggled(enabled) => self.notifications_enabled = *enabled,
            TrayUpdate::CloseMenu | TrayUpdate::Shutdown => {}
        }
    }
}

/// Handle for communicating with the tray from the monitor core.
///
/// This is the core side of the tray interface. The front-end runs on its
/// own thread and communicates via channels.
pub struct TrayHandle {
    /// Send updates to the tray.
    update_tx: mpsc::Sender<TrayUpdate>,
    /// Receive events from the tray.
    event_rx: mpsc::Receiver<TrayEvent>,
    /// Current menu state (for tracking).
    state: MenuState,
}

impl TrayHandle {
    /// Creates a new tray handle with its channel pair.
    ///
    /// Returns `(handle, event_sender, update_receiver)` — the sender/receiver
    /// pair is given to the front-end.
    pub fn new(config: TrayConfig) -> (Self, mpsc::Sender<TrayEvent>, mpsc::Receiver<TrayUpdate>) {
        let (update_tx, update_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        let handle = Self {
            update_tx,
            event_rx,
            state: MenuState {
                applet_name: config.applet_name,
                notifications_enabled: config.notifications_enabled,
                ..MenuState::default()
            },
        };

        (handle, event_tx, update_rx)
    }

    /// Sets the panel icon. No update is sent if it is unchanged.
    pub fn set_icon(&mut self, icon: TrayIcon) {
        if self.state.icon == icon {
            return;
        }
        self.send(TrayUpdate::IconChanged(icon));
    }

    /// Sets the tooltip. No update is sent if it is unchanged.
    pub fn set_tooltip(&mut self, text: &str) {
        if self.state.tooltip == text {
            return;
        }
        self.send(TrayUpdate::TooltipChanged(text.to_string()));
    }

    /// Updates the Notifications switch.
    pub fn set_notifications(&mut self, enabled: bool) {
        self.send(TrayUpdate::NotificationsToggled(enabled));
    }

    /// Pops the menu down.
    pub fn close_menu(&self) {
        let _ = self.update_tx.send(TrayUpdate::CloseMenu);
    }

    /// Requests the tray to shut down.
    pub fn shutdown(&self) {
        let _ = self.update_tx.send(TrayUpdate::Shutdown);
    }

    /// Tries to receive a tray event (non-blocking).
    pub fn try_recv_event(&self) -> Option<TrayEvent> {
        self.event_rx.try_recv().ok()
    }

    /// Returns the current menu state.
    pub fn state(&self) -> &MenuState {
        &self.state
    }

    fn send(&mut self, update: TrayUpdate) {
        self.state.apply(&update);
        if self.update_tx.send(update).is_err() {
            tracing::trace!("tray front-end gone, update dropped");
        }
    }
}
