//! Popup menu shown when the panel icon is clicked.

use crate::icon::{TOOLTIP_ACTIVE, TrayIcon};

/// Icon for the Notifications toggle when enabled.
const ICON_NOTIFY_ON: &str = "aptdaemon-upgrade";

/// Icon for the Notifications toggle when disabled.
const ICON_NOTIFY_OFF: &str = "aptdaemon-delete";

/// Actions that can be triggered from the popup menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    /// Show the status dialog.
    Status,
    /// Flip the Notifications switch.
    ToggleNotifications,
    /// Launch the system update manager.
    UpdateManager,
    /// Show the about dialog.
    About,
    /// Remove the applet.
    Quit,
}

/// A single menu item.
#[derive(Debug, Clone)]
pub struct MenuItem {
    /// Display text.
    pub label: String,
    /// Whether the item is enabled (clickable).
    pub enabled: bool,
    /// Switch state, for toggle items.
    pub toggled: Option<bool>,
    /// Symbolic icon name, if any.
    pub icon: Option<&'static str>,
    /// Optional action triggered on click.
    pub action: Option<MenuAction>,
}

impl MenuItem {
    fn action(label: &str, action: MenuAction) -> Self {
        Self {
            label: label.into(),
            enabled: true,
            toggled: None,
            icon: None,
            action: Some(action),
        }
    }

    fn separator() -> Self {
        Self {
            label: String::new(),
            enabled: false,
            toggled: None,
            icon: None,
            action: None,
        }
    }
}

/// Current state used to build the popup menu.
#[derive(Debug, Clone)]
pub struct MenuState {
    /// Applet display name.
    pub applet_name: String,
    /// Icon currently shown in the panel.
    pub icon: TrayIcon,
    /// Tooltip currently shown.
    pub tooltip: String,
    /// Whether desktop notifications are enabled.
    pub notifications_enabled: bool,
}

impl Default for MenuState {
    fn default() -> Self {
        Self {
            applet_name: "apt-fetch".into(),
            icon: TrayIcon::Inactive,
            tooltip: "Applet Label".into(),
            notifications_enabled: true,
        }
    }
}

impl MenuState {
    /// Returns `true` if the tooltip says a download is running.
    pub fn downloading(&self) -> bool {
        self.tooltip == TOOLTIP_ACTIVE
    }

    /// Builds the menu items from the current state.
    pub fn build_menu(&self) -> Vec<MenuItem> {
        let status = if self.downloading() { "Downloading" } else { "Idle" };

        vec![
            MenuItem {
                label: format!("{} — {status}", self.applet_name),
                enabled: false,
                toggled: None,
                icon: None,
                action: None,
            },
            MenuItem::separator(),
            MenuItem::action("Status", MenuAction::Status),
            MenuItem {
                label: "Notifications".into(),
                enabled: true,
                toggled: Some(self.notifications_enabled),
                icon: Some(if self.notifications_enabled {
                    ICON_NOTIFY_ON
                } else {
                    ICON_NOTIFY_OFF
                }),
                action: Some(MenuAction::ToggleNotifications),
            },
            MenuItem::action("Update Manager", MenuAction::UpdateManager),
            MenuItem::action("About", MenuAction::About),
            MenuItem::separator(),
            MenuItem::action("Quit", MenuAction::Quit),
        ]
    }
}
