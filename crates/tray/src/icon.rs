//! Tray icon states.

use std::fmt;

/// Tooltip shown while a fetch is running.
pub const TOOLTIP_ACTIVE: &str = "apt-fetch is downloading updates";

/// Tooltip shown while apt-fetch is idle.
pub const TOOLTIP_IDLE: &str = "apt-fetch is idle";

/// Symbolic icon shown in the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrayIcon {
    #[default]
    Inactive,
    Active,
    /// Alternates with `Active` while packages are downloading.
    Transferring,
}

impl TrayIcon {
    /// Symbolic icon name as installed with the applet.
    pub fn symbolic_name(self) -> &'static str {
        match self {
            TrayIcon::Inactive => "inactive",
            TrayIcon::Active => "active",
            TrayIcon::Transferring => "transferring",
        }
    }

    /// Icon and tooltip for a lock probe result.
    pub fn for_lock(active: bool) -> (Self, &'static str) {
        if active {
            (TrayIcon::Active, TOOLTIP_ACTIVE)
        } else {
            (TrayIcon::Inactive, TOOLTIP_IDLE)
        }
    }
}

impl fmt::Display for TrayIcon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbolic_name())
    }
}
