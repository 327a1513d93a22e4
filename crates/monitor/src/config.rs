//! Monitor timing and policy settings.

use std::time::Duration;

/// Default minimum time between repeated "updates available" notifications.
pub const DEFAULT_NOTIFY_INTERVAL: Duration = Duration::from_secs(24 * 60 * 60);

/// Shorter re-notify interval used by some applet builds.
pub const SHORT_NOTIFY_INTERVAL: Duration = Duration::from_secs(4 * 60 * 60);

/// Settings for [`crate::StatusMonitor`] and [`crate::Scheduler`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorConfig {
    /// How often the status command is re-run.
    pub refresh_interval: Duration,
    /// How often the lock file is checked to set icon and tooltip.
    pub poll_interval: Duration,
    /// Blink and notification-check period.
    pub blink_interval: Duration,
    /// Minimum time between repeated update notifications.
    pub notify_interval: Duration,
    /// Initial state of the Notifications switch.
    pub notifications_enabled: bool,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            refresh_interval: Duration::from_secs(60),
            poll_interval: Duration::from_secs(5),
            blink_interval: Duration::from_secs(1),
            notify_interval: DEFAULT_NOTIFY_INTERVAL,
            notifications_enabled: true,
        }
    }
}
