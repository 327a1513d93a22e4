//! Applet configuration management.
//!
//! Configuration is stored as TOML at `~/.config/apt-fetch/applet.toml`
//! and created with defaults on first run.

use std::path::{Path, PathBuf};
use std::time::Duration;

use aptfetch_desktop::DesktopConfig;
use aptfetch_monitor::{DEFAULT_UPDATE_MANAGERS, MonitorConfig};
use aptfetch_status::{CommandSource, DEFAULT_LOCK_PATH};
use serde::{Deserialize, Serialize};

/// Applet configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Lock file whose presence means a fetch is running.
    #[serde(default = "default_lock_path")]
    pub lock_path: PathBuf,

    /// Status command (must print apt-fetch JSON on stdout).
    #[serde(default = "default_status_program")]
    pub status_program: String,

    #[serde(default = "default_status_args")]
    pub status_args: Vec<String>,

    /// Kill the status command after this many seconds (0 = never).
    #[serde(default = "default_fetch_timeout")]
    pub fetch_timeout_secs: u64,

    #[serde(default = "default_refresh_interval")]
    pub refresh_interval_secs: u64,

    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,

    #[serde(default = "default_blink_interval")]
    pub blink_interval_secs: u64,

    /// Minimum time between repeated "updates available" notifications.
    #[serde(default = "default_notify_interval")]
    pub notify_interval_secs: u64,

    #[serde(default = "default_true")]
    pub notifications_enabled: bool,

    /// Update managers, in preference order.
    #[serde(default = "default_update_managers")]
    pub update_managers: Vec<String>,

    #[serde(default = "default_elevation_program")]
    pub elevation_program: String,

    #[serde(default = "default_dialog_program")]
    pub dialog_program: String,

    #[serde(default = "default_notify_program")]
    pub notify_program: String,
}

fn default_lock_path() -> PathBuf {
    PathBuf::from(DEFAULT_LOCK_PATH)
}

fn default_status_program() -> String {
    "apt-fetch.py".into()
}

fn default_status_args() -> Vec<String> {
    vec!["-j".into()]
}

fn default_fetch_timeout() -> u64 {
    120
}

fn default_refresh_interval() -> u64 {
    60
}

fn default_poll_interval() -> u64 {
    5
}

fn default_blink_interval() -> u64 {
    1
}

fn default_notify_interval() -> u64 {
    aptfetch_monitor::DEFAULT_NOTIFY_INTERVAL.as_secs()
}

fn default_true() -> bool {
    true
}

fn default_update_managers() -> Vec<String> {
    DEFAULT_UPDATE_MANAGERS.iter().map(|s| s.to_string()).collect()
}

fn default_elevation_program() -> String {
    "pkexec".into()
}

fn default_dialog_program() -> String {
    "zenity".into()
}

fn default_notify_program() -> String {
    "notify-send".into()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            lock_path: default_lock_path(),
            status_program: default_status_program(),
            status_args: default_status_args(),
            fetch_timeout_secs: default_fetch_timeout(),
            refresh_interval_secs: default_refresh_interval(),
            poll_interval_secs: default_poll_interval(),
            blink_interval_secs: default_blink_interval(),
            notify_interval_secs: default_notify_interval(),
            notifications_enabled: default_true(),
            update_managers: default_update_managers(),
            elevation_program: default_elevation_program(),
            dialog_program: default_dialog_program(),
            notify_program: default_notify_program(),
        }
    }
}

impl Config {
    /// Loads configuration from `path`, or creates a default file there.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            let config = Config::default();
            config.save(path)?;
            Ok(config)
        }
    }

    /// Saves the configuration to `path`.
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))?;
        }

        tracing::debug!(path = %path.display(), "configuration saved");
        Ok(())
    }

    /// Timer and notification settings for the monitor.
    pub fn monitor_config(&self) -> MonitorConfig {
        MonitorConfig {
            refresh_interval: secs(self.refresh_interval_secs),
            poll_interval: secs(self.poll_interval_secs),
            blink_interval: secs(self.blink_interval_secs),
            notify_interval: Duration::from_secs(self.notify_interval_secs),
            notifications_enabled: self.notifications_enabled,
        }
    }

    /// The status command source.
    pub fn status_source(&self) -> CommandSource {
        let timeout = (self.fetch_timeout_secs > 0)
            .then(|| Duration::from_secs(self.fetch_timeout_secs));
        CommandSource::new(&self.status_program, self.status_args.clone()).with_timeout(timeout)
    }

    pub fn desktop_config(&self) -> DesktopConfig {
        DesktopConfig {
            notify_program: self.notify_program.clone(),
            dialog_program: self.dialog_program.clone(),
            ..DesktopConfig::default()
        }
    }
}

/// Timer periods of zero would spin; clamp to one second.
fn secs(value: u64) -> Duration {
    Duration::from_secs(value.max(1))
}

/// Returns the default configuration file path.
pub fn default_config_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".into());
    PathBuf::from(home)
        .join(".config")
        .join("apt-fetch")
        .join("applet.toml")
}
