//! The status monitor state machine.

use std::sync::Arc;

use aptfetch_status::{LockProbe, StatusSnapshot, decode, summary};
use aptfetch_tray::TrayIcon;

use crate::sink::messages;
use crate::{MonitorConfig, PresentationSink, check_notification_timeout};

/// Raw status text assumed before the first fetch returns.
const PENDING_RAW: &str = r#"{ "last_run" : "pending" }"#;

/// Current time as Unix epoch seconds.
pub fn epoch_now() -> u64 {
    chrono::Utc::now().timestamp().max(0) as u64
}

/// Session state owned by the monitor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorState {
    /// Epoch seconds of the last "updates available" notification; 0 = never.
    pub last_notification_epoch_secs: u64,
    /// Flipped on every blink tick while a fetch is running.
    pub blink_phase: bool,
    /// Notifications switch.
    pub notifications_enabled: bool,
}

impl Default for MonitorState {
    fn default() -> Self {
        Self {
            last_notification_epoch_secs: 0,
            blink_phase: false,
            notifications_enabled: true,
        }
    }
}

/// Interprets apt-fetch status and drives the panel presentation.
///
/// All methods run to completion without awaiting; the [`crate::Scheduler`]
/// serializes calls through a mutex.
pub struct StatusMonitor {
    config: MonitorConfig,
    snapshot: StatusSnapshot,
    raw: String,
    state: MonitorState,
    sink: Arc<dyn PresentationSink>,
    lock: Arc<dyn LockProbe>,
}

impl StatusMonitor {
    pub fn new(
        config: MonitorConfig,
        sink: Arc<dyn PresentationSink>,
        lock: Arc<dyn LockProbe>,
    ) -> Self {
        let state = MonitorState {
            notifications_enabled: config.notifications_enabled,
            ..MonitorState::default()
        };

        Self {
            config,
            snapshot: StatusSnapshot::pending(),
            raw: PENDING_RAW.into(),
            state,
            sink,
            lock,
        }
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    /// Last successfully decoded snapshot.
    pub fn snapshot(&self) -> &StatusSnapshot {
        &self.snapshot
    }

    /// Last raw text received from the status command.
    pub fn raw_status(&self) -> &str {
        &self.raw
    }

    pub fn state(&self) -> &MonitorState {
        &self.state
    }

    /// Takes a completed status fetch.
    ///
    /// On success the snapshot is replaced wholesale. On malformed output the
    /// previous snapshot is kept and a "JSON error" notification is raised;
    /// this repeats on every refresh while the output stays malformed.
    /// Returns `true` if the snapshot was replaced.
    pub fn apply_status_text(&mut self, raw: &str) -> bool {
        self.raw = raw.to_string();

        match decode(raw) {
            Ok(snapshot) => {
                if !snapshot.error_prefix.is_empty() {
                    tracing::info!(prefix = %snapshot.error_prefix, "status command printed diagnostics");
                }
                tracing::debug!(
                    num_archived = snapshot.num_archived,
                    runs_today = snapshot.runs_today,
                    "status refreshed"
                );
                self.snapshot = snapshot;
                true
            }
            Err(e) => {
                tracing::warn!("failed to decode status output: {e}");
                self.raise_notification(messages::JSON_ERROR_TITLE, messages::JSON_ERROR_BODY);
                false
            }
        }
    }

    /// Sets icon and tooltip from the lock file.
    pub fn poll_lock(&mut self) {
        let (icon, tooltip) = TrayIcon::for_lock(self.lock.exists());
        self.sink.set_icon(icon);
        self.sink.set_tooltip(tooltip);
    }

    /// One blink period: notification check, then the transfer animation.
    pub fn tick(&mut self, now: u64) {
        if self.check_notification_timeout(now) {
            self.raise_notification(messages::UPDATES_TITLE, messages::UPDATES_BODY);
        }

        if self.lock.exists() {
            let icon = if self.state.blink_phase {
                TrayIcon::Transferring
            } else {
                TrayIcon::Active
            };
            self.sink.set_icon(icon);
            self.state.blink_phase = !self.state.blink_phase;
        }
    }

    /// Whether the "updates available" notification is due at `now`.
    ///
    /// Records `now` as the last notification time when it returns `true`.
    pub fn check_notification_timeout(&mut self, now: u64) -> bool {
        check_notification_timeout(
            &self.snapshot,
            &mut self.state,
            now,
            self.config.notify_interval,
        )
    }

    /// Shows the status dialog for the last received status text.
    pub fn on_status_clicked(&mut self) {
        tracing::debug!(raw = %self.raw, "status requested");

        let snapshot = match decode(&self.raw) {
            Ok(s) => s,
            Err(e) => {
                tracing::warn!("cannot show status, output is malformed: {e}");
                self.raise_notification(messages::JSON_ERROR_TITLE, messages::JSON_ERROR_BODY);
                self.raise_notification(
                    messages::DIALOG_ERROR_TITLE,
                    messages::DIALOG_ERROR_BODY,
                );
                return;
            }
        };

        if let Err(e) = self.sink.show_info(&summary(&snapshot)) {
            tracing::warn!("failed to open status dialog: {e}");
            self.raise_notification(messages::DIALOG_ERROR_TITLE, messages::DIALOG_ERROR_BODY);
        }
    }

    pub fn on_about_clicked(&self) {
        if let Err(e) = self.sink.show_info(messages::ABOUT) {
            tracing::warn!("failed to open about dialog: {e}");
        }
    }

    pub fn on_notification_toggle_changed(&mut self, enabled: bool) {
        self.state.notifications_enabled = enabled;
        self.sink.notifications_toggled(enabled);
        tracing::info!(enabled, "notifications switched");
    }

    fn raise_notification(&self, title: &str, body: &str) {
        if !self.state.notifications_enabled {
            tracing::debug!(title, "notifications are toggled off");
            return;
        }
        self.sink.notify(title, body);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeLock, RecordingSink, SinkCall};
    use aptfetch_tray::{TOOLTIP_ACTIVE, TOOLTIP_IDLE};

    const NOW: u64 = 1_700_000_000;

    const TWO_ARCHIVED: &str = "WARNING: disk low\n{\"last_run\":\"2024-01-01T00:00:00\",\"runs_today\":3,\"runs_complete\":3,\"fetch_errors\":0,\"num_archived\":2,\"logfile_exists\":true,\"logfile_writeable\":true}";

    fn monitor(locked: bool) -> (StatusMonitor, Arc<RecordingSink>, Arc<FakeLock>) {
        let sink = Arc::new(RecordingSink::default());
        let lock = Arc::new(FakeLock::new(locked));
        let monitor = StatusMonitor::new(
            MonitorConfig::default(),
            Arc::clone(&sink) as Arc<dyn PresentationSink>,
            Arc::clone(&lock) as Arc<dyn LockProbe>,
        );
        (monitor, sink, lock)
    }

    #[test]
    fn starts_pending() {
        let (monitor, sink, _lock) = monitor(false);
        assert!(monitor.snapshot().is_pending());
        assert_eq!(monitor.state().last_notification_epoch_secs, 0);
        assert!(monitor.state().notifications_enabled);
        assert!(sink.calls().is_empty());
    }

    #[test]
    fn status_text_replaces_snapshot() {
        let (mut monitor, sink, _lock) = monitor(false);
        assert!(monitor.apply_status_text(TWO_ARCHIVED));
        assert_eq!(monitor.snapshot().num_archived, 2);
        assert_eq!(monitor.snapshot().error_prefix, "WARNING: disk low");

        // No merging: missing fields fall back to defaults.
        assert!(monitor.apply_status_text(r#"{"last_run": "2024-01-02"}"#));
        assert_eq!(monitor.snapshot().num_archived, 0);
        assert!(monitor.snapshot().logfile_exists.is_none());
        assert!(sink.notifications().is_empty());
    }

    #[test]
    fn malformed_text_keeps_snapshot_and_notifies() {
        let (mut monitor, sink, _lock) = monitor(false);
        monitor.apply_status_text(TWO_ARCHIVED);
        let before = monitor.snapshot().clone();

        assert!(!monitor.apply_status_text("not json at all"));
        assert_eq!(monitor.snapshot(), &before);
        assert_eq!(
            sink.notifications(),
            vec![messages::JSON_ERROR_TITLE.to_string()]
        );

        // Not rate limited.
        monitor.apply_status_text("still not json");
        assert_eq!(sink.notifications().len(), 2);
    }

    #[test]
    fn poll_sets_icon_and_tooltip_from_lock() {
        let (mut monitor, sink, lock) = monitor(true);
        monitor.poll_lock();
        lock.set(false);
        monitor.poll_lock();

        assert_eq!(
            sink.calls(),
            vec![
                SinkCall::Icon(TrayIcon::Active),
                SinkCall::Tooltip(TOOLTIP_ACTIVE.into()),
                SinkCall::Icon(TrayIcon::Inactive),
                SinkCall::Tooltip(TOOLTIP_IDLE.into()),
            ]
        );
    }

    #[test]
    fn blink_alternates_while_locked() {
        let (mut monitor, sink, _lock) = monitor(true);
        for i in 0..6 {
            monitor.tick(NOW + i);
        }

        let icons = sink.icons();
        assert_eq!(icons.len(), 6);
        assert_eq!(icons[0], TrayIcon::Active);
        for pair in icons.windows(2) {
            assert_ne!(pair[0], pair[1]);
        }
        assert!(icons.contains(&TrayIcon::Transferring));
    }

    #[test]
    fn tick_without_lock_leaves_icon_alone() {
        let (mut monitor, sink, _lock) = monitor(false);
        monitor.tick(NOW);
        monitor.tick(NOW + 1);
        assert!(sink.icons().is_empty());
        assert!(!monitor.state().blink_phase);
    }

    #[test]
    fn tick_notifies_once_when_updates_arrive() {
        let (mut monitor, sink, _lock) = monitor(false);
        monitor.tick(NOW);
        assert!(sink.notifications().is_empty());

        monitor.apply_status_text(TWO_ARCHIVED);
        for i in 1..10 {
            monitor.tick(NOW + i);
        }
        assert_eq!(
            sink.notifications(),
            vec![messages::UPDATES_TITLE.to_string()]
        );
        assert_eq!(monitor.state().last_notification_epoch_secs, NOW + 1);

        monitor.tick(NOW + 1 + 86_400);
        assert_eq!(sink.notifications().len(), 2);
    }

    #[test]
    fn disabled_notifications_are_not_emitted() {
        let (mut monitor, sink, _lock) = monitor(false);
        monitor.on_notification_toggle_changed(false);
        monitor.apply_status_text(TWO_ARCHIVED);

        assert!(monitor.check_notification_timeout(NOW));
        monitor.tick(NOW + 86_400);
        monitor.apply_status_text("garbage");

        assert!(sink.notifications().is_empty());
        assert_eq!(sink.toggles(), vec![false]);
    }

    #[test]
    fn toggle_back_on_resumes_notifications() {
        let (mut monitor, sink, _lock) = monitor(false);
        monitor.on_notification_toggle_changed(false);
        monitor.on_notification_toggle_changed(true);
        monitor.apply_status_text("garbage");
        assert_eq!(sink.notifications().len(), 1);
        assert!(monitor.state().notifications_enabled);
    }

    #[test]
    fn status_click_shows_summary() {
        let (mut monitor, sink, _lock) = monitor(false);
        monitor.apply_status_text(TWO_ARCHIVED);
        monitor.on_status_clicked();

        let dialogs = sink.infos();
        assert_eq!(dialogs.len(), 1);
        assert!(dialogs[0].contains("2 packages are awaiting installation"));
    }

    #[test]
    fn status_click_while_pending() {
        let (mut monitor, sink, _lock) = monitor(false);
        monitor.on_status_clicked();
        assert_eq!(
            sink.infos(),
            vec!["No status available yet, apt-fetch is pending.".to_string()]
        );
    }

    #[test]
    fn status_click_with_malformed_output() {
        let (mut monitor, sink, _lock) = monitor(false);
        monitor.apply_status_text("Traceback (most recent call last):");
        monitor.on_status_clicked();

        assert!(sink.infos().is_empty());
        assert_eq!(
            sink.notifications(),
            vec![
                messages::JSON_ERROR_TITLE.to_string(),
                messages::JSON_ERROR_TITLE.to_string(),
                messages::DIALOG_ERROR_TITLE.to_string(),
            ]
        );
    }

    #[test]
    fn status_dialog_failure_notifies() {
        let (mut monitor, sink, _lock) = monitor(false);
        sink.fail_dialogs();
        monitor.apply_status_text(TWO_ARCHIVED);
        monitor.on_status_clicked();
        assert_eq!(
            sink.notifications(),
            vec![messages::DIALOG_ERROR_TITLE.to_string()]
        );
    }

    #[test]
    fn about_shows_version() {
        let (monitor, sink, _lock) = monitor(false);
        monitor.on_about_clicked();
        assert!(sink.infos()[0].contains(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn notify_interval_is_configurable() {
        let sink = Arc::new(RecordingSink::default());
        let config = MonitorConfig {
            notify_interval: crate::SHORT_NOTIFY_INTERVAL,
            ..MonitorConfig::default()
        };
        let mut monitor = StatusMonitor::new(
            config,
            Arc::clone(&sink) as Arc<dyn PresentationSink>,
            Arc::new(FakeLock::new(false)),
        );
        monitor.apply_status_text(TWO_ARCHIVED);
        assert!(monitor.check_notification_timeout(NOW));
        assert!(monitor.check_notification_timeout(NOW + 4 * 3_600));
    }

    #[test]
    fn epoch_now_is_current() {
        assert!(epoch_now() > NOW);
    }
}
