//! "Updates available" notification timing.

use std::time::Duration;

use aptfetch_status::StatusSnapshot;

use crate::MonitorState;

/// Decides whether the "updates available" notification is due.
///
/// Fires on the first check that sees archived packages, then again each
/// time `interval` has elapsed since the last firing. The recorded time is
/// only written when this returns `true`, and is never reset when the
/// archived count drops back to zero.
pub fn check_notification_timeout(
    snapshot: &StatusSnapshot,
    state: &mut MonitorState,
    now: u64,
    interval: Duration,
) -> bool {
    if !snapshot.has_updates() {
        return false;
    }

    if state.last_notification_epoch_secs == 0 {
        state.last_notification_epoch_secs = now;
        return true;
    }

    // Saturating: a clock stepping backwards must not re-fire.
    if now.saturating_sub(state.last_notification_epoch_secs) >= interval.as_secs() {
        state.last_notification_epoch_secs = now;
        return true;
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;

    const DAY: Duration = Duration::from_secs(86_400);
    const START: u64 = 1_700_000_000;

    fn archived(n: u32) -> StatusSnapshot {
        StatusSnapshot {
            last_run: Some("2024-01-01 06:00:00".into()),
            num_archived: n,
            ..StatusSnapshot::pending()
        }
    }

    #[test]
    fn fires_once_per_cold_start_then_waits() {
        let snap = archived(3);
        let mut state = MonitorState::default();

        assert!(check_notification_timeout(&snap, &mut state, START, DAY));
        assert_eq!(state.last_notification_epoch_secs, START);

        for t in (START + 1..START + 86_400).step_by(3_600) {
            assert!(!check_notification_timeout(&snap, &mut state, t, DAY));
        }
        assert!(!check_notification_timeout(&snap, &mut state, START + 86_399, DAY));

        assert!(check_notification_timeout(&snap, &mut state, START + 86_400, DAY));
        assert_eq!(state.last_notification_epoch_secs, START + 86_400);
        assert!(!check_notification_timeout(&snap, &mut state, START + 86_401, DAY));
    }

    #[test]
    fn never_fires_without_archived_packages() {
        let snap = archived(0);
        let mut state = MonitorState::default();

        for t in [0, START, START + 86_400, START + 10 * 86_400] {
            assert!(!check_notification_timeout(&snap, &mut state, t, DAY));
        }
        assert_eq!(state.last_notification_epoch_secs, 0);
    }

    #[test]
    fn timestamp_survives_archive_drain() {
        let mut state = MonitorState::default();
        assert!(check_notification_timeout(&archived(2), &mut state, START, DAY));

        // Packages installed; nothing pending for a while.
        assert!(!check_notification_timeout(&archived(0), &mut state, START + 3_600, DAY));
        assert_eq!(state.last_notification_epoch_secs, START);

        // New downloads within the interval: the elapsed-time rule governs.
        assert!(!check_notification_timeout(&archived(1), &mut state, START + 7_200, DAY));

        // After a long gap the periodic branch fires.
        assert!(check_notification_timeout(&archived(1), &mut state, START + 2 * 86_400, DAY));
    }

    #[test]
    fn clock_going_backwards_does_not_fire() {
        let snap = archived(1);
        let mut state = MonitorState::default();
        assert!(check_notification_timeout(&snap, &mut state, START, DAY));
        assert!(!check_notification_timeout(&snap, &mut state, START - 100_000, DAY));
        assert_eq!(state.last_notification_epoch_secs, START);
    }

    #[test]
    fn shorter_interval_is_respected() {
        let four_hours = Duration::from_secs(4 * 3_600);
        let snap = archived(1);
        let mut state = MonitorState::default();
        assert!(check_notification_timeout(&snap, &mut state, START, four_hours));
        assert!(!check_notification_timeout(&snap, &mut state, START + 14_399, four_hours));
        assert!(check_notification_timeout(&snap, &mut state, START + 14_400, four_hours));
    }
}
