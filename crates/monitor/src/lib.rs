//! Status monitor core for the apt-fetch applet.
//!
//! [`StatusMonitor`] owns the last decoded status snapshot and the session
//! state (last notification time, blink phase, notification switch). The
//! [`Scheduler`] drives it from three independent timers:
//!
//! | Timer     | Default | Action                                       |
//! |-----------|---------|----------------------------------------------|
//! | `refresh` | 60 s    | run the status command, replace the snapshot |
//! | `poll`    | 5 s     | set icon/tooltip from the lock file          |
//! | `blink`   | 1 s     | update notification check, transfer blink    |
//!
//! All outward effects go through [`PresentationSink`]; external commands
//! through [`CommandRunner`].

mod config;
mod error;
mod launcher;
mod monitor;
mod policy;
mod scheduler;
mod sink;

#[cfg(test)]
mod testing;

pub use config::{DEFAULT_NOTIFY_INTERVAL, MonitorConfig, SHORT_NOTIFY_INTERVAL};
pub use error::{MonitorError, PresentationError};
pub use launcher::{
    CommandOutput, CommandRunner, DEFAULT_UPDATE_MANAGERS, LaunchOutcome, RunFuture,
    UpdateManagerLauncher,
};
pub use monitor::{MonitorState, StatusMonitor, epoch_now};
pub use policy::check_notification_timeout;
pub use scheduler::{Scheduler, refresh};
pub use sink::{PresentationSink, messages};
