//! Linux desktop adapters for the apt-fetch applet.
//!
//! Implements the monitor's outward seams with stock desktop tools:
//! - [`DesktopSink`] — tray updates, `notify-send` notifications, `zenity` dialogs
//! - [`SystemRunner`] — `which` lookups and `pkexec` launches

mod process;
mod runner;
mod sink;

pub use process::spawn_detached;
pub use runner::SystemRunner;
pub use sink::{DesktopConfig, DesktopSink};
