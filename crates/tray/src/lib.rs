//! Panel icon surface for the apt-fetch applet.
//!
//! Models the tray icon, its tooltip and the popup menu, and exposes a
//! channel-based interface between the monitor core and whatever front-end
//! renders them:
//! - [`TrayEvent`] — events from tray to core (menu item activated)
//! - [`TrayUpdate`] — updates from core to tray (icon, tooltip, toggle state)
//!
//! [`console`] provides a terminal front-end for environments without a
//! panel host.

pub mod console;
mod icon;
mod menu;
mod tray;

pub use icon::{TOOLTIP_ACTIVE, TOOLTIP_IDLE, TrayIcon};
pub use menu::{MenuAction, MenuItem, MenuState};
pub use tray::{TrayConfig, TrayEvent, TrayHandle, TrayUpdate};
