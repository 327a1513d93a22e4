//! Outward effects of the monitor.

use aptfetch_tray::TrayIcon;

use crate::PresentationError;

/// Notification and dialog texts.
pub mod messages {
    pub const UPDATES_TITLE: &str = "(apt-fetch) Updates Are Available";
    pub const UPDATES_BODY: &str = "Updates are available to be applied to your system.\nOpen Update Manager to apply them.\n";

    pub const JSON_ERROR_TITLE: &str = "(apt-fetch) JSON error";
    pub const JSON_ERROR_BODY: &str = "The apt-fetch.py command produced unexpected output. This is likely due to an error message related to a system issue.\nCheck /var/log/ for more info.\n";

    pub const DIALOG_ERROR_TITLE: &str = "(apt-fetch) Zenity error";
    pub const DIALOG_ERROR_BODY: &str = "The apt-fetch applet was not able to run the zenity command to display the status.\nMore info may be available in /var/log or by running apt-fetch.py -s\n";

    pub const ABOUT: &str = concat!(
        "apt-fetch applet ",
        env!("CARGO_PKG_VERSION"),
        "\nShows the state of background apt downloads and notifies when\nupdates are ready to install.\n"
    );
}

/// Icon, tooltip, notification and dialog output.
///
/// Implemented by the desktop adapter; the monitor depends only on this
/// trait. Methods must not block: dialogs are started, not waited on.
pub trait PresentationSink: Send + Sync + 'static {
    /// Sets the panel icon.
    fn set_icon(&self, icon: TrayIcon);

    /// Sets the panel tooltip.
    fn set_tooltip(&self, text: &str);

    /// Emits a desktop notification (normal urgency, stays until dismissed).
    fn notify(&self, title: &str, body: &str);

    /// Opens an informational dialog.
    fn show_info(&self, text: &str) -> Result<(), PresentationError>;

    /// Opens an error dialog.
    fn show_error(&self, text: &str);

    /// Reflects the Notifications switch state and pops the menu down.
    fn notifications_toggled(&self, _enabled: bool) {}
}
