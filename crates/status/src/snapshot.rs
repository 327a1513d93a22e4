//! Decoded `apt-fetch.py -j` output.
//!
//! The status command prints a JSON object, but system warnings (python
//! tracebacks, apt noise) can land on stdout ahead of it. Everything before
//! the first `{` is kept as an informational prefix and the rest is parsed.

use serde::{Deserialize, Serialize};

use crate::StatusError;

/// Sentinel `last_run` value used before the first fetch completes.
pub const PENDING: &str = "pending";

/// One decoded status report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusSnapshot {
    /// Timestamp of the last run, or a sentinel (`"pending"`, `"none"`).
    /// `null` when nothing has run today.
    #[serde(default)]
    pub last_run: Option<String>,
    #[serde(default)]
    pub runs_today: u32,
    #[serde(default)]
    pub runs_complete: u32,
    #[serde(default)]
    pub fetch_errors: u32,
    /// Packages downloaded and waiting to be installed.
    #[serde(default)]
    pub num_archived: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_installed: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logfile_exists: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logfile_writeable: Option<bool>,
    /// Diagnostic text printed before the JSON payload.
    #[serde(skip)]
    pub error_prefix: String,
}

impl StatusSnapshot {
    /// Placeholder used until the first status fetch completes.
    pub fn pending() -> Self {
        Self {
            last_run: Some(PENDING.into()),
            runs_today: 0,
            runs_complete: 0,
            fetch_errors: 0,
            num_archived: 0,
            num_installed: None,
            logfile_exists: None,
            logfile_writeable: None,
            error_prefix: String::new(),
        }
    }

    /// Returns `true` if apt-fetch has not reported a run yet.
    pub fn is_pending(&self) -> bool {
        self.last_run
            .as_deref()
            .is_some_and(|s| s.eq_ignore_ascii_case(PENDING))
    }

    /// Returns `true` if downloaded packages are waiting to be installed.
    pub fn has_updates(&self) -> bool {
        self.num_archived > 0
    }
}

impl Default for StatusSnapshot {
    fn default() -> Self {
        Self::pending()
    }
}

/// Decodes raw status command output into a snapshot.
pub fn decode(raw: &str) -> Result<StatusSnapshot, StatusError> {
    let (prefix, payload) = match raw.find('{') {
        Some(idx) => (raw[..idx].trim(), &raw[idx..]),
        None => ("", raw),
    };

    let mut snapshot: StatusSnapshot = serde_json::from_str(payload)?;
    snapshot.error_prefix = prefix.to_string();
    Ok(snapshot)
}

/// Formats a snapshot as the multi-line text shown in the status dialog.
pub fn summary(snapshot: &StatusSnapshot) -> String {
    if snapshot.is_pending() {
        return "No status available yet, apt-fetch is pending.".into();
    }

    let mut lines = Vec::new();
    if !snapshot.error_prefix.is_empty() {
        lines.push(format!("Note: {}", snapshot.error_prefix));
    }

    let last_run = snapshot.last_run.as_deref().unwrap_or("never");
    lines.push(format!("apt-fetch was last run at {last_run}"));
    lines.push(format!(
        "{} fetches have been done today",
        snapshot.runs_today
    ));
    lines.push(format!("{} fetches have completed.", snapshot.runs_complete));
    lines.push(format!("{} errors were encountered.", snapshot.fetch_errors));
    lines.push(format!(
        "{} packages are awaiting installation.",
        snapshot.num_archived
    ));
    if let Some(installed) = snapshot.num_installed {
        lines.push(format!("{installed} packages have been installed."));
    }
    lines.push(format!(
        "apt-fetch logfile exists: {}",
        yes_no(snapshot.logfile_exists)
    ));
    lines.push(format!(
        "apt-fetch logfile is writeable: {}.",
        yes_no(snapshot.logfile_writeable)
    ));

    let mut text = lines.join("\n");
    text.push('\n');
    text
}

fn yes_no(value: Option<bool>) -> &'static str {
    match value {
        Some(true) => "yes",
        Some(false) => "no",
        None => "unknown",
    }
}
