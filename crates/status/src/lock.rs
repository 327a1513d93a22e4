//! Fetch-in-progress detection.
//!
//! `apt-fetch.py` writes its PID into a lock file for the duration of a
//! download run and removes it when done.

use std::path::{Path, PathBuf};

/// Lock file written by `apt-fetch.py`.
pub const DEFAULT_LOCK_PATH: &str = "/var/lock/apt-fetch";

/// Answers "is a fetch running right now?".
pub trait LockProbe: Send + Sync + 'static {
    fn exists(&self) -> bool;
}

/// Probes a fixed filesystem path.
#[derive(Debug, Clone)]
pub struct PathLockProbe {
    path: PathBuf,
}

impl PathLockProbe {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for PathLockProbe {
    fn default() -> Self {
        Self::new(DEFAULT_LOCK_PATH)
    }
}

impl LockProbe for PathLockProbe {
    fn exists(&self) -> bool {
        match self.path.try_exists() {
            Ok(exists) => exists,
            Err(e) => {
                tracing::debug!(path = %self.path.display(), "lock probe failed: {e}");
                false
            }
        }
    }
}
