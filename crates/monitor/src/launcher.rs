//! "Update Manager" menu action.
//!
//! Looks for an installed update manager in preference order and launches
//! the first one found with elevated privileges. Runs outside the monitor
//! lock: the launched program can stay open for a long time.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::{MonitorError, PresentationSink};

/// Update managers tried in order.
pub const DEFAULT_UPDATE_MANAGERS: &[&str] = &["mintupdate", "synaptic"];

/// A boxed future returned by [`CommandRunner`] methods.
pub type RunFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Result of an elevated launch once the program has exited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub success: bool,
    pub stderr: String,
}

/// Runs external programs on behalf of the monitor.
pub trait CommandRunner: Send + Sync + 'static {
    /// Returns `true` if `program` is installed (a `which`-style lookup).
    fn exists<'a>(&'a self, program: &'a str) -> RunFuture<'a, bool>;

    /// Runs `program` elevated and waits for it to exit.
    fn launch_elevated<'a>(
        &'a self,
        program: &'a str,
    ) -> RunFuture<'a, Result<CommandOutput, MonitorError>>;
}

/// What the Update Manager action did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchOutcome {
    /// The named program was launched.
    Launched(String),
    /// None of the candidates is installed.
    NotFound,
}

/// Handles the "Update Manager" menu item.
pub struct UpdateManagerLauncher {
    candidates: Vec<String>,
    runner: Arc<dyn CommandRunner>,
    sink: Arc<dyn PresentationSink>,
}

impl UpdateManagerLauncher {
    pub fn new(
        candidates: Vec<String>,
        runner: Arc<dyn CommandRunner>,
        sink: Arc<dyn PresentationSink>,
    ) -> Self {
        Self {
            candidates,
            runner,
            sink,
        }
    }

    /// First installed candidate, in preference order.
    pub async fn find(&self) -> Option<&str> {
        for candidate in &self.candidates {
            if self.runner.exists(candidate).await {
                return Some(candidate.as_str());
            }
            tracing::debug!(candidate = %candidate, "update manager not installed");
        }
        None
    }

    /// Launches the first installed update manager.
    ///
    /// Anything the elevated launch writes to stderr is shown in an error
    /// dialog. When no candidate is installed nothing is shown.
    pub async fn launch(&self) -> Result<LaunchOutcome, MonitorError> {
        let Some(program) = self.find().await else {
            tracing::info!(candidates = ?self.candidates, "no update manager installed");
            return Ok(LaunchOutcome::NotFound);
        };

        tracing::info!(program, "launching update manager");
        let output = match self.runner.launch_elevated(program).await {
            Ok(output) => output,
            Err(e) => {
                self.sink.show_error(&e.to_string());
                return Err(e);
            }
        };

        let stderr = output.stderr.trim();
        if !stderr.is_empty() {
            tracing::warn!(program, success = output.success, "update manager reported errors");
            self.sink.show_error(stderr);
        }

        Ok(LaunchOutcome::Launched(program.to_string()))
    }
}
