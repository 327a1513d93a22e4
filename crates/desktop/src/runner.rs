//! `which` lookups and elevated launches.

use std::process::Stdio;

use aptfetch_monitor::{CommandOutput, CommandRunner, MonitorError, RunFuture};

/// Default elevation wrapper.
const DEFAULT_ELEVATION: &str = "pkexec";

/// Runs real system commands.
#[derive(Debug, Clone)]
pub struct SystemRunner {
    elevation_program: String,
}

impl SystemRunner {
    pub fn new(elevation_program: impl Into<String>) -> Self {
        Self {
            elevation_program: elevation_program.into(),
        }
    }

    async fn which(&self, program: &str) -> bool {
        let output = tokio::process::Command::new("which")
            .arg(program)
            .stdin(Stdio::null())
            .output()
            .await;

        match output {
            Ok(o) => o.status.success() && !o.stdout.trim_ascii().is_empty(),
            Err(e) => {
                tracing::debug!(program, "which lookup failed: {e}");
                false
            }
        }
    }

    async fn elevate(&self, program: &str) -> Result<CommandOutput, MonitorError> {
        let output = tokio::process::Command::new(&self.elevation_program)
            .arg(program)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|source| MonitorError::Launch {
                program: self.elevation_program.clone(),
                source,
            })?;

        Ok(CommandOutput {
            success: output.status.success(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

impl Default for SystemRunner {
    fn default() -> Self {
        Self::new(DEFAULT_ELEVATION)
    }
}

impl CommandRunner for SystemRunner {
    fn exists<'a>(&'a self, program: &'a str) -> RunFuture<'a, bool> {
        Box::pin(self.which(program))
    }

    fn launch_elevated<'a>(
        &'a self,
        program: &'a str,
    ) -> RunFuture<'a, Result<CommandOutput, MonitorError>> {
        Box::pin(self.elevate(program))
    }
}
