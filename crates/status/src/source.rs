//! Status command invocation.

use std::future::Future;
use std::pin::Pin;
use std::process::Stdio;
use std::time::Duration;

use crate::StatusError;

/// A boxed future returned by [`StatusSource::fetch`].
pub type SourceFuture<'a> = Pin<Box<dyn Future<Output = Result<String, StatusError>> + Send + 'a>>;

/// Produces raw status text (normally by running `apt-fetch.py -j`).
pub trait StatusSource: Send + Sync + 'static {
    /// Runs one status query and returns its captured output.
    fn fetch(&self) -> SourceFuture<'_>;
}

/// Runs an external command and captures its stdout.
#[derive(Debug, Clone)]
pub struct CommandSource {
    program: String,
    args: Vec<String>,
    timeout: Option<Duration>,
}

impl CommandSource {
    /// Creates a source for `program args...` with no timeout.
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            timeout: None,
        }
    }

    /// The stock `apt-fetch.py -j` invocation.
    pub fn apt_fetch() -> Self {
        Self::new("apt-fetch.py", vec!["-j".into()])
    }

    /// Kills the command if it runs longer than `timeout`.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    async fn run(&self) -> Result<String, StatusError> {
        let child = tokio::process::Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| StatusError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        let output = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, child.wait_with_output())
                .await
                .map_err(|_| StatusError::Timeout(limit.as_secs()))??,
            None => child.wait_with_output().await?,
        };

        if !output.status.success() {
            // The script still prints usable JSON on some failures; let the
            // decoder decide.
            tracing::warn!(
                program = %self.program,
                status = %output.status,
                stderr = %String::from_utf8_lossy(&output.stderr).trim(),
                "status command exited unsuccessfully"
            );
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl StatusSource for CommandSource {
    fn fetch(&self) -> SourceFuture<'_> {
        Box::pin(self.run())
    }
}
