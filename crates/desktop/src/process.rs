//! Fire-and-forget child processes.

use std::process::Stdio;

use aptfetch_monitor::PresentationError;

/// Starts `program args...` without waiting for it.
///
/// Spawn failures (program missing, not executable) are returned. A
/// background task reaps the child and logs a non-zero exit. Must be called
/// inside a tokio runtime.
pub fn spawn_detached(program: &str, args: &[&str]) -> Result<(), PresentationError> {
    let child = tokio::process::Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|source| PresentationError::Spawn {
            program: program.to_string(),
            source,
        })?;

    let program = program.to_string();
    tokio::spawn(async move {
        match child.wait_with_output().await {
            Ok(output) if !output.status.success() => {
                // zenity exits 1 when the dialog is closed with Cancel/Esc.
                tracing::debug!(
                    program = %program,
                    status = %output.status,
                    stderr = %String::from_utf8_lossy(&output.stderr).trim(),
                    "child exited unsuccessfully"
                );
            }
            Ok(_) => {}
            Err(e) => tracing::warn!(program = %program, "failed to wait for child: {e}"),
        }
    });

    Ok(())
}
