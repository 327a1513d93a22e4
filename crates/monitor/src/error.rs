//! Error types for the monitor core.

use aptfetch_status::StatusError;

/// Errors reported by a [`crate::PresentationSink`].
#[derive(Debug, thiserror::Error)]
pub enum PresentationError {
    #[error("failed to run `{program}`: {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    #[error("presentation unavailable: {0}")]
    Unavailable(String),
}

/// Errors produced by monitor operations.
#[derive(Debug, thiserror::Error)]
pub enum MonitorError {
    #[error("status error: {0}")]
    Status(#[from] StatusError),

    #[error("presentation error: {0}")]
    Presentation(#[from] PresentationError),

    #[error("failed to launch `{program}`: {source}")]
    Launch {
        program: String,
        source: std::io::Error,
    },
}
