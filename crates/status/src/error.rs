//! Error types for status retrieval.

/// Errors produced while fetching or decoding apt-fetch status.
#[derive(Debug, thiserror::Error)]
pub enum StatusError {
    #[error("malformed status output: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("failed to spawn status command `{program}`: {source}")]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    #[error("status command timed out after {0}s")]
    Timeout(u64),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
