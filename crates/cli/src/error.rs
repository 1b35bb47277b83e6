use std::path::PathBuf;
use thiserror::Error;

/// Failures surfaced by the `mdopt` binary. The core pipeline itself never fails.
#[derive(Debug, Error)]
pub enum CliError {
    /// Input could not be read (missing, unreadable, or not UTF-8).
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        /// Offending path.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
    /// Output could not be written.
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        /// Offending path.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
    /// Metadata could not be serialized.
    #[error("failed to serialize metadata: {0}")]
    Json(#[from] serde_json::Error),
}
