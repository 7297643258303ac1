//! Error types for snapshot reads.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading a snapshot document.
///
/// None of these are permanent: the producers rewrite their files every few
/// seconds, so callers report "no data available now" and try again later.
#[derive(Debug, Error)]
pub enum ReadFailure {
    /// The snapshot file does not exist
    #[error("snapshot not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Every parse attempt saw an empty or malformed document
    #[error("snapshot {} is corrupt after {attempts} attempts: {reason}", path.display())]
    Corrupt {
        path: PathBuf,
        attempts: u32,
        reason: String,
    },

    /// The file exists but could not be read
    #[error("failed to read snapshot {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ReadFailure {
    /// Short label used for metrics and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            ReadFailure::NotFound(_) => "not_found",
            ReadFailure::Corrupt { .. } => "corrupt",
            ReadFailure::Io { .. } => "io",
        }
    }
}
