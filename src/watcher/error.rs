//! Watcher error types

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WatcherError {
    #[error("Snapshot directory does not exist: {0}")]
    MissingDirectory(PathBuf),

    #[error("Failed to watch snapshot directory: {0}")]
    Notify(#[from] notify::Error),
}
