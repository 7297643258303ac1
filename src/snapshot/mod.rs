//! Snapshot ingestion.
//!
//! The latency, health and telemetry snapshots are rewritten in place by
//! independent producer processes on their own schedule. There is no lock,
//! rename or version header between writer and reader, so every read may
//! race a write. [`SnapshotReader`] absorbs that race:
//!
//! 1. poll the file size until two consecutive observations agree, bounded
//!    by a timeout after which the read proceeds anyway;
//! 2. read and parse, retrying a bounded number of times when the content is
//!    empty or malformed;
//! 3. report [`ReadFailure::Corrupt`] once the attempts are exhausted.
//!
//! Nothing is cached between calls; every read sees the current file.

mod clock;
mod config;
mod error;
pub mod fields;
mod types;


pub use clock::{Clock, ManualClock, TokioClock};
pub use config::ReaderConfig;
pub use error::ReadFailure;
pub use types::{LinkRecord, NodeRecord, Properties, SnapshotDocument};

use std::io::ErrorKind;
use std::path::Path;

/// Outcome of waiting for a file to stop growing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settle {
    /// Two consecutive size polls agreed
    Settled,
    /// The size kept changing until the timeout
    TimedOut,
    /// The file disappeared while polling
    Vanished,
}

/// Why a single read attempt failed.
enum AttemptError {
    /// Empty, malformed or briefly missing; worth another attempt
    Transient(String),
    /// An I/O error that retrying will not fix
    Fatal(std::io::Error),
}

/// Reads snapshot documents while tolerating concurrent in-place writes.
pub struct SnapshotReader<C = TokioClock> {
    config: ReaderConfig,
    clock: C,
}

impl SnapshotReader<TokioClock> {
    pub fn new(config: ReaderConfig) -> Self {
        Self {
            config,
            clock: TokioClock,
        }
    }
}

impl<C: Clock> SnapshotReader<C> {
    /// Create a reader driven by a custom clock (for deterministic tests).
    pub fn with_clock(config: ReaderConfig, clock: C) -> Self {
        Self { config, clock }
    }

    pub fn config(&self) -> &ReaderConfig {
        &self.config
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Read and parse the snapshot at `path`.
    pub async fn read(&self, path: &Path) -> Result<SnapshotDocument, ReadFailure> {
        if !tokio::fs::try_exists(path).await.unwrap_or(false) {
            tracing::debug!(path = %path.display(), "Snapshot file missing");
            self.record_failure(path, "not_found");
            return Err(ReadFailure::NotFound(path.to_path_buf()));
        }

        match self.wait_until_settled(path).await {
            Settle::Settled => {}
            Settle::TimedOut => {
                tracing::warn!(
                    path = %path.display(),
                    timeout_ms = self.config.settle_timeout_ms,
                    "Snapshot size did not settle, reading anyway"
                );
            }
            Settle::Vanished => {
                tracing::debug!(path = %path.display(), "Snapshot vanished while settling");
            }
        }

        let max_attempts = self.config.max_attempts.max(1);
        let mut last_reason = String::new();
        let mut last_missing = false;

        for attempt in 1..=max_attempts {
            match self.attempt(path).await {
                Ok(document) => {
                    if attempt > 1 {
                        tracing::info!(path = %path.display(), attempt, "Snapshot parsed after retry");
                    }
                    return Ok(document);
                }
                Err(AttemptError::Transient(reason)) => {
                    tracing::warn!(
                        path = %path.display(),
                        attempt,
                        max_attempts,
                        reason = %reason,
                        "Snapshot read attempt failed"
                    );
                    metrics::counter!(
                        "netpath_snapshot_read_retries_total",
                        "file" => file_label(path)
                    )
                    .increment(1);
                    last_missing = reason == MISSING_REASON;
                    last_reason = reason;
                    if attempt < max_attempts {
                        self.clock.sleep(self.config.retry_delay()).await;
                    }
                }
                Err(AttemptError::Fatal(source)) => {
                    tracing::error!(path = %path.display(), error = %source, "Snapshot unreadable");
                    self.record_failure(path, "io");
                    return Err(ReadFailure::Io {
                        path: path.to_path_buf(),
                        source,
                    });
                }
            }
        }

        if last_missing {
            self.record_failure(path, "not_found");
            return Err(ReadFailure::NotFound(path.to_path_buf()));
        }

        tracing::error!(
            path = %path.display(),
            attempts = max_attempts,
            reason = %last_reason,
            "Giving up on snapshot"
        );
        self.record_failure(path, "corrupt");
        Err(ReadFailure::Corrupt {
            path: path.to_path_buf(),
            attempts: max_attempts,
            reason: last_reason,
        })
    }

    /// Read `path`, mapping a missing file to `None` instead of an error.
    pub async fn read_optional(
        &self,
        path: &Path,
    ) -> Result<Option<SnapshotDocument>, ReadFailure> {
        match self.read(path).await {
            Ok(document) => Ok(Some(document)),
            Err(ReadFailure::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Poll the file size until two consecutive observations are equal.
    pub async fn wait_until_settled(&self, path: &Path) -> Settle {
        let start = self.clock.now();
        let Some(mut last_size) = file_size(path).await else {
            return Settle::Vanished;
        };

        while self.clock.now().duration_since(start) < self.config.settle_timeout() {
            self.clock.sleep(self.config.settle_interval()).await;
            let Some(size) = file_size(path).await else {
                return Settle::Vanished;
            };
            if size == last_size {
                return Settle::Settled;
            }
            last_size = size;
        }

        Settle::TimedOut
    }

    async fn attempt(&self, path: &Path) -> Result<SnapshotDocument, AttemptError> {
        let bytes = match tokio::fs::read(path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(AttemptError::Transient(MISSING_REASON.to_string()));
            }
            Err(e) => return Err(AttemptError::Fatal(e)),
        };

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Err(AttemptError::Transient("empty file".to_string()));
        }

        let document = serde_json::from_slice::<SnapshotDocument>(&bytes)
            .map_err(|e| AttemptError::Transient(format!("invalid JSON: {}", e)))?;

        tracing::debug!(
            path = %path.display(),
            bytes = bytes.len(),
            nodes = document.nodes.len(),
            links = document.links.len(),
            "Snapshot parsed"
        );
        Ok(document)
    }

    fn record_failure(&self, path: &Path, kind: &'static str) {
        metrics::counter!(
            "netpath_snapshot_read_failures_total",
            "file" => file_label(path),
            "kind" => kind
        )
        .increment(1);
    }
}

const MISSING_REASON: &str = "file disappeared";

async fn file_size(path: &Path) -> Option<u64> {
    tokio::fs::metadata(path).await.ok().map(|m| m.len())
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
