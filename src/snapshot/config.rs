//! Configuration for snapshot reads.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Settle-and-retry parameters for [`SnapshotReader`](super::SnapshotReader).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReaderConfig {
    /// Milliseconds between two file-size polls
    pub settle_interval_ms: u64,
    /// Give up waiting for the size to settle after this long and read anyway
    pub settle_timeout_ms: u64,
    /// Parse attempts before a snapshot is declared corrupt
    pub max_attempts: u32,
    /// Milliseconds between parse attempts
    pub retry_delay_ms: u64,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            settle_interval_ms: 100,
            settle_timeout_ms: 2000,
            max_attempts: 6,
            retry_delay_ms: 200,
        }
    }
}

impl ReaderConfig {
    pub fn settle_interval(&self) -> Duration {
        Duration::from_millis(self.settle_interval_ms)
    }

    pub fn settle_timeout(&self) -> Duration {
        Duration::from_millis(self.settle_timeout_ms)
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms)
    }
}
