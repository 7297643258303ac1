//! Snapshot watcher configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Controls the background watcher that pushes node analysis updates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WatcherConfig {
    pub enabled: bool,
    /// Quiet period after a change before the analysis is recomputed
    pub debounce_ms: u64,
    /// Capacity of the update broadcast channel
    pub channel_capacity: usize,
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            debounce_ms: 250,
            channel_capacity: 64,
        }
    }
}

impl WatcherConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}
