//! Snapshot location configuration

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where the producers write their snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapshotConfig {
    /// Directory shared with the producer processes
    pub dir: PathBuf,
    /// Links annotated with `predicted_latency_ms`
    pub latency_file: String,
    /// Nodes annotated with `predicted_alarm_status`
    pub health_file: String,
    /// Raw telemetry (`latency_ms`, `alarm_status`), used by the node analysis
    pub telemetry_file: String,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("static/graph-data"),
            latency_file: "graph_live_predicted.json".to_string(),
            health_file: "graph_live_alarm_predicted.json".to_string(),
            telemetry_file: "graph_live.json".to_string(),
        }
    }
}

impl SnapshotConfig {
    /// Default file names inside `dir`.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            ..Self::default()
        }
    }

    pub fn latency_path(&self) -> PathBuf {
        self.dir.join(&self.latency_file)
    }

    pub fn health_path(&self) -> PathBuf {
        self.dir.join(&self.health_file)
    }

    pub fn telemetry_path(&self) -> PathBuf {
        self.dir.join(&self.telemetry_file)
    }
}
