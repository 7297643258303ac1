//! Per-node comparison of measured telemetry against the predictors.
//!
//! The analysis is best-effort: a snapshot that cannot be read contributes
//! nothing instead of failing the whole report.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::SnapshotConfig;
use crate::routing::round_to;
use crate::snapshot::fields::{
    self, MEASURED_LATENCY_KEY, MEASURED_STATUS_KEY, PREDICTED_LATENCY_KEY, PREDICTED_STATUS_KEY,
};
use crate::snapshot::{Clock, LinkRecord, Properties, ReadFailure, SnapshotDocument, SnapshotReader};
use crate::topology::{HealthMap, HealthStatus};

/// Status reported when a snapshot carries no alarm for a node.
pub const UNKNOWN_ALARM: &str = "UNKNOWN";

/// Measured versus predicted state of one node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeAnalysis {
    pub node: String,
    /// Mean measured latency of the links touching the node
    pub real_latency: Option<f64>,
    /// Mean predicted latency of the links touching the node
    pub predicted_latency: Option<f64>,
    pub real_alarm: String,
    pub predicted_alarm: String,
}

/// A node of the health snapshot with its predicted status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeStatus {
    pub id: String,
    pub status: HealthStatus,
}

/// Compare the telemetry snapshot with the latency and health predictions.
///
/// Nodes are taken from the telemetry and health snapshots and returned
/// sorted by id.
pub fn compute(
    telemetry: &SnapshotDocument,
    latency: &SnapshotDocument,
    health: &SnapshotDocument,
) -> Vec<NodeAnalysis> {
    let measured = node_properties(telemetry);
    let predicted = node_properties(health);

    let mut ids: Vec<&str> = measured.keys().chain(predicted.keys()).copied().collect();
    ids.sort_unstable();
    ids.dedup();

    ids.into_iter()
        .map(|id| NodeAnalysis {
            node: id.to_string(),
            real_latency: mean_latency(&telemetry.links, id, MEASURED_LATENCY_KEY),
            predicted_latency: mean_latency(&latency.links, id, PREDICTED_LATENCY_KEY),
            real_alarm: alarm(measured.get(id).copied(), MEASURED_STATUS_KEY),
            predicted_alarm: alarm(predicted.get(id).copied(), PREDICTED_STATUS_KEY),
        })
        .collect()
}

/// Every node of the health snapshot with its parsed status, sorted by id.
pub fn node_statuses(health: &SnapshotDocument) -> Vec<NodeStatus> {
    HealthMap::from_snapshot(health)
        .iter()
        .map(|(id, status)| NodeStatus {
            id: id.to_string(),
            status,
        })
        .collect()
}

/// Read the three snapshots and compute the analysis.
pub async fn analyze<C: Clock>(
    reader: &SnapshotReader<C>,
    snapshots: &SnapshotConfig,
) -> Vec<NodeAnalysis> {
    let telemetry = read_or_empty(reader, &snapshots.telemetry_path()).await;
    let latency = read_or_empty(reader, &snapshots.latency_path()).await;
    let health = read_or_empty(reader, &snapshots.health_path()).await;
    compute(&telemetry, &latency, &health)
}

/// Read the health snapshot and list its nodes; a missing file lists nothing.
pub async fn list_nodes<C: Clock>(
    reader: &SnapshotReader<C>,
    snapshots: &SnapshotConfig,
) -> Result<Vec<NodeStatus>, ReadFailure> {
    let health = reader
        .read_optional(&snapshots.health_path())
        .await?
        .unwrap_or_default();
    Ok(node_statuses(&health))
}

async fn read_or_empty<C: Clock>(
    reader: &SnapshotReader<C>,
    path: &std::path::Path,
) -> SnapshotDocument {
    match reader.read(path).await {
        Ok(document) => document,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Analysis input unavailable");
            SnapshotDocument::default()
        }
    }
}

fn node_properties(document: &SnapshotDocument) -> BTreeMap<&str, &Properties> {
    document
        .nodes
        .iter()
        .map(|n| (n.id.as_str(), &n.properties))
        .collect()
}

fn mean_latency(links: &[LinkRecord], id: &str, key: &str) -> Option<f64> {
    let values: Vec<f64> = links
        .iter()
        .filter(|l| l.source == id || l.target == id)
        .filter_map(|l| fields::number(&l.properties, key))
        .collect();
    if values.is_empty() {
        return None;
    }
    Some(round_to(values.iter().sum::<f64>() / values.len() as f64, 2))
}

fn alarm(properties: Option<&Properties>, key: &str) -> String {
    properties
        .and_then(|p| fields::text(p, key))
        .unwrap_or(UNKNOWN_ALARM)
        .to_string()
}
