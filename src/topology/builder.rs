//! Joins the latency and health snapshots into a graph and a status lookup.

use super::graph::Topology;
use super::health::HealthMap;
use crate::snapshot::{fields, SnapshotDocument};

/// Build the request-local graph and health lookup.
///
/// Every latency-snapshot link becomes a directed edge weighted by its
/// predicted latency (9999 ms when missing or invalid). Node membership comes
/// from the links alone; the health snapshot only contributes statuses.
pub fn build(latency: &SnapshotDocument, health: &SnapshotDocument) -> (Topology, HealthMap) {
    let mut topology = Topology::new();
    for link in &latency.links {
        let weight = fields::latency_ms(&link.properties, fields::PREDICTED_LATENCY_KEY);
        topology.add_link(&link.source, &link.target, weight);
    }

    let health_map = HealthMap::from_snapshot(health);

    tracing::debug!(
        nodes = topology.node_count(),
        edges = topology.edge_count(),
        statuses = health_map.len(),
        "Built topology from snapshots"
    );

    (topology, health_map)
}
