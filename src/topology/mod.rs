//! Topology construction and health-based exclusion.
//!
//! The latency snapshot supplies the directed, weighted edges; the health
//! snapshot supplies per-node status. [`build`] joins the two on node id and
//! [`filter`] then removes every RED node (including nodes with no known
//! status) so that each routing strategy sees the same health-clean graph.

mod builder;
mod filter;
mod graph;
mod health;

pub use builder::build;
pub use filter::filter;
pub use graph::Topology;
pub use health::{HealthMap, HealthStatus};

use crate::snapshot::SnapshotDocument;

/// Build and filter in one step.
pub fn prepare(latency: &SnapshotDocument, health: &SnapshotDocument) -> (Topology, HealthMap) {
    let (topology, health_map) = build(latency, health);
    (filter(topology, &health_map), health_map)
}
