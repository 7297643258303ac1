//! Removes RED nodes before any path search runs.

use super::graph::Topology;
use super::health::HealthMap;

/// Drop every node whose effective status is RED, with its incident edges.
///
/// Nodes the health map does not know about are RED too. All strategies run
/// on the returned graph, so none of them has to re-check health.
pub fn filter(mut topology: Topology, health: &HealthMap) -> Topology {
    let red: Vec<String> = topology
        .node_ids()
        .filter(|id| health.is_red(id))
        .map(str::to_string)
        .collect();

    for id in &red {
        topology.remove_node(id);
    }

    if !red.is_empty() {
        tracing::debug!(
            removed = red.len(),
            remaining = topology.node_count(),
            "Excluded RED nodes from topology"
        );
    }

    topology
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::HealthStatus;

    #[test]
    fn test_filter_removes_red_and_unmapped_nodes() {
        let mut topology = Topology::new();
        topology.add_link("A", "B", 1.0);
        topology.add_link("B", "C", 1.0);
        topology.add_link("C", "D", 1.0);
        topology.add_link("A", "D", 5.0);

        let health: HealthMap = [
            ("A", HealthStatus::Green),
            ("B", HealthStatus::Red),
            ("C", HealthStatus::Yellow),
        ]
        .into_iter()
        .collect();

        let filtered = filter(topology, &health);

        assert!(filtered.contains("A"));
        assert!(!filtered.contains("B"));
        assert!(filtered.contains("C"));
        // D has no status at all
        assert!(!filtered.contains("D"));
        assert_eq!(filtered.edge_count(), 0);
    }

    #[test]
    fn test_unknown_status_is_kept() {
        let mut topology = Topology::new();
        topology.add_link("A", "B", 1.0);
        let health: HealthMap = [("A", HealthStatus::Unknown), ("B", HealthStatus::Green)]
            .into_iter()
            .collect();

        let filtered = filter(topology, &health);
        assert_eq!(filtered.edge_count(), 1);
    }

    #[test]
    fn test_empty_health_map_removes_everything() {
        let mut topology = Topology::new();
        topology.add_link("A", "B", 1.0);
        let filtered = filter(topology, &HealthMap::new());
        assert_eq!(filtered.node_count(), 0);
    }
}
