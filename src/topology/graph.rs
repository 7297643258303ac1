//! Directed, latency-weighted topology graph.

use petgraph::stable_graph::{NodeIndex, StableDiGraph};
use petgraph::visit::EdgeRef;
use std::collections::BTreeMap;

/// Directed graph of node ids with latency (ms) edge weights.
///
/// Built fresh for every request and never shared, so it carries no
/// synchronization. Node removal keeps the remaining indices stable.
#[derive(Debug, Clone, Default)]
pub struct Topology {
    graph: StableDiGraph<String, f64>,
    index: BTreeMap<String, NodeIndex>,
}

impl Topology {
    pub fn new() -> Self {
        Self::default()
    }

    fn ensure_node(&mut self, id: &str) -> NodeIndex {
        if let Some(&ix) = self.index.get(id) {
            return ix;
        }
        let ix = self.graph.add_node(id.to_string());
        self.index.insert(id.to_string(), ix);
        ix
    }

    /// Add a directed link. A repeated `(source, target)` pair overwrites the
    /// earlier latency (last write wins).
    pub fn add_link(&mut self, source: &str, target: &str, latency_ms: f64) {
        let a = self.ensure_node(source);
        let b = self.ensure_node(target);
        self.graph.update_edge(a, b, latency_ms);
    }

    /// Remove a node together with every incident edge.
    pub fn remove_node(&mut self, id: &str) -> bool {
        match self.index.remove(id) {
            Some(ix) => self.graph.remove_node(ix).is_some(),
            None => false,
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Node ids in lexicographic order.
    pub fn node_ids(&self) -> impl Iterator<Item = &str> {
        self.index.keys().map(String::as_str)
    }

    /// Latency of the direct edge `source -> target`, if any.
    pub fn latency(&self, source: &str, target: &str) -> Option<f64> {
        let a = *self.index.get(source)?;
        let b = *self.index.get(target)?;
        let edge = self.graph.find_edge(a, b)?;
        self.graph.edge_weight(edge).copied()
    }

    /// Outgoing `(neighbor, latency)` pairs of a node, sorted by neighbor id.
    pub fn successors(&self, id: &str) -> Vec<(&str, f64)> {
        let Some(&ix) = self.index.get(id) else {
            return Vec::new();
        };
        let mut out: Vec<(&str, f64)> = self
            .graph
            .edges(ix)
            .map(|edge| (self.graph[edge.target()].as_str(), *edge.weight()))
            .collect();
        out.sort_by(|a, b| a.0.cmp(b.0));
        out
    }

    /// Every edge as `(source, target, latency)`.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str, f64)> {
        self.graph.edge_indices().filter_map(move |e| {
            let (a, b) = self.graph.edge_endpoints(e)?;
            let weight = *self.graph.edge_weight(e)?;
            Some((self.graph[a].as_str(), self.graph[b].as_str(), weight))
        })
    }

    /// Largest single-edge latency in the graph, `None` when there are no edges.
    pub fn max_edge_latency(&self) -> Option<f64> {
        self.edges().map(|(_, _, w)| w).reduce(f64::max)
    }

    /// Sum of edge latencies along `path`, `None` if a hop is not an edge.
    pub fn path_latency<S: AsRef<str>>(&self, path: &[S]) -> Option<f64> {
        path.windows(2)
            .map(|hop| self.latency(hop[0].as_ref(), hop[1].as_ref()))
            .sum()
    }
}
