//! Composite risk scoring for candidate paths

use crate::topology::{HealthMap, Topology};
use serde::{Deserialize, Serialize};

/// Weight of the normalized latency term
pub const LATENCY_WEIGHT: f64 = 0.5;

/// Weight of the average health penalty term
pub const HEALTH_WEIGHT: f64 = 0.5;

/// A scored route, as returned by the risk strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathCandidate {
    /// Node ids, source first and target last
    pub path: Vec<String>,
    /// Cumulative latency in ms, rounded to 2 decimals
    pub latency: f64,
    /// Mean per-node health penalty, rounded to 2 decimals
    pub health_penalty: f64,
    /// `0.5 * normalized latency + 0.5 * health penalty`, rounded to 3 decimals.
    /// Lower is better.
    pub risk_score: f64,
}

/// Scores and ranks paths against one filtered topology.
pub struct RiskScorer<'a> {
    topology: &'a Topology,
    health: &'a HealthMap,
    max_edge_latency: f64,
}

impl<'a> RiskScorer<'a> {
    pub fn new(topology: &'a Topology, health: &'a HealthMap) -> Self {
        // Normalizer is 1 for an edgeless (or all-zero) graph
        let max_edge_latency = topology
            .max_edge_latency()
            .filter(|max| *max > 0.0)
            .unwrap_or(1.0);
        Self {
            topology,
            health,
            max_edge_latency,
        }
    }

    pub fn max_edge_latency(&self) -> f64 {
        self.max_edge_latency
    }

    /// Score a single path.
    pub fn score(&self, path: Vec<String>) -> PathCandidate {
        let total_latency = self.topology.path_latency(&path).unwrap_or(f64::INFINITY);
        let normalized_latency = total_latency / self.max_edge_latency;
        let health_penalty = if path.is_empty() {
            1.0
        } else {
            path.iter().map(|id| self.health.penalty(id)).sum::<f64>() / path.len() as f64
        };
        let risk_score = LATENCY_WEIGHT * normalized_latency + HEALTH_WEIGHT * health_penalty;

        PathCandidate {
            path,
            latency: round_to(total_latency, 2),
            health_penalty: round_to(health_penalty, 2),
            risk_score: round_to(risk_score, 3),
        }
    }

    /// Score every path, sort ascending by risk and keep the first `limit`.
    ///
    /// The sort is stable: equal scores keep their enumeration order.
    pub fn rank(&self, paths: Vec<Vec<String>>, limit: usize) -> Vec<PathCandidate> {
        let mut scored: Vec<PathCandidate> = paths.into_iter().map(|p| self.score(p)).collect();
        scored.sort_by(|a, b| a.risk_score.total_cmp(&b.risk_score));
        scored.truncate(limit);
        scored
    }
}

/// Round half away from zero to `places` decimals.
pub fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
