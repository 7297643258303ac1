//! Health-aware route computation
//!
//! This module turns a pair of snapshots into route answers. The pipeline
//! for one request is:
//!
//! 1. read the latency snapshot (required) and the health snapshot (a
//!    missing file means every node is RED);
//! 2. build the directed graph and drop every RED node;
//! 3. validate the endpoints against the filtered graph;
//! 4. run the requested [`PathStrategy`];
//! 5. for the risk strategy, score and rank the candidates.
//!
//! Each request builds and discards its own graph, so concurrent requests
//! share nothing but the files they read.

use std::time::Instant;

pub mod error;
pub mod scoring;
pub mod search;
pub mod strategies;

pub use error::RouteError;
pub use scoring::{round_to, PathCandidate, RiskScorer};
pub use search::SearchGraph;
pub use strategies::PathStrategy;

use crate::config::{NetpathConfig, RoutingConfig, SnapshotConfig};
use crate::snapshot::{Clock, ReadFailure, SnapshotDocument, SnapshotReader, TokioClock};
use crate::topology::{self, HealthMap, Topology};
use serde::{Deserialize, Serialize};

/// A single route with its cumulative latency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathSummary {
    pub path: Vec<String>,
    pub latency: f64,
}

/// Answer of the hops and latency strategies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SingleRoute {
    pub paths: Vec<PathSummary>,
    pub message: String,
}

/// Answer of the risk strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedRoutes {
    pub paths: Vec<PathCandidate>,
    /// Cutoff at which paths were first found, `None` when there are none
    pub cutoff_used: Option<usize>,
    pub message: String,
}

/// Route answer in the shape of the strategy that produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RouteResponse {
    Single(SingleRoute),
    Ranked(RankedRoutes),
}

impl RouteResponse {
    /// Empty answer for an unreachable target.
    pub fn unreachable(message: impl Into<String>) -> Self {
        RouteResponse::Single(SingleRoute {
            paths: Vec::new(),
            message: message.into(),
        })
    }

    /// Node sequences of every returned path, best first.
    pub fn paths(&self) -> Vec<&[String]> {
        match self {
            RouteResponse::Single(r) => r.paths.iter().map(|p| p.path.as_slice()).collect(),
            RouteResponse::Ranked(r) => r.paths.iter().map(|p| p.path.as_slice()).collect(),
        }
    }

    pub fn message(&self) -> &str {
        match self {
            RouteResponse::Single(r) => &r.message,
            RouteResponse::Ranked(r) => &r.message,
        }
    }
}

/// Run `strategy` between `source` and `target` on an already filtered graph.
pub fn compute(
    topology: &Topology,
    health: &HealthMap,
    source: &str,
    target: &str,
    strategy: PathStrategy,
    config: &RoutingConfig,
) -> Result<RouteResponse, RouteError> {
    if !topology.contains(source) || !topology.contains(target) {
        return Err(RouteError::InvalidEndpoint {
            source_node: source.to_string(),
            target_node: target.to_string(),
        });
    }
    if source == target {
        return Err(RouteError::SameEndpoint {
            node: source.to_string(),
        });
    }

    let graph = SearchGraph::new(topology);
    let (Some(from), Some(to)) = (graph.rank(source), graph.rank(target)) else {
        return Err(RouteError::InvalidEndpoint {
            source_node: source.to_string(),
            target_node: target.to_string(),
        });
    };
    let no_path = || RouteError::NoPath {
        source_node: source.to_string(),
        target_node: target.to_string(),
    };

    match strategy {
        PathStrategy::Hops => {
            let path = graph.ids(&graph.fewest_hops(from, to).ok_or_else(no_path)?);
            let latency = topology.path_latency(&path).unwrap_or_default();
            Ok(RouteResponse::Single(SingleRoute {
                paths: vec![PathSummary {
                    path,
                    latency: round_to(latency, 2),
                }],
                message: "Shortest path by hops (excluding RED nodes)".to_string(),
            }))
        }
        PathStrategy::Latency => {
            let (path, _) = graph.lowest_latency(from, to).ok_or_else(no_path)?;
            let path = graph.ids(&path);
            let latency = topology.path_latency(&path).unwrap_or_default();
            Ok(RouteResponse::Single(SingleRoute {
                paths: vec![PathSummary {
                    path,
                    latency: round_to(latency, 2),
                }],
                message: "Lowest latency path (excluding RED nodes)".to_string(),
            }))
        }
        PathStrategy::Risk => {
            let Some((cutoff, paths)) =
                graph.widening_simple_paths(from, to, config.min_cutoff, config.max_cutoff)
            else {
                return Ok(RouteResponse::Ranked(RankedRoutes {
                    paths: Vec::new(),
                    cutoff_used: None,
                    message: "No valid paths found (all RED nodes excluded)".to_string(),
                }));
            };

            let candidates = paths.iter().map(|p| graph.ids(p)).collect();
            let ranked = RiskScorer::new(topology, health).rank(candidates, config.max_results);
            tracing::debug!(
                cutoff,
                enumerated = paths.len(),
                returned = ranked.len(),
                "Ranked risk candidates"
            );

            Ok(RouteResponse::Ranked(RankedRoutes {
                paths: ranked,
                cutoff_used: Some(cutoff),
                message: format!(
                    "Lowest risk path using cutoff {}, RED nodes excluded",
                    cutoff
                ),
            }))
        }
    }
}

/// Reads the current snapshots and answers route requests against them.
pub struct RouteEngine<C = TokioClock> {
    reader: SnapshotReader<C>,
    snapshots: SnapshotConfig,
    routing: RoutingConfig,
}

impl RouteEngine<TokioClock> {
    pub fn new(config: &NetpathConfig) -> Self {
        Self {
            reader: SnapshotReader::new(config.reader.clone()),
            snapshots: config.snapshots.clone(),
            routing: config.routing.clone(),
        }
    }
}

impl<C: Clock> RouteEngine<C> {
    pub fn with_reader(
        reader: SnapshotReader<C>,
        snapshots: SnapshotConfig,
        routing: RoutingConfig,
    ) -> Self {
        Self {
            reader,
            snapshots,
            routing,
        }
    }

    pub fn reader(&self) -> &SnapshotReader<C> {
        &self.reader
    }

    pub fn snapshots(&self) -> &SnapshotConfig {
        &self.snapshots
    }

    /// Read both snapshots and return the filtered graph with its health map.
    pub async fn load(&self) -> Result<(Topology, HealthMap), RouteError> {
        let latency = self.reader.read(&self.snapshots.latency_path()).await?;
        let health = self.read_health().await?;
        Ok(topology::prepare(&latency, &health))
    }

    /// A missing health snapshot leaves every node RED; other failures propagate.
    async fn read_health(&self) -> Result<SnapshotDocument, ReadFailure> {
        let path = self.snapshots.health_path();
        match self.reader.read_optional(&path).await? {
            Some(document) => Ok(document),
            None => {
                tracing::warn!(
                    path = %path.display(),
                    "Health snapshot missing, treating every node as RED"
                );
                Ok(SnapshotDocument::default())
            }
        }
    }

    /// Answer one route request.
    ///
    /// `strategy` is the raw request tag; `None` selects the configured default.
    pub async fn route(
        &self,
        source: &str,
        target: &str,
        strategy: Option<&str>,
    ) -> Result<RouteResponse, RouteError> {
        let start = Instant::now();
        let tag = strategy.unwrap_or(&self.routing.default_strategy);
        let result = self.route_inner(source, target, tag).await;

        let strategy_label = tag
            .parse::<PathStrategy>()
            .map(|s| s.to_string())
            .unwrap_or_else(|_| "unknown".to_string());
        let outcome = match &result {
            Ok(_) => "ok",
            Err(e) => e.kind(),
        };
        metrics::counter!(
            "netpath_route_requests_total",
            "strategy" => strategy_label.clone(),
            "outcome" => outcome
        )
        .increment(1);
        metrics::histogram!(
            "netpath_route_duration_seconds",
            "strategy" => strategy_label
        )
        .record(start.elapsed().as_secs_f64());

        match &result {
            Ok(response) => tracing::info!(
                source,
                target,
                strategy = tag,
                paths = response.paths().len(),
                "Route computed"
            ),
            Err(e) if e.is_client_error() => {
                tracing::info!(source, target, strategy = tag, error = %e, "Route rejected")
            }
            Err(e) => tracing::warn!(source, target, strategy = tag, error = %e, "Route failed"),
        }

        result
    }

    async fn route_inner(
        &self,
        source: &str,
        target: &str,
        tag: &str,
    ) -> Result<RouteResponse, RouteError> {
        let strategy: PathStrategy = tag.parse().map_err(|_| RouteError::UnknownStrategy {
            strategy: tag.to_string(),
        })?;
        let (topology, health) = self.load().await?;
        compute(&topology, &health, source, target, strategy, &self.routing)
    }
}
