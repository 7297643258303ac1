//! Error types for route computation

use crate::snapshot::ReadFailure;
use thiserror::Error;

/// Errors that can occur while answering a route request
#[derive(Debug, Error)]
pub enum RouteError {
    /// A snapshot could not be read; no graph is available right now
    #[error("Error reading snapshot: {0}")]
    Snapshot(#[from] ReadFailure),

    /// Source or target is not in the health-filtered graph
    #[error("Invalid source or target")]
    InvalidEndpoint {
        source_node: String,
        target_node: String,
    },

    /// Source and target are the same node
    #[error("Source and target must be different nodes")]
    SameEndpoint { node: String },

    /// The strategy tag is not recognized
    #[error("Unknown strategy: {strategy}")]
    UnknownStrategy { strategy: String },

    /// Target is unreachable from source
    #[error("No path from '{source_node}' to '{target_node}' (excluding RED nodes)")]
    NoPath {
        source_node: String,
        target_node: String,
    },
}

impl RouteError {
    /// Errors caused by the request itself rather than by missing data.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            RouteError::InvalidEndpoint { .. }
                | RouteError::SameEndpoint { .. }
                | RouteError::UnknownStrategy { .. }
        )
    }

    /// Short label used for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            RouteError::Snapshot(_) => "snapshot",
            RouteError::InvalidEndpoint { .. } => "invalid_endpoint",
            RouteError::SameEndpoint { .. } => "same_endpoint",
            RouteError::UnknownStrategy { .. } => "unknown_strategy",
            RouteError::NoPath { .. } => "no_path",
        }
    }
}
