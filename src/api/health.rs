//! Health check endpoint handler.

use crate::api::AppState;
use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub uptime_seconds: u64,
    pub snapshots: SnapshotPresence,
}

/// Which snapshot files currently exist.
#[derive(Debug, Serialize)]
pub struct SnapshotPresence {
    pub latency: bool,
    pub health: bool,
    pub telemetry: bool,
}

/// GET /health - Return service status.
///
/// `healthy` when both routing snapshots exist, `degraded` when only the
/// latency snapshot does (every node is treated as RED), `unhealthy` otherwise.
pub async fn handle(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let snapshots = state.engine.snapshots();
    let presence = SnapshotPresence {
        latency: exists(&snapshots.latency_path()).await,
        health: exists(&snapshots.health_path()).await,
        telemetry: exists(&snapshots.telemetry_path()).await,
    };

    let status = match (presence.latency, presence.health) {
        (true, true) => "healthy",
        (true, false) => "degraded",
        _ => "unhealthy",
    };

    Json(HealthResponse {
        status: status.to_string(),
        uptime_seconds: state.metrics_collector.uptime_seconds(),
        snapshots: presence,
    })
}

async fn exists(path: &std::path::Path) -> bool {
    tokio::fs::try_exists(path).await.unwrap_or(false)
}
