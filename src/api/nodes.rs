//! Node listing endpoint handler.

use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::analysis::{self, NodeStatus};
use crate::api::{ApiError, AppState};

/// Nodes list response.
#[derive(Debug, Serialize)]
pub struct NodesResponse {
    pub nodes: Vec<NodeStatus>,
}

/// GET /nodes - List the nodes of the health snapshot with their status.
pub async fn handle(State(state): State<Arc<AppState>>) -> Result<Json<NodesResponse>, ApiError> {
    let nodes = analysis::list_nodes(state.engine.reader(), state.engine.snapshots()).await?;
    Ok(Json(NodesResponse { nodes }))
}
