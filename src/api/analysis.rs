//! Node analysis endpoint handler.

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::analysis::{self, NodeAnalysis};
use crate::api::AppState;

/// GET /ai-analysis - Measured versus predicted state of every node.
pub async fn handle(State(state): State<Arc<AppState>>) -> Json<Vec<NodeAnalysis>> {
    Json(analysis::analyze(state.engine.reader(), state.engine.snapshots()).await)
}
