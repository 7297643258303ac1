//! # HTTP API
//!
//! ## Endpoints
//!
//! - `POST /predict-path` - Route between two nodes (`{source, target, strategy?}`)
//! - `GET /nodes` - Nodes of the health snapshot with their predicted status
//! - `GET /ai-analysis` - Measured versus predicted state per node
//! - `GET /ws` - WebSocket stream of analysis updates (`dataUpdate` events)
//! - `GET /health` - Service status and snapshot presence
//! - `GET /metrics` - Prometheus metrics
//!
//! ## Example
//!
//! ```no_run
//! use netpath::api::{AppState, create_router};
//! use netpath::config::NetpathConfig;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Arc::new(NetpathConfig::default());
//! let state = Arc::new(AppState::new(config));
//! let app = create_router(state);
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:5000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Errors are returned as `{"error": "<message>"}`: 400 for requests naming
//! an unknown strategy or node, 500 when a snapshot cannot be read.

mod analysis;
mod error;
mod health;
mod nodes;
mod route;
pub mod websocket;

pub use error::{ApiError, ApiErrorBody};
pub use health::{HealthResponse, SnapshotPresence};
pub use nodes::NodesResponse;
pub use route::RouteRequest;

use crate::config::NetpathConfig;
use crate::metrics::MetricsCollector;
use crate::routing::RouteEngine;
use crate::watcher::{self, AnalysisUpdate};
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::broadcast;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

/// Maximum request body size (64 KB); route requests are tiny.
const MAX_BODY_SIZE: usize = 64 * 1024;

/// Shared application state accessible to all handlers.
pub struct AppState {
    pub config: Arc<NetpathConfig>,
    pub engine: RouteEngine,
    /// Analysis updates forwarded to `/ws` clients
    pub updates: broadcast::Sender<AnalysisUpdate>,
    /// Server startup time for uptime tracking
    pub start_time: Instant,
    pub metrics_collector: Arc<MetricsCollector>,
}

impl AppState {
    /// Create application state with its own update channel.
    pub fn new(config: Arc<NetpathConfig>) -> Self {
        let updates = watcher::channel(&config.watcher);
        Self::with_updates(config, updates)
    }

    /// Create application state that publishes `updates` to WebSocket clients.
    pub fn with_updates(
        config: Arc<NetpathConfig>,
        updates: broadcast::Sender<AnalysisUpdate>,
    ) -> Self {
        let start_time = Instant::now();
        Self {
            engine: RouteEngine::new(&config),
            config,
            updates,
            start_time,
            metrics_collector: Arc::new(MetricsCollector::install(start_time)),
        }
    }
}

/// Create the main API router with all endpoints configured.
pub fn create_router(state: Arc<AppState>) -> Router {
    let timeout = Duration::from_secs(state.config.server.request_timeout_seconds.max(1));
    Router::new()
        .route("/predict-path", post(route::handle))
        .route("/nodes", get(nodes::handle))
        .route("/ai-analysis", get(analysis::handle))
        .route("/ws", get(websocket::websocket_handler))
        .route("/health", get(health::handle))
        .route("/metrics", get(crate::metrics::handler::metrics_handler))
        .layer(TimeoutLayer::new(timeout))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_SIZE))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
