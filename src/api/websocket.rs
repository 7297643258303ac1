//! WebSocket push of analysis updates

use axum::{
    extract::{
        ws::{Message, WebSocket},
        State, WebSocketUpgrade,
    },
    response::Response,
};
use futures::{SinkExt, StreamExt};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;

use crate::analysis::NodeAnalysis;
use crate::api::AppState;
use crate::watcher::AnalysisUpdate;

/// Event name the dashboard listens for.
pub const DATA_UPDATE_EVENT: &str = "dataUpdate";

/// Frame sent to WebSocket clients.
#[derive(Debug, Clone, Serialize)]
pub struct WebSocketUpdate<'a> {
    pub event: &'static str,
    pub data: &'a [NodeAnalysis],
}

impl<'a> From<&'a AnalysisUpdate> for WebSocketUpdate<'a> {
    fn from(update: &'a AnalysisUpdate) -> Self {
        Self {
            event: DATA_UPDATE_EVENT,
            data: &update.nodes,
        }
    }
}

/// GET /ws - Upgrade to a WebSocket that receives analysis updates.
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Handles an established WebSocket connection
async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (mut sender, mut receiver) = socket.split();
    let mut rx = state.updates.subscribe();
    tracing::debug!("WebSocket client connected");

    let send_task = tokio::spawn(async move {
        loop {
            let update = match rx.recv().await {
                Ok(update) => update,
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "WebSocket client lagging, dropped updates");
                    continue;
                }
                Err(RecvError::Closed) => break,
            };
            match serde_json::to_string(&WebSocketUpdate::from(&update)) {
                Ok(json) => {
                    if sender.send(Message::Text(json)).await.is_err() {
                        break;
                    }
                }
                Err(e) => {
                    tracing::error!("Failed to serialize WebSocket update: {}", e);
                }
            }
        }
    });

    // Drain client frames until it closes; pings are answered by axum
    let recv_task = tokio::spawn(async move {
        while let Some(Ok(msg)) = receiver.next().await {
            if let Message::Close(_) = msg {
                break;
            }
        }
    });

    tokio::select! {
        _ = send_task => {},
        _ = recv_task => {},
    }
    tracing::debug!("WebSocket client disconnected");
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_update_frame_shape() {
        let update = AnalysisUpdate {
            generated_at: Utc::now(),
            nodes: vec![NodeAnalysis {
                node: "A".to_string(),
                real_latency: Some(3.5),
                predicted_latency: None,
                real_alarm: "GREEN".to_string(),
                predicted_alarm: "UNKNOWN".to_string(),
            }],
        };
        let json = serde_json::to_value(WebSocketUpdate::from(&update)).unwrap();
        assert_eq!(json["event"], "dataUpdate");
        assert_eq!(json["data"][0]["node"], "A");
        assert_eq!(json["data"][0]["real_latency"], 3.5);
    }
}
