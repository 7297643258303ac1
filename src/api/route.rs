//! Route query endpoint handler.

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::sync::Arc;

use crate::api::{ApiError, AppState};
use crate::routing::{RouteError, RouteResponse};

/// Body of `POST /predict-path`.
///
/// Missing endpoints are accepted here and rejected as an invalid endpoint
/// by the engine, like any other unknown node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteRequest {
    #[serde(default, deserialize_with = "deserialize_node_id")]
    pub source: String,
    #[serde(default, deserialize_with = "deserialize_node_id")]
    pub target: String,
    /// Strategy tag; absent or null selects the configured default
    #[serde(default)]
    pub strategy: Option<String>,
}

/// Node ids may be sent as strings or bare numbers.
fn deserialize_node_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Null => Ok(String::new()),
        other => Err(serde::de::Error::custom(format!(
            "expected node id, got {}",
            other
        ))),
    }
}

/// POST /predict-path - Compute routes between two nodes.
pub async fn handle(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<RouteRequest>, JsonRejection>,
) -> Result<Json<RouteResponse>, ApiError> {
    let Json(request) = payload?;

    match state
        .engine
        .route(&request.source, &request.target, request.strategy.as_deref())
        .await
    {
        Ok(response) => Ok(Json(response)),
        Err(err @ RouteError::NoPath { .. }) => Ok(Json(RouteResponse::unreachable(err.to_string()))),
        Err(err) => Err(err.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_route_request_defaults() {
        let request: RouteRequest = serde_json::from_value(json!({})).unwrap();
        assert_eq!(request, RouteRequest::default());
    }

    #[test]
    fn test_route_request_numeric_ids() {
        let request: RouteRequest =
            serde_json::from_value(json!({"source": 1, "target": "2", "strategy": "hops"}))
                .unwrap();
        assert_eq!(request.source, "1");
        assert_eq!(request.target, "2");
        assert_eq!(request.strategy.as_deref(), Some("hops"));
    }

    #[test]
    fn test_route_request_rejects_object_id() {
        let result: Result<RouteRequest, _> =
            serde_json::from_value(json!({"source": {"id": "A"}, "target": "B"}));
        assert!(result.is_err());
    }
}
