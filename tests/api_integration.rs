//! HTTP API tests driven through the router.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::SnapshotFixture;
use serde_json::{json, Value};
use tower::Service;

async fn body_json(response: axum::http::Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn post_route(fixture: &SnapshotFixture, body: &str) -> (StatusCode, Value) {
    let mut app = fixture.app();
    let response = app
        .call(
            Request::builder()
                .method("POST")
                .uri("/predict-path")
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    (status, body_json(response).await)
}

async fn get(fixture: &SnapshotFixture, uri: &str) -> axum::http::Response<Body> {
    let mut app = fixture.app();
    app.call(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

#[tokio::test]
async fn test_predict_path_latency() {
    let fixture = SnapshotFixture::triangle();
    let (status, body) = post_route(
        &fixture,
        r#"{"source": "A", "target": "C", "strategy": "latency"}"#,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["paths"][0]["path"], json!(["A", "B", "C"]));
    assert_eq!(body["paths"][0]["latency"], json!(80.0));
    assert_eq!(body["message"], "Lowest latency path (excluding RED nodes)");
}

#[tokio::test]
async fn test_predict_path_default_strategy_is_ranked() {
    let fixture = SnapshotFixture::triangle();
    let (status, body) = post_route(&fixture, r#"{"source": "A", "target": "C"}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["cutoff_used"], 2);
    let paths = body["paths"].as_array().unwrap();
    assert_eq!(paths.len(), 2);
    for p in paths {
        assert!(p.get("risk_score").is_some());
        assert!(p.get("health_penalty").is_some());
    }
}

#[tokio::test]
async fn test_predict_path_red_target_is_bad_request() {
    let fixture = SnapshotFixture::triangle();
    fixture.write_health(&[("A", "GREEN"), ("B", "GREEN"), ("C", "RED")]);

    let (status, body) = post_route(
        &fixture,
        r#"{"source": "A", "target": "C", "strategy": "hops"}"#,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Invalid source or target"}));
}

#[tokio::test]
async fn test_predict_path_unknown_strategy_is_bad_request() {
    let fixture = SnapshotFixture::triangle();
    let (status, body) = post_route(
        &fixture,
        r#"{"source": "A", "target": "C", "strategy": "fastest"}"#,
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("fastest"));
}

#[tokio::test]
async fn test_predict_path_missing_fields_is_bad_request() {
    let fixture = SnapshotFixture::triangle();
    let (status, body) = post_route(&fixture, r#"{"strategy": "hops"}"#).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid source or target");
}

#[tokio::test]
async fn test_predict_path_malformed_json_is_bad_request() {
    let fixture = SnapshotFixture::triangle();
    let (status, body) = post_route(&fixture, r#"{"source": "A", "target""#).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("Invalid request body"));
}

#[tokio::test]
async fn test_predict_path_corrupt_snapshot_is_server_error() {
    let fixture = SnapshotFixture::new();
    fixture
        .write_raw(&fixture.latency_path(), "")
        .write_all_green(&["A", "C"]);

    let (status, body) = post_route(
        &fixture,
        r#"{"source": "A", "target": "C", "strategy": "latency"}"#,
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("Error reading snapshot"));
}

#[tokio::test]
async fn test_predict_path_unreachable_returns_empty_paths() {
    let fixture = SnapshotFixture::new();
    fixture
        .write_latency(&[("A", "B", 10.0), ("C", "D", 10.0)])
        .write_all_green(&["A", "B", "C", "D"]);

    let (status, body) = post_route(
        &fixture,
        r#"{"source": "A", "target": "D", "strategy": "hops"}"#,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["paths"], json!([]));
    assert!(body["message"].as_str().unwrap().contains("No path"));
}

#[tokio::test]
async fn test_nodes_lists_health_snapshot() {
    let fixture = SnapshotFixture::new();
    fixture.write_health(&[("B", "YELLOW"), ("A", "GREEN"), ("C", "RED")]);

    let response = get(&fixture, "/nodes").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(
        body,
        json!({"nodes": [
            {"id": "A", "status": "GREEN"},
            {"id": "B", "status": "YELLOW"},
            {"id": "C", "status": "RED"},
        ]})
    );
}

#[tokio::test]
async fn test_nodes_without_health_snapshot_is_empty() {
    let fixture = SnapshotFixture::new();

    let body = body_json(get(&fixture, "/nodes").await).await;
    assert_eq!(body, json!({"nodes": []}));
}

#[tokio::test]
async fn test_ai_analysis_merges_snapshots() {
    let fixture = SnapshotFixture::new();
    fixture
        .write_telemetry(&[("A", "GREEN"), ("B", "YELLOW")], &[("A", "B", 20.0)])
        .write_latency(&[("A", "B", 30.0)])
        .write_health(&[("A", "GREEN"), ("B", "RED")]);

    let response = get(&fixture, "/ai-analysis").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let nodes = body.as_array().unwrap();
    assert_eq!(nodes.len(), 2);
    assert_eq!(nodes[1]["node"], "B");
    assert_eq!(nodes[1]["real_latency"], json!(20.0));
    assert_eq!(nodes[1]["predicted_latency"], json!(30.0));
    assert_eq!(nodes[1]["real_alarm"], "YELLOW");
    assert_eq!(nodes[1]["predicted_alarm"], "RED");
}

#[tokio::test]
async fn test_ai_analysis_without_snapshots_is_empty() {
    let fixture = SnapshotFixture::new();

    let body = body_json(get(&fixture, "/ai-analysis").await).await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_health_reports_snapshot_presence() {
    let fixture = SnapshotFixture::new();
    fixture.write_latency(&[("A", "B", 10.0)]);

    let body = body_json(get(&fixture, "/health").await).await;
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["snapshots"]["latency"], true);
    assert_eq!(body["snapshots"]["health"], false);
    assert_eq!(body["snapshots"]["telemetry"], false);

    fixture.write_all_green(&["A", "B"]);
    let body = body_json(get(&fixture, "/health").await).await;
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_health_unhealthy_without_latency_snapshot() {
    let fixture = SnapshotFixture::new();

    let body = body_json(get(&fixture, "/health").await).await;
    assert_eq!(body["status"], "unhealthy");
}

#[tokio::test]
async fn test_metrics_endpoint_is_prometheus_text() {
    let fixture = SnapshotFixture::triangle();

    let response = get(&fixture, "/metrics").await;
    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers().get("content-type").unwrap();
    assert!(content_type.to_str().unwrap().starts_with("text/plain"));
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let fixture = SnapshotFixture::triangle();

    let response = get(&fixture, "/v1/models").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
