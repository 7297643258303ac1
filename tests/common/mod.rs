//! Shared test utilities for netpath integration tests.
//!
//! Provides a temporary snapshot directory with writers for the three
//! producer files, plus builders for configs and routers pointing at it.

#![allow(dead_code)]

use netpath::api::{create_router, AppState};
use netpath::config::NetpathConfig;
use netpath::routing::RouteEngine;
use netpath::snapshot::ReaderConfig;
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

/// Reader settings that keep retry scenarios fast.
pub fn fast_reader() -> ReaderConfig {
    ReaderConfig {
        settle_interval_ms: 5,
        settle_timeout_ms: 50,
        max_attempts: 3,
        retry_delay_ms: 5,
    }
}

/// A temporary snapshot directory.
pub struct SnapshotFixture {
    dir: TempDir,
    config: NetpathConfig,
}

impl SnapshotFixture {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let mut config = NetpathConfig::default();
        config.snapshots.dir = dir.path().to_path_buf();
        config.reader = fast_reader();
        Self { dir, config }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn config(&self) -> NetpathConfig {
        self.config.clone()
    }

    pub fn latency_path(&self) -> PathBuf {
        self.config.snapshots.latency_path()
    }

    pub fn health_path(&self) -> PathBuf {
        self.config.snapshots.health_path()
    }

    pub fn telemetry_path(&self) -> PathBuf {
        self.config.snapshots.telemetry_path()
    }

    /// Write the latency snapshot from `(source, target, predicted_latency_ms)`.
    pub fn write_latency(&self, links: &[(&str, &str, f64)]) -> &Self {
        let links: Vec<Value> = links
            .iter()
            .map(|(s, t, ms)| {
                json!({"source": s, "target": t, "properties": {"predicted_latency_ms": ms}})
            })
            .collect();
        self.write_json(&self.latency_path(), &json!({"nodes": [], "links": links}))
    }

    /// Write the health snapshot from `(id, predicted_alarm_status)`.
    pub fn write_health(&self, nodes: &[(&str, &str)]) -> &Self {
        let nodes: Vec<Value> = nodes
            .iter()
            .map(|(id, status)| json!({"id": id, "properties": {"predicted_alarm_status": status}}))
            .collect();
        self.write_json(&self.health_path(), &json!({"nodes": nodes, "links": []}))
    }

    /// Mark every listed node GREEN.
    pub fn write_all_green(&self, ids: &[&str]) -> &Self {
        let nodes: Vec<(&str, &str)> = ids.iter().map(|id| (*id, "GREEN")).collect();
        self.write_health(&nodes)
    }

    /// Write the telemetry snapshot.
    pub fn write_telemetry(&self, nodes: &[(&str, &str)], links: &[(&str, &str, f64)]) -> &Self {
        let nodes: Vec<Value> = nodes
            .iter()
            .map(|(id, status)| json!({"id": id, "properties": {"alarm_status": status}}))
            .collect();
        let links: Vec<Value> = links
            .iter()
            .map(|(s, t, ms)| json!({"source": s, "target": t, "properties": {"latency_ms": ms}}))
            .collect();
        self.write_json(
            &self.telemetry_path(),
            &json!({"nodes": nodes, "links": links}),
        )
    }

    pub fn write_raw(&self, path: &Path, content: &str) -> &Self {
        std::fs::write(path, content).unwrap();
        self
    }

    fn write_json(&self, path: &Path, value: &Value) -> &Self {
        self.write_raw(path, &serde_json::to_string_pretty(value).unwrap())
    }

    /// `A→B (50ms), B→C (30ms), A→C (200ms)`, all GREEN.
    pub fn triangle() -> Self {
        let fixture = Self::new();
        fixture
            .write_latency(&[("A", "B", 50.0), ("B", "C", 30.0), ("A", "C", 200.0)])
            .write_all_green(&["A", "B", "C"]);
        fixture
    }

    pub fn engine(&self) -> RouteEngine {
        RouteEngine::new(&self.config)
    }

    pub fn app(&self) -> axum::Router {
        let state = Arc::new(AppState::new(Arc::new(self.config())));
        create_router(state)
    }
}

impl Default for SnapshotFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Node sequence helper.
pub fn path(ids: &[&str]) -> Vec<String> {
    ids.iter().map(|s| s.to_string()).collect()
}
