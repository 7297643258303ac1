//! # Metrics Collection Module
//!
//! Prometheus export for route requests, snapshot reads and the watcher.
//!
//! ## Metrics Tracked
//!
//! **Counters:**
//! - `netpath_route_requests_total{strategy, outcome}` - Route requests by result
//! - `netpath_snapshot_read_retries_total{file}` - Failed parse attempts that were retried
//! - `netpath_snapshot_read_failures_total{file, kind}` - Reads that gave up
//! - `netpath_watcher_emits_total` - Analysis updates broadcast
//! - `netpath_watcher_skips_total` - Unchanged analyses not re-sent
//!
//! **Histograms:**
//! - `netpath_route_duration_seconds{strategy}` - Snapshot read plus computation time
//!
//! **Gauges:**
//! - `netpath_ws_subscribers` - Open `/ws` connections
//! - `netpath_uptime_seconds` - Seconds since the server started

pub mod handler;

// Re-export PrometheusBuilder for test compatibility
pub use metrics_exporter_prometheus::PrometheusBuilder;

use metrics_exporter_prometheus::PrometheusHandle;
use std::time::Instant;

/// Owns the Prometheus handle and the server start time.
pub struct MetricsCollector {
    start_time: Instant,
    prometheus_handle: PrometheusHandle,
}

impl MetricsCollector {
    pub fn new(start_time: Instant, prometheus_handle: PrometheusHandle) -> Self {
        Self {
            start_time,
            prometheus_handle,
        }
    }

    /// Install the global recorder, or build a detached one if a recorder
    /// is already installed (several servers in one test process).
    pub fn install(start_time: Instant) -> Self {
        let handle = setup_metrics().unwrap_or_else(|e| {
            tracing::debug!("Metrics already initialized, creating new handle: {}", e);
            PrometheusBuilder::new().build_recorder().handle()
        });
        Self::new(start_time, handle)
    }

    /// Get uptime in seconds since server startup.
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    /// Refresh gauges that are sampled rather than counted.
    pub fn update_gauges(&self, ws_subscribers: usize) {
        metrics::gauge!("netpath_ws_subscribers").set(ws_subscribers as f64);
        metrics::gauge!("netpath_uptime_seconds").set(self.uptime_seconds() as f64);
    }

    /// Render Prometheus metrics in text format.
    pub fn render_metrics(&self) -> String {
        self.prometheus_handle.render()
    }
}

/// Initialize the Prometheus exporter with route duration buckets.
///
/// Buckets: [0.001, 0.005, 0.01, 0.05, 0.1, 0.25, 0.5, 1, 2.5, 5] seconds.
/// The upper buckets cover reads that waited for a snapshot to settle.
pub fn setup_metrics() -> Result<PrometheusHandle, Box<dyn std::error::Error>> {
    use metrics_exporter_prometheus::Matcher;

    let duration_buckets = &[0.001, 0.005, 0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0];

    let handle = PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full("netpath_route_duration_seconds".to_string()),
            duration_buckets,
        )?
        .install_recorder()?;

    Ok(handle)
}
