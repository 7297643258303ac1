//! Snapshot directory watcher
//!
//! Watches the snapshot directory and, after each burst of changes to a
//! `.json` file, recomputes the node analysis and broadcasts it to every
//! subscriber (the `/ws` endpoint). Unchanged results are not re-sent.

mod error;
mod gate;

pub use error::WatcherError;
pub use gate::EmitGate;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use notify::{Event, RecursiveMode, Watcher};
use serde::{Deserialize, Serialize};
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::analysis::{self, NodeAnalysis};
use crate::config::{SnapshotConfig, WatcherConfig};
use crate::snapshot::{Clock, SnapshotReader, TokioClock};

/// Analysis pushed to subscribers after the snapshots change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisUpdate {
    pub generated_at: DateTime<Utc>,
    pub nodes: Vec<NodeAnalysis>,
}

/// Create the broadcast channel that carries [`AnalysisUpdate`]s.
pub fn channel(config: &WatcherConfig) -> broadcast::Sender<AnalysisUpdate> {
    let (sender, _) = broadcast::channel(config.channel_capacity.max(1));
    sender
}

/// True for `.json` files directly inside `dir`.
pub fn is_relevant(path: &Path, dir: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json") && path.parent() == Some(dir)
}

/// Watches the snapshot directory and broadcasts analysis updates.
pub struct SnapshotWatcher<C = TokioClock> {
    reader: Arc<SnapshotReader<C>>,
    snapshots: SnapshotConfig,
    config: WatcherConfig,
    updates: broadcast::Sender<AnalysisUpdate>,
    gate: EmitGate,
}

impl<C: Clock + 'static> SnapshotWatcher<C> {
    pub fn new(
        reader: Arc<SnapshotReader<C>>,
        snapshots: SnapshotConfig,
        config: WatcherConfig,
        updates: broadcast::Sender<AnalysisUpdate>,
    ) -> Self {
        Self {
            reader,
            snapshots,
            config,
            updates,
            gate: EmitGate::new(),
        }
    }

    /// Start watching. The returned task runs until `cancel_token` fires.
    pub fn start(mut self, cancel_token: CancellationToken) -> Result<JoinHandle<()>, WatcherError> {
        let dir = self.watch_dir()?;
        let (event_tx, mut event_rx) = mpsc::channel::<PathBuf>(self.config.channel_capacity.max(1));

        let filter_dir = dir.clone();
        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| match res {
            Ok(event) => {
                if !(event.kind.is_create() || event.kind.is_modify()) {
                    return;
                }
                for path in event.paths {
                    if is_relevant(&path, &filter_dir) {
                        // A full queue already guarantees another refresh
                        let _ = event_tx.try_send(path);
                    }
                }
            }
            Err(e) => tracing::warn!(error = %e, "Snapshot watch error"),
        })?;
        watcher.watch(&dir, RecursiveMode::NonRecursive)?;
        tracing::info!(dir = %dir.display(), debounce_ms = self.config.debounce_ms, "Snapshot watcher started");

        Ok(tokio::spawn(async move {
            // Dropping the watcher stops the notify thread
            let _watcher = watcher;
            loop {
                tokio::select! {
                    _ = cancel_token.cancelled() => {
                        tracing::info!("Snapshot watcher shutting down");
                        break;
                    }
                    changed = event_rx.recv() => {
                        let Some(path) = changed else {
                            tracing::warn!("Snapshot event channel closed");
                            break;
                        };
                        tracing::debug!(path = %path.display(), "Snapshot changed");

                        tokio::select! {
                            _ = cancel_token.cancelled() => {
                                tracing::info!("Snapshot watcher shutting down");
                                break;
                            }
                            _ = tokio::time::sleep(self.config.debounce()) => {}
                        }
                        let mut coalesced = 0usize;
                        while event_rx.try_recv().is_ok() {
                            coalesced += 1;
                        }
                        if coalesced > 0 {
                            tracing::trace!(coalesced, "Coalesced snapshot events");
                        }

                        self.refresh().await;
                    }
                }
            }
        }))
    }

    /// Recompute the analysis and broadcast it if it changed.
    ///
    /// Returns `true` when an update was emitted.
    pub async fn refresh(&mut self) -> bool {
        let nodes = analysis::analyze(&self.reader, &self.snapshots).await;
        if !self.gate.admit(&nodes) {
            tracing::debug!("Analysis unchanged, skipping update");
            metrics::counter!("netpath_watcher_skips_total").increment(1);
            return false;
        }

        let update = AnalysisUpdate {
            generated_at: Utc::now(),
            nodes,
        };
        let node_count = update.nodes.len();
        match self.updates.send(update) {
            Ok(receivers) => {
                tracing::info!(nodes = node_count, receivers, "Broadcast analysis update")
            }
            Err(_) => tracing::debug!(nodes = node_count, "No subscribers for analysis update"),
        }
        metrics::counter!("netpath_watcher_emits_total").increment(1);
        true
    }

    fn watch_dir(&self) -> Result<PathBuf, WatcherError> {
        let dir = &self.snapshots.dir;
        if !dir.is_dir() {
            return Err(WatcherError::MissingDirectory(dir.clone()));
        }
        // Event paths are absolute, so compare against the canonical directory
        Ok(std::fs::canonicalize(dir).unwrap_or_else(|_| dir.clone()))
    }
}
