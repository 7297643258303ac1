//! De-duplication of analysis updates.

use crate::analysis::NodeAnalysis;

/// Remembers the last emitted payload and lets only changed ones through.
///
/// The gate belongs to one watcher and starts empty, so the first payload
/// after a restart is always emitted.
#[derive(Debug, Default)]
pub struct EmitGate {
    last: Option<String>,
}

impl EmitGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` and records `nodes` when they differ from the last
    /// admitted payload.
    pub fn admit(&mut self, nodes: &[NodeAnalysis]) -> bool {
        let canonical = match serde_json::to_string(nodes) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!(error = %e, "Could not serialize analysis, emitting anyway");
                self.last = None;
                return true;
            }
        };
        if self.last.as_deref() == Some(canonical.as_str()) {
            return false;
        }
        self.last = Some(canonical);
        true
    }

    /// Forget the last payload.
    pub fn reset(&mut self) {
        self.last = None;
    }

    pub fn is_empty(&self) -> bool {
        self.last.is_none()
    }
}
