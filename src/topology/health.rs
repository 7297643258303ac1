//! Node health status and the per-request health lookup.

use crate::snapshot::{fields, SnapshotDocument};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

/// Operational condition of a node as predicted by the health model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HealthStatus {
    Green,
    Yellow,
    Red,
    Unknown,
}

impl HealthStatus {
    /// Per-node contribution to a path's average health penalty.
    pub fn penalty(self) -> f64 {
        match self {
            HealthStatus::Green => 0.0,
            HealthStatus::Yellow => 0.5,
            HealthStatus::Red | HealthStatus::Unknown => 1.0,
        }
    }

    /// Parse a status string, failing closed: anything unrecognized is RED.
    pub fn parse_or_red(value: Option<&str>) -> Self {
        value
            .and_then(|s| s.parse().ok())
            .unwrap_or(HealthStatus::Red)
    }
}

impl FromStr for HealthStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "GREEN" => Ok(HealthStatus::Green),
            "YELLOW" => Ok(HealthStatus::Yellow),
            "RED" => Ok(HealthStatus::Red),
            "UNKNOWN" => Ok(HealthStatus::Unknown),
            _ => Err(format!("Unknown health status: {}", s)),
        }
    }
}

impl std::fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HealthStatus::Green => write!(f, "GREEN"),
            HealthStatus::Yellow => write!(f, "YELLOW"),
            HealthStatus::Red => write!(f, "RED"),
            HealthStatus::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

/// Node id to predicted status. Ids absent from the map are RED.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HealthMap {
    statuses: BTreeMap<String, HealthStatus>,
}

impl HealthMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Project a health snapshot into a status lookup.
    pub fn from_snapshot(document: &SnapshotDocument) -> Self {
        let statuses = document
            .nodes
            .iter()
            .map(|node| {
                let raw = fields::text(&node.properties, fields::PREDICTED_STATUS_KEY);
                (node.id.clone(), HealthStatus::parse_or_red(raw))
            })
            .collect();
        Self { statuses }
    }

    pub fn insert(&mut self, id: impl Into<String>, status: HealthStatus) {
        self.statuses.insert(id.into(), status);
    }

    /// Effective status of a node, RED when unknown to the map.
    pub fn status(&self, id: &str) -> HealthStatus {
        self.statuses.get(id).copied().unwrap_or(HealthStatus::Red)
    }

    pub fn penalty(&self, id: &str) -> f64 {
        self.status(id).penalty()
    }

    pub fn is_red(&self, id: &str) -> bool {
        self.status(id) == HealthStatus::Red
    }

    /// Entries in id order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, HealthStatus)> {
        self.statuses.iter().map(|(id, s)| (id.as_str(), *s))
    }

    pub fn len(&self) -> usize {
        self.statuses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, HealthStatus)> for HealthMap {
    fn from_iter<I: IntoIterator<Item = (S, HealthStatus)>>(iter: I) -> Self {
        Self {
            statuses: iter.into_iter().map(|(id, s)| (id.into(), s)).collect(),
        }
    }
}
