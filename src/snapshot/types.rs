//! Snapshot document format shared by the latency, health and telemetry producers.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Free-form telemetry attached to a node or link.
pub type Properties = Map<String, Value>;

/// A point-in-time topology document.
///
/// Missing `nodes` or `links` arrays are read as empty; anything that is not
/// an object with this shape fails to parse and is retried by the reader.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SnapshotDocument {
    #[serde(default)]
    pub nodes: Vec<NodeRecord>,
    #[serde(default)]
    pub links: Vec<LinkRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: String,
    #[serde(default, deserialize_with = "deserialize_properties")]
    pub properties: Properties,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkRecord {
    #[serde(deserialize_with = "deserialize_id")]
    pub source: String,
    #[serde(deserialize_with = "deserialize_id")]
    pub target: String,
    #[serde(default, deserialize_with = "deserialize_properties")]
    pub properties: Properties,
}

impl SnapshotDocument {
    /// Look up a node record by id.
    pub fn node(&self, id: &str) -> Option<&NodeRecord> {
        self.nodes.iter().find(|n| n.id == id)
    }
}

/// Node ids are strings in practice, but the generators occasionally emit
/// bare integers. Both are accepted and normalized to a string.
fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number id, got {}",
            other
        ))),
    }
}

/// `"properties": null` is treated like an absent map.
fn deserialize_properties<'de, D>(deserializer: D) -> Result<Properties, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Properties>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_full_document() {
        let doc: SnapshotDocument = serde_json::from_value(json!({
            "nodes": [{"id": "gnb-1", "properties": {"predicted_alarm_status": "GREEN"}}],
            "links": [{"source": "gnb-1", "target": "upf-1", "properties": {"predicted_latency_ms": 12.5}}]
        }))
        .unwrap();

        assert_eq!(doc.nodes.len(), 1);
        assert_eq!(doc.links[0].source, "gnb-1");
        assert_eq!(doc.links[0].properties["predicted_latency_ms"], 12.5);
    }

    #[test]
    fn test_missing_sections_default_to_empty() {
        let doc: SnapshotDocument = serde_json::from_str("{}").unwrap();
        assert!(doc.nodes.is_empty());
        assert!(doc.links.is_empty());
    }

    #[test]
    fn test_numeric_ids_are_normalized() {
        let doc: SnapshotDocument =
            serde_json::from_str(r#"{"links": [{"source": 1, "target": 2}]}"#).unwrap();
        assert_eq!(doc.links[0].source, "1");
        assert_eq!(doc.links[0].target, "2");
        assert!(doc.links[0].properties.is_empty());
    }

    #[test]
    fn test_null_properties_read_as_empty() {
        let doc: SnapshotDocument =
            serde_json::from_str(r#"{"nodes": [{"id": "a", "properties": null}]}"#).unwrap();
        assert!(doc.nodes[0].properties.is_empty());
    }

    #[test]
    fn test_wrong_shape_is_rejected() {
        assert!(serde_json::from_str::<SnapshotDocument>("[]").is_err());
        assert!(serde_json::from_str::<SnapshotDocument>(r#"{"links": [{"source": "a"}]}"#).is_err());
        assert!(serde_json::from_str::<SnapshotDocument>(r#"{"nodes": [{"id": true}]}"#).is_err());
    }

    #[test]
    fn test_node_lookup() {
        let doc: SnapshotDocument =
            serde_json::from_str(r#"{"nodes": [{"id": "a"}, {"id": "b"}]}"#).unwrap();
        assert!(doc.node("b").is_some());
        assert!(doc.node("c").is_none());
    }
}
