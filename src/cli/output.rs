//! Output formatting helpers for CLI commands

use crate::analysis::{NodeAnalysis, NodeStatus};
use crate::routing::RouteResponse;
use crate::topology::HealthStatus;
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};
use serde_json::json;

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(header);
    table
}

/// Colored status label
pub fn status_label(status: HealthStatus) -> String {
    match status {
        HealthStatus::Green => "GREEN".green().to_string(),
        HealthStatus::Yellow => "YELLOW".yellow().to_string(),
        HealthStatus::Red => "RED".red().to_string(),
        HealthStatus::Unknown => "UNKNOWN".dimmed().to_string(),
    }
}

/// Colored label for a raw alarm string
fn alarm_label(alarm: &str) -> String {
    match alarm.parse::<HealthStatus>() {
        Ok(status) => status_label(status),
        Err(_) => alarm.to_string(),
    }
}

fn latency_label(latency: Option<f64>) -> String {
    latency
        .map(|ms| format!("{:.2}ms", ms))
        .unwrap_or_else(|| "-".to_string())
}

/// Format a route answer as the message followed by a table of paths
pub fn format_route_table(response: &RouteResponse) -> String {
    let table = match response {
        RouteResponse::Single(route) => {
            let mut table = new_table(vec!["#", "Path", "Latency"]);
            for (i, p) in route.paths.iter().enumerate() {
                table.add_row(vec![
                    Cell::new(i + 1),
                    Cell::new(p.path.join(" → ")),
                    Cell::new(format!("{:.2}ms", p.latency)),
                ]);
            }
            table
        }
        RouteResponse::Ranked(routes) => {
            let mut table = new_table(vec!["#", "Path", "Latency", "Health Penalty", "Risk"]);
            for (i, p) in routes.paths.iter().enumerate() {
                table.add_row(vec![
                    Cell::new(i + 1),
                    Cell::new(p.path.join(" → ")),
                    Cell::new(format!("{:.2}ms", p.latency)),
                    Cell::new(format!("{:.2}", p.health_penalty)),
                    Cell::new(format!("{:.3}", p.risk_score)),
                ]);
            }
            table
        }
    };

    if response.paths().is_empty() {
        return response.message().yellow().to_string();
    }
    format!("{}\n{}", response.message().bold(), table)
}

/// Format a route answer as JSON
pub fn format_route_json(response: &RouteResponse) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(response)
}

/// Format nodes as a table
pub fn format_nodes_table(nodes: &[NodeStatus]) -> String {
    let mut table = new_table(vec!["Node", "Status"]);
    for n in nodes {
        table.add_row(vec![Cell::new(&n.id), Cell::new(status_label(n.status))]);
    }
    table.to_string()
}

/// Format nodes as JSON
pub fn format_nodes_json(nodes: &[NodeStatus]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&json!({ "nodes": nodes }))
}

/// Format the node analysis as a table
pub fn format_analysis_table(nodes: &[NodeAnalysis]) -> String {
    let mut table = new_table(vec![
        "Node",
        "Real Latency",
        "Predicted Latency",
        "Real Alarm",
        "Predicted Alarm",
    ]);
    for n in nodes {
        table.add_row(vec![
            Cell::new(&n.node),
            Cell::new(latency_label(n.real_latency)),
            Cell::new(latency_label(n.predicted_latency)),
            Cell::new(alarm_label(&n.real_alarm)),
            Cell::new(alarm_label(&n.predicted_alarm)),
        ]);
    }
    table.to_string()
}

/// Format the node analysis as JSON
pub fn format_analysis_json(nodes: &[NodeAnalysis]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(nodes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::{PathCandidate, PathSummary, RankedRoutes, SingleRoute};

    fn single() -> RouteResponse {
        RouteResponse::Single(SingleRoute {
            paths: vec![PathSummary {
                path: vec!["A".to_string(), "B".to_string(), "C".to_string()],
                latency: 80.0,
            }],
            message: "Lowest latency path (excluding RED nodes)".to_string(),
        })
    }

    fn ranked() -> RouteResponse {
        RouteResponse::Ranked(RankedRoutes {
            paths: vec![PathCandidate {
                path: vec!["A".to_string(), "C".to_string()],
                latency: 200.0,
                health_penalty: 0.0,
                risk_score: 0.5,
            }],
            cutoff_used: Some(2),
            message: "Lowest risk path using cutoff 2, RED nodes excluded".to_string(),
        })
    }

    #[test]
    fn test_format_route_table_single() {
        let output = format_route_table(&single());
        assert!(output.contains("Lowest latency path"));
        assert!(output.contains("A → B → C"));
        assert!(output.contains("80.00ms"));
    }

    #[test]
    fn test_format_route_table_ranked() {
        let output = format_route_table(&ranked());
        assert!(output.contains("Risk"));
        assert!(output.contains("0.500"));
    }

    #[test]
    fn test_format_route_table_empty_shows_message() {
        let output = format_route_table(&RouteResponse::unreachable("nothing"));
        assert!(output.contains("nothing"));
        assert!(!output.contains("Path"));
    }

    #[test]
    fn test_format_route_json_valid() {
        let parsed: serde_json::Value =
            serde_json::from_str(&format_route_json(&ranked()).unwrap()).unwrap();
        assert_eq!(parsed["cutoff_used"], 2);
        assert_eq!(parsed["paths"][0]["risk_score"], 0.5);
    }

    #[test]
    fn test_format_nodes() {
        let nodes = vec![NodeStatus {
            id: "gnb-1".to_string(),
            status: HealthStatus::Yellow,
        }];
        let table = format_nodes_table(&nodes);
        assert!(table.contains("gnb-1"));
        assert!(table.contains("YELLOW"));

        let parsed: serde_json::Value =
            serde_json::from_str(&format_nodes_json(&nodes).unwrap()).unwrap();
        assert_eq!(parsed["nodes"][0]["status"], "YELLOW");
    }

    #[test]
    fn test_format_analysis_table_missing_latency() {
        let nodes = vec![NodeAnalysis {
            node: "A".to_string(),
            real_latency: None,
            predicted_latency: Some(12.5),
            real_alarm: "UNKNOWN".to_string(),
            predicted_alarm: "degraded".to_string(),
        }];
        let output = format_analysis_table(&nodes);
        assert!(output.contains("12.50ms"));
        assert!(output.contains("degraded"));
        assert!(output.contains('-'));
    }
}
