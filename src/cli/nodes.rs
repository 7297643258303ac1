//! Nodes command implementation

use crate::analysis;
use crate::cli::{output, NodesArgs};
use crate::snapshot::SnapshotReader;

/// Handle `netpath nodes` command
pub async fn handle_nodes(args: &NodesArgs) -> Result<String, Box<dyn std::error::Error>> {
    let config = args.source_args.load_config()?;
    let reader = SnapshotReader::new(config.reader.clone());
    let nodes = analysis::list_nodes(&reader, &config.snapshots).await?;

    if args.json {
        Ok(output::format_nodes_json(&nodes)?)
    } else if nodes.is_empty() {
        Ok(format!(
            "No nodes in {}",
            config.snapshots.health_path().display()
        ))
    } else {
        Ok(output::format_nodes_table(&nodes))
    }
}
