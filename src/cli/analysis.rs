//! Analysis command implementation

use crate::analysis;
use crate::cli::{output, AnalysisArgs};
use crate::snapshot::SnapshotReader;

/// Handle `netpath analysis` command
pub async fn handle_analysis(args: &AnalysisArgs) -> Result<String, Box<dyn std::error::Error>> {
    let config = args.source_args.load_config()?;
    let reader = SnapshotReader::new(config.reader.clone());
    let nodes = analysis::analyze(&reader, &config.snapshots).await;

    if args.json {
        Ok(output::format_analysis_json(&nodes)?)
    } else {
        Ok(output::format_analysis_table(&nodes))
    }
}
