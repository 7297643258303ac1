//! Route command implementation

use crate::cli::{output, RouteArgs};
use crate::routing::{RouteEngine, RouteError, RouteResponse};

/// Handle `netpath route` command
pub async fn handle_route(args: &RouteArgs) -> Result<String, Box<dyn std::error::Error>> {
    let config = args.source_args.load_config()?;
    let engine = RouteEngine::new(&config);

    let response = match engine
        .route(&args.source, &args.target, args.strategy.as_deref())
        .await
    {
        Ok(response) => response,
        Err(err @ RouteError::NoPath { .. }) => RouteResponse::unreachable(err.to_string()),
        Err(err) => return Err(err.into()),
    };

    if args.json {
        Ok(output::format_route_json(&response)?)
    } else {
        Ok(output::format_route_table(&response))
    }
}
