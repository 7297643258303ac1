//! CLI module for netpath
//!
//! # Commands
//!
//! - `serve` - Start the HTTP server and the snapshot watcher
//! - `route` - Compute a route from the current snapshots
//! - `nodes` - List nodes with their predicted health
//! - `analysis` - Compare measured and predicted node state
//! - `config` - Configuration utilities (init)
//! - `completions` - Generate shell completions
//!
//! # Example
//!
//! ```bash
//! # Serve snapshots from a custom directory
//! netpath serve --snapshot-dir /var/lib/netpath
//!
//! # Lowest latency route, as JSON
//! netpath route gnb-1 upf-2 --strategy latency --json
//!
//! # Generate shell completions
//! netpath completions bash > ~/.bash_completion.d/netpath
//! ```

pub mod analysis;
pub mod completions;
pub mod config;
pub mod nodes;
pub mod output;
pub mod route;
pub mod serve;

pub use completions::handle_completions;
pub use config::handle_config_init;

use crate::config::NetpathConfig;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// netpath - Health-aware route queries over live network snapshots
#[derive(Parser, Debug)]
#[command(
    name = "netpath",
    version,
    about = "Health-aware route queries over live network topology snapshots"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the netpath server
    Serve(ServeArgs),
    /// Compute a route between two nodes
    Route(RouteArgs),
    /// List nodes with their predicted health
    Nodes(NodesArgs),
    /// Compare measured and predicted node state
    Analysis(AnalysisArgs),
    /// Configuration utilities
    #[command(subcommand)]
    Config(ConfigCommands),
    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "netpath.toml")]
    pub config: PathBuf,

    /// Override server port
    #[arg(short, long, env = "NETPATH_PORT")]
    pub port: Option<u16>,

    /// Override server host
    #[arg(short = 'H', long, env = "NETPATH_HOST")]
    pub host: Option<String>,

    /// Set log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "NETPATH_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Directory holding the snapshot files
    #[arg(long, env = "NETPATH_SNAPSHOT_DIR")]
    pub snapshot_dir: Option<PathBuf>,

    /// Disable the snapshot watcher and WebSocket updates
    #[arg(long)]
    pub no_watch: bool,
}

/// Where one-shot commands find their configuration and snapshots.
#[derive(Args, Debug, Clone)]
pub struct SourceArgs {
    /// Path to configuration file
    #[arg(short, long, default_value = "netpath.toml")]
    pub config: PathBuf,

    /// Directory holding the snapshot files
    #[arg(long, env = "NETPATH_SNAPSHOT_DIR")]
    pub snapshot_dir: Option<PathBuf>,
}

impl SourceArgs {
    /// Load the config file when present, then apply env and flag overrides.
    pub fn load_config(&self) -> Result<NetpathConfig, Box<dyn std::error::Error>> {
        let mut config = if self.config.exists() {
            NetpathConfig::load(Some(&self.config))?
        } else {
            NetpathConfig::default()
        }
        .with_env_overrides();

        if let Some(ref dir) = self.snapshot_dir {
            config.snapshots.dir = dir.clone();
        }
        config.validate()?;
        Ok(config)
    }
}

#[derive(Args, Debug)]
pub struct RouteArgs {
    /// Source node id
    pub source: String,

    /// Target node id
    pub target: String,

    /// Strategy (hops, latency, risk, best); defaults to the configured one
    #[arg(short, long)]
    pub strategy: Option<String>,

    #[command(flatten)]
    pub source_args: SourceArgs,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct NodesArgs {
    #[command(flatten)]
    pub source_args: SourceArgs,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct AnalysisArgs {
    #[command(flatten)]
    pub source_args: SourceArgs,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Initialize a new configuration file
    Init(ConfigInitArgs),
}

#[derive(Args, Debug)]
pub struct ConfigInitArgs {
    /// Output file path
    #[arg(short, long, default_value = "netpath.toml")]
    pub output: PathBuf,

    /// Overwrite existing file
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}
