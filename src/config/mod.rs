//! Configuration module for netpath
//!
//! Provides layered configuration loading from files, environment variables, and defaults.
//!
//! # Configuration Precedence
//!
//! 1. CLI arguments (highest priority)
//! 2. Environment variables (`NETPATH_*`)
//! 3. Configuration file (TOML)
//! 4. Default values (lowest priority)
//!
//! # Example
//!
//! ```rust
//! use netpath::config::NetpathConfig;
//!
//! let config = NetpathConfig::default();
//! assert_eq!(config.server.port, 5000);
//!
//! let toml = r#"
//! [routing]
//! max_results = 3
//! "#;
//! let config: NetpathConfig = toml::from_str(toml).unwrap();
//! assert_eq!(config.routing.max_results, 3);
//! ```

pub mod error;
pub mod logging;
pub mod routing;
pub mod server;
pub mod snapshots;
pub mod watcher;

pub use error::ConfigError;
pub use logging::{LogFormat, LoggingConfig};
pub use routing::RoutingConfig;
pub use server::ServerConfig;
pub use snapshots::SnapshotConfig;
pub use watcher::WatcherConfig;

// Reader tuning lives with the reader
pub use crate::snapshot::ReaderConfig;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Unified configuration for the netpath service and CLI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct NetpathConfig {
    /// HTTP server configuration
    pub server: ServerConfig,
    /// Snapshot directory and file names
    pub snapshots: SnapshotConfig,
    /// Settle and retry behavior of snapshot reads
    pub reader: ReaderConfig,
    /// Route computation limits
    pub routing: RoutingConfig,
    /// Background snapshot watcher
    pub watcher: WatcherConfig,
    /// Logging configuration
    pub logging: LoggingConfig,
}

impl NetpathConfig {
    /// Load configuration from a TOML file
    ///
    /// If path is None, returns default configuration.
    /// If path doesn't exist, returns NotFound error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => {
                if !p.exists() {
                    return Err(ConfigError::NotFound(p.to_path_buf()));
                }
                let content = std::fs::read_to_string(p)?;
                toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
            }
            None => Ok(Self::default()),
        }
    }

    /// Apply environment variable overrides
    ///
    /// Supports NETPATH_* environment variables for common settings.
    /// Invalid values are ignored and the current value is kept.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(port) = std::env::var("NETPATH_PORT") {
            if let Ok(p) = port.parse() {
                self.server.port = p;
            }
        }
        if let Ok(host) = std::env::var("NETPATH_HOST") {
            self.server.host = host;
        }

        if let Ok(level) = std::env::var("NETPATH_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("NETPATH_LOG_FORMAT") {
            if let Ok(f) = format.parse() {
                self.logging.format = f;
            }
        }

        if let Ok(dir) = std::env::var("NETPATH_SNAPSHOT_DIR") {
            if !dir.is_empty() {
                self.snapshots.dir = PathBuf::from(dir);
            }
        }
        if let Ok(watcher) = std::env::var("NETPATH_WATCHER") {
            self.watcher.enabled = watcher.to_lowercase() == "true";
        }

        self
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation {
                field: "server.port".to_string(),
                message: "port must be non-zero".to_string(),
            });
        }

        if self.reader.max_attempts == 0 {
            return Err(ConfigError::Validation {
                field: "reader.max_attempts".to_string(),
                message: "at least one read attempt is required".to_string(),
            });
        }

        for (field, name) in [
            ("snapshots.latency_file", &self.snapshots.latency_file),
            ("snapshots.health_file", &self.snapshots.health_file),
            ("snapshots.telemetry_file", &self.snapshots.telemetry_file),
        ] {
            if name.trim().is_empty() {
                return Err(ConfigError::Validation {
                    field: field.to_string(),
                    message: "file name cannot be empty".to_string(),
                });
            }
        }

        self.routing.validate()?;

        Ok(())
    }
}
