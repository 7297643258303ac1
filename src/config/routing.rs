//! Routing configuration

use serde::{Deserialize, Serialize};

use crate::config::error::ConfigError;
use crate::routing::PathStrategy;

/// Routing configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoutingConfig {
    /// Strategy tag used when a request does not name one
    pub default_strategy: String,
    /// First cutoff (max edges) tried by the risk strategy
    pub min_cutoff: usize,
    /// Last cutoff tried before reporting that no path exists
    pub max_cutoff: usize,
    /// Maximum ranked paths returned by the risk strategy
    pub max_results: usize,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            default_strategy: "best".to_string(),
            min_cutoff: 2,
            max_cutoff: 9,
            max_results: 5,
        }
    }
}

impl RoutingConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_strategy.parse::<PathStrategy>().is_err() {
            return Err(ConfigError::Validation {
                field: "routing.default_strategy".to_string(),
                message: format!("unknown strategy '{}'", self.default_strategy),
            });
        }
        if self.min_cutoff == 0 {
            return Err(ConfigError::Validation {
                field: "routing.min_cutoff".to_string(),
                message: "cutoff must be at least 1".to_string(),
            });
        }
        if self.min_cutoff > self.max_cutoff {
            return Err(ConfigError::Validation {
                field: "routing.max_cutoff".to_string(),
                message: format!(
                    "max_cutoff ({}) is below min_cutoff ({})",
                    self.max_cutoff, self.min_cutoff
                ),
            });
        }
        if self.max_results == 0 {
            return Err(ConfigError::Validation {
                field: "routing.max_results".to_string(),
                message: "must return at least one path".to_string(),
            });
        }
        Ok(())
    }
}
