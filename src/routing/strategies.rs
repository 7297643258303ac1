//! Route-selection strategies

use std::str::FromStr;

/// Strategy tag carried by a route request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PathStrategy {
    /// Fewest edges
    Hops,

    /// Lowest cumulative predicted latency
    Latency,

    /// Ranked low-risk paths from an adaptive simple-path search.
    /// Also selected by the tag `best`.
    #[default]
    Risk,
}

impl PathStrategy {
    /// Whether the strategy returns a ranked list rather than a single path.
    pub fn is_ranked(self) -> bool {
        matches!(self, PathStrategy::Risk)
    }
}

impl FromStr for PathStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hops" => Ok(PathStrategy::Hops),
            "latency" => Ok(PathStrategy::Latency),
            "risk" | "best" => Ok(PathStrategy::Risk),
            _ => Err(format!("Unknown strategy: {}", s)),
        }
    }
}

impl std::fmt::Display for PathStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathStrategy::Hops => write!(f, "hops"),
            PathStrategy::Latency => write!(f, "latency"),
            PathStrategy::Risk => write!(f, "risk"),
        }
    }
}
