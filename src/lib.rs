//! netpath - health-aware route queries over live network topology snapshots
//!
//! Producers rewrite JSON snapshots of a network (predicted link latency,
//! predicted node health, raw telemetry) in place. This crate reads them
//! safely, builds a directed graph with every RED node removed, and answers
//! route queries by fewest hops, lowest latency or lowest composite risk.

pub mod analysis;
pub mod api;
pub mod cli;
pub mod config;
pub mod logging;
pub mod metrics;
pub mod routing;
pub mod snapshot;
pub mod topology;
pub mod watcher;
