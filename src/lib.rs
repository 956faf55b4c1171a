//! Siteswap State Graph Builder
//!
//! A CLI tool for building and analyzing juggling siteswap state transition graphs.
//!
//! This library provides functionality for:
//! - Enumerating the valid states of a pattern with a fixed ball count and
//!   maximum throw height
//! - Computing the legal single-beat transitions between states, labeled by
//!   throw height
//! - Assembling the directed state graph and deriving degree statistics
//! - Emitting the graph as JSON, DOT, or plain text for external renderers

pub mod cli;
pub mod config;
pub mod error;
pub mod state_graph;

pub use config::Config;
pub use error::{Error, Result};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Initialize logging with the given log level
pub fn init_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
        assert_eq!(NAME, "siteswap-graph");
    }
}
