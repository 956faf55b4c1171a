//! CLI module
//!
//! This module defines the command-line interface using clap and implements
//! the command execution logic.

use crate::state_graph::DegreeKind;
use crate::{Config, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

pub mod commands;
pub mod output;

/// Siteswap State Graph Builder CLI
#[derive(Parser, Debug)]
#[command(name = "siteswap-graph")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build the state graph and emit it
    Build {
        /// Number of balls in flight (overrides config)
        #[arg(short, long, env = "SITESWAP_BALLS")]
        balls: Option<u8>,

        /// Maximum throw height in beats (overrides config)
        #[arg(short, long, env = "SITESWAP_MAX_HEIGHT")]
        max_height: Option<u8>,

        /// Output format
        #[arg(short, long, value_enum)]
        output: Option<OutputFormat>,

        /// Write the output to a timestamped file instead of stdout
        #[arg(long)]
        export: bool,
    },

    /// Print node/edge counts and the degree histogram
    Stats {
        /// Number of balls in flight (overrides config)
        #[arg(short, long, env = "SITESWAP_BALLS")]
        balls: Option<u8>,

        /// Maximum throw height in beats (overrides config)
        #[arg(short, long, env = "SITESWAP_MAX_HEIGHT")]
        max_height: Option<u8>,

        /// Which degree to histogram
        #[arg(short, long, value_enum, default_value = "total")]
        degree: DegreeArg,
    },
}

/// Output format types
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// DOT format (Graphviz)
    Dot,
    /// Plain text table
    Table,
}

impl OutputFormat {
    /// Parse a config-file format name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "json" => Some(Self::Json),
            "dot" => Some(Self::Dot),
            "table" => Some(Self::Table),
            _ => None,
        }
    }

    /// File extension for exported output
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Dot => "dot",
            Self::Table => "txt",
        }
    }
}

/// Degree selector for statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DegreeArg {
    /// Incoming edges only
    In,
    /// Outgoing edges only
    Out,
    /// Incoming plus outgoing edges
    Total,
}

impl DegreeArg {
    pub fn kind(self) -> DegreeKind {
        match self {
            Self::In => DegreeKind::In,
            Self::Out => DegreeKind::Out,
            Self::Total => DegreeKind::Total,
        }
    }
}

/// Execute the CLI command
pub fn execute(args: Cli, config: Config) -> Result<()> {
    match args.command {
        Commands::Build { .. } => commands::build::execute(args, config),
        Commands::Stats { .. } => commands::stats::execute(args, config),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from([
            "siteswap-graph",
            "build",
            "--balls",
            "4",
            "--max-height",
            "7",
            "--output",
            "dot",
        ]);

        assert!(cli.is_ok());
    }

    #[test]
    fn test_stats_degree_default() {
        let cli = Cli::try_parse_from(["siteswap-graph", "stats"]).unwrap();
        match cli.command {
            Commands::Stats { degree, .. } => assert_eq!(degree, DegreeArg::Total),
            _ => panic!("expected stats command"),
        }
    }

    #[test]
    fn test_output_format_names() {
        assert_eq!(OutputFormat::from_name("json"), Some(OutputFormat::Json));
        assert_eq!(OutputFormat::from_name("dot"), Some(OutputFormat::Dot));
        assert_eq!(OutputFormat::from_name("table"), Some(OutputFormat::Table));
        assert_eq!(OutputFormat::from_name("svg"), None);
    }
}
