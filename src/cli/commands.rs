//! CLI command implementations
//!
//! This module contains the implementation for each CLI command.

use crate::{Config, Result, cli::Cli};

/// Resolve pattern parameters, preferring CLI arguments over config defaults
fn resolve_pattern(balls: Option<u8>, max_height: Option<u8>, config: &Config) -> (u8, u8) {
    (
        balls.unwrap_or(config.pattern.balls),
        max_height.unwrap_or(config.pattern.max_height),
    )
}

/// Build command implementation
pub mod build {
    use super::*;
    use crate::Error;
    use crate::cli::{Commands, OutputFormat};
    use std::io::Write;

    /// Execute the build command
    pub fn execute(args: Cli, config: Config) -> Result<()> {
        let (balls, max_height, output, export) = match args.command {
            Commands::Build {
                balls,
                max_height,
                output,
                export,
            } => (balls, max_height, output, export),
            _ => unreachable!("build::execute called with wrong command"),
        };

        let (balls, max_height) = resolve_pattern(balls, max_height, &config);

        tracing::info!(
            "Building state graph for {} balls, max height {}",
            balls,
            max_height
        );

        let graph = crate::state_graph::build_state_graph(balls, max_height)?;

        tracing::info!(
            "Built {} states and {} transitions",
            graph.node_count(),
            graph.edge_count()
        );

        let format = match output {
            Some(format) => format,
            None => OutputFormat::from_name(&config.output.format).ok_or_else(|| {
                Error::config(format!(
                    "Unknown output format in config: {}",
                    config.output.format
                ))
            })?,
        };

        let mut buffer = Vec::new();
        match format {
            OutputFormat::Json => crate::cli::output::output_json(&mut buffer, &graph)?,
            OutputFormat::Table => crate::cli::output::output_table(&mut buffer, &graph)?,
            OutputFormat::Dot => buffer.extend_from_slice(graph.to_dot().as_bytes()),
        }

        if export {
            let filename = format!(
                "{}.graph.{}",
                chrono::Utc::now().format("%Y%m%d%H%M%S"),
                format.extension()
            );
            let path = config.export_directory().join(filename);
            std::fs::write(&path, &buffer)?;
            tracing::info!("Graph exported to {:?}", path);
            println!("Graph exported to {}", path.display());
        } else {
            std::io::stdout().write_all(&buffer)?;
        }

        Ok(())
    }
}

/// Stats command implementation
pub mod stats {
    use super::*;
    use crate::cli::Commands;
    use crate::state_graph::analyzer;

    /// Execute the stats command
    pub fn execute(args: Cli, config: Config) -> Result<()> {
        let (balls, max_height, degree) = match args.command {
            Commands::Stats {
                balls,
                max_height,
                degree,
            } => (balls, max_height, degree),
            _ => unreachable!("stats::execute called with wrong command"),
        };

        let (balls, max_height) = resolve_pattern(balls, max_height, &config);

        tracing::info!(
            "Computing statistics for {} balls, max height {}",
            balls,
            max_height
        );

        let graph = crate::state_graph::build_state_graph(balls, max_height)?;
        let stats = graph.stats();
        let report = analyzer::analyze(&graph, degree.kind());

        println!(
            "Siteswap state graph: {} balls, max height {}",
            balls, max_height
        );
        println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
        println!("States:      {}", stats.total_states);
        println!("Transitions: {}", stats.total_transitions);
        println!("  throw states: {}", stats.throw_states);
        println!("  idle states:  {}", stats.idle_states);
        println!();
        println!("Degree histogram ({}-degree):", report.kind.display_name());
        for (degree, count) in &report.histogram {
            println!("  {:>4}: {} node(s)", degree, count);
        }
        println!();
        println!(
            "Degree mean/min/max: {:.2}/{}/{}",
            report.mean_degree, report.min_degree, report.max_degree
        );
        println!("Cyclic: {}", if report.has_cycles { "yes" } else { "no" });

        Ok(())
    }
}
