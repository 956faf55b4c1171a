//! Degree statistics
//!
//! Derives read-only degree distributions from a completed state graph. The
//! histogram drives external styling (an out-of-scope renderer colors nodes
//! by degree), so the in/out/total choice is an explicit parameter rather
//! than baked in.

use super::StateGraph;
use petgraph::stable_graph::NodeIndex;
use std::collections::BTreeMap;

/// Which degree a statistic is computed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DegreeKind {
    /// Incoming edges only
    In,
    /// Outgoing edges only
    Out,
    /// Incoming plus outgoing edges
    #[default]
    Total,
}

impl DegreeKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            DegreeKind::In => "in",
            DegreeKind::Out => "out",
            DegreeKind::Total => "total",
        }
    }
}

/// Mapping from degree value to the number of nodes with that degree.
///
/// Ordered so reports list degrees ascending. The counts always sum to the
/// graph's node count.
pub type DegreeHistogram = BTreeMap<usize, usize>;

/// Analysis report containing the histogram and summary metrics
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    pub kind: DegreeKind,
    pub histogram: DegreeHistogram,
    /// Mean degree across all nodes (mean out-degree is the branching factor).
    pub mean_degree: f64,
    pub min_degree: usize,
    pub max_degree: usize,
    pub has_cycles: bool,
}

fn node_degree(graph: &StateGraph, node_idx: NodeIndex, kind: DegreeKind) -> usize {
    match kind {
        DegreeKind::In => graph.in_degree(node_idx),
        DegreeKind::Out => graph.out_degree(node_idx),
        DegreeKind::Total => graph.in_degree(node_idx) + graph.out_degree(node_idx),
    }
}

/// Compute the degree histogram of a state graph.
pub fn degree_histogram(graph: &StateGraph, kind: DegreeKind) -> DegreeHistogram {
    let mut histogram = DegreeHistogram::new();
    for node_idx in graph.graph.node_indices() {
        *histogram.entry(node_degree(graph, node_idx, kind)).or_insert(0) += 1;
    }
    histogram
}

/// Analyze a state graph's degree distribution
pub fn analyze(graph: &StateGraph, kind: DegreeKind) -> AnalysisReport {
    let node_count = graph.node_count();
    let histogram = degree_histogram(graph, kind);

    let total: usize = histogram.iter().map(|(degree, count)| degree * count).sum();
    let mean_degree = if node_count > 0 {
        total as f64 / node_count as f64
    } else {
        0.0
    };

    let min_degree = histogram.keys().next().copied().unwrap_or(0);
    let max_degree = histogram.keys().next_back().copied().unwrap_or(0);

    // Juggling patterns repeat, so any valid graph is expected to be cyclic.
    let has_cycles = petgraph::algo::is_cyclic_directed(&graph.graph);

    AnalysisReport {
        kind,
        histogram,
        mean_degree,
        min_degree,
        max_degree,
        has_cycles,
    }
}
