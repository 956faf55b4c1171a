//! State graph module - Build and analyze juggling state transition graphs

use crate::Result;

pub mod analyzer;
pub mod graph;
pub mod state;
pub mod transition;

// Re-export key types
pub use analyzer::{AnalysisReport, DegreeHistogram, DegreeKind};
pub use graph::{GraphStats, StateGraph};
pub use state::{SlotSet, State, StateId};
pub use transition::Transition;

/// Build the state graph for a fixed ball count and maximum throw height
pub fn build_state_graph(balls: u8, max_height: u8) -> Result<StateGraph> {
    StateGraph::build(balls, max_height)
}
