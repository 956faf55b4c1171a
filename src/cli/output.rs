//! Output formatting module
//!
//! This module handles formatting a built state graph for the non-DOT output
//! formats. Rows are sorted by encoding so repeated runs emit identical text.

use crate::{Result, state_graph::StateGraph};
use serde_json::json;

/// Output a state graph as JSON
///
/// Emits nodes with their degrees alongside the edge list: everything an
/// external rendering collaborator needs for layout and color mapping.
pub fn output_json(w: &mut impl std::io::Write, graph: &StateGraph) -> Result<()> {
    let mut states: Vec<_> = graph
        .state_index
        .iter()
        .map(|(encoding, &node_idx)| {
            json!({
                "encoding": encoding,
                "throws": graph.get_state(encoding).is_some_and(|s| s.must_throw()),
                "out_degree": graph.out_degree(node_idx),
                "in_degree": graph.in_degree(node_idx),
            })
        })
        .collect();
    states.sort_by_key(|s| s["encoding"].as_str().map(String::from));

    let mut edges: Vec<_> = graph
        .edges()
        .iter()
        .map(|t| {
            json!({
                "from": t.from_state,
                "to": t.to_state,
                "height": t.height,
            })
        })
        .collect();
    edges.sort_by_key(|e| {
        (
            e["from"].as_str().map(String::from),
            e["height"].as_u64(),
        )
    });

    let output = json!({
        "summary": {
            "balls": graph.balls,
            "max_height": graph.max_height,
            "states": graph.node_count(),
            "transitions": graph.edge_count(),
        },
        "states": states,
        "edges": edges,
    });

    serde_json::to_writer_pretty(&mut *w, &output)?;
    writeln!(w)?; // Add trailing newline
    Ok(())
}

/// Output a state graph as a text table
pub fn output_table(w: &mut impl std::io::Write, graph: &StateGraph) -> Result<()> {
    writeln!(w, "Siteswap State Graph - Build Results")?;
    writeln!(w, "{}", "=".repeat(60))?;
    writeln!(w)?;

    writeln!(w, "Summary:")?;
    writeln!(w, "  Balls:       {}", graph.balls)?;
    writeln!(w, "  Max height:  {}", graph.max_height)?;
    writeln!(w, "  States:      {}", graph.node_count())?;
    writeln!(w, "  Transitions: {}", graph.edge_count())?;
    writeln!(w)?;

    let mut states: Vec<_> = graph
        .state_index
        .iter()
        .map(|(encoding, &node_idx)| (encoding, node_idx))
        .collect();
    states.sort_by(|a, b| a.0.cmp(b.0));

    writeln!(w, "States:")?;
    writeln!(w, "{:-<60}", "")?;
    writeln!(
        w,
        "{:<20} {:<8} {:>8} {:>8}",
        "Encoding", "Beat", "Out", "In"
    )?;
    writeln!(w, "{:-<60}", "")?;

    for &(encoding, node_idx) in &states {
        let beat = if graph.get_state(encoding).is_some_and(|s| s.must_throw()) {
            "throw"
        } else {
            "idle"
        };

        writeln!(
            w,
            "{:<20} {:<8} {:>8} {:>8}",
            encoding,
            beat,
            graph.out_degree(node_idx),
            graph.in_degree(node_idx)
        )?;
    }
    writeln!(w)?;

    let mut transitions = graph.edges();
    transitions.sort_by_key(|t| (t.from_state.clone(), t.height));

    writeln!(w, "Transitions:")?;
    writeln!(w, "{:-<60}", "")?;
    writeln!(w, "{:<20} {:<20} {:>8}", "From", "To", "Height")?;
    writeln!(w, "{:-<60}", "")?;

    for transition in &transitions {
        writeln!(
            w,
            "{:<20} {:<20} {:>8}",
            transition.from_state,
            transition.to_state,
            transition.display_label()
        )?;
    }
    writeln!(w)?;

    Ok(())
}
