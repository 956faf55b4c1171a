use crate::state_graph::analyzer::{self, DegreeHistogram, DegreeKind};
use crate::state_graph::{State, StateId, Transition};
use crate::{Error, Result};
use petgraph::Direction;
use petgraph::prelude::EdgeRef;
use petgraph::stable_graph::{EdgeIndex, NodeIndex, StableGraph};
use std::collections::HashMap;

/// A directed graph of every juggling state reachable with a fixed ball count
/// and maximum throw height.
///
/// Nodes are states (occupied-slot sets), edges are single-beat transitions
/// labeled with the throw height that causes them. The graph is built once
/// per `(balls, max_height)` pair and never mutated afterwards.
#[derive(Debug)]
pub struct StateGraph {
    /// The underlying graph structure.
    /// Nodes represent states, and edges represent the beats that move between them.
    pub graph: StableGraph<State, Transition>,

    /// A lookup table mapping canonical state encodings to their internal graph indices.
    ///
    /// This index is critical for:
    /// - **Performance**: Enables O(1) lookup of graph nodes by encoding.
    /// - **Graph Construction**: Allows efficient linking of transitions by quickly
    ///   finding the source and target nodes each beat produces.
    /// - **Data Integrity**: Ensures each occupied-slot set is represented by exactly
    ///   one node in the graph.
    pub state_index: HashMap<StateId, NodeIndex>,

    /// Number of balls in flight in every state.
    pub balls: u8,

    /// Maximum throw height; every slot index is below it.
    pub max_height: u8,
}

impl StateGraph {
    fn new(balls: u8, max_height: u8) -> Self {
        Self {
            graph: StableGraph::new(),
            state_index: HashMap::new(),
            balls,
            max_height,
        }
    }

    /// Adds a state to the graph and updates the state index.
    pub fn add_state(&mut self, state: State) -> NodeIndex {
        let node_index = self.graph.add_node(state);
        self.state_index.insert(state.encode(), node_index);
        node_index
    }

    /// Adds a transition to the graph, linking two existing states.
    pub fn add_transition(&mut self, transition: Transition) -> Option<EdgeIndex> {
        if let (Some(&from_idx), Some(&to_idx)) = (
            self.state_index.get(&transition.from_state),
            self.state_index.get(&transition.to_state),
        ) {
            Some(self.graph.add_edge(from_idx, to_idx, transition))
        } else {
            None
        }
    }

    /// Build the complete state graph for `balls` balls thrown at most
    /// `max_height` beats high.
    ///
    /// Enumerates every size-`balls` subset of `{0, .., max_height-1}` as a
    /// node, then computes each node's outgoing transitions:
    /// - slot 0 occupied: one edge per non-colliding height in `1..=max_height`;
    /// - slot 0 empty: a single idle edge of height 0.
    ///
    /// The construction is deterministic; identical arguments yield identical
    /// node and edge sets.
    pub fn build(balls: u8, max_height: u8) -> Result<Self> {
        if balls == 0 {
            return Err(Error::invalid_argument("ball count must be positive"));
        }
        if max_height == 0 {
            return Err(Error::invalid_argument("max height must be positive"));
        }
        if balls > max_height {
            return Err(Error::invalid_argument(format!(
                "ball count ({balls}) cannot exceed max height ({max_height})"
            )));
        }
        if max_height > crate::state_graph::SlotSet::MAX_SLOTS {
            return Err(Error::invalid_argument(format!(
                "max height ({max_height}) cannot exceed {}",
                crate::state_graph::SlotSet::MAX_SLOTS
            )));
        }

        let mut graph = Self::new(balls, max_height);

        let states = enumerate_states(balls, max_height);
        for &state in &states {
            graph.add_state(state);
        }

        for state in &states {
            let from = state.encode();
            if state.must_throw() {
                for height in state.valid_throw_heights() {
                    let next = state.throw(height);
                    debug_assert!(next.is_valid(balls));
                    graph.add_transition(Transition::new(from.clone(), next.encode(), height));
                }
            } else {
                let next = state.advance();
                debug_assert!(next.is_valid(balls));
                graph.add_transition(Transition::new(from.clone(), next.encode(), 0));
            }
        }

        Ok(graph)
    }

    /// Get a state by its canonical encoding
    pub fn get_state(&self, state_id: &str) -> Option<&State> {
        self.state_index
            .get(state_id)
            .and_then(|&idx| self.graph.node_weight(idx))
    }

    /// Get all states
    pub fn all_states(&self) -> Vec<&State> {
        self.graph
            .node_indices()
            .filter_map(|idx| self.graph.node_weight(idx))
            .collect()
    }

    /// Get the canonical encodings of all states
    pub fn encodings(&self) -> Vec<StateId> {
        self.state_index.keys().cloned().collect()
    }

    /// Get all transitions
    pub fn edges(&self) -> Vec<&Transition> {
        self.graph
            .edge_indices()
            .filter_map(|idx| self.graph.edge_weight(idx))
            .collect()
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Get outgoing transitions from a state
    pub fn outgoing_transitions(&self, state_id: &str) -> Vec<&Transition> {
        if let Some(&node_idx) = self.state_index.get(state_id) {
            self.graph
                .edges_directed(node_idx, Direction::Outgoing)
                .filter_map(|edge| self.graph.edge_weight(edge.id()))
                .collect()
        } else {
            Vec::new()
        }
    }

    /// Get incoming transitions to a state
    pub fn incoming_transitions(&self, state_id: &str) -> Vec<&Transition> {
        if let Some(&node_idx) = self.state_index.get(state_id) {
            self.graph
                .edges_directed(node_idx, Direction::Incoming)
                .filter_map(|edge| self.graph.edge_weight(edge.id()))
                .collect()
        } else {
            Vec::new()
        }
    }

    /// Out-degree of a node by graph index
    pub fn out_degree(&self, node_idx: NodeIndex) -> usize {
        self.graph
            .edges_directed(node_idx, Direction::Outgoing)
            .count()
    }

    /// In-degree of a node by graph index
    pub fn in_degree(&self, node_idx: NodeIndex) -> usize {
        self.graph
            .edges_directed(node_idx, Direction::Incoming)
            .count()
    }

    /// Degree histogram over all nodes
    pub fn degree_histogram(&self, kind: DegreeKind) -> DegreeHistogram {
        analyzer::degree_histogram(self, kind)
    }

    /// Export to DOT format for Graphviz
    ///
    /// Node fill colors bucket by out-degree so an external renderer can show
    /// how constrained each state is without recomputing degrees.
    pub fn to_dot(&self) -> String {
        let mut dot = "digraph StateGraph {\n".to_string();
        dot.push_str("  rankdir=LR;\n");
        dot.push_str("  node [shape=box, style=filled];\n\n");

        let mut nodes: Vec<(&StateId, NodeIndex)> =
            self.state_index.iter().map(|(id, &idx)| (id, idx)).collect();
        nodes.sort();

        for (state_id, node_idx) in &nodes {
            dot.push_str(&format!(
                "  \"{}\" [fillcolor=\"{}\"];\n",
                state_id,
                degree_color(self.out_degree(*node_idx))
            ));
        }

        dot.push('\n');

        for edge_idx in self.graph.edge_indices() {
            if let Some(transition) = self.graph.edge_weight(edge_idx) {
                dot.push_str(&format!(
                    "  \"{}\" -> \"{}\" [label=\"{}\"];\n",
                    transition.from_state,
                    transition.to_state,
                    transition.display_label()
                ));
            }
        }

        dot.push_str("}\n");
        dot
    }

    /// Get graph statistics
    pub fn stats(&self) -> GraphStats {
        let throw_states = self
            .all_states()
            .iter()
            .filter(|s| s.must_throw())
            .count();

        GraphStats {
            total_states: self.graph.node_count(),
            total_transitions: self.graph.edge_count(),
            throw_states,
            idle_states: self.graph.node_count() - throw_states,
        }
    }
}

#[derive(Debug, Clone)]
pub struct GraphStats {
    pub total_states: usize,
    pub total_transitions: usize,
    /// States with slot 0 occupied (a ball must be thrown this beat).
    pub throw_states: usize,
    /// States with slot 0 empty (the beat passes with no throw).
    pub idle_states: usize,
}

/// Enumerate every valid state: each size-`balls` subset of
/// `{0, .., max_height-1}`, walked in lexicographic order.
fn enumerate_states(balls: u8, max_height: u8) -> Vec<State> {
    let k = balls as usize;
    let n = max_height as usize;
    let mut combo: Vec<u8> = (0..balls).collect();
    let mut states = Vec::new();

    loop {
        states.push(State::from_slots(&combo, max_height));

        // Rightmost position that can still advance; position i tops out at n - k + i.
        let Some(i) = (0..k).rev().find(|&i| (combo[i] as usize) < n - k + i) else {
            break;
        };
        combo[i] += 1;
        for j in i + 1..k {
            combo[j] = combo[j - 1] + 1;
        }
    }

    states
}

/// Bucket an out-degree into a Graphviz fill color.
fn degree_color(out_degree: usize) -> &'static str {
    match out_degree {
        0 => "gray",
        1 => "lightblue",
        2 => "lightgreen",
        3 => "yellow",
        4 => "orange",
        _ => "red",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn binomial(n: u64, k: u64) -> u64 {
        if k > n {
            return 0;
        }
        (1..=k).fold(1, |acc, i| acc * (n - k + i) / i)
    }

    #[test]
    fn test_enumerate_states_complete_and_distinct() {
        let states = enumerate_states(3, 5);
        assert_eq!(states.len() as u64, binomial(5, 3));

        let encodings: HashSet<StateId> = states.iter().map(|s| s.encode()).collect();
        assert_eq!(encodings.len(), states.len());

        for state in &states {
            assert!(state.is_valid(3));
        }
    }

    #[test]
    fn test_node_count_is_binomial() {
        for (balls, max_height) in [(1, 1), (2, 3), (3, 5), (4, 7), (2, 8)] {
            let graph = StateGraph::build(balls, max_height).unwrap();
            assert_eq!(
                graph.node_count() as u64,
                binomial(max_height as u64, balls as u64),
                "node count mismatch for ({balls}, {max_height})"
            );
        }
    }

    #[test]
    fn test_invalid_arguments_rejected() {
        assert!(StateGraph::build(0, 5).unwrap_err().is_invalid_argument());
        assert!(StateGraph::build(5, 0).unwrap_err().is_invalid_argument());
        assert!(StateGraph::build(5, 3).unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_max_height_exceeding_word_width_rejected() {
        assert!(StateGraph::build(2, 65).unwrap_err().is_invalid_argument());
        assert!(StateGraph::build(1, 64).is_ok());
    }

    #[test]
    fn test_two_balls_height_three_scenario() {
        let graph = StateGraph::build(2, 3).unwrap();
        assert_eq!(graph.node_count(), 3);

        let encodings: HashSet<StateId> = graph.encodings().into_iter().collect();
        let expected: HashSet<StateId> = ["xx-", "x-x", "-xx"]
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(encodings, expected);

        // Slot 0 and 1 occupied: height 1 collides, heights 2 and 3 remain.
        let outgoing = graph.outgoing_transitions("xx-");
        assert_eq!(outgoing.len(), 2);
        let heights: HashSet<u8> = outgoing.iter().map(|t| t.height).collect();
        assert_eq!(heights, HashSet::from([2, 3]));

        // Slot 0 empty: a single idle edge leading to the shifted state.
        let outgoing = graph.outgoing_transitions("-xx");
        assert_eq!(outgoing.len(), 1);
        assert_eq!(outgoing[0].height, 0);
        assert_eq!(outgoing[0].to_state, "xx-");
    }

    #[test]
    fn test_one_ball_height_two_is_a_cycle() {
        let graph = StateGraph::build(1, 2).unwrap();
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 2);

        let outgoing = graph.outgoing_transitions("x-");
        assert_eq!(outgoing.len(), 1);
        assert_eq!(outgoing[0].height, 2);
        assert_eq!(outgoing[0].to_state, "-x");

        let outgoing = graph.outgoing_transitions("-x");
        assert_eq!(outgoing.len(), 1);
        assert_eq!(outgoing[0].height, 0);
        assert_eq!(outgoing[0].to_state, "x-");
    }

    #[test]
    fn test_out_degree_rule() {
        let graph = StateGraph::build(4, 7).unwrap();

        for state in graph.all_states() {
            let out = graph.outgoing_transitions(&state.encode()).len();
            if state.must_throw() {
                // One edge per height in 1..=max_height not already occupied.
                let expected = (1..=7).filter(|&h| !state.slots.contains(h)).count();
                assert_eq!(out, expected);
                // With all non-zero occupied slots colliding, that is
                // max_height - (balls - 1).
                assert_eq!(expected, 7 - (4 - 1));
            } else {
                assert_eq!(out, 1);
            }
        }
    }

    #[test]
    fn test_every_destination_is_valid() {
        let graph = StateGraph::build(3, 6).unwrap();

        for transition in graph.edges() {
            let to = graph
                .get_state(&transition.to_state)
                .expect("destination must be an enumerated node");
            assert!(to.is_valid(3));
            assert_eq!(to.max_height, 6);
        }
    }

    #[test]
    fn test_deterministic_construction() {
        let a = StateGraph::build(3, 5).unwrap();
        let b = StateGraph::build(3, 5).unwrap();

        let nodes_a: HashSet<StateId> = a.encodings().into_iter().collect();
        let nodes_b: HashSet<StateId> = b.encodings().into_iter().collect();
        assert_eq!(nodes_a, nodes_b);

        let edges_a: HashSet<Transition> = a.edges().into_iter().cloned().collect();
        let edges_b: HashSet<Transition> = b.edges().into_iter().cloned().collect();
        assert_eq!(edges_a, edges_b);
        assert_eq!(a.edge_count(), b.edge_count());
    }

    #[test]
    fn test_graph_stats() {
        let graph = StateGraph::build(2, 3).unwrap();
        let stats = graph.stats();
        assert_eq!(stats.total_states, 3);
        // xx- and x-x each have 2 outgoing edges, -xx has 1.
        assert_eq!(stats.total_transitions, 5);
        assert_eq!(stats.throw_states, 2);
        assert_eq!(stats.idle_states, 1);

        let histogram = graph.degree_histogram(DegreeKind::Total);
        assert_eq!(histogram.values().sum::<usize>(), graph.node_count());
    }

    #[test]
    fn test_to_dot_output() {
        let graph = StateGraph::build(1, 2).unwrap();
        let dot = graph.to_dot();
        assert!(dot.contains("digraph StateGraph"));
        assert!(dot.contains("\"x-\""));
        assert!(dot.contains("\"-x\""));
        assert!(dot.contains("\"x-\" -> \"-x\" [label=\"2\"]"));
        assert!(dot.contains("\"-x\" -> \"x-\" [label=\"idle\"]"));
        // Both nodes have out-degree 1.
        assert!(dot.contains("lightblue"));
    }
}
