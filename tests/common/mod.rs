//! Common test utilities for consensus and calibration tests
//!
//! Builds small graphs by hand and random ensembles from a seeded RNG so
//! every run sees the same candidates.

#![allow(dead_code)]

use pag_calibration::{Edge, EdgeType, Graph};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Variable names `V0..Vn`
pub fn variables(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("V{}", i)).collect()
}

/// Graph over `nodes` with one edge per `(node1, node2, type)` triple
pub fn graph_of(nodes: &[&str], edges: &[(&str, &str, EdgeType)]) -> Graph {
    let mut graph = Graph::with_nodes(nodes.iter().copied());
    for (node1, node2, edge_type) in edges {
        graph
            .add_edge(Edge::of_type(*node1, *node2, *edge_type))
            .expect("test edge should fit its graph");
    }
    graph
}

/// `size` random candidate graphs over the same variables.
///
/// Each unordered pair gets an edge with probability `density`; its type is
/// drawn from the seven real types and its stored orientation is random.
pub fn random_ensemble(seed: u64, nodes: &[String], size: usize, density: f64) -> Vec<Graph> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..size)
        .map(|i| {
            let mut graph =
                Graph::with_nodes(nodes.iter().cloned()).named(format!("candidate-{}", i));
            for (a, left) in nodes.iter().enumerate() {
                for right in &nodes[a + 1..] {
                    if !rng.gen_bool(density) {
                        continue;
                    }
                    let edge_type = EdgeType::ALL[rng.gen_range(0..7)];
                    let edge = if rng.gen_bool(0.5) {
                        Edge::of_type(left.as_str(), right.as_str(), edge_type)
                    } else {
                        Edge::of_type(right.as_str(), left.as_str(), edge_type)
                    };
                    graph.add_edge(edge).expect("random edge should fit its graph");
                }
            }
            graph
        })
        .collect()
}
