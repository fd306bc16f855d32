//! Side-by-side text report of reference edges and predicted distributions

use crate::graph::{Edge, Graph, NodePair};
use std::collections::BTreeSet;
use std::fmt::Write;

const RULE_WIDTH: usize = 80;
const SUB_RULE: &str = "--------------------";

/// For every pair with an edge in either graph, the reference edge
/// followed by the predicted edge-type distribution.
///
/// Entries are re-oriented to the header's node order. Pairs absent from
/// the reference whose prediction is missing or a null placeholder are
/// left out.
pub fn edge_type_details(reference: &Graph, predicted: &Graph) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Graph Nodes:");
    let _ = writeln!(out, "{}", "=".repeat(RULE_WIDTH));
    let names: Vec<&str> = predicted.node_names().collect();
    let _ = writeln!(out, "{}", names.join(","));
    let _ = writeln!(out);
    let _ = writeln!(out);
    let _ = writeln!(out, "Graph Edge Type Probabilities:");
    let _ = writeln!(out, "{}", "=".repeat(RULE_WIDTH));
    let _ = writeln!(out);

    let pairs: BTreeSet<&NodePair> = reference
        .edge_pairs()
        .chain(predicted.edge_pairs())
        .collect();
    for pair in pairs {
        let reference_edge = reference.get_edge(pair.first(), pair.second());
        let predicted_edge = predicted.get_edge(pair.first(), pair.second());

        let (node1, node2) = match reference_edge {
            Some(edge) => {
                let _ = writeln!(out, "True: {}", edge);
                (edge.node1.as_str(), edge.node2.as_str())
            }
            None if predicted_edge.is_some_and(|edge| !edge.is_null()) => {
                let _ = writeln!(out, "True: {} ... {}", pair.first(), pair.second());
                (pair.first(), pair.second())
            }
            None => continue,
        };
        let _ = writeln!(out, "{}", SUB_RULE);

        match predicted_edge {
            None => {
                let _ = writeln!(out, "{} ... {}: 1.000000", node1, node2);
            }
            Some(edge) => write_distribution(&mut out, edge, node1, node2),
        }
        let _ = writeln!(out);
    }

    out
}

fn write_distribution(out: &mut String, edge: &Edge, node1: &str, node2: &str) {
    let flipped = edge.node1 != node1;
    for etp in &edge.edge_type_probabilities {
        let edge_type = if flipped { etp.edge_type.reverse() } else { etp.edge_type };
        let _ = writeln!(
            out,
            "{} {} {}: {:.6}",
            node1,
            edge_type.symbol(),
            node2,
            etp.probability
        );
    }
}
