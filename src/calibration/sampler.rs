//! Calibration sampling: pairs a predicted graph against a reference graph

use super::record::{CalibrationRecord, CalibrationSet};
use crate::graph::{EdgeType, Graph};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// What event a calibration record describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "edge_type", rename_all = "snake_case")]
pub enum SamplingMode {
    /// The pair carries exactly this edge type, seen from node1 to node2
    DirectEdge(EdgeType),
    /// The pair carries any edge at all
    AnyEdge,
}

/// Extracts calibration records from a predicted and a reference graph.
///
/// Pairs are enumerated over the reference graph's variables and looked up
/// by name in both graphs; a name missing from either graph reads as
/// "no edge".
#[derive(Debug, Clone, Copy)]
pub struct CalibrationSampler<'a> {
    predicted: &'a Graph,
    reference: &'a Graph,
}

impl<'a> CalibrationSampler<'a> {
    pub fn new(predicted: &'a Graph, reference: &'a Graph) -> Self {
        Self { predicted, reference }
    }

    pub fn sample(&self, mode: SamplingMode) -> CalibrationSet {
        match mode {
            SamplingMode::DirectEdge(edge_type) => self.direct_edge(edge_type),
            SamplingMode::AnyEdge => self.any_edge(),
        }
    }

    /// One record per pair for `target`.
    ///
    /// Asymmetric types are sampled in both directions; symmetric ones once
    /// per unordered pair.
    pub fn direct_edge(&self, target: EdgeType) -> CalibrationSet {
        let set: CalibrationSet = self
            .pairs(target.is_asymmetric())
            .into_iter()
            .map(|(node1, node2)| {
                CalibrationRecord::new(
                    node1,
                    node2,
                    target,
                    self.observed_type(node1, node2, target),
                    self.predicted_type(node1, node2, target),
                )
            })
            .collect();
        debug!(edge_type = %target, records = set.len(), "sampled direct-edge records");
        set
    }

    /// One record per unordered pair for "has any edge", tagged `tt`
    pub fn any_edge(&self) -> CalibrationSet {
        let set: CalibrationSet = self
            .pairs(false)
            .into_iter()
            .map(|(node1, node2)| {
                let observed = u8::from(self.reference.has_edge(node1, node2));
                let predicted = self
                    .predicted
                    .get_edge(node1, node2)
                    .and_then(|edge| edge.probability)
                    .unwrap_or(0.0);
                CalibrationRecord::new(node1, node2, EdgeType::Tt, observed, predicted)
            })
            .collect();
        debug!(records = set.len(), "sampled any-edge records");
        set
    }

    fn pairs(&self, ordered: bool) -> Vec<(&'a str, &'a str)> {
        let names: Vec<&'a str> = self.reference.node_names().collect();
        let mut pairs = Vec::new();
        for (i, a) in names.iter().enumerate() {
            for b in &names[i + 1..] {
                pairs.push((*a, *b));
                if ordered {
                    pairs.push((*b, *a));
                }
            }
        }
        pairs
    }

    fn observed_type(&self, node1: &str, node2: &str, target: EdgeType) -> u8 {
        let matches = self
            .reference
            .get_edge(node1, node2)
            .map(|edge| edge.edge_type(node1, node2) == target)
            .unwrap_or(false);
        u8::from(matches)
    }

    /// Probability of `target` on the predicted edge, re-oriented to
    /// (node1, node2) when the edge is stored the other way round
    fn predicted_type(&self, node1: &str, node2: &str, target: EdgeType) -> f64 {
        self.predicted
            .get_edge(node1, node2)
            .and_then(|edge| {
                let lookup = if edge.node1 == node1 { target } else { target.reverse() };
                edge.probability_of(lookup)
            })
            .unwrap_or(0.0)
    }
}
