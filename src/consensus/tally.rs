//! Per-pair edge-type frequency tally across an ensemble

use crate::graph::{Edge, EdgeType, EdgeTypeProbability, Graph, NodePair};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Edge-type counts for one canonical node pair across all candidates.
///
/// Types are taken relative to the pair's canonical order
/// (`pair.first()`, `pair.second()`), whatever orientation each candidate
/// stored its edge in.
#[derive(Debug, Clone)]
pub struct PairTally<'g> {
    pair: NodePair,
    counts: BTreeMap<EdgeType, usize>,
    /// One edge instance per observed type; the latest candidate wins
    representatives: BTreeMap<EdgeType, &'g Edge>,
    null_count: usize,
    total: usize,
}

impl<'g> PairTally<'g> {
    /// Look the pair up in every candidate, matching nodes by name
    pub fn count(pair: &NodePair, candidates: &[&'g Graph]) -> Self {
        let mut tally = Self {
            pair: pair.clone(),
            counts: BTreeMap::new(),
            representatives: BTreeMap::new(),
            null_count: 0,
            total: candidates.len(),
        };

        for graph in candidates {
            match graph.get_edge(pair.first(), pair.second()) {
                None => tally.null_count += 1,
                Some(edge) => {
                    let edge_type = edge.edge_type(pair.first(), pair.second());
                    *tally.counts.entry(edge_type).or_insert(0) += 1;
                    tally.representatives.insert(edge_type, edge);
                }
            }
        }

        tally
    }

    pub fn pair(&self) -> &NodePair {
        &self.pair
    }

    /// Number of candidates whose edge for this pair has `edge_type`
    pub fn count_of(&self, edge_type: EdgeType) -> usize {
        self.counts.get(&edge_type).copied().unwrap_or(0)
    }

    /// Number of candidates with no edge for this pair
    pub fn null_count(&self) -> usize {
        self.null_count
    }

    /// Ensemble size
    pub fn total(&self) -> usize {
        self.total
    }

    /// Distribution over observed types, highest probability first.
    ///
    /// Absent edges and edges whose marks match no real pattern share the
    /// single `nil` entry. The distribution is empty only when every
    /// candidate lacks the edge. Equal probabilities are ordered by
    /// `EdgeType` declaration rank.
    pub fn probabilities(&self) -> Vec<EdgeTypeProbability> {
        if self.null_count == self.total {
            return Vec::new();
        }
        let n = self.total as f64;

        let mut probabilities: Vec<EdgeTypeProbability> = self
            .counts
            .iter()
            .filter(|(edge_type, count)| **edge_type != EdgeType::Nil && **count > 0)
            .map(|(edge_type, count)| {
                let properties = self
                    .representatives
                    .get(edge_type)
                    .map(|edge| edge.properties.clone())
                    .unwrap_or_default();
                EdgeTypeProbability::new(*edge_type, *count as f64 / n).with_properties(properties)
            })
            .collect();

        let nil_count = self.null_count + self.count_of(EdgeType::Nil);
        if nil_count > 0 {
            probabilities.push(EdgeTypeProbability::new(EdgeType::Nil, nil_count as f64 / n));
        }

        probabilities.sort_by(by_descending_probability);
        probabilities
    }

    /// The consensus edge for this pair, or `None` when no candidate has
    /// an edge for it.
    ///
    /// The edge realizes the top entry (a NULL/NULL placeholder when that
    /// entry is `nil`), carries the full distribution, and its aggregate
    /// probability is the sum of the non-`nil` entries.
    pub fn into_edge(self) -> Option<Edge> {
        let probabilities = self.probabilities();
        let top = probabilities.first()?;

        let mut edge = Edge::of_type(self.pair.first(), self.pair.second(), top.edge_type);
        if let Some(representative) = self.representatives.get(&top.edge_type) {
            edge.properties = representative.properties.clone();
        }

        let aggregate: f64 = probabilities
            .iter()
            .filter(|etp| etp.edge_type != EdgeType::Nil)
            .map(|etp| etp.probability)
            .sum();

        Some(
            edge.with_edge_type_probabilities(probabilities)
                .with_probability(aggregate),
        )
    }
}

/// Descending probability, ties broken by `EdgeType` rank
fn by_descending_probability(a: &EdgeTypeProbability, b: &EdgeTypeProbability) -> Ordering {
    b.probability
        .total_cmp(&a.probability)
        .then_with(|| a.edge_type.cmp(&b.edge_type))
}
