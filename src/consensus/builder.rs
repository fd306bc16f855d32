//! Consensus builder: reduces an ensemble of candidate graphs to one graph

use super::tally::PairTally;
use crate::config::ScoringConfig;
use crate::graph::{Edge, Graph, NodePair};
use std::collections::BTreeSet;
use tracing::{debug, warn};

/// Builds a probability-annotated consensus graph from candidate graphs.
///
/// Candidates are read-only; the consensus graph is assembled fresh from
/// independent per-pair tallies.
#[derive(Debug, Clone)]
pub struct ConsensusBuilder {
    /// Tally pairs on the rayon pool when the `parallel` feature is enabled
    parallel: bool,
}

impl Default for ConsensusBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsensusBuilder {
    pub fn new() -> Self {
        Self { parallel: true }
    }

    pub fn from_config(config: &ScoringConfig) -> Self {
        Self {
            parallel: config.parallel,
        }
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn is_parallel(&self) -> bool {
        self.parallel
    }

    /// Build the consensus of a complete ensemble
    pub fn build(&self, candidates: &[Graph]) -> Graph {
        self.build_from(candidates.iter().map(Some))
    }

    /// Build the consensus of an ensemble that may contain failed runs.
    ///
    /// `None` entries are dropped before counting, so they do not dilute
    /// probabilities. An ensemble with no graphs yields an empty graph.
    pub fn build_from<'a, I>(&self, candidates: I) -> Graph
    where
        I: IntoIterator<Item = Option<&'a Graph>>,
    {
        let candidates: Vec<&Graph> = candidates.into_iter().flatten().collect();
        let Some(first) = candidates.first() else {
            debug!("empty ensemble, returning empty consensus graph");
            return Graph::new();
        };

        let mut consensus = Graph::with_nodes(first.nodes().cloned()).named("consensus");
        let pairs = structured_pairs(&candidates, &consensus);
        debug!(
            candidates = candidates.len(),
            pairs = pairs.len(),
            parallel = self.parallel,
            "building consensus graph"
        );

        for edge in self.tally_pairs(&pairs, &candidates).into_iter().flatten() {
            if let Err(e) = consensus.add_edge(edge) {
                warn!(error = %e, "dropping consensus edge");
            }
        }

        consensus
    }

    fn tally_pairs(&self, pairs: &[NodePair], candidates: &[&Graph]) -> Vec<Option<Edge>> {
        let tally = |pair: &NodePair| PairTally::count(pair, candidates).into_edge();

        #[cfg(feature = "parallel")]
        {
            if self.parallel {
                use rayon::prelude::*;
                return pairs.par_iter().map(tally).collect();
            }
        }

        pairs.iter().map(tally).collect()
    }
}

/// Canonical pairs with an edge in any candidate.
///
/// Pairs naming a node outside the consensus node set are skipped.
fn structured_pairs(candidates: &[&Graph], consensus: &Graph) -> Vec<NodePair> {
    let mut pairs = BTreeSet::new();
    for graph in candidates {
        for pair in graph.edge_pairs() {
            if consensus.contains_node(pair.first()) && consensus.contains_node(pair.second()) {
                pairs.insert(pair.clone());
            } else {
                warn!(
                    node1 = pair.first(),
                    node2 = pair.second(),
                    "candidate edge names a node outside the consensus node set"
                );
            }
        }
    }
    pairs.into_iter().collect()
}
