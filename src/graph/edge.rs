//! Edge representation with endpoint marks and edge-type probabilities

use super::endpoint::{EdgeProperty, EdgeType, Endpoint};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Probability that a node pair carries a given edge type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeTypeProbability {
    /// Type relative to the owning edge's (node1, node2) order
    pub edge_type: EdgeType,
    /// Share of the ensemble showing this type (0.0 - 1.0)
    pub probability: f64,
    /// Properties of the edge instance that represented this type
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub properties: BTreeSet<EdgeProperty>,
}

impl EdgeTypeProbability {
    pub fn new(edge_type: EdgeType, probability: f64) -> Self {
        Self {
            edge_type,
            probability,
            properties: BTreeSet::new(),
        }
    }

    pub fn with_properties(mut self, properties: impl IntoIterator<Item = EdgeProperty>) -> Self {
        self.properties.extend(properties);
        self
    }
}

/// An edge of a mixed graph.
///
/// The endpoint marks are oriented: `endpoint1` sits at `node1` and
/// `endpoint2` at `node2`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub node1: String,
    pub node2: String,
    pub endpoint1: Endpoint,
    pub endpoint2: Endpoint,
    /// Categorical annotations (PAG colorings)
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub properties: BTreeSet<EdgeProperty>,
    /// Full edge-type distribution, highest probability first
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub edge_type_probabilities: Vec<EdgeTypeProbability>,
    /// Probability that the pair has any real edge
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub probability: Option<f64>,
}

impl Edge {
    pub fn new(
        node1: impl Into<String>,
        node2: impl Into<String>,
        endpoint1: Endpoint,
        endpoint2: Endpoint,
    ) -> Self {
        Self {
            node1: node1.into(),
            node2: node2.into(),
            endpoint1,
            endpoint2,
            properties: BTreeSet::new(),
            edge_type_probabilities: Vec::new(),
            probability: None,
        }
    }

    /// Edge whose marks realize `edge_type` between (node1, node2)
    pub fn of_type(
        node1: impl Into<String>,
        node2: impl Into<String>,
        edge_type: EdgeType,
    ) -> Self {
        let (endpoint1, endpoint2) = edge_type.endpoints();
        Self::new(node1, node2, endpoint1, endpoint2)
    }

    /// `node1 --> node2`
    pub fn directed(node1: impl Into<String>, node2: impl Into<String>) -> Self {
        Self::of_type(node1, node2, EdgeType::Ta)
    }

    /// `node1 <-> node2`
    pub fn bidirected(node1: impl Into<String>, node2: impl Into<String>) -> Self {
        Self::of_type(node1, node2, EdgeType::Aa)
    }

    /// `node1 o-o node2`
    pub fn nondirected(node1: impl Into<String>, node2: impl Into<String>) -> Self {
        Self::of_type(node1, node2, EdgeType::Cc)
    }

    /// `node1 o-> node2`
    pub fn partially_oriented(node1: impl Into<String>, node2: impl Into<String>) -> Self {
        Self::of_type(node1, node2, EdgeType::Ca)
    }

    /// `node1 --- node2`
    pub fn undirected(node1: impl Into<String>, node2: impl Into<String>) -> Self {
        Self::of_type(node1, node2, EdgeType::Tt)
    }

    pub fn with_property(mut self, property: EdgeProperty) -> Self {
        self.properties.insert(property);
        self
    }

    pub fn with_edge_type_probabilities(mut self, probabilities: Vec<EdgeTypeProbability>) -> Self {
        self.edge_type_probabilities = probabilities;
        self
    }

    pub fn with_probability(mut self, probability: f64) -> Self {
        self.probability = Some(probability);
        self
    }

    /// Mark at the end of the edge touching `node`, if the edge touches it
    pub fn proximal_endpoint(&self, node: &str) -> Option<Endpoint> {
        if self.node1 == node {
            Some(self.endpoint1)
        } else if self.node2 == node {
            Some(self.endpoint2)
        } else {
            None
        }
    }

    /// Type of this edge as seen from `node1` toward `node2`.
    ///
    /// `Nil` when the edge does not join the two nodes or the marks match
    /// no real pattern.
    pub fn edge_type(&self, node1: &str, node2: &str) -> EdgeType {
        if node1 == node2 {
            return EdgeType::Nil;
        }
        match (self.proximal_endpoint(node1), self.proximal_endpoint(node2)) {
            (Some(e1), Some(e2)) => EdgeType::from_endpoints(e1, e2),
            _ => EdgeType::Nil,
        }
    }

    /// Placeholder for a pair whose most likely state is "no edge"
    pub fn is_null(&self) -> bool {
        self.endpoint1 == Endpoint::Null || self.endpoint2 == Endpoint::Null
    }

    /// Recorded probability of `edge_type`, relative to this edge's node order
    pub fn probability_of(&self, edge_type: EdgeType) -> Option<f64> {
        self.edge_type_probabilities
            .iter()
            .find(|etp| etp.edge_type == edge_type)
            .map(|etp| etp.probability)
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.node1,
            Endpoint::pair_symbol(self.endpoint1, self.endpoint2),
            self.node2
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edge_type_depends_on_orientation() {
        let edge = Edge::directed("X", "Y");
        assert_eq!(edge.edge_type("X", "Y"), EdgeType::Ta);
        assert_eq!(edge.edge_type("Y", "X"), EdgeType::At);

        let edge = Edge::partially_oriented("A", "B");
        assert_eq!(edge.edge_type("A", "B"), EdgeType::Ca);
        assert_eq!(edge.edge_type("B", "A"), EdgeType::Ac);
    }

    #[test]
    fn edge_type_of_foreign_nodes_is_nil() {
        let edge = Edge::directed("X", "Y");
        assert_eq!(edge.edge_type("X", "Z"), EdgeType::Nil);
        assert_eq!(edge.edge_type("X", "X"), EdgeType::Nil);
    }

    #[test]
    fn edge_type_reversal_matches_swapped_lookup() {
        let edges = [
            Edge::directed("A", "B"),
            Edge::bidirected("A", "B"),
            Edge::nondirected("A", "B"),
            Edge::partially_oriented("B", "A"),
            Edge::undirected("A", "B"),
            Edge::new("A", "B", Endpoint::Tail, Endpoint::Circle),
        ];
        for edge in edges {
            assert_eq!(edge.edge_type("A", "B").reverse(), edge.edge_type("B", "A"), "{}", edge);
        }
    }

    #[test]
    fn null_edges() {
        assert!(Edge::of_type("A", "B", EdgeType::Nil).is_null());
        assert!(!Edge::directed("A", "B").is_null());
    }

    #[test]
    fn display_uses_symbols() {
        assert_eq!(Edge::directed("X", "Y").to_string(), "X --> Y");
        assert_eq!(Edge::of_type("X", "Y", EdgeType::Ac).to_string(), "X <-o Y");
        assert_eq!(Edge::of_type("X", "Y", EdgeType::Nil).to_string(), "X ... Y");
    }

    #[test]
    fn probability_lookup() {
        let edge = Edge::directed("X", "Y").with_edge_type_probabilities(vec![
            EdgeTypeProbability::new(EdgeType::Ta, 0.6),
            EdgeTypeProbability::new(EdgeType::Nil, 0.4),
        ]);
        assert_eq!(edge.probability_of(EdgeType::Ta), Some(0.6));
        assert_eq!(edge.probability_of(EdgeType::At), None);
    }
}
