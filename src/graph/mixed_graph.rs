//! Graph: a set of named nodes and at most one edge per node pair

use super::edge::Edge;
use super::node::{Node, NodePair};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use thiserror::Error;

/// Errors raised when an edge does not fit the graph it is added to
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("Node not found: {0}")]
    UnknownNode(String),

    #[error("Self loop on node: {0}")]
    SelfLoop(String),
}

/// Result type for graph operations
pub type GraphResult<T> = Result<T, GraphError>;

/// Metadata about a graph
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphMetadata {
    /// Human-readable label (e.g. "bootstrap-17", "consensus")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// When the graph was created
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// A mixed graph over named variables.
///
/// Edges are indexed by unordered node pair; adding a second edge for the
/// same pair replaces the first.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(try_from = "GraphRepr", into = "GraphRepr")]
pub struct Graph {
    metadata: GraphMetadata,
    nodes: BTreeSet<Node>,
    edges: BTreeMap<NodePair, Edge>,
}

impl Graph {
    /// Create an empty graph
    pub fn new() -> Self {
        Self {
            metadata: GraphMetadata {
                created_at: Some(Utc::now()),
                ..Default::default()
            },
            nodes: BTreeSet::new(),
            edges: BTreeMap::new(),
        }
    }

    /// Create an empty graph over the given variables
    pub fn with_nodes<I, N>(nodes: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<Node>,
    {
        let mut graph = Self::new();
        for node in nodes {
            graph.add_node(node);
        }
        graph
    }

    /// Set the graph label
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.metadata.name = Some(name.into());
        self
    }

    pub fn metadata(&self) -> &GraphMetadata {
        &self.metadata
    }

    pub fn name(&self) -> Option<&str> {
        self.metadata.name.as_deref()
    }

    /// Add a node; returns false if a node with that name already exists
    pub fn add_node(&mut self, node: impl Into<Node>) -> bool {
        self.nodes.insert(node.into())
    }

    /// Add an edge between two existing nodes.
    ///
    /// Returns the edge previously stored for the same pair, if any.
    pub fn add_edge(&mut self, edge: Edge) -> GraphResult<Option<Edge>> {
        if edge.node1 == edge.node2 {
            return Err(GraphError::SelfLoop(edge.node1));
        }
        for name in [&edge.node1, &edge.node2] {
            if !self.contains_node(name) {
                return Err(GraphError::UnknownNode(name.clone()));
            }
        }
        let pair = NodePair::new(edge.node1.as_str(), edge.node2.as_str());
        Ok(self.edges.insert(pair, edge))
    }

    /// Edge between `a` and `b` in either orientation
    pub fn get_edge(&self, a: &str, b: &str) -> Option<&Edge> {
        self.edges.get(&NodePair::new(a, b))
    }

    pub fn has_edge(&self, a: &str, b: &str) -> bool {
        self.get_edge(a, b).is_some()
    }

    pub fn contains_node(&self, name: &str) -> bool {
        self.nodes.contains(&Node::new(name))
    }

    /// Nodes in lexicographic order
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    /// Node names in lexicographic order
    pub fn node_names(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(Node::name)
    }

    /// Edges ordered by their canonical node pair
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.values()
    }

    /// Canonical pairs that carry an edge
    pub fn edge_pairs(&self) -> impl Iterator<Item = &NodePair> {
        self.edges.keys()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// True when the graph has neither nodes nor edges
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty()
    }

    /// Copy of this graph without "probabilistic absence" placeholder edges
    pub fn without_null_edges(&self) -> Graph {
        Graph {
            metadata: self.metadata.clone(),
            nodes: self.nodes.clone(),
            edges: self
                .edges
                .iter()
                .filter(|(_, edge)| !edge.is_null())
                .map(|(pair, edge)| (pair.clone(), edge.clone()))
                .collect(),
        }
    }
}

/// Wire form of a graph: node list plus edge list
#[derive(Debug, Clone, Serialize, Deserialize)]
struct GraphRepr {
    #[serde(flatten)]
    metadata: GraphMetadata,
    nodes: Vec<Node>,
    #[serde(default)]
    edges: Vec<Edge>,
}

impl TryFrom<GraphRepr> for Graph {
    type Error = GraphError;

    fn try_from(repr: GraphRepr) -> Result<Self, Self::Error> {
        let mut graph = Graph {
            metadata: repr.metadata,
            nodes: repr.nodes.into_iter().collect(),
            edges: BTreeMap::new(),
        };
        for edge in repr.edges {
            graph.add_edge(edge)?;
        }
        Ok(graph)
    }
}

impl From<Graph> for GraphRepr {
    fn from(graph: Graph) -> Self {
        Self {
            metadata: graph.metadata,
            nodes: graph.nodes.into_iter().collect(),
            edges: graph.edges.into_values().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::EdgeType;

    fn xyz() -> Graph {
        Graph::with_nodes(["X", "Y", "Z"])
    }

    #[test]
    fn test_add_node_rejects_duplicate_names() {
        let mut graph = xyz();
        assert!(!graph.add_node("X"));
        assert!(graph.add_node("W"));
        assert_eq!(graph.node_count(), 4);
    }

    #[test]
    fn test_nodes_are_lexicographic() {
        let graph = Graph::with_nodes(["b", "c", "a"]);
        let names: Vec<_> = graph.node_names().collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_get_edge_is_unordered() {
        let mut graph = xyz();
        graph.add_edge(Edge::directed("Y", "X")).unwrap();
        let edge = graph.get_edge("X", "Y").unwrap();
        assert_eq!(edge.edge_type("Y", "X"), EdgeType::Ta);
        assert!(graph.has_edge("Y", "X"));
        assert!(!graph.has_edge("X", "Z"));
    }

    #[test]
    fn test_duplicate_pair_last_write_wins() {
        let mut graph = xyz();
        graph.add_edge(Edge::directed("X", "Y")).unwrap();
        let replaced = graph.add_edge(Edge::bidirected("Y", "X")).unwrap();

        assert_eq!(replaced, Some(Edge::directed("X", "Y")));
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.get_edge("X", "Y").unwrap().edge_type("X", "Y"), EdgeType::Aa);
    }

    #[test]
    fn test_add_edge_to_unknown_node_fails() {
        let mut graph = xyz();
        let err = graph.add_edge(Edge::directed("X", "Q")).unwrap_err();
        assert_eq!(err, GraphError::UnknownNode("Q".to_string()));
        let err = graph.add_edge(Edge::directed("X", "X")).unwrap_err();
        assert_eq!(err, GraphError::SelfLoop("X".to_string()));
    }

    #[test]
    fn test_without_null_edges() {
        let mut graph = xyz();
        graph.add_edge(Edge::directed("X", "Y")).unwrap();
        graph.add_edge(Edge::of_type("Y", "Z", EdgeType::Nil)).unwrap();

        let filtered = graph.without_null_edges();
        assert_eq!(filtered.edge_count(), 1);
        assert_eq!(filtered.node_count(), 3);
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn test_empty_graph() {
        assert!(Graph::new().is_empty());
        assert!(!xyz().is_empty());
    }
}
