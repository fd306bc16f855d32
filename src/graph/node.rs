//! Node representation and name-keyed node pairs

use serde::{Deserialize, Serialize};
use std::fmt;

/// A variable in a graph, identified by name.
///
/// Nodes in independently built graphs are matched by name only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Node {
    name: String,
}

impl Node {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl From<&str> for Node {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Node {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

/// Unordered pair of node names, stored in canonical (lexicographic) order
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodePair {
    first: String,
    second: String,
}

impl NodePair {
    pub fn new(a: impl Into<String>, b: impl Into<String>) -> Self {
        let (a, b) = (a.into(), b.into());
        if a <= b {
            Self { first: a, second: b }
        } else {
            Self { first: b, second: a }
        }
    }

    /// Lexicographically smaller name
    pub fn first(&self) -> &str {
        &self.first
    }

    /// Lexicographically larger name
    pub fn second(&self) -> &str {
        &self.second
    }
}
