//! Core graph data structures

mod edge;
mod endpoint;
mod mixed_graph;
mod node;


pub use edge::{Edge, EdgeTypeProbability};
pub use endpoint::{EdgeProperty, EdgeType, Endpoint, ParseEdgeTypeError};
pub use mixed_graph::{Graph, GraphError, GraphMetadata, GraphResult};
pub use node::{Node, NodePair};
