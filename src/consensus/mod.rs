//! Ensemble consensus
//!
//! Reduces N candidate graphs over the same variables (typically bootstrap
//! or randomized search results) to one graph whose edges carry the full
//! edge-type distribution observed across the ensemble.
//!
//! # Example
//!
//! ```
//! use pag_calibration::{ConsensusBuilder, Edge, EdgeType, Graph};
//!
//! let mut g1 = Graph::with_nodes(["X", "Y"]);
//! g1.add_edge(Edge::directed("X", "Y")).unwrap();
//! let g2 = Graph::with_nodes(["X", "Y"]);
//!
//! let consensus = ConsensusBuilder::new().build(&[g1, g2]);
//! let edge = consensus.get_edge("X", "Y").unwrap();
//! assert_eq!(edge.probability_of(EdgeType::Ta), Some(0.5));
//! ```

mod builder;
mod tally;

pub use builder::ConsensusBuilder;
pub use tally::PairTally;
