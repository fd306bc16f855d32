//! pag-calibration: ensemble consensus and calibration scoring for causal graphs
//!
//! Reduces an ensemble of candidate graphs (bootstrap or randomized causal
//! search results over the same variables) to one probability-annotated
//! consensus graph, then measures how well those probabilities are
//! calibrated against a known reference graph.
//!
//! # Core Concepts
//!
//! - **Edge types**: the eight symbolic types (`-->`, `<--`, `o->`, `<-o`,
//!   `o-o`, `<->`, `---`, no edge) an edge can show from a fixed node order
//! - **Consensus**: per node pair, the frequency of each edge type across the
//!   ensemble
//! - **Calibration**: (observed, predicted) samples per node pair, scored with
//!   the Hosmer-Lemeshow statistic
//!
//! # Example
//!
//! ```
//! use pag_calibration::{ConsensusBuilder, Edge, Graph, GraphStatistics, ScoringConfig};
//!
//! let mut truth = Graph::with_nodes(["X", "Y", "Z"]);
//! truth.add_edge(Edge::directed("X", "Y")).unwrap();
//!
//! let ensemble: Vec<Graph> = (0..4)
//!     .map(|i| {
//!         let mut g = Graph::with_nodes(["X", "Y", "Z"]);
//!         if i < 3 {
//!             g.add_edge(Edge::directed("X", "Y")).unwrap();
//!         }
//!         g
//!     })
//!     .collect();
//!
//! let consensus = ConsensusBuilder::new().build(&ensemble);
//! let stats = GraphStatistics::compute(&consensus, &truth, &ScoringConfig::default()).unwrap();
//! assert_eq!(stats.direct_edges().positives(), 1);
//! ```

pub mod calibration;
pub mod config;
pub mod consensus;
mod graph;

pub use calibration::{
    edge_type_details, CalibrationRecord, CalibrationSampler, CalibrationSet, GraphStatistics,
    HosmerLemeshow, ObservedPredicted, RecordKey, RiskGroup, SamplingMode, ScoringError,
    ScoringResult,
};
pub use config::{ConfigError, ConfigResult, ScoringConfig, DEFAULT_RISK_GROUPS};
pub use consensus::{ConsensusBuilder, PairTally};
pub use graph::{
    Edge, EdgeProperty, EdgeType, EdgeTypeProbability, Endpoint, Graph, GraphError, GraphMetadata,
    GraphResult, Node, NodePair, ParseEdgeTypeError,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
