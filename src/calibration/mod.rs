//! Calibration of a probabilistic graph against a reference graph
//!
//! A [`CalibrationSampler`] turns every node pair into (observed, predicted)
//! records, and [`HosmerLemeshow`] scores how well the predicted
//! probabilities match observed frequencies across risk groups.
//!
//! # Example
//!
//! ```
//! use pag_calibration::{
//!     CalibrationSampler, Edge, EdgeType, EdgeTypeProbability, Graph, HosmerLemeshow,
//! };
//!
//! let mut reference = Graph::with_nodes(["X", "Y"]);
//! reference.add_edge(Edge::directed("X", "Y")).unwrap();
//!
//! let mut predicted = Graph::with_nodes(["X", "Y"]);
//! predicted
//!     .add_edge(
//!         Edge::directed("X", "Y")
//!             .with_edge_type_probabilities(vec![EdgeTypeProbability::new(EdgeType::Ta, 0.73)]),
//!     )
//!     .unwrap();
//!
//! let records = CalibrationSampler::new(&predicted, &reference).direct_edge(EdgeType::Ta);
//! assert_eq!(records.get("X", "Y", EdgeType::Ta).unwrap().predicted, 0.73);
//!
//! let hl = HosmerLemeshow::compute(&records.observed_predicted(), 2).unwrap();
//! assert_eq!(hl.plot_points().len(), 2);
//! ```

mod hosmer_lemeshow;
mod record;
mod report;
mod sampler;
mod statistics;

pub use hosmer_lemeshow::{HosmerLemeshow, RiskGroup, ScoringError, ScoringResult};
pub use record::{CalibrationRecord, CalibrationSet, ObservedPredicted, RecordKey};
pub use report::edge_type_details;
pub use sampler::{CalibrationSampler, SamplingMode};
pub use statistics::GraphStatistics;
