//! Graph statistics: calibration samples plus their Hosmer-Lemeshow score

use super::hosmer_lemeshow::{HosmerLemeshow, ScoringResult};
use super::record::CalibrationSet;
use super::sampler::CalibrationSampler;
use crate::config::ScoringConfig;
use crate::graph::{EdgeType, Graph};
use chrono::{DateTime, Utc};
use std::fmt::Write;
use tracing::info;

/// Calibration of a predicted graph against a reference graph for one
/// edge-type family
#[derive(Debug, Clone)]
pub struct GraphStatistics {
    edge_type: EdgeType,
    direct_edges: CalibrationSet,
    any_edges: CalibrationSet,
    hosmer_lemeshow: HosmerLemeshow,
    generated_at: DateTime<Utc>,
}

impl GraphStatistics {
    /// Sample both modes and score the direct-edge samples
    pub fn compute(
        predicted: &Graph,
        reference: &Graph,
        config: &ScoringConfig,
    ) -> ScoringResult<Self> {
        let sampler = CalibrationSampler::new(predicted, reference);
        let direct_edges = sampler.direct_edge(config.edge_type);
        let any_edges = sampler.any_edge();
        let hosmer_lemeshow =
            HosmerLemeshow::compute(&direct_edges.observed_predicted(), config.risk_groups)?;

        info!(
            edge_type = %config.edge_type,
            records = direct_edges.len(),
            positives = direct_edges.positives(),
            statistic = hosmer_lemeshow.statistic(),
            "computed graph statistics"
        );

        Ok(Self {
            edge_type: config.edge_type,
            direct_edges,
            any_edges,
            hosmer_lemeshow,
            generated_at: Utc::now(),
        })
    }

    pub fn edge_type(&self) -> EdgeType {
        self.edge_type
    }

    /// Records for the configured edge-type family
    pub fn direct_edges(&self) -> &CalibrationSet {
        &self.direct_edges
    }

    /// Records for "pair has any edge"
    pub fn any_edges(&self) -> &CalibrationSet {
        &self.any_edges
    }

    pub fn hosmer_lemeshow(&self) -> &HosmerLemeshow {
        &self.hosmer_lemeshow
    }

    /// Brier score of the direct-edge records
    pub fn brier_score(&self) -> Option<f64> {
        self.direct_edges.brier_score()
    }

    pub fn generated_at(&self) -> DateTime<Utc> {
        self.generated_at
    }

    /// Text block with the test summary and calibration plot points
    pub fn report(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Hosmer-Lemeshow Test");
        let _ = writeln!(out, "Edge type: {} ({})", self.edge_type, self.edge_type.symbol());
        let _ = writeln!(out, "Generated: {}", self.generated_at.format("%b %d, %Y %H:%M:%S"));
        let _ = writeln!(out, "{}", self.hosmer_lemeshow.summary());
        if let Some(brier) = self.brier_score() {
            let _ = writeln!(out, "Brier score: {:.6}", brier);
        }
        let _ = writeln!(out);
        let _ = writeln!(out, "Plot Points");
        let _ = writeln!(out, "{}", "=".repeat(40));
        for (expected, observed) in self.hosmer_lemeshow.plot_points() {
            let _ = writeln!(out, "({:.6}, {:.6})", expected, observed);
        }
        out
    }
}
