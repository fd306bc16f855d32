//! Hosmer-Lemeshow goodness-of-fit over risk groups
//!
//! Samples are sorted by predicted probability and cut into `G` groups of
//! as-equal-as-possible size, with the remainder going to the trailing
//! groups. Each group contributes `(O - E)^2 / (E * (1 - E / n))`.
//!
//! A group whose expected count is 0 or equals its size has zero variance
//! and contributes nothing; it is counted in `skipped_groups` instead of
//! raising a division error.

use super::record::ObservedPredicted;
use serde::{Deserialize, Serialize};
use statrs::distribution::{ChiSquared, ContinuousCDF};
use thiserror::Error;
use tracing::{debug, warn};

/// Errors raised by calibration scoring
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoringError {
    #[error("Number of risk groups must be at least 1, got {0}")]
    InvalidRiskGroups(usize),
}

/// Result type for scoring operations
pub type ScoringResult<T> = Result<T, ScoringError>;

/// One bucket of samples ranked by predicted probability
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskGroup {
    /// Number of samples in the group
    pub size: usize,
    /// Sum of predicted probabilities (E)
    pub expected: f64,
    /// Sum of observed outcomes (O)
    pub observed: f64,
}

impl RiskGroup {
    fn from_samples(samples: &[ObservedPredicted]) -> Self {
        Self {
            size: samples.len(),
            expected: samples.iter().map(|s| s.predicted).sum(),
            observed: samples.iter().map(|s| f64::from(s.observed)).sum(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// E / n
    pub fn mean_predicted(&self) -> Option<f64> {
        (!self.is_empty()).then(|| self.expected / self.size as f64)
    }

    /// O / n
    pub fn observed_rate(&self) -> Option<f64> {
        (!self.is_empty()).then(|| self.observed / self.size as f64)
    }

    /// Chi-square term of this group; `None` for zero-variance groups
    pub fn contribution(&self) -> Option<f64> {
        if self.is_empty() || self.expected == 0.0 || self.expected == self.size as f64 {
            return None;
        }
        let variance = self.expected * (1.0 - self.expected / self.size as f64);
        if variance <= 0.0 {
            return None;
        }
        Some((self.observed - self.expected).powi(2) / variance)
    }
}

/// Hosmer-Lemeshow statistic with the risk groups it was computed from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HosmerLemeshow {
    groups: Vec<RiskGroup>,
    statistic: f64,
    degrees_of_freedom: usize,
    p_value: Option<f64>,
    skipped_groups: usize,
    sample_count: usize,
}

impl HosmerLemeshow {
    /// Score `samples` using `num_groups` risk groups.
    ///
    /// Fails only when `num_groups` is 0.
    pub fn compute(samples: &[ObservedPredicted], num_groups: usize) -> ScoringResult<Self> {
        if num_groups == 0 {
            return Err(ScoringError::InvalidRiskGroups(num_groups));
        }

        let mut sorted = samples.to_vec();
        sorted.sort_by(|a, b| a.predicted.total_cmp(&b.predicted));

        let groups = partition(&sorted, num_groups);

        let mut statistic = 0.0;
        let mut skipped_groups = 0;
        for (index, group) in groups.iter().enumerate() {
            match group.contribution() {
                Some(term) => statistic += term,
                None if group.is_empty() => {
                    skipped_groups += 1;
                    debug!(group = index, "skipping empty risk group");
                }
                None => {
                    skipped_groups += 1;
                    warn!(
                        group = index,
                        size = group.size,
                        expected = group.expected,
                        "skipping zero-variance risk group"
                    );
                }
            }
        }

        let degrees_of_freedom = num_groups.saturating_sub(2);
        let p_value = upper_tail(statistic, degrees_of_freedom);

        Ok(Self {
            groups,
            statistic,
            degrees_of_freedom,
            p_value,
            skipped_groups,
            sample_count: samples.len(),
        })
    }

    pub fn statistic(&self) -> f64 {
        self.statistic
    }

    /// G - 2 (0 when G <= 2)
    pub fn degrees_of_freedom(&self) -> usize {
        self.degrees_of_freedom
    }

    /// Upper-tail chi-square probability; `None` when there are no degrees of freedom
    pub fn p_value(&self) -> Option<f64> {
        self.p_value
    }

    /// All groups, including empty ones, in ascending risk order
    pub fn groups(&self) -> &[RiskGroup] {
        &self.groups
    }

    pub fn skipped_groups(&self) -> usize {
        self.skipped_groups
    }

    pub fn sample_count(&self) -> usize {
        self.sample_count
    }

    /// E of every non-empty group
    pub fn expected_values(&self) -> Vec<f64> {
        self.non_empty_groups().map(|g| g.expected).collect()
    }

    /// O of every non-empty group, parallel to `expected_values`
    pub fn observed_values(&self) -> Vec<f64> {
        self.non_empty_groups().map(|g| g.observed).collect()
    }

    /// (E, O) calibration curve points; perfect calibration lies on the diagonal
    pub fn plot_points(&self) -> Vec<(f64, f64)> {
        self.non_empty_groups().map(|g| (g.expected, g.observed)).collect()
    }

    pub fn summary(&self) -> String {
        let p_value = self
            .p_value
            .map(|p| format!("{:.6}", p))
            .unwrap_or_else(|| "n/a".to_string());
        [
            format!("Hosmer-Lemeshow statistic: {:.6}", self.statistic),
            format!("Degrees of freedom: {}", self.degrees_of_freedom),
            format!("P-value: {}", p_value),
            format!("Risk groups: {} ({} skipped)", self.groups.len(), self.skipped_groups),
            format!("Samples: {}", self.sample_count),
        ]
        .join("\n")
    }

    fn non_empty_groups(&self) -> impl Iterator<Item = &RiskGroup> {
        self.groups.iter().filter(|g| !g.is_empty())
    }
}

/// Cut sorted samples into `num_groups` contiguous groups; the last
/// `len % num_groups` groups get one extra sample
fn partition(sorted: &[ObservedPredicted], num_groups: usize) -> Vec<RiskGroup> {
    let base = sorted.len() / num_groups;
    let remainder = sorted.len() % num_groups;
    let first_large = num_groups - remainder;

    let mut groups = Vec::with_capacity(num_groups);
    let mut start = 0;
    for index in 0..num_groups {
        let size = if index >= first_large { base + 1 } else { base };
        groups.push(RiskGroup::from_samples(&sorted[start..start + size]));
        start += size;
    }
    groups
}

fn upper_tail(statistic: f64, degrees_of_freedom: usize) -> Option<f64> {
    if degrees_of_freedom == 0 {
        return None;
    }
    let distribution = ChiSquared::new(degrees_of_freedom as f64).ok()?;
    Some((1.0 - distribution.cdf(statistic)).clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn samples(pairs: &[(u8, f64)]) -> Vec<ObservedPredicted> {
        pairs.iter().map(|&(o, p)| ObservedPredicted::new(o, p)).collect()
    }

    #[test]
    fn test_zero_groups_rejected() {
        let err = HosmerLemeshow::compute(&[], 0).unwrap_err();
        assert_eq!(err, ScoringError::InvalidRiskGroups(0));
    }

    #[test]
    fn test_partition_sizes_put_remainder_last() {
        let values: Vec<_> = (0..23).map(|i| ObservedPredicted::new(0, i as f64 / 23.0)).collect();
        let hl = HosmerLemeshow::compute(&values, 10).unwrap();
        let sizes: Vec<_> = hl.groups().iter().map(|g| g.size).collect();
        assert_eq!(sizes, vec![2, 2, 2, 2, 2, 2, 2, 3, 3, 3]);
    }

    #[test]
    fn test_groups_follow_predicted_rank() {
        let values = samples(&[(1, 0.9), (0, 0.1), (1, 0.8), (0, 0.2)]);
        let hl = HosmerLemeshow::compute(&values, 2).unwrap();
        let groups = hl.groups();
        assert!((groups[0].expected - 0.3).abs() < 1e-12);
        assert_eq!(groups[0].observed, 0.0);
        assert!((groups[1].expected - 1.7).abs() < 1e-12);
        assert_eq!(groups[1].observed, 2.0);
    }

    #[test]
    fn test_perfect_calibration_is_zero() {
        let mut values = Vec::new();
        for g in 0..10u8 {
            let rate = f64::from(g) / 10.0;
            for i in 0..10u8 {
                values.push(ObservedPredicted::new(u8::from(i < g), rate));
            }
        }
        let hl = HosmerLemeshow::compute(&values, 10).unwrap();
        assert!(hl.statistic().abs() < 1e-9, "statistic = {}", hl.statistic());
        assert_eq!(hl.degrees_of_freedom(), 8);
        assert!(hl.p_value().unwrap() > 0.999);
        // the all-zero group has no variance
        assert_eq!(hl.skipped_groups(), 1);
    }

    #[test]
    fn test_known_statistic() {
        // one group: n = 4, E = 2, O = 4 -> (4 - 2)^2 / (2 * 0.5) = 4
        let values = samples(&[(1, 0.5), (1, 0.5), (1, 0.5), (1, 0.5)]);
        let hl = HosmerLemeshow::compute(&values, 1).unwrap();
        assert!((hl.statistic() - 4.0).abs() < 1e-12);
        assert_eq!(hl.degrees_of_freedom(), 0);
        assert_eq!(hl.p_value(), None);
    }

    #[test]
    fn test_degenerate_groups_are_skipped() {
        let values = samples(&[(0, 0.0), (0, 0.0), (1, 1.0), (1, 1.0)]);
        let hl = HosmerLemeshow::compute(&values, 2).unwrap();
        assert_eq!(hl.statistic(), 0.0);
        assert_eq!(hl.skipped_groups(), 2);
        assert!(hl.statistic().is_finite());
    }

    #[test]
    fn test_fewer_samples_than_groups() {
        let values = samples(&[(1, 0.4), (0, 0.6)]);
        let hl = HosmerLemeshow::compute(&values, 5).unwrap();
        assert_eq!(hl.groups().len(), 5);
        assert_eq!(hl.plot_points().len(), 2);
        assert_eq!(hl.plot_points(), vec![(0.4, 1.0), (0.6, 0.0)]);
        assert_eq!(hl.skipped_groups(), 3);
    }

    #[test]
    fn test_group_rates() {
        let values = samples(&[(1, 0.2), (0, 0.4), (1, 0.6), (1, 0.8)]);
        let hl = HosmerLemeshow::compute(&values, 2).unwrap();
        let low = hl.groups()[0];
        assert!((low.mean_predicted().unwrap() - 0.3).abs() < 1e-12);
        assert_eq!(low.observed_rate(), Some(0.5));
        assert_eq!(hl.groups()[1].observed_rate(), Some(1.0));

        let empty = HosmerLemeshow::compute(&values, 6).unwrap().groups()[0];
        assert!(empty.is_empty());
        assert_eq!(empty.observed_rate(), None);
        assert_eq!(empty.mean_predicted(), None);
        assert_eq!(empty.contribution(), None);
    }

    #[test]
    fn test_empty_input() {
        let hl = HosmerLemeshow::compute(&[], 10).unwrap();
        assert_eq!(hl.statistic(), 0.0);
        assert!(hl.plot_points().is_empty());
        assert_eq!(hl.sample_count(), 0);
    }

    #[test]
    fn test_plot_arrays_are_parallel() {
        let values: Vec<_> = (0..50)
            .map(|i| ObservedPredicted::new((i % 3 == 0) as u8, i as f64 / 50.0))
            .collect();
        let hl = HosmerLemeshow::compute(&values, 10).unwrap();
        let expected = hl.expected_values();
        let observed = hl.observed_values();
        assert_eq!(expected.len(), 10);
        assert_eq!(observed.len(), 10);
        assert_eq!(hl.plot_points()[3], (expected[3], observed[3]));
        let first = hl.groups()[0].mean_predicted().unwrap();
        let last = hl.groups()[9].mean_predicted().unwrap();
        assert!(first < last);
    }

    #[test]
    fn test_summary_mentions_statistic() {
        let values = samples(&[(1, 0.5), (0, 0.5), (1, 0.25), (0, 0.75)]);
        let hl = HosmerLemeshow::compute(&values, 4).unwrap();
        let summary = hl.summary();
        assert!(summary.contains("Hosmer-Lemeshow statistic:"));
        assert!(summary.contains("Degrees of freedom: 2"));
        assert!(summary.contains("P-value:"));
    }
}
