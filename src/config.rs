//! Scoring configuration
//!
//! Loaded from YAML; every field has a default so a partial file (or none
//! at all) is valid.
//!
//! ```yaml
//! risk_groups: 10
//! edge_type: ta
//! parallel: true
//! ```

use crate::graph::EdgeType;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Default number of Hosmer-Lemeshow risk groups
pub const DEFAULT_RISK_GROUPS: usize = 10;

/// Errors that can occur while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Result type for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Settings for one consensus + calibration scoring run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Number of Hosmer-Lemeshow risk groups
    pub risk_groups: usize,
    /// Edge-type family scored in direct-edge mode
    pub edge_type: EdgeType,
    /// Tally node pairs on the thread pool (needs the `parallel` feature)
    pub parallel: bool,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            risk_groups: DEFAULT_RISK_GROUPS,
            edge_type: EdgeType::Ta,
            parallel: true,
        }
    }
}

impl ScoringConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a YAML document
    pub fn from_yaml_str(yaml: &str) -> ConfigResult<Self> {
        let config: ScoringConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a YAML file
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&yaml)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.risk_groups == 0 {
            return Err(ConfigError::Invalid(
                "risk_groups must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn with_risk_groups(mut self, risk_groups: usize) -> Self {
        self.risk_groups = risk_groups;
        self
    }

    pub fn with_edge_type(mut self, edge_type: EdgeType) -> Self {
        self.edge_type = edge_type;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}
