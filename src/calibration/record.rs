//! Calibration records: one (observed, predicted) sample per node pair and edge type

use crate::graph::EdgeType;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::io::{self, Write};

/// Observed outcome and predicted probability of one sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObservedPredicted {
    /// 1 when the reference graph has the event, else 0
    pub observed: u8,
    /// Predicted probability (0.0 - 1.0)
    pub predicted: f64,
}

impl ObservedPredicted {
    pub fn new(observed: u8, predicted: f64) -> Self {
        Self { observed, predicted }
    }
}

/// Whether the reference graph shows `edge_type` from `node1` to `node2`,
/// and how likely the predicted graph thought it was
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalibrationRecord {
    pub node1: String,
    pub node2: String,
    pub edge_type: EdgeType,
    pub observed: u8,
    pub predicted: f64,
}

impl CalibrationRecord {
    pub fn new(
        node1: impl Into<String>,
        node2: impl Into<String>,
        edge_type: EdgeType,
        observed: u8,
        predicted: f64,
    ) -> Self {
        Self {
            node1: node1.into(),
            node2: node2.into(),
            edge_type,
            observed,
            predicted,
        }
    }

    pub fn key(&self) -> RecordKey {
        RecordKey {
            node1: self.node1.clone(),
            node2: self.node2.clone(),
            edge_type: self.edge_type,
        }
    }

    pub fn observed_predicted(&self) -> ObservedPredicted {
        ObservedPredicted::new(self.observed, self.predicted)
    }

    /// Row `node1 <sym> node2,predicted,observed`; predicted is `0` when zero
    pub fn csv_line(&self) -> String {
        format!("{},{},{}", self.label(), self.predicted_text(), self.observed)
    }

    fn label(&self) -> String {
        match self.edge_type {
            EdgeType::Nil => "no edge".to_string(),
            edge_type => format!("{} {} {}", self.node1, edge_type.symbol(), self.node2),
        }
    }

    fn predicted_text(&self) -> String {
        if self.predicted > 0.0 {
            format!("{:.6}", self.predicted)
        } else {
            "0".to_string()
        }
    }
}

impl fmt::Display for CalibrationRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} {}", self.label(), self.predicted_text(), self.observed)
    }
}

/// Identity of a record within a set
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordKey {
    pub node1: String,
    pub node2: String,
    pub edge_type: EdgeType,
}

/// Records deduplicated by (node1, node2, edge type), iterated in key order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CalibrationSet {
    records: BTreeMap<RecordKey, CalibrationRecord>,
}

impl CalibrationSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record; returns false (keeping the existing one) on a duplicate key
    pub fn insert(&mut self, record: CalibrationRecord) -> bool {
        let key = record.key();
        if self.records.contains_key(&key) {
            return false;
        }
        self.records.insert(key, record);
        true
    }

    pub fn get(&self, node1: &str, node2: &str, edge_type: EdgeType) -> Option<&CalibrationRecord> {
        self.records.get(&RecordKey {
            node1: node1.to_string(),
            node2: node2.to_string(),
            edge_type,
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &CalibrationRecord> {
        self.records.values()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Flatten to scorer input
    pub fn observed_predicted(&self) -> Vec<ObservedPredicted> {
        self.iter().map(CalibrationRecord::observed_predicted).collect()
    }

    /// Number of records whose event was observed
    pub fn positives(&self) -> usize {
        self.iter().filter(|r| r.observed == 1).count()
    }

    /// Mean squared error between predicted and observed; `None` when empty
    pub fn brier_score(&self) -> Option<f64> {
        if self.is_empty() {
            return None;
        }
        let sum: f64 = self
            .iter()
            .map(|r| (r.predicted - f64::from(r.observed)).powi(2))
            .sum();
        Some(sum / self.len() as f64)
    }

    /// Write one CSV row per record
    pub fn write_csv<W: Write>(&self, mut writer: W) -> io::Result<()> {
        for record in self.iter() {
            writeln!(writer, "{}", record.csv_line())?;
        }
        Ok(())
    }
}

impl Serialize for CalibrationSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}

impl FromIterator<CalibrationRecord> for CalibrationSet {
    fn from_iter<I: IntoIterator<Item = CalibrationRecord>>(iter: I) -> Self {
        let mut set = Self::new();
        for record in iter {
            set.insert(record);
        }
        set
    }
}
