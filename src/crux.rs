//! Field (population) data keyed by external metric names
//!
//! The population data source names metrics in snake case. Those names map
//! onto the short internal identifiers through a fixed table.

use crate::metric::MetricKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// External metric name to internal identifier
pub const CRUX_METRIC_NAMES: [(&str, &str); 5] = [
    ("largest_contentful_paint", "lcp"),
    ("first_input_delay", "fid"),
    ("interaction_to_next_paint", "inp"),
    ("cumulative_layout_shift", "cls"),
    ("first_contentful_paint", "fcp"),
];

/// Map an external metric name to its internal identifier
pub fn map_crux_name(crux_name: &str) -> Option<&'static str> {
    CRUX_METRIC_NAMES
        .iter()
        .find(|(name, _)| *name == crux_name)
        .map(|(_, id)| *id)
}

/// Reverse lookup: external name for an internal identifier
pub fn crux_name_for(id: &str) -> Option<&'static str> {
    CRUX_METRIC_NAMES
        .iter()
        .find(|(_, metric_id)| *metric_id == id)
        .map(|(name, _)| *name)
}

/// Field densities (good, needs improvement, poor) per external metric name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldData {
    metrics: BTreeMap<String, [f64; 3]>,
}

impl FieldData {
    /// Create empty field data
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the densities of one external metric
    pub fn insert(&mut self, crux_name: impl Into<String>, densities: [f64; 3]) {
        self.metrics.insert(crux_name.into(), densities);
    }

    /// Densities recorded under an external name
    pub fn get(&self, crux_name: &str) -> Option<[f64; 3]> {
        self.metrics.get(crux_name).copied()
    }

    /// Densities for a metric variant, resolved through the name table
    pub fn densities_for(&self, kind: MetricKind) -> Option<[f64; 3]> {
        self.metrics
            .iter()
            .find(|(name, _)| map_crux_name(name) == Some(kind.id()))
            .map(|(_, densities)| *densities)
    }

    /// Number of external metrics present
    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    /// Whether no field data is present
    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }
}
