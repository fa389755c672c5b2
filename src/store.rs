// Vitals - Web performance metric assessment
// Copyright (c) 2025 The Vitals Authors
//
// Licensed under AGPL-3.0.

//! Host storage collaborators
//!
//! The host keeps the latest local measurements per page, keyed by a hash of
//! the page URL, and a "loaded in background" flag per tab. User preferences
//! live in a separate store. Each lookup is a single request that either
//! returns a value, finds nothing, or fails.

use crate::error::{LookupError, Result};
use crate::metric::MetricKind;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Stored measurements of one page, keyed by metric identifier
pub type MetricsRecord = BTreeMap<String, LocalValue>;

/// Storage key for a page URL
///
/// 32-bit wrapping `h * 31 + c` over the UTF-16 code units, rendered in
/// decimal. An empty URL yields an empty key.
pub fn storage_key(url: &str) -> String {
    if url.is_empty() {
        return String::new();
    }

    let hash = url
        .encode_utf16()
        .fold(0i32, |hash, unit| {
            hash.wrapping_shl(5)
                .wrapping_sub(hash)
                .wrapping_add(i32::from(unit))
        });
    hash.to_string()
}

/// The active tab
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabInfo {
    /// Tab identifier, also the key of its background flag
    pub id: u64,
    /// Page URL, absent for tabs the host cannot see into
    #[serde(default)]
    pub url: Option<String>,
}

impl TabInfo {
    /// Create tab info for a page
    pub fn new(id: u64, url: impl Into<String>) -> Self {
        Self {
            id,
            url: Some(url.into()),
        }
    }

    /// Key of the background flag
    pub fn background_key(&self) -> String {
        self.id.to_string()
    }

    /// Key of the page's metrics record
    pub fn metrics_key(&self) -> Option<String> {
        self.url
            .as_deref()
            .filter(|url| !url.is_empty())
            .map(storage_key)
    }
}

/// A stored measurement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalValue {
    /// Measured value, absent until observed
    #[serde(default)]
    pub value: Option<f64>,
    /// Unit reported by the collector, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

impl LocalValue {
    /// Create a value without a unit
    pub fn new(value: f64) -> Self {
        Self {
            value: Some(value),
            unit: None,
        }
    }
}

/// Local measurements combined with the tab's background flag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalMetrics {
    /// Measurements keyed by metric identifier
    pub metrics: MetricsRecord,
    /// Whether the page loaded in a background tab
    pub background: bool,
}

impl LocalMetrics {
    /// Measured value of a metric variant
    pub fn value(&self, kind: MetricKind) -> Option<f64> {
        self.metrics.get(kind.id()).and_then(|local| local.value)
    }
}

/// User preferences, passed through to the presentation layer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    /// Show phone field data instead of desktop
    #[serde(default)]
    pub prefer_phone_field: bool,
}

/// Trait for the host's local metrics storage
pub trait MetricStore {
    /// Background flag stored under a tab key
    fn loaded_in_background(&self, tab_key: &str) -> Result<Option<bool>>;

    /// Metrics record stored under a page key
    fn metrics_record(&self, key: &str) -> Result<Option<MetricsRecord>>;
}

/// Trait for the host's preference storage
pub trait PreferenceStore {
    /// Current preferences, defaults filled in
    fn preferences(&self) -> Result<Preferences>;
}

/// Look up the active tab's local metrics and background flag
///
/// A missing background flag reads as `false`. A missing metrics record is
/// reported as [`LookupError::StorageEmpty`] so the caller can show a
/// "no data" state.
pub fn load_local_metrics(store: &dyn MetricStore, tab: &TabInfo) -> Result<LocalMetrics> {
    let key = tab
        .metrics_key()
        .ok_or(LookupError::MissingUrl { tab_id: tab.id })?;

    let background = store
        .loaded_in_background(&tab.background_key())?
        .unwrap_or(false);

    let metrics = store
        .metrics_record(&key)?
        .ok_or_else(|| LookupError::StorageEmpty { key: key.clone() })?;

    debug!(
        "Loaded {} local metrics for key {} (background: {})",
        metrics.len(),
        key,
        background
    );

    Ok(LocalMetrics {
        metrics,
        background,
    })
}

/// In-memory storage for tests and snapshots
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemoryStore {
    /// Metrics records by page key
    #[serde(default)]
    records: BTreeMap<String, MetricsRecord>,
    /// Background flags by tab key
    #[serde(default)]
    background: BTreeMap<String, bool>,
    /// User preferences
    #[serde(default)]
    preferences: Preferences,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a record under an explicit key
    pub fn insert_record(&mut self, key: impl Into<String>, record: MetricsRecord) {
        self.records.insert(key.into(), record);
    }

    /// Store a record for a page URL
    pub fn record_page(&mut self, url: &str, record: MetricsRecord) {
        self.insert_record(storage_key(url), record);
    }

    /// Store the background flag of a tab
    pub fn set_background(&mut self, tab_id: u64, background: bool) {
        self.background.insert(tab_id.to_string(), background);
    }

    /// Replace the stored preferences
    pub fn set_preferences(&mut self, preferences: Preferences) {
        self.preferences = preferences;
    }

    /// Number of stored records
    pub fn record_count(&self) -> usize {
        self.records.len()
    }
}

impl MetricStore for MemoryStore {
    fn loaded_in_background(&self, tab_key: &str) -> Result<Option<bool>> {
        Ok(self.background.get(tab_key).copied())
    }

    fn metrics_record(&self, key: &str) -> Result<Option<MetricsRecord>> {
        Ok(self.records.get(key).cloned())
    }
}

impl PreferenceStore for MemoryStore {
    fn preferences(&self) -> Result<Preferences> {
        Ok(self.preferences)
    }
}
