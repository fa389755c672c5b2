// Vitals Report - Web Vitals from a host storage snapshot
// Copyright (c) 2025 The Vitals Authors
//
// Licensed under AGPL-3.0.

//! Host snapshot loading.
//!
//! A snapshot is a JSON dump of what the browser host would answer: the
//! active tab, its storage, and field data per form factor.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;
use tracing::debug;
use vitals::{FieldData, MemoryStore, MetricsRecord, Preferences, TabInfo};

/// Device class of field data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormFactor {
    Phone,
    Desktop,
}

impl FormFactor {
    fn other(self) -> Self {
        match self {
            FormFactor::Phone => FormFactor::Desktop,
            FormFactor::Desktop => FormFactor::Phone,
        }
    }
}

impl fmt::Display for FormFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormFactor::Phone => write!(f, "phone"),
            FormFactor::Desktop => write!(f, "desktop"),
        }
    }
}

/// Field data for both form factors.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FieldSnapshot {
    #[serde(default)]
    pub phone: Option<FieldData>,
    #[serde(default)]
    pub desktop: Option<FieldData>,
}

impl FieldSnapshot {
    fn get(&self, form_factor: FormFactor) -> Option<&FieldData> {
        match form_factor {
            FormFactor::Phone => self.phone.as_ref(),
            FormFactor::Desktop => self.desktop.as_ref(),
        }
    }

    /// Field data for the preferred form factor, falling back to the other.
    pub fn select(&self, preferences: &Preferences) -> Option<(FormFactor, &FieldData)> {
        let preferred = if preferences.prefer_phone_field {
            FormFactor::Phone
        } else {
            FormFactor::Desktop
        };

        [preferred, preferred.other()]
            .into_iter()
            .find_map(|form_factor| self.get(form_factor).map(|field| (form_factor, field)))
    }
}

/// Everything the host would answer for one popup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    /// Active tab.
    pub tab: TabInfo,
    /// Host storage, keys already hashed.
    #[serde(default)]
    pub storage: MemoryStore,
    /// Records keyed by page URL, hashed on load.
    #[serde(default)]
    pub pages: BTreeMap<String, MetricsRecord>,
    /// Field data per form factor.
    #[serde(default)]
    pub field: FieldSnapshot,
}

impl Snapshot {
    /// Load a snapshot from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, SnapshotError> {
        if !path.exists() {
            return Err(SnapshotError::FileNotFound(path.display().to_string()));
        }

        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Parse a snapshot from JSON text.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let mut snapshot: Snapshot = serde_json::from_str(json)?;

        for (url, record) in std::mem::take(&mut snapshot.pages) {
            debug!("Storing page record for {}", url);
            snapshot.storage.record_page(&url, record);
        }

        Ok(snapshot)
    }
}

/// Errors while loading a snapshot.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Invalid snapshot: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
