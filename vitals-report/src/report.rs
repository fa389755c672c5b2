// Vitals Report - Web Vitals from a host storage snapshot
// Copyright (c) 2025 The Vitals Authors
//
// Licensed under AGPL-3.0.

//! Report rendering.

use crate::snapshot::{FormFactor, Snapshot};
use clap::ValueEnum;
use serde::Serialize;
use tracing::{debug, info};
use vitals::{build_metrics, load_local_metrics, MetricView, PreferenceStore, VitalsError};

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// JSON payload of a report.
#[derive(Debug, Serialize)]
pub struct ReportPayload {
    pub url: Option<String>,
    pub background: bool,
    pub form_factor: Option<FormFactor>,
    pub metrics: Vec<MetricView>,
}

/// Look up the tab's metrics and render them.
pub fn render(
    snapshot: &Snapshot,
    format: OutputFormat,
    decimal_places: usize,
) -> Result<String, ReportError> {
    let local = load_local_metrics(&snapshot.storage, &snapshot.tab)?;
    let preferences = snapshot.storage.preferences()?;

    let selected = snapshot.field.select(&preferences);
    match selected {
        Some((form_factor, field)) => {
            info!("Using {} field data ({} metrics)", form_factor, field.len())
        }
        None => info!("No field data, using even distributions"),
    }

    let metrics = build_metrics(&local, selected.map(|(_, field)| field));
    let views: Vec<MetricView> = metrics
        .iter()
        .map(|metric| MetricView::from_metric(metric, decimal_places))
        .collect();
    debug!("Built {} metric views", views.len());

    match format {
        OutputFormat::Text => Ok(vitals::summary::report(&views)),
        OutputFormat::Json => {
            let payload = ReportPayload {
                url: snapshot.tab.url.clone(),
                background: local.background,
                form_factor: selected.map(|(form_factor, _)| form_factor),
                metrics: views,
            };
            Ok(serde_json::to_string_pretty(&payload)?)
        }
    }
}

/// Errors while rendering a report.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error(transparent)]
    Vitals(#[from] VitalsError),

    #[error("Serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}
