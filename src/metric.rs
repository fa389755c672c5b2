// Vitals - Web performance metric assessment
// Copyright (c) 2025 The Vitals Authors
//
// Licensed under AGPL-3.0.

//! Metric assessment engine
//!
//! A [`Metric`] couples a locally observed value with the fixed thresholds of
//! its variant and the normalized field distribution. Every query is a pure
//! function of that state, so a metric can be asked for its assessment,
//! formatted value and bar position any number of times.
//!
//! The variants differ only in thresholds, value formatting and two narrow
//! rules, which live in a static table rather than in per-variant types:
//!
//! | Variant | good | poor | Shown as     | Notes                              |
//! |---------|------|------|--------------|------------------------------------|
//! | LCP     | 2500 | 4000 | seconds      | advisory when loaded in background |
//! | FID     | 100  | 300  | milliseconds | unassessable until an interaction  |
//! | INP     | 200  | 500  | milliseconds | unassessable until an interaction  |
//! | CLS     | 0.10 | 0.25 | unitless     |                                    |

use crate::assessment::{Assessment, Thresholds};
use crate::config::DisplayConfig;
use crate::distribution::Distribution;
use crate::error::VitalsError;
use crate::format::{NumberFormatter, PlainFormatter, Unit};
use log::warn;
use std::fmt;
use std::str::FromStr;

/// Placeholder shown for interaction metrics before any interaction
pub const WAITING_FOR_INPUT: &str = "Waiting for input…";

/// Advisory shown for LCP when the tab loaded in the background
pub const LCP_BACKGROUND_INFO: &str = "LCP inflated by tab loading in the background";

/// Metric variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum MetricKind {
    /// Largest Contentful Paint
    Lcp = 0,
    /// First Input Delay
    Fid = 1,
    /// Interaction to Next Paint
    Inp = 2,
    /// Cumulative Layout Shift
    Cls = 3,
}

impl MetricKind {
    /// All variants in display order
    pub const ALL: [MetricKind; 4] = [
        MetricKind::Lcp,
        MetricKind::Fid,
        MetricKind::Inp,
        MetricKind::Cls,
    ];

    fn rules(&self) -> &'static VariantRules {
        &RULES[*self as usize]
    }

    /// Look a variant up by its short identifier
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.id() == id)
    }

    /// Short lowercase identifier, e.g. `"lcp"`
    pub fn id(&self) -> &'static str {
        self.rules().id
    }

    /// Uppercase abbreviation, e.g. `"LCP"`
    pub fn abbr(&self) -> &'static str {
        self.rules().abbr
    }

    /// Display name
    pub fn name(&self) -> &'static str {
        self.rules().name
    }

    /// Fixed thresholds of the variant
    pub fn thresholds(&self) -> Thresholds {
        self.rules().thresholds
    }

    /// Whether the value only exists once the user has interacted
    pub fn is_interaction_based(&self) -> bool {
        self.rules().interaction_based
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbr())
    }
}

impl FromStr for MetricKind {
    type Err = VitalsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_id(s).ok_or_else(|| VitalsError::UnknownMetric(s.to_string()))
    }
}

type FormatFn = fn(&Metric, &dyn NumberFormatter, Option<f64>) -> String;
type InfoFn = fn(&Metric) -> Option<&'static str>;

/// Per-variant behavior
struct VariantRules {
    id: &'static str,
    abbr: &'static str,
    name: &'static str,
    thresholds: Thresholds,
    interaction_based: bool,
    format: FormatFn,
    info: InfoFn,
}

static RULES: [VariantRules; 4] = [
    VariantRules {
        id: "lcp",
        abbr: "LCP",
        name: "Largest Contentful Paint",
        thresholds: Thresholds::fixed(2500.0, 4000.0),
        interaction_based: false,
        format: format_seconds,
        info: background_info,
    },
    VariantRules {
        id: "fid",
        abbr: "FID",
        name: "First Input Delay",
        thresholds: Thresholds::fixed(100.0, 300.0),
        interaction_based: true,
        format: format_interaction,
        info: no_info,
    },
    VariantRules {
        id: "inp",
        abbr: "INP",
        name: "Interaction to Next Paint",
        thresholds: Thresholds::fixed(200.0, 500.0),
        interaction_based: true,
        format: format_interaction,
        info: no_info,
    },
    VariantRules {
        id: "cls",
        abbr: "CLS",
        name: "Cumulative Layout Shift",
        thresholds: Thresholds::fixed(0.10, 0.25),
        interaction_based: false,
        format: format_unitless,
        info: no_info,
    },
];

fn format_seconds(metric: &Metric, formatter: &dyn NumberFormatter, value: Option<f64>) -> String {
    let seconds = value.unwrap_or(0.0) / 1000.0;
    formatter.format_fixed(seconds, metric.digits_of_precision(), Some(Unit::Second))
}

fn format_interaction(
    metric: &Metric,
    formatter: &dyn NumberFormatter,
    value: Option<f64>,
) -> String {
    match value {
        Some(value) => formatter.format_fixed(
            value,
            metric.digits_of_precision(),
            Some(Unit::Millisecond),
        ),
        None => WAITING_FOR_INPUT.to_string(),
    }
}

fn format_unitless(metric: &Metric, formatter: &dyn NumberFormatter, value: Option<f64>) -> String {
    formatter.format_fixed(value.unwrap_or(0.0), metric.digits_of_precision(), None)
}

fn background_info(metric: &Metric) -> Option<&'static str> {
    metric.background.then_some(LCP_BACKGROUND_INFO)
}

fn no_info(_metric: &Metric) -> Option<&'static str> {
    None
}

/// A metric observed on the current page, ready for display
#[derive(Debug, Clone, PartialEq)]
pub struct Metric {
    kind: MetricKind,
    local: Option<f64>,
    background: bool,
    thresholds: Option<Thresholds>,
    distribution: Distribution,
    experimental: bool,
    config: DisplayConfig,
}

impl Metric {
    /// Create a metric with default display settings
    ///
    /// `densities` are the raw field densities; without them the bar uses an
    /// even split.
    pub fn new(
        kind: MetricKind,
        local: Option<f64>,
        background: bool,
        densities: Option<[f64; 3]>,
    ) -> Self {
        let mut builder = Self::builder(kind).local(local).background(background);
        if let Some(densities) = densities {
            builder = builder.densities(densities);
        }
        builder.build()
    }

    /// Start building a metric of the given variant
    pub fn builder(kind: MetricKind) -> MetricBuilder {
        MetricBuilder::new(kind)
    }

    /// Variant
    pub fn kind(&self) -> MetricKind {
        self.kind
    }

    /// Short lowercase identifier
    pub fn id(&self) -> &'static str {
        self.kind.id()
    }

    /// Uppercase abbreviation
    pub fn abbr(&self) -> &'static str {
        self.kind.abbr()
    }

    /// Display name
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// Locally observed value, in the variant's native unit
    pub fn local(&self) -> Option<f64> {
        self.local
    }

    /// Whether the page loaded while its tab was in the background
    pub fn background(&self) -> bool {
        self.background
    }

    /// Threshold pair, if the metric is assessable
    pub fn thresholds(&self) -> Option<&Thresholds> {
        self.thresholds.as_ref()
    }

    /// Normalized field distribution
    pub fn distribution(&self) -> &Distribution {
        &self.distribution
    }

    /// Fraction digits used when formatting values
    pub fn digits_of_precision(&self) -> usize {
        self.config.digits_of_precision
    }

    /// Whether the metric is flagged experimental
    pub fn is_experimental(&self) -> bool {
        self.experimental
    }

    /// Display configuration
    pub fn config(&self) -> &DisplayConfig {
        &self.config
    }

    /// Bucket of the local value
    ///
    /// `None` when the metric has no thresholds, or when an interaction
    /// metric has not seen an interaction yet.
    pub fn assessment(&self) -> Option<Assessment> {
        if self.kind.is_interaction_based() && self.local.is_none() {
            return None;
        }

        let Some(thresholds) = self.thresholds else {
            warn!("Unable to assess {} (no thresholds)", self.abbr());
            return None;
        };

        self.local.map(|local| thresholds.assess(local))
    }

    /// Bucket index of the local value (0 = good, 1 = needs improvement, 2 = poor)
    pub fn assessment_index(&self) -> Option<usize> {
        self.assessment().map(|assessment| assessment.index())
    }

    /// Human-readable assessment, e.g. `"needs improvement"`
    pub fn assessment_label(&self) -> Option<&'static str> {
        self.assessment().map(|assessment| assessment.label())
    }

    /// Presentation class token, e.g. `"needs-improvement"`
    pub fn assessment_class(&self) -> Option<&'static str> {
        self.assessment().map(|assessment| assessment.class_name())
    }

    /// Format a value the way this variant displays it
    pub fn format_value(&self, value: Option<f64>) -> String {
        self.format_value_with(&PlainFormatter, value)
    }

    /// Format a value with a host-provided number formatter
    pub fn format_value_with(&self, formatter: &dyn NumberFormatter, value: Option<f64>) -> String {
        (self.kind.rules().format)(self, formatter, value)
    }

    /// Format the local value
    pub fn format_local(&self) -> String {
        self.format_value(self.local)
    }

    /// Variant-specific advisory, if any applies
    pub fn info(&self) -> Option<&'static str> {
        (self.kind.rules().info)(self)
    }

    /// Position of `value` along the bar as a CSS-style percentage
    ///
    /// Returns `"0%"` when the metric has no thresholds.
    pub fn relative_position(&self, value: f64) -> String {
        match self.relative_position_fraction(value) {
            Some(position) => format!("{}%", position * 100.0),
            None => "0%".to_string(),
        }
    }

    /// Position of `value` along the bar as a fraction of its width
    ///
    /// Each segment is as wide as its field density (bumped to the minimum
    /// segment density, then renormalized). Inside a segment the position is
    /// linear in the value. The poor segment has no upper threshold, so its
    /// offset is measured against `poor * poor_ceiling` and capped.
    pub fn relative_position_fraction(&self, value: f64) -> Option<f64> {
        let Some(thresholds) = self.thresholds else {
            warn!("Unable to position local value of {} (no thresholds)", self.abbr());
            return None;
        };
        let Thresholds { good, poor } = thresholds;

        let config = &self.config;
        let adjusted = self
            .distribution
            .fractions()
            .map(|density| density.max(config.min_segment_density));
        let total: f64 = adjusted.iter().sum();
        let [pct_good, pct_needs_improvement, pct_poor] = adjusted.map(|density| density / total);

        let poor_ceiling = poor * config.poor_ceiling_factor;

        let position = if value < good {
            value * pct_good / good
        } else if value >= poor {
            // Scaled by poor * poor_ceiling, so the segment saturates far past
            // the ceiling itself.
            config
                .max_poor_fraction
                .min((value - poor) / (poor * poor_ceiling))
                * pct_poor
                + pct_good
                + pct_needs_improvement
        } else {
            (value - good) * pct_needs_improvement / thresholds.span() + pct_good
        };

        Some(position)
    }

    /// Formatted field density of a bucket, e.g. `"98%"`
    pub fn density(&self, bucket: Assessment, decimal_places: usize) -> String {
        self.distribution.density(bucket, decimal_places)
    }
}

/// Builder for [`Metric`]
#[derive(Debug, Clone)]
pub struct MetricBuilder {
    kind: MetricKind,
    local: Option<f64>,
    background: bool,
    densities: Option<[f64; 3]>,
    thresholds: Option<Thresholds>,
    experimental: bool,
    config: DisplayConfig,
}

impl MetricBuilder {
    /// Create a builder with the variant's thresholds
    pub fn new(kind: MetricKind) -> Self {
        Self {
            kind,
            local: None,
            background: false,
            densities: None,
            thresholds: Some(kind.thresholds()),
            experimental: false,
            config: DisplayConfig::default(),
        }
    }

    /// Set the locally observed value
    pub fn local(mut self, local: Option<f64>) -> Self {
        self.local = local;
        self
    }

    /// Set whether the page loaded in a background tab
    pub fn background(mut self, background: bool) -> Self {
        self.background = background;
        self
    }

    /// Set the raw field densities (good, needs improvement, poor)
    pub fn densities(mut self, densities: [f64; 3]) -> Self {
        self.densities = Some(densities);
        self
    }

    /// Replace the variant's thresholds; `None` makes the metric unassessable
    pub fn thresholds(mut self, thresholds: Option<Thresholds>) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Flag the metric as experimental
    pub fn experimental(mut self, experimental: bool) -> Self {
        self.experimental = experimental;
        self
    }

    /// Use a custom display configuration
    pub fn config(mut self, config: DisplayConfig) -> Self {
        self.config = config;
        self
    }

    /// Build the metric, normalizing the field distribution
    pub fn build(self) -> Metric {
        let local = if self.kind.is_interaction_based() {
            self.local
        } else {
            // Load metrics always have a value; a missing one reads as zero.
            Some(self.local.filter(|value| !value.is_nan()).unwrap_or(0.0))
        };

        let distribution = self
            .densities
            .map(|densities| {
                Distribution::normalize_with_tolerance(densities, self.config.imbalance_tolerance)
            })
            .unwrap_or_default();

        Metric {
            kind: self.kind,
            local,
            background: self.background,
            thresholds: self.thresholds,
            distribution,
            experimental: self.experimental,
            config: self.config,
        }
    }
}
