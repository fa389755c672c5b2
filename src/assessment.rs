// Vitals - Web performance metric assessment
// Copyright (c) 2025 The Vitals Authors
//
// Licensed under AGPL-3.0.

//! Assessment buckets and threshold pairs
//!
//! A metric value is sorted into one of three buckets by comparing it to a
//! `(good, poor)` threshold pair: strictly below `good` is good, at or above
//! `poor` is poor, anything in between needs improvement.

use crate::error::{Result, VitalsError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Assessment bucket for a metric value
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
#[repr(u8)]
pub enum Assessment {
    /// Below the good threshold
    Good = 0,
    /// Between the good and poor thresholds
    NeedsImprovement = 1,
    /// At or above the poor threshold
    Poor = 2,
}

impl Assessment {
    /// All buckets in bar order
    pub const ALL: [Assessment; 3] = [
        Assessment::Good,
        Assessment::NeedsImprovement,
        Assessment::Poor,
    ];

    /// Bucket index (0 = good, 1 = needs improvement, 2 = poor)
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Convert from a bucket index
    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Assessment::Good),
            1 => Some(Assessment::NeedsImprovement),
            2 => Some(Assessment::Poor),
            _ => None,
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Assessment::Good => "good",
            Assessment::NeedsImprovement => "needs improvement",
            Assessment::Poor => "poor",
        }
    }

    /// Token safe for use as a presentation class name
    pub fn class_name(&self) -> &'static str {
        match self {
            Assessment::Good => "good",
            Assessment::NeedsImprovement => "needs-improvement",
            Assessment::Poor => "poor",
        }
    }
}

impl fmt::Display for Assessment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Boundary values of the three assessment buckets, in the metric's unit
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    /// Values below this are good
    pub good: f64,
    /// Values at or above this are poor
    pub poor: f64,
}

impl Thresholds {
    /// Create a validated threshold pair
    pub fn new(good: f64, poor: f64) -> Result<Self> {
        if !good.is_finite() || !poor.is_finite() || good >= poor {
            return Err(VitalsError::InvalidThresholds { good, poor });
        }
        Ok(Self { good, poor })
    }

    /// Unchecked constructor for the built-in constants
    pub(crate) const fn fixed(good: f64, poor: f64) -> Self {
        Self { good, poor }
    }

    /// Sort a value into its bucket
    pub fn assess(&self, value: f64) -> Assessment {
        if value < self.good {
            Assessment::Good
        } else if value >= self.poor {
            Assessment::Poor
        } else {
            Assessment::NeedsImprovement
        }
    }

    /// Width of the needs-improvement band
    pub fn span(&self) -> f64 {
        self.poor - self.good
    }
}
