// Vitals - Web performance metric assessment
// Copyright (c) 2025 The Vitals Authors
//
// Licensed under AGPL-3.0.

//! Field distribution normalization
//!
//! Field data arrives as three densities (good, needs improvement, poor)
//! that nominally sum to 1. Rounding each of them to a whole percent on its
//! own can leave the bar at 98% or 101%, so the shares are apportioned with
//! the largest-remainder method instead:
//!
//! 1. Rank buckets by the fraction each loses when floored to hundredths.
//! 2. Floor every share after dividing by the total.
//! 3. Hand the missing percents, one each, to the best-ranked buckets.
//!
//! `[0.9829, 0.0139, 0.0031]` floors to `[98, 1, 0]`. The middle bucket lost
//! the most (0.39%), so it receives the missing percent: `[98, 2, 0]`.
//!
//! The ranking in step 1 uses the raw densities while step 2 divides by the
//! total. For input that does not sum to 1 the two disagree, and the bumps
//! still follow the raw ranking.
//!
//! Densities so large that scaling by 100 overflows are first divided by
//! their maximum.

use crate::assessment::Assessment;
use crate::config::IMBALANCE_TOLERANCE;
use log::warn;

/// Field distribution as whole percentages summing to exactly 100
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Distribution {
    percents: [u32; 3],
}

impl Distribution {
    /// Apportion raw densities into whole percentages
    pub fn normalize(densities: [f64; 3]) -> Self {
        Self::normalize_with_tolerance(densities, IMBALANCE_TOLERANCE)
    }

    /// Apportion raw densities, warning when their total is off by more than `tolerance`
    pub fn normalize_with_tolerance(densities: [f64; 3], tolerance: f64) -> Self {
        let densities = rescale_oversized(densities.map(sanitize));
        let total: f64 = densities.iter().sum();

        if total <= 0.0 {
            warn!("Field distribution is empty, falling back to an even split");
            return Self::default();
        }

        if (1.0 - total).abs() > tolerance {
            warn!(
                "Field distribution densities don't sum to 100%: {} {} {}",
                densities[0], densities[1], densities[2]
            );
        }

        let ranking = rank_by_remainder(&densities);
        let mut percents =
            densities.map(|density| (density * 100.0 / total).floor().clamp(0.0, 100.0) as u32);

        let shortfall = 100u32.saturating_sub(percents.iter().sum());
        for &index in ranking.iter().take(shortfall as usize) {
            percents[index] += 1;
        }

        Self { percents }
    }

    /// Build from whole percentages that already sum to 100
    pub fn from_percents(percents: [u32; 3]) -> Option<Self> {
        (percents.iter().sum::<u32>() == 100).then_some(Self { percents })
    }

    /// Whole percentage of a bucket
    pub fn percent(&self, bucket: Assessment) -> u32 {
        self.percents[bucket.index()]
    }

    /// All three whole percentages
    pub fn percents(&self) -> [u32; 3] {
        self.percents
    }

    /// Share of a bucket as a fraction (a multiple of 0.01)
    pub fn fraction(&self, bucket: Assessment) -> f64 {
        self.percent(bucket) as f64 / 100.0
    }

    /// All three shares as fractions
    pub fn fractions(&self) -> [f64; 3] {
        self.percents.map(|percent| percent as f64 / 100.0)
    }

    /// Formatted percentage of a bucket, e.g. `"98%"` or `"98.0%"`
    pub fn density(&self, bucket: Assessment, decimal_places: usize) -> String {
        format!("{:.*}%", decimal_places, self.percent(bucket) as f64)
    }
}

impl Default for Distribution {
    /// Even split used until field data is available
    fn default() -> Self {
        let third = 1.0 / 3.0;
        Self::normalize([third, third, third])
    }
}

fn sanitize(density: f64) -> f64 {
    if density.is_finite() && density >= 0.0 {
        density
    } else {
        warn!("Ignoring invalid field density {}", density);
        0.0
    }
}

/// Scale densities down by their maximum when `density * 100` would overflow
fn rescale_oversized(densities: [f64; 3]) -> [f64; 3] {
    let max = densities.iter().copied().fold(0.0, f64::max);
    if (max * 100.0).is_finite() {
        densities
    } else {
        densities.map(|density| density / max)
    }
}

/// Bucket indices ordered by the fraction lost to flooring, largest first.
/// Equal remainders keep bucket order.
fn rank_by_remainder(densities: &[f64; 3]) -> [usize; 3] {
    let remainders = densities.map(|density| density - (density * 100.0).floor() / 100.0);
    let mut ranking: [usize; 3] = [0, 1, 2];
    ranking.sort_by(|&a, &b| remainders[b].total_cmp(&remainders[a]));
    ranking
}
