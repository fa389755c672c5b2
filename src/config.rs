//! Display configuration
//!
//! Tunables for value formatting and bar positioning. The defaults are the
//! values every built-in metric uses.

/// Default number of fraction digits in formatted values
pub const DEFAULT_DIGITS_OF_PRECISION: usize = 3;

/// Densities below this fraction are bumped up so every segment stays visible
pub const MIN_SEGMENT_DENSITY: f64 = 0.02;

/// The poor bucket is unbounded, so a value never reaches its far end
pub const MAX_POOR_FRACTION: f64 = 0.95;

/// Multiplier on the poor threshold used as the poor bucket's upper bound
pub const POOR_CEILING_FACTOR: f64 = 2.5;

/// Allowed deviation of raw field densities from a total of 1
pub const IMBALANCE_TOLERANCE: f64 = 0.0001;

/// Configuration for formatting and positioning
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayConfig {
    /// Fraction digits in formatted values (default: 3)
    pub digits_of_precision: usize,
    /// Minimum segment density before renormalizing (default: 0.02)
    pub min_segment_density: f64,
    /// Cap on the relative offset inside the poor segment (default: 0.95)
    pub max_poor_fraction: f64,
    /// Poor ceiling as a multiple of the poor threshold (default: 2.5)
    pub poor_ceiling_factor: f64,
    /// Tolerance for the field density total (default: 0.0001)
    pub imbalance_tolerance: f64,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            digits_of_precision: DEFAULT_DIGITS_OF_PRECISION,
            min_segment_density: MIN_SEGMENT_DENSITY,
            max_poor_fraction: MAX_POOR_FRACTION,
            poor_ceiling_factor: POOR_CEILING_FACTOR,
            imbalance_tolerance: IMBALANCE_TOLERANCE,
        }
    }
}

impl DisplayConfig {
    /// Set the number of fraction digits
    pub fn with_digits_of_precision(mut self, digits: usize) -> Self {
        self.digits_of_precision = digits;
        self
    }
}
