//! # Vitals - Web performance metric assessment
//!
//! Compares a locally observed web performance metric against fixed
//! good/poor thresholds and a population-wide ("field") distribution.
//!
//! ## Key Features
//!
//! - **Assessment**: good / needs improvement / poor per metric variant
//! - **Faithful percentages**: field densities apportioned to whole percents
//!   that always sum to exactly 100
//! - **Bar positioning**: where the local value sits on a bar whose segments
//!   are as wide as the field densities
//!
//! ## Quick Start
//!
//! ```rust
//! use vitals::{Assessment, Metric, MetricKind};
//!
//! let lcp = Metric::new(
//!     MetricKind::Lcp,
//!     Some(2300.0),
//!     false,
//!     Some([0.9829, 0.0139, 0.0031]),
//! );
//!
//! assert_eq!(lcp.assessment(), Some(Assessment::Good));
//! assert_eq!(lcp.format_local(), "2.300s");
//! assert_eq!(lcp.density(Assessment::NeedsImprovement, 0), "2%");
//! ```
//!
//! ## Modules
//!
//! - [`assessment`]: Assessment buckets and threshold pairs
//! - [`distribution`]: Field distribution normalization
//! - [`metric`]: Metric variants, assessment, formatting and positioning
//! - [`format`]: Number formatting seam
//! - [`crux`]: External metric names and field data
//! - [`store`]: Host storage collaborators
//! - [`summary`]: Presentation payload and reports
//! - [`config`]: Display configuration

// Modules
pub mod assessment;
pub mod config;
pub mod crux;
pub mod distribution;
pub mod error;
pub mod format;
pub mod metric;
pub mod store;
pub mod summary;

// Re-exports for convenient access
pub use assessment::{Assessment, Thresholds};
pub use config::DisplayConfig;
pub use crux::{map_crux_name, FieldData};
pub use distribution::Distribution;
pub use error::{LookupError, Result, VitalsError};
pub use format::{NumberFormatter, PlainFormatter, Unit};
pub use metric::{Metric, MetricBuilder, MetricKind, LCP_BACKGROUND_INFO, WAITING_FOR_INPUT};
pub use store::{
    load_local_metrics, storage_key, LocalMetrics, LocalValue, MemoryStore, MetricStore,
    MetricsRecord, PreferenceStore, Preferences, TabInfo,
};
pub use summary::{build_metrics, MetricView};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_basic_pipeline() {
        let mut store = MemoryStore::new();
        let mut record = MetricsRecord::new();
        record.insert("lcp".to_string(), LocalValue::new(4200.0));
        store.record_page("https://example.com/", record);

        let tab = TabInfo::new(1, "https://example.com/");
        let local = load_local_metrics(&store, &tab).unwrap();
        let metrics = build_metrics(&local, None);

        assert_eq!(metrics[0].assessment(), Some(Assessment::Poor));
        assert_eq!(metrics[1].assessment(), None);
    }
}
