//! Presentation payload for a set of metrics
//!
//! A [`MetricView`] holds every string the presentation layer shows for one
//! metric, computed once from a [`Metric`].

use crate::assessment::Assessment;
use crate::crux::FieldData;
use crate::metric::{Metric, MetricKind};
use crate::store::LocalMetrics;
use serde::Serialize;

/// Display strings for one metric
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricView {
    /// Short identifier
    pub id: &'static str,
    /// Uppercase abbreviation
    pub abbr: &'static str,
    /// Display name
    pub name: &'static str,
    /// Cosmetic experimental flag
    pub experimental: bool,
    /// Assessment bucket, absent when unassessable
    pub assessment: Option<Assessment>,
    /// Assessment label, e.g. "needs improvement"
    pub assessment_label: Option<&'static str>,
    /// Assessment class token, e.g. "needs-improvement"
    pub assessment_class: Option<&'static str>,
    /// Formatted local value
    pub value: String,
    /// Variant advisory
    pub info: Option<&'static str>,
    /// Position of the local value along the bar
    pub position: String,
    /// Field densities, good to poor
    pub densities: [String; 3],
}

impl MetricView {
    /// Capture the display strings of a metric
    pub fn from_metric(metric: &Metric, decimal_places: usize) -> Self {
        let assessment = metric.assessment();
        Self {
            id: metric.id(),
            abbr: metric.abbr(),
            name: metric.name(),
            experimental: metric.is_experimental(),
            assessment,
            assessment_label: assessment.map(|a| a.label()),
            assessment_class: assessment.map(|a| a.class_name()),
            value: metric.format_local(),
            info: metric.info(),
            position: metric.relative_position(metric.local().unwrap_or(0.0)),
            densities: Assessment::ALL.map(|bucket| metric.density(bucket, decimal_places)),
        }
    }

    /// Generate a human-readable report
    pub fn report(&self) -> String {
        let mut report = String::new();

        let experimental = if self.experimental { " (experimental)" } else { "" };
        report.push_str(&format!("{}  {}{}\n", self.abbr, self.name, experimental));

        match self.assessment_label {
            Some(label) => report.push_str(&format!("  Value: {} ({})\n", self.value, label)),
            None => report.push_str(&format!("  Value: {}\n", self.value)),
        }
        report.push_str(&format!("  Position: {}\n", self.position));
        report.push_str(&format!(
            "  Field: good {} | needs improvement {} | poor {}\n",
            self.densities[0], self.densities[1], self.densities[2]
        ));

        if let Some(info) = self.info {
            report.push_str(&format!("  Note: {}\n", info));
        }

        report
    }
}

impl Metric {
    /// Presentation view with whole-percent densities
    pub fn view(&self) -> MetricView {
        MetricView::from_metric(self, 0)
    }
}

/// Construct every metric variant from local measurements and field data
///
/// Metrics without field data keep the even default distribution.
pub fn build_metrics(local: &LocalMetrics, field: Option<&FieldData>) -> Vec<Metric> {
    MetricKind::ALL
        .into_iter()
        .map(|kind| {
            Metric::new(
                kind,
                local.value(kind),
                local.background,
                field.and_then(|field| field.densities_for(kind)),
            )
        })
        .collect()
}

/// Generate a report covering several metrics
pub fn report(views: &[MetricView]) -> String {
    let mut report = String::new();

    report.push_str("=== Web Vitals ===\n");
    for view in views {
        report.push('\n');
        report.push_str(&view.report());
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{LocalValue, MetricsRecord};

    fn local_metrics(background: bool) -> LocalMetrics {
        let mut metrics = MetricsRecord::new();
        metrics.insert("lcp".to_string(), LocalValue::new(3000.0));
        metrics.insert("cls".to_string(), LocalValue::new(0.3));
        metrics.insert("inp".to_string(), LocalValue::new(80.0));
        LocalMetrics {
            metrics,
            background,
        }
    }

    #[test]
    fn test_build_metrics_order() {
        let metrics = build_metrics(&local_metrics(false), None);
        let ids: Vec<_> = metrics.iter().map(|m| m.id()).collect();
        assert_eq!(ids, ["lcp", "fid", "inp", "cls"]);
    }

    #[test]
    fn test_view_uses_whole_percents() {
        let metric = Metric::new(MetricKind::Cls, Some(0.05), false, Some([0.75, 0.15, 0.1]));
        let view = metric.view();
        assert_eq!(view, MetricView::from_metric(&metric, 0));
        assert_eq!(view.densities, ["75%", "15%", "10%"]);
    }

    #[test]
    fn test_build_metrics_uses_field_data() {
        let mut field = FieldData::new();
        field.insert("largest_contentful_paint", [0.9829, 0.0139, 0.0031]);

        let metrics = build_metrics(&local_metrics(false), Some(&field));
        assert_eq!(metrics[0].distribution().percents(), [98, 2, 0]);
        assert_eq!(metrics[3].distribution().percents(), [34, 33, 33]);
    }

    #[test]
    fn test_view_from_metric() {
        let metrics = build_metrics(&local_metrics(true), None);
        let view = MetricView::from_metric(&metrics[0], 0);

        assert_eq!(view.abbr, "LCP");
        assert_eq!(view.value, "3.000s");
        assert_eq!(view.assessment, Some(Assessment::NeedsImprovement));
        assert_eq!(view.assessment_class, Some("needs-improvement"));
        assert!(view.info.is_some());
        assert_eq!(view.densities, ["34%", "33%", "33%"]);
    }

    #[test]
    fn test_view_waiting_for_input() {
        let metrics = build_metrics(&local_metrics(false), None);
        let fid = MetricView::from_metric(&metrics[1], 0);

        assert_eq!(fid.assessment, None);
        assert_eq!(fid.value, crate::metric::WAITING_FOR_INPUT);
        assert_eq!(fid.position, "0%");
    }

    #[test]
    fn test_report_generation() {
        let views: Vec<_> = build_metrics(&local_metrics(true), None)
            .iter()
            .map(|metric| MetricView::from_metric(metric, 0))
            .collect();

        let text = report(&views);
        assert!(text.contains("LCP  Largest Contentful Paint"));
        assert!(text.contains("Value: 3.000s (needs improvement)"));
        assert!(text.contains("Value: 0.300 (poor)"));
        assert!(text.contains("Note: LCP inflated"));
        assert!(text.contains("Field: good 34% | needs improvement 33% | poor 33%"));
    }

    #[test]
    fn test_view_serializes() {
        let metrics = build_metrics(&local_metrics(false), None);
        let view = MetricView::from_metric(&metrics[3], 0);
        let json = serde_json::to_value(&view).unwrap();

        assert_eq!(json["id"], "cls");
        assert_eq!(json["assessment"], "poor");
        assert_eq!(json["densities"][0], "34%");
    }
}
