// Vitals - Web performance metric assessment
// Copyright (c) 2025 The Vitals Authors
//
// Licensed under AGPL-3.0.

//! Integration tests for the Vitals engine
//!
//! These tests exercise normalization and positioning over randomized field
//! data, and the full lookup-to-view pipeline through the public API.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use vitals::{
    build_metrics, load_local_metrics, Assessment, Distribution, FieldData, LookupError,
    MemoryStore, Metric, MetricKind, MetricView, MetricsRecord, TabInfo, VitalsError,
    WAITING_FOR_INPUT,
};

/// Random densities that sum to roughly 1, like real field data
fn random_densities(rng: &mut impl Rng) -> [f64; 3] {
    let a: f64 = rng.gen_range(0.0..1.0);
    let b: f64 = rng.gen_range(0.0..(1.0 - a));
    let c = 1.0 - a - b;
    // Field data is published with four decimal places
    [a, b, c].map(|d| (d * 10_000.0).round() / 10_000.0)
}

#[test]
fn test_normalization_always_sums_to_100() {
    let mut rng = StdRng::seed_from_u64(0x5eed);

    for _ in 0..10_000 {
        let densities = random_densities(&mut rng);
        let distribution = Distribution::normalize(densities);

        assert_eq!(
            distribution.percents().iter().sum::<u32>(),
            100,
            "densities {:?} normalized to {:?}",
            densities,
            distribution.percents()
        );
    }
}

#[test]
fn test_normalization_of_unscaled_weights() {
    let mut rng = StdRng::seed_from_u64(7);

    for _ in 0..1_000 {
        let weights = [
            rng.gen_range(0.0..50.0),
            rng.gen_range(0.0..50.0),
            rng.gen_range(0.1..50.0),
        ];
        let distribution = Distribution::normalize(weights);
        assert_eq!(distribution.percents().iter().sum::<u32>(), 100);
    }
}

#[test]
fn test_bumps_never_exceed_two() {
    let mut rng = StdRng::seed_from_u64(42);

    for _ in 0..5_000 {
        let densities = random_densities(&mut rng);
        let total: f64 = densities.iter().sum();
        let floors = densities.map(|d| (d * 100.0 / total).floor() as u32);
        let percents = Distribution::normalize(densities).percents();

        let bumps: u32 = percents.iter().zip(floors).map(|(p, f)| p - f).sum();
        assert!(bumps <= 2);
        assert!(percents.iter().zip(floors).all(|(p, f)| p - f <= 1));
    }
}

#[test]
fn test_known_distributions() {
    assert_eq!(
        Distribution::normalize([0.9829, 0.0139, 0.0031]).fractions(),
        [0.98, 0.02, 0.0]
    );
    assert_eq!(Distribution::normalize([1.0, 0.0, 0.0]).percents(), [100, 0, 0]);
    assert_eq!(
        Distribution::normalize([0.333, 0.333, 0.334]).percents(),
        [33, 33, 34]
    );
}

#[test]
fn test_assessment_boundaries_for_every_kind() {
    for kind in MetricKind::ALL {
        let thresholds = kind.thresholds();
        let assess = |value: f64| Metric::new(kind, Some(value), false, None).assessment();

        assert_eq!(assess(thresholds.good * 0.999), Some(Assessment::Good), "{}", kind);
        assert_eq!(
            assess(thresholds.good),
            Some(Assessment::NeedsImprovement),
            "{}",
            kind
        );
        assert_eq!(
            assess(thresholds.poor * 0.999),
            Some(Assessment::NeedsImprovement),
            "{}",
            kind
        );
        assert_eq!(assess(thresholds.poor), Some(Assessment::Poor), "{}", kind);
    }
}

#[test]
fn test_position_is_monotonic() {
    let mut rng = StdRng::seed_from_u64(99);

    for kind in MetricKind::ALL {
        for _ in 0..50 {
            let metric = Metric::new(kind, None, false, Some(random_densities(&mut rng)));
            let poor = kind.thresholds().poor;
            let step = poor / 500.0;

            let mut previous = metric.relative_position_fraction(0.0).unwrap();
            for i in 1..2_000 {
                let position = metric.relative_position_fraction(step * i as f64).unwrap();
                assert!(
                    position >= previous - 1e-12,
                    "{} not monotonic at {}: {} < {}",
                    kind,
                    step * i as f64,
                    position,
                    previous
                );
                previous = position;
            }
        }
    }
}

#[test]
fn test_position_stays_within_bar() {
    let mut rng = StdRng::seed_from_u64(3);

    for kind in MetricKind::ALL {
        let metric = Metric::new(kind, None, false, Some(random_densities(&mut rng)));
        for value in [0.0, kind.thresholds().good, kind.thresholds().poor, 1e9] {
            let position = metric.relative_position_fraction(value).unwrap();
            assert!((0.0..1.0).contains(&position), "{} at {}: {}", kind, value, position);
        }
    }
}

#[test]
fn test_position_strings() {
    let metric = Metric::new(MetricKind::Lcp, Some(0.0), false, Some([0.75, 0.15, 0.1]));

    assert_eq!(metric.relative_position(0.0), "0%");
    assert_eq!(metric.relative_position(2500.0), "75%");
    assert!(metric.relative_position(3000.0).ends_with('%'));
}

#[test]
fn test_identical_inputs_give_identical_views() {
    let make = || {
        Metric::new(
            MetricKind::Cls,
            Some(0.18),
            true,
            Some([0.7123, 0.2011, 0.0866]),
        )
    };

    assert_eq!(
        MetricView::from_metric(&make(), 1),
        MetricView::from_metric(&make(), 1)
    );
}

#[test]
fn test_pipeline_from_stored_json() {
    let record: MetricsRecord = serde_json::from_str(
        r#"{
            "lcp": {"value": 1850, "unit": "millisecond"},
            "fid": {"value": null},
            "cls": {"value": 0.31}
        }"#,
    )
    .unwrap();

    let mut store = MemoryStore::new();
    store.record_page("https://web.dev/vitals/", record);
    store.set_background(9, true);

    let field: FieldData = serde_json::from_str(
        r#"{
            "largest_contentful_paint": [0.9829, 0.0139, 0.0031],
            "cumulative_layout_shift": [0.6, 0.25, 0.15]
        }"#,
    )
    .unwrap();

    let local = load_local_metrics(&store, &TabInfo::new(9, "https://web.dev/vitals/")).unwrap();
    let views: Vec<_> = build_metrics(&local, Some(&field))
        .iter()
        .map(|metric| MetricView::from_metric(metric, 0))
        .collect();

    assert_eq!(views[0].value, "1.850s");
    assert_eq!(views[0].assessment, Some(Assessment::Good));
    assert_eq!(views[0].densities, ["98%", "2%", "0%"]);
    assert!(views[0].info.is_some());

    assert_eq!(views[1].value, WAITING_FOR_INPUT);
    assert_eq!(views[1].assessment, None);

    assert_eq!(views[3].value, "0.310");
    assert_eq!(views[3].assessment_label, Some("poor"));
    assert_eq!(views[3].densities, ["60%", "25%", "15%"]);
}

#[test]
fn test_pipeline_reports_missing_data() {
    let store = MemoryStore::new();
    let result = load_local_metrics(&store, &TabInfo::new(1, "https://web.dev/"));

    assert!(matches!(
        result,
        Err(VitalsError::Lookup(LookupError::StorageEmpty { .. }))
    ));
}
