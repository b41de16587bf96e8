//! Property-based tests for membership evaluation and inference.

use proptest::prelude::*;

use fuzzy_regulator::{defaults, FuzzyRange, FuzzySet, InferenceConfig, Linspace, ScanMode, TermGroups};

/// Strategy: a segment `(start, end)` with positive width.
fn segment_strategy() -> impl Strategy<Value = (f64, f64)> {
    (-1000.0..1000.0f64, 0.001..100.0f64).prop_map(|(start, width)| (start, start + width))
}

/// Strategy: 2-8 sorted breakpoints with arbitrary core flags.
fn points_strategy() -> impl Strategy<Value = Vec<(f64, bool)>> {
    prop::collection::vec((-500.0..500.0f64, any::<bool>()), 2..8).prop_map(|mut points| {
        points.sort_by(|a, b| a.0.total_cmp(&b.0));
        points
    })
}

proptest! {
    // 1. Plateau segments are 1 everywhere inside
    #[test]
    fn plateau_is_one((start, end) in segment_strategy(), frac in 0.0..1.0f64) {
        let range = FuzzyRange::new(start, end, true, true);
        let x = start + frac * (end - start);

        if x < end {
            prop_assert_eq!(range.membership(x), Some(1.));
        }
    }

    // 2. Gap segments are 0 everywhere inside
    #[test]
    fn gap_is_zero((start, end) in segment_strategy(), frac in 0.0..1.0f64) {
        let range = FuzzyRange::new(start, end, false, false);
        let x = start + frac * (end - start);

        if x < end {
            prop_assert_eq!(range.membership(x), Some(0.));
        }
    }

    // 3. Edges start at their boundary value and complement each other
    #[test]
    fn edges_are_affine((start, end) in segment_strategy(), frac in 0.0..1.0f64) {
        let falling = FuzzyRange::new(start, end, true, false);
        let rising = FuzzyRange::new(start, end, false, true);

        prop_assert_eq!(falling.membership(start), Some(1.));
        prop_assert_eq!(rising.membership(start), Some(0.));
        prop_assert_eq!(falling.membership(end), None);

        let x = start + frac * (end - start);

        if let (Some(down), Some(up)) = (falling.membership(x), rising.membership(x)) {
            prop_assert!((0.0..=1.0).contains(&up), "rising {up} at {x}");
            prop_assert!((down + up - 1.).abs() < 1e-9, "falling {down} + rising {up} at {x}");
        }
    }

    // 4. Membership is defined and within [0, 1] for any input
    #[test]
    fn membership_is_total(points in points_strategy(), x in prop::num::f64::ANY) {
        let set = FuzzySet::from_points("term", &points).unwrap();
        let mu = set.compute_membership(x);

        prop_assert!((0.0..=1.0).contains(&mu), "membership {mu} at {x}");
    }

    // 5. Re-parsing a payload gives identical sets and memberships
    #[test]
    fn reparse_is_deterministic(points in points_strategy(), xs in prop::collection::vec(-600.0..600.0f64, 1..16)) {
        let flags: Vec<String> = points.iter().map(|(x, core)| format!("[{x:?}, {}]", u8::from(*core))).collect();
        let json = format!(r#"{{"g": [{{"id": "term", "points": [{}]}}]}}"#, flags.join(", "));
        let first: TermGroups = serde_json::from_str(&json).unwrap();
        let second: TermGroups = serde_json::from_str(&json).unwrap();
        let a = first["g"][0].to_set().unwrap();
        let b = second["g"][0].to_set().unwrap();

        prop_assert_eq!(&a, &b);
        for x in xs {
            prop_assert_eq!(a.compute_membership(x), b.compute_membership(x));
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    // 6. The result is the first scanned value reaching the best height,
    //    and a perfect match ends the scan on the spot
    #[test]
    fn first_maximum_and_early_exit(temperature in -20.0..70.0f64, accumulated in any::<bool>()) {
        let scan = if accumulated { ScanMode::Accumulated } else { ScanMode::Indexed };
        let system = defaults::system(InferenceConfig::default().with_scan(scan)).unwrap();
        let outputs = system.infer(temperature);
        let (min, max) = system.output_domain();
        let heights: Vec<(f64, f64)> = Linspace::new(min, max, 0.01, scan)
            .map(|value| (value, system.aggregated_membership(temperature, value)))
            .collect();
        let first = heights
            .iter()
            .position(|&(_, height)| height >= outputs.membership())
            .unwrap();

        prop_assert_eq!(heights[first].0, outputs.output());
        prop_assert!(heights[..first].iter().all(|&(_, height)| height < outputs.membership()));

        if outputs.membership() == 1. {
            prop_assert_eq!(outputs.scanned(), first + 1);
        } else {
            prop_assert_eq!(outputs.scanned(), heights.len());
            prop_assert!(heights.iter().all(|&(_, height)| height <= outputs.membership()));
        }
    }
}
