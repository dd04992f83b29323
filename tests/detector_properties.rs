//! Property tests for the DDM state machine over arbitrary binary streams.

use concept_drift::drift::{DdmConfig, DriftDetector, DDM};
use proptest::prelude::*;

/// A low-error segment followed by a high-error segment, so drifts happen
fn error_stream() -> impl Strategy<Value = Vec<f64>> {
    (
        prop::collection::vec(prop::bool::weighted(0.15), 0..400),
        prop::collection::vec(prop::bool::weighted(0.7), 0..400),
    )
        .prop_map(|(calm, noisy)| {
            calm.into_iter()
                .chain(noisy)
                .map(|error| if error { 1.0 } else { 0.0 })
                .collect()
        })
}

fn detector(min_instances: u64) -> DDM {
    DDM::new(DdmConfig::default().with_min_num_instances(min_instances)).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn drift_and_warning_are_exclusive(stream in error_stream(), min in 1u64..60) {
        let mut ddm = detector(min);
        for &x in &stream {
            let (in_drift, in_warning) = ddm.add_element(x);
            prop_assert!(!(in_drift && in_warning));
            prop_assert_eq!(in_drift, ddm.in_concept_change());
            prop_assert_eq!(in_warning, ddm.in_warning_zone());
        }
    }

    #[test]
    fn warmup_suppresses_detection(stream in error_stream(), min in 1u64..60) {
        let mut ddm = detector(min);
        for (i, &x) in stream.iter().enumerate().take(min as usize - 1) {
            prop_assert_eq!(ddm.add_element(x), (false, false), "call {}", i + 1);
        }
    }

    #[test]
    fn minimum_tracks_live_samples(stream in error_stream(), min in 1u64..60) {
        let mut ddm = detector(min);
        let mut expected = f64::INFINITY;

        for &x in &stream {
            if ddm.in_concept_change() {
                expected = f64::INFINITY;
            }
            ddm.add_element(x);

            let stats = ddm.statistics();
            prop_assert!(stats.error_std >= 0.0);
            if stats.sample_count >= min {
                expected = expected.min(stats.error_rate + stats.error_std);
            }
            prop_assert_eq!(stats.min_sum, expected);
            prop_assert!(stats.min_sum <= stats.error_rate + stats.error_std || stats.sample_count < min);
        }
    }

    #[test]
    fn drift_restarts_statistics_on_next_call(stream in error_stream()) {
        let mut ddm = DDM::default();
        let mut previous_drift = false;

        for &x in &stream {
            ddm.add_element(x);
            if previous_drift {
                prop_assert_eq!(ddm.sample_count(), 2);
                prop_assert_eq!(ddm.error_rate(), x);
            }
            previous_drift = ddm.in_concept_change();
        }
    }

    #[test]
    fn replay_is_deterministic(stream in error_stream()) {
        let mut first = DDM::default();
        let mut second = DDM::default();
        for &x in &stream {
            prop_assert_eq!(first.add_element(x), second.add_element(x));
        }
        prop_assert_eq!(first.statistics(), second.statistics());
    }

    #[test]
    fn reset_matches_fresh_detector(prefix in error_stream(), stream in error_stream()) {
        let mut reused = DDM::default();
        for &x in &prefix {
            reused.add_element(x);
        }
        reused.reset();
        reused.reset();

        let mut fresh = DDM::default();
        for &x in &stream {
            prop_assert_eq!(reused.add_element(x), fresh.add_element(x));
        }
    }
}
