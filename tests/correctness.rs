//! Correctness and invariant tests for incstats
//!
//! These tests verify critical invariants, merge semantics, and edge cases
//! across all statistic families. They complement the unit tests in each
//! module by focusing on properties that must always hold.
//!
//! Run with: cargo test --test correctness --features full

// Require all features
#[cfg(not(all(feature = "statistics", feature = "collection", feature = "histogram")))]
compile_error!(
    "Correctness tests require all features. Run: cargo test --test correctness --features full"
);

use incstats::collection::StatisticsCollection;
use incstats::histogram::Histogram;
use incstats::statistics::{Accumulator, AtomicAccumulator, ExtendedStatistics, MomentStatistics};
use incstats::traits::{LookupError, MergeError, Statistic};

// ============================================================================
// Accumulator
// ============================================================================

mod accumulator {
    use super::*;

    #[test]
    fn mean_and_count_track_all_adds() {
        let data = [0.5, -3.25, 17.0, 2.0, 2.0, 8.75, -1.5];
        let mut acc = Accumulator::<f64, u64>::new();
        for &v in &data {
            acc.add(v);
        }

        let expected = data.iter().sum::<f64>() / data.len() as f64;
        assert_eq!(acc.count(), data.len() as u64);
        assert!(
            (acc.mean() - expected).abs() < 1e-12,
            "mean: {} expected: {}",
            acc.mean(),
            expected
        );
    }

    #[test]
    fn add_then_remove_restores_prior_state() {
        let mut acc = Accumulator::<f64, u64>::new();
        for v in [4.0, 6.0, 11.0] {
            acc.add(v);
        }
        let (count, mean) = (acc.count(), acc.mean());

        acc.add(-40.0);
        acc.remove(-40.0);

        assert_eq!(acc.count(), count);
        assert!((acc.mean() - mean).abs() < 1e-12);
    }

    #[test]
    fn removing_everything_leaves_empty_state() {
        let mut acc = Accumulator::<f64, u64>::new();
        acc.add_weighted(5.0, 3);
        acc.remove_weighted(5.0, 3);
        assert!(!acc.is_defined());
        assert_eq!(acc.count(), 0);

        // float counts: removing the full weight also resets
        let mut acc = Accumulator::<f64, f64>::new();
        acc.add_weighted(5.0, 0.25);
        acc.add_weighted(1.0, 0.5);
        acc.remove_weighted(1.0, 0.75);
        assert!(!acc.is_defined());
    }

    #[test]
    fn weighted_add_equals_repeated_add() {
        let mut weighted = Accumulator::<f64, u64>::new();
        let mut repeated = Accumulator::<f64, u64>::new();

        for (value, n) in [(1.5, 3u64), (-2.0, 7), (10.0, 1)] {
            weighted.add_weighted(value, n);
            for _ in 0..n {
                repeated.add(value);
            }
        }

        assert_eq!(weighted.count(), repeated.count());
        assert!((weighted.mean() - repeated.mean()).abs() < 1e-12);
    }

    #[test]
    fn text_round_trip_is_exact() {
        let mut acc = Accumulator::<f64, u64>::new();
        for v in [0.1, 0.2, 0.3, 1e-7, 123456.789] {
            acc.add(v);
        }

        let mut text = String::new();
        acc.save_as_text(&mut text).unwrap();

        let mut loaded = Accumulator::<f64, u64>::new();
        loaded.load_from_text(&text).unwrap();
        assert_eq!(loaded.count(), acc.count());
        assert_eq!(loaded.mean(), acc.mean());
    }

    #[test]
    fn several_statistics_read_from_one_stream() {
        let mut a = Accumulator::<f64, u64>::new();
        let mut m = MomentStatistics::<f64, u64>::new();

        let text = "2 1.5\n3 4 0.5 trailing";
        let mut tokens = text.split_whitespace();
        a.read_text(&mut tokens).unwrap();
        m.read_text(&mut tokens).unwrap();

        assert_eq!(a.count(), 2);
        assert_eq!(a.mean(), 1.5);
        assert_eq!(m.count(), 3);
        assert_eq!(m.variance(), 0.5);
        assert_eq!(tokens.next(), Some("trailing"));
    }

    #[test]
    fn clear_returns_to_undefined() {
        let mut acc = Accumulator::<f64, u64>::new();
        acc.add(1.0);
        Statistic::clear(&mut acc);
        assert!(!acc.is_defined());
    }
}

// ============================================================================
// Atomic Accumulator
// ============================================================================

mod atomic_accumulator {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn reader_never_sees_count_without_mean() {
        let acc = Arc::new(AtomicAccumulator::new());

        let writer = {
            let acc = Arc::clone(&acc);
            thread::spawn(move || {
                for round in 0..200 {
                    for i in 0..500u64 {
                        acc.add(-1.0 + (i % 3) as f64);
                    }
                    if round % 2 == 0 {
                        acc.clear();
                    } else {
                        acc.remove_weighted(0.0, 100);
                    }
                }
            })
        };

        let readers: Vec<_> = (0..3)
            .map(|_| {
                let acc = Arc::clone(&acc);
                thread::spawn(move || {
                    for _ in 0..200_000 {
                        let snapshot = acc.snapshot();
                        if snapshot.is_defined() {
                            let mean = snapshot.mean();
                            assert!(
                                mean.is_finite() && (-1.5..=1.5).contains(&mean),
                                "reader saw invalid mean {} with count {}",
                                mean,
                                snapshot.count()
                            );
                        }
                    }
                })
            })
            .collect();

        writer.join().unwrap();
        for reader in readers {
            reader.join().unwrap();
        }
    }

    #[test]
    fn single_threaded_behaves_like_plain_accumulator() {
        let atomic = AtomicAccumulator::new();
        let mut plain = Accumulator::<f64, u64>::new();

        for v in [3.0, 9.0, -4.0, 0.5] {
            atomic.add(v);
            plain.add(v);
        }
        atomic.remove_weighted(9.0, 1);
        plain.remove_weighted(9.0, 1);

        assert_eq!(atomic.snapshot(), plain);
    }
}

// ============================================================================
// Moment Statistics
// ============================================================================

mod moment_statistics {
    use super::*;

    #[test]
    fn merge_is_commutative() {
        let mut a = MomentStatistics::<f64, u64>::new();
        let mut b = MomentStatistics::<f64, u64>::new();

        for v in [1.0, 3.0, 5.0, 7.0, 9.0] {
            a.add(v);
        }
        for v in [2.0, 4.0, 6.0, 8.0, 10.0] {
            b.add(v);
        }

        let mut ab = a;
        ab.merge(&b).unwrap();

        let mut ba = b;
        ba.merge(&a).unwrap();

        assert_eq!(ab.count(), ba.count());
        assert!(
            (ab.mean() - ba.mean()).abs() < 1e-10,
            "mean: {} vs {}",
            ab.mean(),
            ba.mean()
        );
        assert!(
            (ab.variance() - ba.variance()).abs() < 1e-10,
            "variance: {} vs {}",
            ab.variance(),
            ba.variance()
        );
    }

    #[test]
    fn merge_equivalent_to_sequential_add() {
        let data_a = [1.5, 3.7, 2.1, 8.9, 4.3];
        let data_b = [6.2, 7.4, 0.5, 9.1, 5.6];

        let mut sequential = MomentStatistics::<f64, u64>::new();
        for &v in data_a.iter().chain(data_b.iter()) {
            sequential.add(v);
        }

        let mut sa = MomentStatistics::<f64, u64>::new();
        let mut sb = MomentStatistics::<f64, u64>::new();
        for &v in &data_a {
            sa.add(v);
        }
        for &v in &data_b {
            sb.add(v);
        }
        sa.merge(&sb).unwrap();

        assert_eq!(sa.count(), sequential.count());
        assert!((sa.mean() - sequential.mean()).abs() < 1e-10);
        assert!((sa.variance() - sequential.variance()).abs() < 1e-10);
    }

    #[test]
    fn text_round_trip_is_exact() {
        let mut stats = MomentStatistics::<f64, u64>::new();
        for v in [0.1, 0.25, 7.5, -3.3] {
            stats.add(v);
        }

        let mut text = String::new();
        stats.save_as_text(&mut text).unwrap();

        let mut loaded = MomentStatistics::<f64, u64>::new();
        loaded.load_from_text(&text).unwrap();
        assert_eq!(loaded.count(), stats.count());
        assert_eq!(loaded.mean(), stats.mean());
        assert_eq!(loaded.variance(), stats.variance());
    }

    #[test]
    fn numerical_stability_with_offset() {
        let mut stats = MomentStatistics::<f64, u64>::new();

        let base = 1e4;
        for i in 0..1000 {
            stats.add(base + (i % 10) as f64);
        }

        assert!(
            (stats.mean() - (base + 4.5)).abs() < 1e-6,
            "Mean: {} expected: {}",
            stats.mean(),
            base + 4.5
        );
        // population variance of 0..10 is 8.25
        assert!(
            (stats.variance() - 8.25).abs() < 1e-3,
            "Variance: {}",
            stats.variance()
        );
        assert!(stats.deviation().is_finite());
    }

    #[test]
    fn clear_returns_to_undefined() {
        let mut stats = MomentStatistics::<f64, u64>::new();
        stats.add(1.0);
        stats.add(2.0);
        stats.clear();
        assert!(!stats.is_defined());
        assert_eq!(stats.variance(), 0.0);
    }
}

// ============================================================================
// Extended Statistics
// ============================================================================

mod extended_statistics {
    use super::*;

    #[test]
    fn tracks_extremes() {
        let mut stats = ExtendedStatistics::<f64, u64>::new();
        for v in [3.0, 1.0, 4.0, 1.0, 5.0] {
            stats.add(v);
        }

        assert_eq!(stats.min(), 1.0);
        assert_eq!(stats.max(), 5.0);
        assert_eq!(stats.count(), 5);
    }

    #[test]
    fn clear_resets_extremes() {
        let mut stats = ExtendedStatistics::<f64, u64>::new();
        stats.add(100.0);
        stats.clear();
        assert!(!stats.is_defined());

        stats.add(-3.0);
        assert_eq!(stats.min(), -3.0);
        assert_eq!(stats.max(), -3.0);
    }

    #[test]
    fn display_includes_extremes() {
        let mut stats = ExtendedStatistics::<f64, u64>::new();
        assert_eq!(stats.to_string(), "-");
        stats.add(2.0);
        assert_eq!(stats.to_string(), "2 dev=0 min=2 max=2");
    }
}

// ============================================================================
// Statistics Collection
// ============================================================================

mod statistics_collection {
    use super::*;

    fn collection(names: &[&str]) -> StatisticsCollection<f64, u64> {
        let mut c = StatisticsCollection::new();
        for name in names {
            c.create(*name);
        }
        c
    }

    #[test]
    fn merge_with_missing_name_fails() {
        let mut c = collection(&["a", "b"]);
        let other = collection(&["a"]);

        assert_eq!(c.merge(&other), Err(MergeError::IncompatibleCollections));
    }

    #[test]
    fn merge_sums_counts() {
        let mut c1 = collection(&["a", "b"]);
        let mut c2 = collection(&["a", "b"]);

        for v in [1.0, 2.0, 3.0] {
            c1.get_mut("a").unwrap().add(v);
            c2.get_mut("b").unwrap().add(v);
        }
        c2.get_mut("a").unwrap().add(10.0);
        c1.get_mut("b").unwrap().add(10.0);

        c1.merge(&c2).unwrap();

        assert_eq!(c1.get("a").unwrap().count(), 4);
        assert_eq!(c1.get("b").unwrap().count(), 4);
        assert!((c1.get("a").unwrap().mean() - 4.0).abs() < 1e-12);
    }

    #[test]
    fn lookup_of_unknown_name_reports_it() {
        let c = collection(&["a"]);
        match c.get("nodes") {
            Err(LookupError::NotFound { name }) => assert_eq!(name, "nodes"),
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn clear_keeps_key_set() {
        let mut c = collection(&["a", "b"]);
        c.get_mut("a").unwrap().add(1.0);
        c.clear();

        assert_eq!(c.len(), 2);
        assert!(c.contains("a") && c.contains("b"));
        assert!(!c.get("a").unwrap().is_defined());
    }

    #[test]
    fn display_one_line_per_entry() {
        let mut c = collection(&["time", "length"]);
        c.get_mut("length").unwrap().add(4.0);

        assert_eq!(c.to_string(), "length: 4 dev=0\ntime: -\n");
    }
}

// ============================================================================
// Histogram
// ============================================================================

mod histogram {
    use super::*;

    #[test]
    fn out_of_range_values_are_clamped() {
        let mut h = Histogram::<f64, u64>::new(0.0, 10.0, 5);
        h.add(-5.0);
        h.add(15.0);
        h.add(4.0);

        assert_eq!(h.bin_count(0), 1);
        assert_eq!(h.bin_count(4), 1);
        assert_eq!(h.bin_count(2), 1);
        assert_eq!(h.count(), 3);
    }

    #[test]
    fn bin_counts_sum_to_total() {
        let mut h = Histogram::<f64, u64>::new(-1.0, 1.0, 7);
        for i in 0..1000 {
            h.add(((i * 37) % 300) as f64 / 100.0 - 1.5);
            let total: u64 = h.iter().map(|(_, count)| count).sum();
            assert_eq!(total, h.count());
        }
    }

    #[test]
    fn clear_keeps_shape() {
        let mut h = Histogram::<f64, u64>::new(0.0, 10.0, 5);
        for v in [1.0, 3.0, 5.0] {
            h.add(v);
        }
        h.clear();

        assert_eq!(h.count(), 0);
        assert!(h.iter().all(|(_, count)| count == 0));
        assert_eq!(h.bins(), 5);
        assert_eq!(h.bin_width(), 2.0);
        assert_eq!(h.min(), 0.0);
        assert_eq!(h.max(), 10.0);
    }

    #[test]
    fn merge_requires_same_shape() {
        let mut a = Histogram::<f64, u64>::new(0.0, 10.0, 5);
        let b = Histogram::<f64, u64>::new(0.0, 10.0, 4);

        match a.merge(&b) {
            Err(MergeError::IncompatibleShape { expected, found }) => {
                assert_eq!(expected, "5 bins over [0, 10)");
                assert_eq!(found, "4 bins over [0, 10)");
            }
            other => panic!("expected IncompatibleShape, got {:?}", other),
        }
    }
}
