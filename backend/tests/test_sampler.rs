//! Tests for DiscreteSampler
//!
//! Contract: smallest index whose cumulative weight exceeds the draw.

use markov_cohort_core_rs::transitions::{sample_index, validate_distribution};
use markov_cohort_core_rs::{CohortError, DiscreteSampler};
use proptest::prelude::*;

#[test]
fn test_boundaries_belong_to_next_index() {
    let weights = [0.25, 0.25, 0.5];
    assert_eq!(sample_index(&weights, 0.0).unwrap(), 0);
    assert_eq!(sample_index(&weights, 0.2499).unwrap(), 0);
    assert_eq!(sample_index(&weights, 0.25).unwrap(), 1);
    assert_eq!(sample_index(&weights, 0.5).unwrap(), 2);
    assert_eq!(sample_index(&weights, 0.9999).unwrap(), 2);
}

#[test]
fn test_degenerate_distribution() {
    let sampler = DiscreteSampler::new(&[0.0, 0.0, 1.0]).unwrap();
    assert_eq!(sampler.sample(0.0), 2);
    assert_eq!(sampler.sample(0.5), 2);
    assert_eq!(sampler.len(), 3);
}

#[test]
fn test_negative_weight_rejected() {
    let err = DiscreteSampler::new(&[1.1, -0.1]).unwrap_err();
    match err {
        CohortError::InvalidDistribution { reason, .. } => assert!(reason.contains("negative")),
        other => panic!("unexpected error {:?}", other),
    }
}

#[test]
fn test_sum_outside_tolerance_rejected() {
    assert!(validate_distribution(&[0.5, 0.5 + 1e-6], "row").is_err());
    assert!(validate_distribution(&[0.5, 0.5 - 1e-6], "row").is_err());
}

#[test]
fn test_sum_inside_tolerance_accepted() {
    assert!(validate_distribution(&[0.5, 0.5 + 1e-10], "row").is_ok());
    assert!(validate_distribution(&[0.95, 0.035, 0.015], "row").is_ok());
}

#[test]
fn test_empirical_frequencies_match_weights() {
    let sampler = DiscreteSampler::new(&[0.1, 0.6, 0.3]).unwrap();
    let n = 10_000;
    let mut counts = [0usize; 3];
    for k in 0..n {
        // Evenly spaced draws give exact frequencies up to one bucket
        counts[sampler.sample(k as f64 / n as f64)] += 1;
    }
    assert_eq!(counts, [1000, 6000, 3000]);
}

/// Strategy: a random probability vector of length 1..8
fn distribution_strategy() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(0.0f64..10.0, 1..8).prop_filter_map("all-zero weights", |raw| {
        let total: f64 = raw.iter().sum();
        if total <= 0.0 {
            return None;
        }
        Some(raw.iter().map(|w| w / total).collect())
    })
}

proptest! {
    // 1. Sampled index always has positive weight
    #[test]
    fn sampled_index_has_positive_weight(weights in distribution_strategy(), u in 0.0f64..1.0) {
        let i = sample_index(&weights, u).unwrap();
        prop_assert!(i < weights.len());
        prop_assert!(weights[i] > 0.0, "index {} has zero weight in {:?}", i, weights);
    }

    // 2. Same (weights, u) gives the same index
    #[test]
    fn sampling_is_deterministic(weights in distribution_strategy(), u in 0.0f64..1.0) {
        prop_assert_eq!(sample_index(&weights, u).unwrap(), sample_index(&weights, u).unwrap());
    }

    // 3. Larger draws never give smaller indices
    #[test]
    fn sampling_is_monotone_in_u(weights in distribution_strategy(), a in 0.0f64..1.0, b in 0.0f64..1.0) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let sampler = DiscreteSampler::new(&weights).unwrap();
        prop_assert!(sampler.sample(lo) <= sampler.sample(hi));
    }
}
