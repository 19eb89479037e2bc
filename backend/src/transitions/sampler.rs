//! Discrete sampling from an empirical probability distribution
//!
//! Given weights `w` and a uniform draw `u ∈ [0, 1)`, the sampler returns the
//! smallest index `i` such that `w[0] + ... + w[i] > u`. Weights are validated
//! once; sampling itself is a pure binary search over the cumulative sums.

use crate::error::{CohortError, CohortResult};

/// Maximum deviation of a distribution's total mass from 1
pub const PROBABILITY_TOLERANCE: f64 = 1e-9;

/// Check that `weights` is a proper probability distribution
///
/// Weights must be finite, non-negative and sum to 1 within
/// [`PROBABILITY_TOLERANCE`]. Nothing is ever normalized silently.
pub fn validate_distribution(weights: &[f64], context: &str) -> CohortResult<()> {
    if weights.is_empty() {
        return Err(CohortError::invalid_distribution(context, "no weights"));
    }

    for (i, w) in weights.iter().enumerate() {
        if !w.is_finite() {
            return Err(CohortError::invalid_distribution(
                context,
                format!("weight {} is not finite ({})", i, w),
            ));
        }
        if *w < 0.0 {
            return Err(CohortError::invalid_distribution(
                context,
                format!("weight {} is negative ({})", i, w),
            ));
        }
    }

    let total: f64 = weights.iter().sum();
    if (total - 1.0).abs() > PROBABILITY_TOLERANCE {
        return Err(CohortError::invalid_distribution(
            context,
            format!("weights sum to {} instead of 1", total),
        ));
    }

    Ok(())
}

/// Validated discrete distribution, ready for repeated sampling
///
/// # Example
/// ```
/// use markov_cohort_core_rs::DiscreteSampler;
///
/// let sampler = DiscreteSampler::new(&[0.25, 0.5, 0.25]).unwrap();
/// assert_eq!(sampler.sample(0.0), 0);
/// assert_eq!(sampler.sample(0.25), 1);
/// assert_eq!(sampler.sample(0.74), 1);
/// assert_eq!(sampler.sample(0.75), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DiscreteSampler {
    cumulative: Vec<f64>,
    /// Fallback when rounding leaves `u` at or beyond the final cumulative sum
    last_positive: usize,
}

impl DiscreteSampler {
    /// Validate `weights` and precompute cumulative sums
    pub fn new(weights: &[f64]) -> CohortResult<Self> {
        Self::labelled(weights, "discrete weights")
    }

    /// Same as [`DiscreteSampler::new`], naming the distribution in errors
    pub fn labelled(weights: &[f64], context: &str) -> CohortResult<Self> {
        validate_distribution(weights, context)?;

        let cumulative = weights
            .iter()
            .scan(0.0, |acc, w| {
                *acc += w;
                Some(*acc)
            })
            .collect();

        // Validation guarantees at least one positive weight
        let last_positive = weights.iter().rposition(|w| *w > 0.0).unwrap_or(0);

        Ok(Self {
            cumulative,
            last_positive,
        })
    }

    /// Draw an index for the uniform value `u ∈ [0, 1)`
    pub fn sample(&self, u: f64) -> usize {
        debug_assert!((0.0..1.0).contains(&u), "uniform draw {} outside [0, 1)", u);

        let index = self.cumulative.partition_point(|c| *c <= u);
        if index < self.cumulative.len() {
            index
        } else {
            self.last_positive
        }
    }

    /// Number of outcomes
    pub fn len(&self) -> usize {
        self.cumulative.len()
    }

    /// Always false for a validated sampler
    pub fn is_empty(&self) -> bool {
        self.cumulative.is_empty()
    }
}

/// One-shot validate-and-sample
///
/// Same `(weights, u)` always yields the same index.
pub fn sample_index(weights: &[f64], u: f64) -> CohortResult<usize> {
    Ok(DiscreteSampler::new(weights)?.sample(u))
}
