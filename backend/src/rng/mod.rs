//! Deterministic random number generation
//!
//! Uses the xorshift64* algorithm. Every patient owns its own generator,
//! seeded from its id, so no random state is ever shared between patients.
//! CRITICAL: All randomness in the simulator MUST go through this module.

mod xorshift;

pub use xorshift::RngManager;

/// Source of uniform draws in `[0, 1)`
///
/// Transition models only see this trait, which lets tests replay a fixed
/// sequence of draws through [`SequenceSource`].
pub trait UniformSource {
    /// Next uniform draw in `[0, 1)`
    fn next_uniform(&mut self) -> f64;
}

impl UniformSource for RngManager {
    fn next_uniform(&mut self) -> f64 {
        self.next_f64()
    }
}

/// Replays a fixed sequence of uniform draws
///
/// # Example
/// ```
/// use markov_cohort_core_rs::rng::{SequenceSource, UniformSource};
///
/// let mut source = SequenceSource::new(vec![0.25, 0.75]);
/// assert_eq!(source.next_uniform(), 0.25);
/// assert_eq!(source.next_uniform(), 0.75);
/// assert_eq!(source.consumed(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct SequenceSource {
    draws: Vec<f64>,
    position: usize,
}

impl SequenceSource {
    pub fn new(draws: Vec<f64>) -> Self {
        Self { draws, position: 0 }
    }

    /// Number of draws handed out so far
    pub fn consumed(&self) -> usize {
        self.position
    }
}

impl UniformSource for SequenceSource {
    /// # Panics
    /// Panics when the sequence is exhausted.
    fn next_uniform(&mut self) -> f64 {
        let value = *self
            .draws
            .get(self.position)
            .unwrap_or_else(|| panic!("sequence exhausted after {} draws", self.position));
        self.position += 1;
        value
    }
}
