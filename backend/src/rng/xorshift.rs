//! xorshift64* random number generator
//!
//! xorshift64* passes TestU01's BigCrush statistical tests, uses 64-bit state
//! and produces 64-bit output.
//!
//! # Determinism
//!
//! Same seed → same sequence of random numbers. Patient seeds are small
//! consecutive integers, so [`RngManager::for_patient`] runs them through a
//! splitmix64 finalizer first; neighbouring patients then start from
//! unrelated states.

use serde::{Deserialize, Serialize};

/// Deterministic random number generator using xorshift64*
///
/// # Example
/// ```
/// use markov_cohort_core_rs::RngManager;
///
/// let mut rng = RngManager::new(12345);
/// let u = rng.next_f64();
/// assert!(u >= 0.0 && u < 1.0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RngManager {
    /// Internal state (64-bit, never zero)
    state: u64,
}

impl RngManager {
    /// Create a new RNG with the given raw seed
    pub fn new(seed: u64) -> Self {
        // xorshift cannot leave the all-zero state
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Create the private generator of one patient
    ///
    /// # Example
    /// ```
    /// use markov_cohort_core_rs::RngManager;
    ///
    /// let mut a = RngManager::for_patient(0);
    /// let mut b = RngManager::for_patient(1);
    /// assert_ne!(a.next(), b.next());
    /// ```
    pub fn for_patient(patient_id: u64) -> Self {
        Self::new(splitmix64(patient_id))
    }

    /// Generate next random u64 value
    pub fn next(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545F4914F6CDD1D)
    }

    /// Get current RNG state (for replay)
    ///
    /// # Example
    /// ```
    /// use markov_cohort_core_rs::RngManager;
    ///
    /// let mut rng = RngManager::new(12345);
    /// rng.next();
    /// let mut replay = RngManager::new(rng.get_state());
    /// assert_eq!(rng.next(), replay.next());
    /// ```
    pub fn get_state(&self) -> u64 {
        self.state
    }

    /// Generate random f64 in range [0.0, 1.0)
    pub fn next_f64(&mut self) -> f64 {
        let value = self.next();
        // Top 53 bits fill the mantissa exactly
        (value >> 11) as f64 * (1.0 / ((1u64 << 53) as f64))
    }
}

fn splitmix64(seed: u64) -> u64 {
    let mut z = seed.wrapping_add(0x9E3779B97F4A7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58476D1CE4E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D049BB133111EB);
    z ^ (z >> 31)
}
