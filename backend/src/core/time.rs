//! Time management for the simulation
//!
//! The model advances in discrete annual cycles. A trajectory may run for at
//! most `horizon` cycles; the horizon is a pure step count.

use serde::{Deserialize, Serialize};

/// Counts elapsed cycles against a fixed horizon
///
/// # Example
/// ```
/// use markov_cohort_core_rs::CycleClock;
///
/// let mut clock = CycleClock::new(3);
/// assert_eq!(clock.current_cycle(), 0);
/// assert!(!clock.is_exhausted());
///
/// clock.advance();
/// clock.advance();
/// clock.advance();
/// assert!(clock.is_exhausted());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleClock {
    /// Cycles elapsed since the trajectory started
    current_cycle: usize,
    /// Maximum number of cycles
    horizon: usize,
}

impl CycleClock {
    /// Create a new clock positioned at cycle 0
    ///
    /// # Panics
    /// Panics if `horizon` is zero. Cohort construction validates the horizon
    /// before any clock is built.
    pub fn new(horizon: usize) -> Self {
        assert!(horizon > 0, "horizon must be positive");
        Self {
            current_cycle: 0,
            horizon,
        }
    }

    /// Advance by one cycle
    pub fn advance(&mut self) {
        self.current_cycle += 1;
    }

    /// Index of the cycle about to be simulated (0-indexed)
    pub fn current_cycle(&self) -> usize {
        self.current_cycle
    }

    /// Maximum number of cycles
    pub fn horizon(&self) -> usize {
        self.horizon
    }

    /// Whether the horizon has been reached
    pub fn is_exhausted(&self) -> bool {
        self.current_cycle >= self.horizon
    }

    /// Event time of something that happened during the current cycle,
    /// placed at the cycle midpoint (half-cycle correction)
    ///
    /// # Example
    /// ```
    /// use markov_cohort_core_rs::CycleClock;
    ///
    /// let mut clock = CycleClock::new(10);
    /// clock.advance();
    /// clock.advance();
    /// assert_eq!(clock.midpoint(), 2.5);
    /// ```
    pub fn midpoint(&self) -> f64 {
        self.current_cycle as f64 + 0.5
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[should_panic(expected = "horizon must be positive")]
    fn test_zero_horizon_panics() {
        CycleClock::new(0);
    }

    #[test]
    fn test_midpoint_at_start() {
        let clock = CycleClock::new(5);
        assert_eq!(clock.midpoint(), 0.5);
    }

    #[test]
    fn test_exhausted_exactly_at_horizon() {
        let mut clock = CycleClock::new(2);
        clock.advance();
        assert!(!clock.is_exhausted());
        clock.advance();
        assert!(clock.is_exhausted());
        assert_eq!(clock.horizon(), 2);
    }
}
