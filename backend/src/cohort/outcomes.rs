//! Cohort outcomes
//!
//! Turns a finished set of patient trajectories into population-level
//! statistics: survival times, stroke counts, mean survival time and the
//! survival curve (living patients over time).
//!
//! # Critical Invariants
//!
//! - `absorbed + alive_at_horizon + failed == pop_size`
//! - The survival curve starts at `(0, simulated)` with
//!   `simulated = pop_size - failed`, never increases, and ends at
//!   `alive_at_horizon`

use crate::error::{CohortError, CohortResult};
use crate::models::{HealthState, PatientFailure, PatientTrajectory};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::warn;

// ============================================================================
// Survival Curve
// ============================================================================

/// Piecewise-constant count of living patients over time
///
/// Stored as `(time, living)` breakpoints: the count holds from `time` until
/// the next breakpoint. Simultaneous deaths share one breakpoint.
///
/// # Example
/// ```
/// use markov_cohort_core_rs::SurvivalCurve;
///
/// let curve = SurvivalCurve::from_survival_times(4, &[2.5, 0.5, 0.5]);
/// assert_eq!(curve.breakpoints(), &[(0.0, 4), (0.5, 2), (2.5, 1)]);
/// assert_eq!(curve.living_at(1.0), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurvivalCurve {
    breakpoints: Vec<(f64, usize)>,
}

impl SurvivalCurve {
    /// Build the curve from the initial size and the multiset of death times
    ///
    /// Each time is a unit decrement; input order does not matter.
    pub fn from_survival_times(initial_size: usize, survival_times: &[f64]) -> Self {
        let mut sorted = survival_times.to_vec();
        sorted.sort_by(f64::total_cmp);

        let mut breakpoints = vec![(0.0, initial_size)];
        let mut living = initial_size;

        for time in sorted {
            living = living.saturating_sub(1);
            let same_time = breakpoints.len() > 1 && breakpoints.last().is_some_and(|bp| bp.0 == time);
            if !same_time {
                breakpoints.push((time, living));
            } else if let Some(last) = breakpoints.last_mut() {
                last.1 = living;
            }
        }

        Self { breakpoints }
    }

    /// Ordered `(time, living)` breakpoints, first one at time 0
    pub fn breakpoints(&self) -> &[(f64, usize)] {
        &self.breakpoints
    }

    /// Population at time 0
    pub fn initial_size(&self) -> usize {
        self.breakpoints.first().map_or(0, |bp| bp.1)
    }

    /// Living patients after the last recorded death
    pub fn final_count(&self) -> usize {
        self.breakpoints.last().map_or(0, |bp| bp.1)
    }

    /// Evaluate the step function at time `t`
    pub fn living_at(&self, t: f64) -> usize {
        let after = self.breakpoints.partition_point(|(time, _)| *time <= t);
        match after {
            0 => self.initial_size(),
            n => self.breakpoints[n - 1].1,
        }
    }
}

// ============================================================================
// Cohort Outcomes
// ============================================================================

/// Aggregated results of one cohort run
#[derive(Debug, Clone, PartialEq)]
pub struct CohortOutcomes {
    pop_size: usize,
    survival_times: Vec<f64>,
    stroke_counts: Vec<u32>,
    alive_at_horizon: usize,
    failures: Vec<PatientFailure>,
    survival_curve: SurvivalCurve,
}

impl CohortOutcomes {
    /// Survival times of absorbed patients, in patient order
    pub fn survival_times(&self) -> &[f64] {
        &self.survival_times
    }

    /// One stroke count per successfully simulated patient
    pub fn stroke_counts(&self) -> &[u32] {
        &self.stroke_counts
    }

    /// Arithmetic mean of the survival times
    ///
    /// # Errors
    ///
    /// `EmptyPopulation` if nobody reached an absorbing state.
    pub fn mean_survival_time(&self) -> CohortResult<f64> {
        if self.survival_times.is_empty() {
            return Err(CohortError::EmptyPopulation);
        }
        let total: f64 = self.survival_times.iter().sum();
        Ok(total / self.survival_times.len() as f64)
    }

    pub fn survival_curve(&self) -> &SurvivalCurve {
        &self.survival_curve
    }

    /// Patients in the cohort, failed ones included
    pub fn pop_size(&self) -> usize {
        self.pop_size
    }

    /// Patients whose run completed; the base of the survival curve
    pub fn simulated(&self) -> usize {
        self.stroke_counts.len()
    }

    /// Patients that reached an absorbing state within the horizon
    pub fn absorbed(&self) -> usize {
        self.survival_times.len()
    }

    pub fn alive_at_horizon(&self) -> usize {
        self.alive_at_horizon
    }

    pub fn failures(&self) -> &[PatientFailure] {
        &self.failures
    }

    pub fn total_strokes(&self) -> u64 {
        self.stroke_counts.iter().map(|&n| u64::from(n)).sum()
    }
}

/// Builds [`CohortOutcomes`] from finished trajectories in a single pass
pub struct OutcomesAggregator;

impl OutcomesAggregator {
    /// Aggregate `patients`, excluding the ones listed in `failures`
    pub fn aggregate<S: HealthState>(
        patients: &[PatientTrajectory<S>],
        failures: Vec<PatientFailure>,
    ) -> CohortOutcomes {
        let failed: HashSet<u64> = failures.iter().map(|f| f.patient_id).collect();

        let mut survival_times = Vec::new();
        let mut stroke_counts = Vec::with_capacity(patients.len());
        let mut alive_at_horizon = 0;

        for patient in patients.iter().filter(|p| !failed.contains(&p.id())) {
            match patient.survival_time() {
                Some(time) => survival_times.push(time),
                None => alive_at_horizon += 1,
            }
            stroke_counts.push(patient.stroke_count());
        }

        // Failed patients have no survival time and must not stay "alive"
        let simulated = stroke_counts.len();
        let survival_curve = SurvivalCurve::from_survival_times(simulated, &survival_times);

        CohortOutcomes {
            pop_size: patients.len(),
            survival_times,
            stroke_counts,
            alive_at_horizon,
            failures,
            survival_curve,
        }
    }
}

// ============================================================================
// Summary
// ============================================================================

/// Serializable digest of a cohort run, consumed by reporting tools
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutcomeSummary {
    pub pop_size: usize,
    pub absorbed: usize,
    pub alive_at_horizon: usize,
    pub failed: usize,
    /// `None` when nobody reached an absorbing state
    pub mean_survival_time: Option<f64>,
    pub total_strokes: u64,
    /// Survival times of absorbed patients, in patient order
    pub survival_times: Vec<f64>,
    /// One stroke count per successfully simulated patient
    pub stroke_counts: Vec<u32>,
    pub survival_curve: Vec<(f64, usize)>,
    pub failures: Vec<FailureRecord>,
    /// SHA-256 of the configuration that produced the run
    pub config_fingerprint: Option<String>,
}

/// Serializable form of a [`PatientFailure`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailureRecord {
    pub patient_id: u64,
    pub message: String,
}

impl OutcomeSummary {
    pub fn from_outcomes(outcomes: &CohortOutcomes, config_fingerprint: Option<String>) -> Self {
        let mean_survival_time = match outcomes.mean_survival_time() {
            Ok(mean) => Some(mean),
            Err(error) => {
                warn!(pop_size = outcomes.pop_size(), %error, "mean survival time undefined");
                None
            }
        };

        Self {
            pop_size: outcomes.pop_size(),
            absorbed: outcomes.absorbed(),
            alive_at_horizon: outcomes.alive_at_horizon(),
            failed: outcomes.failures().len(),
            mean_survival_time,
            total_strokes: outcomes.total_strokes(),
            survival_times: outcomes.survival_times().to_vec(),
            stroke_counts: outcomes.stroke_counts().to_vec(),
            survival_curve: outcomes.survival_curve().breakpoints().to_vec(),
            failures: outcomes
                .failures()
                .iter()
                .map(|f| FailureRecord {
                    patient_id: f.patient_id,
                    message: f.error.to_string(),
                })
                .collect(),
            config_fingerprint,
        }
    }
}
