//! Patient trajectory: one individual's state machine
//!
//! A patient starts in `Well` at cycle 0 and is advanced one cycle at a time
//! until it enters an absorbing state or the horizon runs out.
//!
//! # Update rule
//!
//! For each simulated cycle `k`:
//! 1. ask the transition model for the next state
//! 2. count a stroke if the step reports one
//! 3. on entering an absorbing state, record survival time `k + 0.5`
//!    (half-cycle correction) and stop
//!
//! # Critical Invariants
//!
//! - Once absorbed, further steps change nothing
//! - Survival time is set exactly once, and only on absorption
//! - All randomness comes from the patient's own [`RngManager`]

use crate::core::time::CycleClock;
use crate::error::{CohortError, CohortResult};
use crate::models::HealthState;
use crate::rng::RngManager;
use crate::transitions::TransitionModel;
use tracing::trace;

/// One simulated individual
#[derive(Debug, Clone)]
pub struct PatientTrajectory<S: HealthState> {
    /// Patient id; also the seed of `rng`
    id: u64,

    /// Private random source
    rng: RngManager,

    /// Cycle counter bounded by the horizon
    clock: CycleClock,

    /// Current health state
    state: S,

    /// Set on absorption, `None` while alive
    survival_time: Option<f64>,

    /// Number of stroke events so far
    stroke_count: u32,
}

impl<S: HealthState> PatientTrajectory<S> {
    /// Create a patient in the initial state with an id-seeded generator
    ///
    /// # Example
    /// ```
    /// use markov_cohort_core_rs::{BasicState, PatientTrajectory};
    ///
    /// let patient = PatientTrajectory::<BasicState>::new(7, 50);
    /// assert_eq!(patient.state(), BasicState::Well);
    /// assert!(patient.is_alive());
    /// assert_eq!(patient.survival_time(), None);
    /// ```
    pub fn new(id: u64, horizon: usize) -> Self {
        Self::with_rng(id, horizon, RngManager::for_patient(id))
    }

    /// Create a patient with an explicitly provided generator
    pub fn with_rng(id: u64, horizon: usize, rng: RngManager) -> Self {
        Self {
            id,
            rng,
            clock: CycleClock::new(horizon),
            state: S::initial(),
            survival_time: None,
            stroke_count: 0,
        }
    }

    /// Simulate a single cycle
    ///
    /// Does nothing once the patient is absorbed or the horizon is reached.
    pub fn step<M>(&mut self, model: &M) -> CohortResult<()>
    where
        M: TransitionModel<State = S> + ?Sized,
    {
        if !self.is_alive() || self.clock.is_exhausted() {
            return Ok(());
        }

        let outcome = model.next_state(self.state, &mut self.rng)?;

        if outcome.stroke {
            self.stroke_count += 1;
        }

        if outcome.next.is_absorbing() {
            let time = self.clock.midpoint();
            trace!(
                patient_id = self.id,
                from = ?self.state,
                to = ?outcome.next,
                survival_time = time,
                "patient absorbed"
            );
            self.survival_time = Some(time);
        }

        self.state = outcome.next;
        self.clock.advance();
        Ok(())
    }

    /// Simulate until absorption or the horizon, whichever comes first
    ///
    /// # Errors
    ///
    /// Propagates the transition model's error; the patient keeps the state
    /// it had before the failing cycle.
    pub fn simulate<M>(&mut self, model: &M) -> CohortResult<()>
    where
        M: TransitionModel<State = S> + ?Sized,
    {
        while self.is_alive() && !self.clock.is_exhausted() {
            self.step(model)?;
        }
        Ok(())
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn state(&self) -> S {
        self.state
    }

    /// Survival time with half-cycle correction, `None` if still alive
    pub fn survival_time(&self) -> Option<f64> {
        self.survival_time
    }

    pub fn stroke_count(&self) -> u32 {
        self.stroke_count
    }

    /// Cycles simulated so far
    pub fn cycles_elapsed(&self) -> usize {
        self.clock.current_cycle()
    }

    pub fn is_alive(&self) -> bool {
        !self.state.is_absorbing()
    }
}

/// A patient whose simulation failed; isolated from the rest of the cohort
#[derive(Debug, Clone, PartialEq)]
pub struct PatientFailure {
    pub patient_id: u64,
    pub error: CohortError,
}
