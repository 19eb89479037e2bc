//! Transition models
//!
//! A transition model answers one question: given a patient's current state
//! and the patient's private random source, what is the next state? Two
//! strategies implement [`TransitionModel`]:
//!
//! 1. **[`MatrixModel`]**: a row-stochastic matrix, one row per state, sampled
//!    with [`DiscreteSampler`]
//! 2. **[`RuleBasedModel`]**: explicit branching over named event
//!    probabilities (death, stroke, survival of the stroke)
//!
//! Models are immutable once built and shared read-only by every patient in
//! a cohort.
//!
//! ```rust
//! use markov_cohort_core_rs::transitions::{MatrixModel, TransitionModel};
//! use markov_cohort_core_rs::{BasicState, RngManager};
//!
//! let model = MatrixModel::<BasicState>::new(vec![
//!     vec![0.95, 0.035, 0.015],
//!     vec![0.8, 0.14, 0.06],
//!     vec![0.0, 0.0, 1.0],
//! ])
//! .unwrap();
//!
//! let mut rng = RngManager::for_patient(0);
//! let step = model.next_state(BasicState::Dead, &mut rng).unwrap();
//! assert_eq!(step.next, BasicState::Dead);
//! ```

use crate::error::CohortResult;
use crate::models::HealthState;
use crate::rng::UniformSource;

pub mod matrix;
pub mod rules;
pub mod sampler;

pub use matrix::MatrixModel;
pub use rules::{EventProbabilities, RuleBasedModel};
pub use sampler::{sample_index, validate_distribution, DiscreteSampler, PROBABILITY_TOLERANCE};

/// Result of one simulated cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepOutcome<S> {
    /// State at the end of the cycle
    pub next: S,
    /// Whether a stroke happened during the cycle
    pub stroke: bool,
}

impl<S: HealthState> StepOutcome<S> {
    /// Move from `current` to `next`, counting a stroke when the layout
    /// treats that move as one
    pub fn transition(current: S, next: S) -> Self {
        Self {
            next,
            stroke: S::is_stroke_transition(current, next),
        }
    }

    /// Stay in `current` with no event
    pub fn unchanged(current: S) -> Self {
        Self {
            next: current,
            stroke: false,
        }
    }
}

/// Strategy deciding each patient's next state
pub trait TransitionModel: Send + Sync {
    /// State set the model is defined over
    type State: HealthState;

    /// Draw the next state for a patient currently in `current`
    ///
    /// # Errors
    ///
    /// `StateIndexOutOfRange` when `current` (or a sampled outcome) has no
    /// counterpart in the model.
    fn next_state(
        &self,
        current: Self::State,
        rng: &mut dyn UniformSource,
    ) -> CohortResult<StepOutcome<Self::State>>;
}

impl<M: TransitionModel + ?Sized> TransitionModel for &M {
    type State = M::State;

    fn next_state(
        &self,
        current: Self::State,
        rng: &mut dyn UniformSource,
    ) -> CohortResult<StepOutcome<Self::State>> {
        (**self).next_state(current, rng)
    }
}
