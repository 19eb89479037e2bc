//! Matrix-driven transition model

use super::sampler::DiscreteSampler;
use super::{StepOutcome, TransitionModel};
use crate::error::{CohortError, CohortResult};
use crate::models::HealthState;
use crate::rng::UniformSource;
use std::marker::PhantomData;

/// Transition model backed by a square row-stochastic matrix
///
/// Row `i` holds the distribution of the next state for a patient in the
/// state with ordinal `i`. The matrix dimension must equal `S::COUNT`, every
/// row must be a valid distribution, and absorbing rows may only put mass on
/// absorbing states.
#[derive(Debug, Clone)]
pub struct MatrixModel<S: HealthState> {
    rows: Vec<DiscreteSampler>,
    matrix: Vec<Vec<f64>>,
    _states: PhantomData<S>,
}

impl<S: HealthState> MatrixModel<S> {
    /// Validate `matrix` and build the per-row samplers
    ///
    /// # Errors
    ///
    /// - `InvalidConfig` if the matrix is not `S::COUNT × S::COUNT`
    /// - `InvalidDistribution` if a row has negative weights, does not sum
    ///   to 1, or leaks mass out of an absorbing state
    pub fn new(matrix: Vec<Vec<f64>>) -> CohortResult<Self> {
        if matrix.len() != S::COUNT {
            return Err(CohortError::InvalidConfig(format!(
                "transition matrix has {} rows, expected {}",
                matrix.len(),
                S::COUNT
            )));
        }

        let mut rows = Vec::with_capacity(S::COUNT);
        for (i, row) in matrix.iter().enumerate() {
            if row.len() != S::COUNT {
                return Err(CohortError::InvalidConfig(format!(
                    "transition matrix row {} has {} columns, expected {}",
                    i,
                    row.len(),
                    S::COUNT
                )));
            }

            let state = S::from_index(i).ok_or(CohortError::StateIndexOutOfRange {
                index: i,
                len: S::COUNT,
            })?;
            let context = format!("transition row {} ({:?})", i, state);
            let sampler = DiscreteSampler::labelled(row, &context)?;

            if state.is_absorbing() {
                check_absorbing_row::<S>(row, &context)?;
            }

            rows.push(sampler);
        }

        Ok(Self {
            rows,
            matrix,
            _states: PhantomData,
        })
    }

    /// The validated matrix, row-major
    pub fn matrix(&self) -> &[Vec<f64>] {
        &self.matrix
    }
}

fn check_absorbing_row<S: HealthState>(row: &[f64], context: &str) -> CohortResult<()> {
    for (j, weight) in row.iter().enumerate() {
        let target_absorbing = S::from_index(j).is_some_and(|s| s.is_absorbing());
        if *weight > 0.0 && !target_absorbing {
            return Err(CohortError::invalid_distribution(
                context,
                format!("absorbing state moves to non-absorbing column {} with mass {}", j, weight),
            ));
        }
    }
    Ok(())
}

impl<S: HealthState> TransitionModel for MatrixModel<S> {
    type State = S;

    fn next_state(&self, current: S, rng: &mut dyn UniformSource) -> CohortResult<StepOutcome<S>> {
        let row = self
            .rows
            .get(current.index())
            .ok_or(CohortError::StateIndexOutOfRange {
                index: current.index(),
                len: self.rows.len(),
            })?;

        let sampled = row.sample(rng.next_uniform());
        let next = S::from_index(sampled).ok_or(CohortError::StateIndexOutOfRange {
            index: sampled,
            len: S::COUNT,
        })?;

        Ok(StepOutcome::transition(current, next))
    }
}
