//! Cohort engine
//!
//! Builds a population of patients that share one transition model and runs
//! each of them to absorption or to the horizon.
//!
//! ```text
//! Cohort::new          validate, seed patient i with cohort_id * pop_size + i
//! Cohort::simulate     advance every patient independently
//!                      collect per-patient failures
//!                      aggregate once
//! ```
//!
//! # Example
//!
//! ```rust
//! use markov_cohort_core_rs::{BasicState, Cohort, MatrixModel};
//!
//! let model = MatrixModel::<BasicState>::new(vec![
//!     vec![0.95, 0.035, 0.015],
//!     vec![0.8, 0.14, 0.06],
//!     vec![0.0, 0.0, 1.0],
//! ])
//! .unwrap();
//!
//! let mut cohort = Cohort::new(1, 200, 50, model).unwrap();
//! let outcomes = cohort.simulate();
//!
//! assert_eq!(outcomes.absorbed() + outcomes.alive_at_horizon(), 200);
//! ```

use crate::cohort::outcomes::{CohortOutcomes, OutcomesAggregator};
use crate::error::{CohortError, CohortResult};
use crate::models::{PatientFailure, PatientTrajectory};
use crate::transitions::TransitionModel;
use tracing::{debug, warn};

/// Patient seed: `cohort_id * pop_size + index`
///
/// Wrapping arithmetic keeps very large cohort ids well-defined.
pub fn patient_seed(cohort_id: u64, pop_size: usize, index: usize) -> u64 {
    cohort_id
        .wrapping_mul(pop_size as u64)
        .wrapping_add(index as u64)
}

/// A population of independent patients under one transition model
pub struct Cohort<M: TransitionModel> {
    id: u64,
    horizon: usize,
    model: M,
    patients: Vec<PatientTrajectory<M::State>>,
    outcomes: Option<CohortOutcomes>,
}

impl<M: TransitionModel> Cohort<M> {
    /// Build `pop_size` patients, all starting in the initial state
    ///
    /// # Errors
    ///
    /// `InvalidConfig` if `pop_size` or `horizon` is zero. No patient is
    /// built in that case.
    pub fn new(id: u64, pop_size: usize, horizon: usize, model: M) -> CohortResult<Self> {
        if pop_size == 0 {
            return Err(CohortError::InvalidConfig(
                "pop_size must be positive".to_string(),
            ));
        }
        if horizon == 0 {
            return Err(CohortError::InvalidConfig(
                "horizon must be positive".to_string(),
            ));
        }

        let patients = (0..pop_size)
            .map(|i| PatientTrajectory::new(patient_seed(id, pop_size, i), horizon))
            .collect();

        debug!(cohort_id = id, pop_size, horizon, "cohort built");

        Ok(Self {
            id,
            horizon,
            model,
            patients,
            outcomes: None,
        })
    }

    /// Run every patient and aggregate the results
    ///
    /// A patient whose model step fails is recorded in
    /// [`CohortOutcomes::failures`] and left out of the statistics; the
    /// remaining patients are unaffected.
    ///
    /// The cohort runs once. Later calls return the first outcomes without
    /// touching any patient.
    pub fn simulate(&mut self) -> CohortOutcomes {
        if let Some(outcomes) = &self.outcomes {
            return outcomes.clone();
        }

        let mut failures = Vec::new();

        for patient in &mut self.patients {
            if let Err(error) = patient.simulate(&self.model) {
                warn!(cohort_id = self.id, patient_id = patient.id(), %error, "patient simulation failed");
                failures.push(PatientFailure {
                    patient_id: patient.id(),
                    error,
                });
            }
        }

        let outcomes = OutcomesAggregator::aggregate(&self.patients, failures);

        debug!(
            cohort_id = self.id,
            absorbed = outcomes.absorbed(),
            alive = outcomes.alive_at_horizon(),
            failed = outcomes.failures().len(),
            "cohort simulated"
        );

        self.outcomes = Some(outcomes.clone());
        outcomes
    }

    /// Outcomes of the run, once [`Cohort::simulate`] has been called
    pub fn outcomes(&self) -> Option<&CohortOutcomes> {
        self.outcomes.as_ref()
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn pop_size(&self) -> usize {
        self.patients.len()
    }

    pub fn horizon(&self) -> usize {
        self.horizon
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn patients(&self) -> &[PatientTrajectory<M::State>] {
        &self.patients
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BasicState, HealthState};
    use crate::rng::UniformSource;
    use crate::transitions::{MatrixModel, StepOutcome};
    use tracing_test::traced_test;

    /// Rejects every patient
    struct BrokenModel;

    impl TransitionModel for BrokenModel {
        type State = BasicState;

        fn next_state(
            &self,
            current: BasicState,
            _rng: &mut dyn UniformSource,
        ) -> CohortResult<StepOutcome<BasicState>> {
            Err(CohortError::StateIndexOutOfRange {
                index: current.index() + 10,
                len: 3,
            })
        }
    }

    fn identity() -> MatrixModel<BasicState> {
        MatrixModel::new(vec![
            vec![1.0, 0.0, 0.0],
            vec![0.0, 1.0, 0.0],
            vec![0.0, 0.0, 1.0],
        ])
        .unwrap()
    }

    #[test]
    fn test_patient_seed_formula() {
        assert_eq!(patient_seed(1, 2000, 0), 2000);
        assert_eq!(patient_seed(1, 2000, 1999), 3999);
        assert_eq!(patient_seed(0, 10, 3), 3);
    }

    #[test]
    fn test_patients_get_seeded_ids() {
        let cohort = Cohort::new(2, 5, 10, identity()).unwrap();
        let ids: Vec<u64> = cohort.patients().iter().map(|p| p.id()).collect();
        assert_eq!(ids, vec![10, 11, 12, 13, 14]);
    }

    #[test]
    fn test_zero_population_rejected() {
        let err = Cohort::new(1, 0, 10, identity()).err().unwrap();
        assert!(matches!(err, CohortError::InvalidConfig(_)));
    }

    #[test]
    fn test_zero_horizon_rejected() {
        let err = Cohort::new(1, 10, 0, identity()).err().unwrap();
        assert_eq!(err, CohortError::InvalidConfig("horizon must be positive".to_string()));
    }

    #[test]
    fn test_borrowed_model_can_be_shared() {
        let model = identity();
        let mut a = Cohort::new(1, 3, 4, &model).unwrap();
        let mut b = Cohort::new(2, 3, 4, &model).unwrap();
        assert_eq!(a.simulate().alive_at_horizon(), 3);
        assert_eq!(b.simulate().alive_at_horizon(), 3);
    }

    #[traced_test]
    #[test]
    fn test_failed_patients_are_logged_and_excluded() {
        let mut cohort = Cohort::new(1, 3, 5, BrokenModel).unwrap();
        let outcomes = cohort.simulate();

        assert_eq!(outcomes.failures().len(), 3);
        assert_eq!(outcomes.absorbed(), 0);
        assert_eq!(outcomes.alive_at_horizon(), 0);
        assert!(outcomes.stroke_counts().is_empty());
        assert!(logs_contain("patient simulation failed"));
    }

    #[test]
    fn test_failed_patients_are_not_retried() {
        let mut cohort = Cohort::new(1, 3, 5, BrokenModel).unwrap();
        assert!(cohort.outcomes().is_none());

        let first = cohort.simulate();
        let cycles: Vec<usize> = cohort.patients().iter().map(|p| p.cycles_elapsed()).collect();
        let second = cohort.simulate();

        assert_eq!(first, second);
        assert_eq!(cohort.outcomes(), Some(&first));
        let after: Vec<usize> = cohort.patients().iter().map(|p| p.cycles_elapsed()).collect();
        assert_eq!(cycles, after);
    }

    #[traced_test]
    #[test]
    fn test_cohort_run_is_logged() {
        let mut cohort = Cohort::new(9, 2, 1, identity()).unwrap();
        cohort.simulate();
        assert!(logs_contain("cohort built"));
        assert!(logs_contain("cohort simulated"));
    }
}
