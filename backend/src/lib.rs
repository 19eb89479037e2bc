//! Markov Cohort Simulator Core - Rust Engine
//!
//! Discrete-time Markov simulation of a patient cohort moving between
//! stroke-related health states, with deterministic per-patient randomness.
//!
//! # Architecture
//!
//! - **core**: Cycle counting against the time horizon
//! - **rng**: Deterministic random number generation
//! - **models**: Health state sets and the patient state machine
//! - **transitions**: Transition models (matrix-driven, rule-based) and sampling
//! - **cohort**: Cohort engine and outcome aggregation
//! - **config**: JSON configuration, presets and fingerprinting
//!
//! # Critical Invariants
//!
//! 1. All randomness is deterministic (each patient seeded from its id)
//! 2. Absorbing states are terminal; survival time is `cycle + 0.5`
//! 3. Transition distributions are validated once, never normalized
//! 4. FFI boundary is minimal and safe

// Module declarations
pub mod cohort;
pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod rng;
pub mod transitions;

// Re-exports for convenience
pub use cohort::{
    patient_seed, Cohort, CohortOutcomes, OutcomeSummary, OutcomesAggregator, SurvivalCurve,
};
pub use config::{CohortConfig, StateLayout, TransitionSpec};
pub use crate::core::time::CycleClock;
pub use error::{CohortError, CohortResult};
pub use models::{
    BasicState, CauseSpecificState, HealthState, PatientFailure, PatientTrajectory,
    TempStrokeState,
};
pub use rng::{RngManager, UniformSource};
pub use transitions::{
    DiscreteSampler, EventProbabilities, MatrixModel, RuleBasedModel, StepOutcome,
    TransitionModel,
};

// FFI module (when feature enabled)
#[cfg(feature = "pyo3")]
pub mod ffi;

// PyO3 exports (when feature enabled)
#[cfg(feature = "pyo3")]
use pyo3::prelude::*;

#[cfg(feature = "pyo3")]
#[pymodule]
fn markov_cohort_core_rs(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(ffi::cohort::run_cohort, m)?)?;
    m.add_function(wrap_pyfunction!(ffi::cohort::config_fingerprint, m)?)?;
    Ok(())
}
