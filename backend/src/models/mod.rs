//! Domain models for the cohort simulator

pub mod health_state;
pub mod patient;

// Re-exports
pub use health_state::{BasicState, CauseSpecificState, HealthState, TempStrokeState};
pub use patient::{PatientFailure, PatientTrajectory};
