//! Cohort simulation and outcome aggregation

pub mod engine;
pub mod outcomes;

pub use engine::{patient_seed, Cohort};
pub use outcomes::{
    CohortOutcomes, FailureRecord, OutcomeSummary, OutcomesAggregator, SurvivalCurve,
};
