//! Error taxonomy for cohort simulation
//!
//! Validation errors are raised once, when a model or cohort is built.
//! Runtime errors are scoped to a single patient and never abort a batch.

use thiserror::Error;

/// Errors produced while building or running a cohort
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CohortError {
    /// A probability vector has negative weights or does not sum to 1
    #[error("Invalid distribution ({context}): {reason}")]
    InvalidDistribution { context: String, reason: String },

    /// A state ordinal has no transition row or no mapped state
    #[error("State index {index} out of range (model covers {len} states)")]
    StateIndexOutOfRange { index: usize, len: usize },

    /// Mean survival time requested but nobody reached an absorbing state
    #[error("No individual reached an absorbing state; mean survival time is undefined")]
    EmptyPopulation,

    /// Configuration validation error
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

impl CohortError {
    pub(crate) fn invalid_distribution(context: impl Into<String>, reason: impl Into<String>) -> Self {
        CohortError::InvalidDistribution {
            context: context.into(),
            reason: reason.into(),
        }
    }
}

/// Convenience alias used throughout the crate
pub type CohortResult<T> = Result<T, CohortError>;
