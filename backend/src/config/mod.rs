//! Cohort configuration
//!
//! A [`CohortConfig`] is everything needed to reproduce a run: cohort id,
//! population size, horizon and one [`TransitionSpec`]. It is read from JSON:
//!
//! ```json
//! {
//!   "cohort_id": 1,
//!   "pop_size": 2000,
//!   "horizon": 50,
//!   "transition": {
//!     "type": "Matrix",
//!     "layout": "TempStroke",
//!     "rows": [[0.95, 0.035, 0.0, 0.015],
//!              [0.0, 0.0, 0.7, 0.3],
//!              [0.0, 0.2, 0.8, 0.0],
//!              [0.0, 0.0, 0.0, 1.0]]
//!   }
//! }
//! ```
//!
//! or, for the rule-based model:
//!
//! ```json
//! {
//!   "pop_size": 500,
//!   "horizon": 30,
//!   "transition": {
//!     "type": "Rules",
//!     "stroke_probability_while_well": 0.035,
//!     "recurrent_stroke_probability": 0.2,
//!     "survival_probability_given_stroke": 0.7,
//!     "all_cause_death_probability": 0.015
//!   }
//! }
//! ```
//!
//! The `transition` field picks the concrete state set at construction time;
//! [`CohortConfig::run`] dispatches to the matching generic [`Cohort`].

pub mod fingerprint;
pub mod presets;

use crate::cohort::{Cohort, CohortOutcomes, OutcomeSummary};
use crate::error::{CohortError, CohortResult};
use crate::models::{BasicState, TempStrokeState};
use crate::transitions::{EventProbabilities, MatrixModel, RuleBasedModel, TransitionModel};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

pub use fingerprint::compute_config_hash;

/// State set of a matrix-driven model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StateLayout {
    /// Well, PostStroke, Dead (3×3)
    Basic,
    /// Well, Stroke, PostStroke, Dead (4×4)
    TempStroke,
}

/// Transition model selection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TransitionSpec {
    /// Row-stochastic matrix over the given layout
    Matrix {
        layout: StateLayout,
        rows: Vec<Vec<f64>>,
    },

    /// Rule-based model over Well, PostStroke, StrokeDeath, AllCauseDeath
    Rules(EventProbabilities),
}

fn default_cohort_id() -> u64 {
    presets::REFERENCE_COHORT_ID
}

/// Complete cohort configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CohortConfig {
    /// Cohort id; seeds patient generators together with `pop_size`
    #[serde(default = "default_cohort_id")]
    pub cohort_id: u64,

    /// Number of patients
    pub pop_size: usize,

    /// Number of annual cycles
    pub horizon: usize,

    /// Transition model
    pub transition: TransitionSpec,
}

impl CohortConfig {
    /// Reference run with the three-state matrix
    pub fn basic_preset() -> Self {
        Self {
            cohort_id: presets::REFERENCE_COHORT_ID,
            pop_size: presets::POP_SIZE,
            horizon: presets::SIM_TIME_STEPS,
            transition: TransitionSpec::Matrix {
                layout: StateLayout::Basic,
                rows: presets::trans_matrix(),
            },
        }
    }

    /// Reference run with the four-state matrix and transient Stroke state
    pub fn temp_stroke_preset() -> Self {
        Self {
            cohort_id: presets::REFERENCE_COHORT_ID,
            pop_size: presets::POP_SIZE,
            horizon: presets::SIM_TIME_STEPS,
            transition: TransitionSpec::Matrix {
                layout: StateLayout::TempStroke,
                rows: presets::trans_matrix_stroke(),
            },
        }
    }

    /// Parse a configuration from JSON
    pub fn from_json_str(json: &str) -> CohortResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| CohortError::InvalidConfig(format!("config parse failed: {}", e)))
    }

    /// Read and parse a JSON configuration file
    pub fn from_json_file(path: impl AsRef<Path>) -> CohortResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            CohortError::InvalidConfig(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_json_str(&json)
    }

    /// SHA-256 fingerprint of this configuration
    pub fn fingerprint(&self) -> CohortResult<String> {
        compute_config_hash(self)
    }

    /// Validate everything without simulating
    pub fn validate(&self) -> CohortResult<()> {
        if self.pop_size == 0 {
            return Err(CohortError::InvalidConfig("pop_size must be positive".to_string()));
        }
        if self.horizon == 0 {
            return Err(CohortError::InvalidConfig("horizon must be positive".to_string()));
        }

        match &self.transition {
            TransitionSpec::Matrix {
                layout: StateLayout::Basic,
                rows,
            } => MatrixModel::<BasicState>::new(rows.clone()).map(|_| ()),
            TransitionSpec::Matrix {
                layout: StateLayout::TempStroke,
                rows,
            } => MatrixModel::<TempStrokeState>::new(rows.clone()).map(|_| ()),
            TransitionSpec::Rules(probabilities) => probabilities.validate(),
        }
    }

    /// Build the configured cohort and simulate it
    ///
    /// # Errors
    ///
    /// Any validation error of the transition spec, population size or
    /// horizon. Per-patient failures are reported inside the outcomes.
    pub fn run(&self) -> CohortResult<CohortOutcomes> {
        debug!(
            cohort_id = self.cohort_id,
            transition = ?self.transition_kind(),
            "running cohort from config"
        );

        let outcomes = match &self.transition {
            TransitionSpec::Matrix {
                layout: StateLayout::Basic,
                rows,
            } => self
                .build(MatrixModel::<BasicState>::new(rows.clone())?)?
                .simulate(),
            TransitionSpec::Matrix {
                layout: StateLayout::TempStroke,
                rows,
            } => self
                .build(MatrixModel::<TempStrokeState>::new(rows.clone())?)?
                .simulate(),
            TransitionSpec::Rules(probabilities) => self
                .build(RuleBasedModel::new(probabilities.clone())?)?
                .simulate(),
        };

        Ok(outcomes)
    }

    /// Run and digest the outcomes, stamped with the config fingerprint
    pub fn summarize(&self) -> CohortResult<OutcomeSummary> {
        let outcomes = self.run()?;
        Ok(OutcomeSummary::from_outcomes(&outcomes, Some(self.fingerprint()?)))
    }

    fn build<M: TransitionModel>(&self, model: M) -> CohortResult<Cohort<M>> {
        Cohort::new(self.cohort_id, self.pop_size, self.horizon, model)
    }

    fn transition_kind(&self) -> &'static str {
        match &self.transition {
            TransitionSpec::Matrix {
                layout: StateLayout::Basic,
                ..
            } => "matrix/basic",
            TransitionSpec::Matrix {
                layout: StateLayout::TempStroke,
                ..
            } => "matrix/temp-stroke",
            TransitionSpec::Rules(_) => "rules",
        }
    }
}
