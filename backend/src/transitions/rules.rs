//! Rule-based transition model
//!
//! Instead of a matrix, each cycle runs a fixed sequence of Bernoulli checks
//! for a living patient:
//!
//! ```text
//! 1. all-cause death?   (only if configured)      → AllCauseDeath
//! 2. stroke?            (Well / PostStroke rate)  → otherwise unchanged
//! 3. survive stroke?                              → PostStroke or StrokeDeath
//! ```
//!
//! Each check consumes exactly one uniform draw, in this order, so replaying
//! a draw sequence replays the path. Absorbed patients consume no draws.

use super::{StepOutcome, TransitionModel};
use crate::error::{CohortError, CohortResult};
use crate::models::CauseSpecificState;
use crate::rng::UniformSource;
use serde::{Deserialize, Serialize};

/// Named event probabilities of the rule-based model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventProbabilities {
    /// Annual probability of a first stroke while Well
    pub stroke_probability_while_well: f64,

    /// Annual probability of another stroke while PostStroke
    pub recurrent_stroke_probability: f64,

    /// Probability of surviving a stroke
    pub survival_probability_given_stroke: f64,

    /// Annual probability of death from other causes (None = not modelled)
    #[serde(default)]
    pub all_cause_death_probability: Option<f64>,
}

impl EventProbabilities {
    /// Check that every probability lies in `[0, 1]`
    pub fn validate(&self) -> CohortResult<()> {
        check_probability("stroke_probability_while_well", self.stroke_probability_while_well)?;
        check_probability("recurrent_stroke_probability", self.recurrent_stroke_probability)?;
        check_probability(
            "survival_probability_given_stroke",
            self.survival_probability_given_stroke,
        )?;
        if let Some(p) = self.all_cause_death_probability {
            check_probability("all_cause_death_probability", p)?;
        }
        Ok(())
    }
}

fn check_probability(name: &str, p: f64) -> CohortResult<()> {
    if !p.is_finite() || !(0.0..=1.0).contains(&p) {
        return Err(CohortError::invalid_distribution(
            name,
            format!("probability {} outside [0, 1]", p),
        ));
    }
    Ok(())
}

/// Transition model built from explicit branching rules
#[derive(Debug, Clone)]
pub struct RuleBasedModel {
    probabilities: EventProbabilities,
}

impl RuleBasedModel {
    /// Validate the probabilities and build the model
    pub fn new(probabilities: EventProbabilities) -> CohortResult<Self> {
        probabilities.validate()?;
        Ok(Self { probabilities })
    }

    /// The validated event probabilities
    pub fn probabilities(&self) -> &EventProbabilities {
        &self.probabilities
    }
}

impl TransitionModel for RuleBasedModel {
    type State = CauseSpecificState;

    fn next_state(
        &self,
        current: CauseSpecificState,
        rng: &mut dyn UniformSource,
    ) -> CohortResult<StepOutcome<CauseSpecificState>> {
        let p = &self.probabilities;

        let stroke_probability = match current {
            CauseSpecificState::Well => p.stroke_probability_while_well,
            CauseSpecificState::PostStroke => p.recurrent_stroke_probability,
            CauseSpecificState::StrokeDeath | CauseSpecificState::AllCauseDeath => {
                return Ok(StepOutcome::unchanged(current));
            }
        };

        if let Some(p_death) = p.all_cause_death_probability {
            if rng.next_uniform() < p_death {
                return Ok(StepOutcome {
                    next: CauseSpecificState::AllCauseDeath,
                    stroke: false,
                });
            }
        }

        if rng.next_uniform() >= stroke_probability {
            return Ok(StepOutcome::unchanged(current));
        }

        let next = if rng.next_uniform() < p.survival_probability_given_stroke {
            CauseSpecificState::PostStroke
        } else {
            CauseSpecificState::StrokeDeath
        };

        Ok(StepOutcome { next, stroke: true })
    }
}
