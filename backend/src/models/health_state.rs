//! Health state variants
//!
//! Each transition model works over its own closed set of states. The sets
//! have different sizes and different absorbing subsets, so they are separate
//! enums joined by the [`HealthState`] trait rather than one shared type.
//!
//! | Type                 | Ordinals                                       | Absorbing                      |
//! |----------------------|------------------------------------------------|--------------------------------|
//! | [`BasicState`]       | Well, PostStroke, Dead                         | Dead                           |
//! | [`TempStrokeState`]  | Well, Stroke, PostStroke, Dead                 | Dead                           |
//! | [`CauseSpecificState`] | Well, PostStroke, StrokeDeath, AllCauseDeath | StrokeDeath, AllCauseDeath     |

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::hash::Hash;

/// Common behaviour of every state set
pub trait HealthState: Copy + Eq + Hash + Debug + Send + Sync + 'static {
    /// Number of states; also the dimension of a transition matrix
    const COUNT: usize;

    /// Ordinal used as the transition matrix row/column
    fn index(self) -> usize;

    /// Inverse of [`HealthState::index`]
    fn from_index(index: usize) -> Option<Self>;

    /// State every patient starts in
    fn initial() -> Self;

    /// Whether the state is terminal
    fn is_absorbing(self) -> bool;

    /// Whether moving from `from` to `to` in one cycle means a stroke happened
    ///
    /// Layouts without a way to tell strokes apart keep the default.
    fn is_stroke_transition(_from: Self, _to: Self) -> bool {
        false
    }
}

/// Three-state layout: Well, PostStroke, Dead
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BasicState {
    Well,
    PostStroke,
    Dead,
}

impl HealthState for BasicState {
    const COUNT: usize = 3;

    fn index(self) -> usize {
        match self {
            BasicState::Well => 0,
            BasicState::PostStroke => 1,
            BasicState::Dead => 2,
        }
    }

    fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(BasicState::Well),
            1 => Some(BasicState::PostStroke),
            2 => Some(BasicState::Dead),
            _ => None,
        }
    }

    fn initial() -> Self {
        BasicState::Well
    }

    fn is_absorbing(self) -> bool {
        self == BasicState::Dead
    }

    /// First stroke: Well straight to PostStroke. A recurrent stroke stays
    /// inside the PostStroke self-loop and cannot be seen.
    fn is_stroke_transition(from: Self, to: Self) -> bool {
        from == BasicState::Well && to == BasicState::PostStroke
    }
}

/// Four-state layout with a transient Stroke state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TempStrokeState {
    Well,
    Stroke,
    PostStroke,
    Dead,
}

impl HealthState for TempStrokeState {
    const COUNT: usize = 4;

    fn index(self) -> usize {
        match self {
            TempStrokeState::Well => 0,
            TempStrokeState::Stroke => 1,
            TempStrokeState::PostStroke => 2,
            TempStrokeState::Dead => 3,
        }
    }

    fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(TempStrokeState::Well),
            1 => Some(TempStrokeState::Stroke),
            2 => Some(TempStrokeState::PostStroke),
            3 => Some(TempStrokeState::Dead),
            _ => None,
        }
    }

    fn initial() -> Self {
        TempStrokeState::Well
    }

    fn is_absorbing(self) -> bool {
        self == TempStrokeState::Dead
    }

    fn is_stroke_transition(_from: Self, to: Self) -> bool {
        to == TempStrokeState::Stroke
    }
}

/// Rule-based layout distinguishing the cause of death
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CauseSpecificState {
    Well,
    PostStroke,
    StrokeDeath,
    AllCauseDeath,
}

impl HealthState for CauseSpecificState {
    const COUNT: usize = 4;

    fn index(self) -> usize {
        match self {
            CauseSpecificState::Well => 0,
            CauseSpecificState::PostStroke => 1,
            CauseSpecificState::StrokeDeath => 2,
            CauseSpecificState::AllCauseDeath => 3,
        }
    }

    fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(CauseSpecificState::Well),
            1 => Some(CauseSpecificState::PostStroke),
            2 => Some(CauseSpecificState::StrokeDeath),
            3 => Some(CauseSpecificState::AllCauseDeath),
            _ => None,
        }
    }

    fn initial() -> Self {
        CauseSpecificState::Well
    }

    fn is_absorbing(self) -> bool {
        matches!(
            self,
            CauseSpecificState::StrokeDeath | CauseSpecificState::AllCauseDeath
        )
    }
}
