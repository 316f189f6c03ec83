//! Stage enum representing the three ordered phases of a cycle.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of achievements a single stage can hold.
pub const STAGE_CAPACITY: usize = 20;

/// The three metamorphosis stages, in order.
///
/// Persisted as its index (`0`, `1`, `2`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Stage {
    Caterpillar,
    Chrysalis,
    Butterfly,
}

impl Stage {
    /// Returns all stages in canonical order.
    pub fn all() -> &'static [Stage] {
        &[Stage::Caterpillar, Stage::Chrysalis, Stage::Butterfly]
    }

    /// Returns the first stage.
    pub fn first() -> Stage {
        Stage::Caterpillar
    }

    /// Returns the last stage.
    pub fn last() -> Stage {
        Stage::Butterfly
    }

    /// Returns the 0-based index of this stage.
    pub fn order_index(&self) -> u8 {
        match self {
            Stage::Caterpillar => 0,
            Stage::Chrysalis => 1,
            Stage::Butterfly => 2,
        }
    }

    /// Returns the next stage in order, if any.
    pub fn next(&self) -> Option<Stage> {
        match self {
            Stage::Caterpillar => Some(Stage::Chrysalis),
            Stage::Chrysalis => Some(Stage::Butterfly),
            Stage::Butterfly => None,
        }
    }

    /// Returns the display name.
    pub fn title(&self) -> &'static str {
        match self {
            Stage::Caterpillar => "Caterpillar",
            Stage::Chrysalis => "Chrysalis",
            Stage::Butterfly => "Butterfly",
        }
    }
}

impl From<Stage> for u8 {
    fn from(stage: Stage) -> Self {
        stage.order_index()
    }
}

impl TryFrom<u8> for Stage {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Stage::Caterpillar),
            1 => Ok(Stage::Chrysalis),
            2 => Ok(Stage::Butterfly),
            other => Err(format!("invalid stage index {}", other)),
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title())
    }
}
