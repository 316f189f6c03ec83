//! AchievementStatus enum for tracking completion of a single achievement.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Completion state of an achievement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum AchievementStatus {
    #[default]
    InProgress,
    Done,
}

impl AchievementStatus {
    /// Returns true if the achievement is finished.
    pub fn is_done(&self) -> bool {
        matches!(self, AchievementStatus::Done)
    }

    /// Returns the opposite status, used by quick toggling.
    pub fn toggled(&self) -> AchievementStatus {
        match self {
            AchievementStatus::InProgress => AchievementStatus::Done,
            AchievementStatus::Done => AchievementStatus::InProgress,
        }
    }
}

impl fmt::Display for AchievementStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AchievementStatus::InProgress => "In Progress",
            AchievementStatus::Done => "Done",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_in_progress() {
        assert_eq!(AchievementStatus::default(), AchievementStatus::InProgress);
    }

    #[test]
    fn toggled_flips_between_states() {
        assert_eq!(AchievementStatus::InProgress.toggled(), AchievementStatus::Done);
        assert_eq!(AchievementStatus::Done.toggled(), AchievementStatus::InProgress);
    }

    #[test]
    fn serializes_in_camel_case() {
        assert_eq!(
            serde_json::to_string(&AchievementStatus::InProgress).unwrap(),
            "\"inProgress\""
        );
        assert_eq!(serde_json::to_string(&AchievementStatus::Done).unwrap(), "\"done\"");
    }
}
