//! Cycle module - The progress cycle aggregate and its achievements.
//!
//! A Cycle is one pass through the three stages. It owns its achievements
//! and is archived once the last stage is complete.

mod achievement;
mod aggregate;
mod progress;

pub use achievement::{Achievement, AchievementFields, AchievementFilter};
pub use aggregate::Cycle;
pub use progress::{CycleProgress, StageProgress};
