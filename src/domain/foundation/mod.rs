//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, enums, and error types
//! that form the vocabulary of the progress domain.

mod achievement_status;
mod errors;
mod ids;
mod stage;
mod timestamp;

pub use achievement_status::AchievementStatus;
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{AchievementId, CycleId};
pub use stage::{Stage, STAGE_CAPACITY};
pub use timestamp::Timestamp;
