//! Achievement repository port.
//!
//! Mutates achievements inside the active cycle. Every operation is a
//! read-modify-write of the whole cycle: load, validate, mutate, persist,
//! and return the updated cycle. Nothing is persisted when validation fails.

use crate::domain::cycle::{AchievementFields, Cycle};
use crate::domain::foundation::{AchievementId, AchievementStatus, DomainError};
use async_trait::async_trait;

#[async_trait]
pub trait AchievementRepository: Send + Sync {
    /// Adds an achievement to the active cycle's current stage.
    ///
    /// # Errors
    ///
    /// - `StageLimitReached` if the current stage already holds 20 achievements
    async fn add_achievement(&self, fields: AchievementFields) -> Result<Cycle, DomainError>;

    /// Overwrites title, details, target date and status.
    ///
    /// # Errors
    ///
    /// - `AchievementNotFound` if `id` is not in the active cycle
    /// - `CannotEditDone` if the achievement is already done
    async fn update_achievement(
        &self,
        id: AchievementId,
        fields: AchievementFields,
    ) -> Result<Cycle, DomainError>;

    /// Removes an in-progress achievement.
    ///
    /// # Errors
    ///
    /// - `AchievementNotFound` if `id` is not in the active cycle
    /// - `CannotDeleteDone` if the achievement is done
    async fn delete_achievement(&self, id: AchievementId) -> Result<Cycle, DomainError>;

    /// Status-only change; allowed in both directions, including on done
    /// achievements.
    ///
    /// # Errors
    ///
    /// - `AchievementNotFound` if `id` is not in the active cycle
    async fn set_status(
        &self,
        id: AchievementId,
        status: AchievementStatus,
    ) -> Result<Cycle, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn achievement_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn AchievementRepository) {}
    }
}
