//! AchievementRepository on top of a CycleRepository.
//!
//! Each call loads the active cycle, lets the aggregate validate and apply
//! the change, then saves the whole cycle back.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::cycle::{AchievementFields, Cycle};
use crate::domain::foundation::{AchievementId, AchievementStatus, DomainError};
use crate::ports::{AchievementRepository, CycleRepository};

#[derive(Clone)]
pub struct KeyValueAchievementRepository {
    cycle_repository: Arc<dyn CycleRepository>,
}

impl KeyValueAchievementRepository {
    pub fn new(cycle_repository: Arc<dyn CycleRepository>) -> Self {
        Self { cycle_repository }
    }

    async fn active_cycle(&self) -> Result<Cycle, DomainError> {
        self.cycle_repository.get_or_create_active_cycle().await
    }
}

#[async_trait]
impl AchievementRepository for KeyValueAchievementRepository {
    async fn add_achievement(&self, fields: AchievementFields) -> Result<Cycle, DomainError> {
        let mut cycle = self.active_cycle().await?;

        let (id, stage) = {
            let added = cycle.add_achievement(fields)?;
            (added.id(), added.stage())
        };

        self.cycle_repository.save_active_cycle(&cycle).await?;
        tracing::debug!(achievement_id = %id, %stage, "Added achievement");
        Ok(cycle)
    }

    async fn update_achievement(
        &self,
        id: AchievementId,
        fields: AchievementFields,
    ) -> Result<Cycle, DomainError> {
        let mut cycle = self.active_cycle().await?;
        cycle.update_achievement(id, fields)?;

        self.cycle_repository.save_active_cycle(&cycle).await?;
        tracing::debug!(achievement_id = %id, "Updated achievement");
        Ok(cycle)
    }

    async fn delete_achievement(&self, id: AchievementId) -> Result<Cycle, DomainError> {
        let mut cycle = self.active_cycle().await?;
        cycle.remove_achievement(id)?;

        self.cycle_repository.save_active_cycle(&cycle).await?;
        tracing::debug!(achievement_id = %id, "Deleted achievement");
        Ok(cycle)
    }

    async fn set_status(
        &self,
        id: AchievementId,
        status: AchievementStatus,
    ) -> Result<Cycle, DomainError> {
        let mut cycle = self.active_cycle().await?;
        cycle.set_achievement_status(id, status)?;

        self.cycle_repository.save_active_cycle(&cycle).await?;
        tracing::debug!(achievement_id = %id, %status, "Changed achievement status");
        Ok(cycle)
    }
}
