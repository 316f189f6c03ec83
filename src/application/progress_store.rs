//! ProgressStore - Orchestrates user actions against the repositories.
//!
//! Holds the current in-memory view (active cycle plus archived history)
//! that a presentation layer renders. Every mutating action goes through a
//! repository; on success the returned cycle replaces the held one, on
//! failure the error is logged and the held state is left as it was.

use std::sync::Arc;

use crate::adapters::key_value::{
    KeyValueAchievementRepository, KeyValueCycleRepository, KeyValueOnboardingRepository,
};
use crate::domain::cycle::{AchievementFields, Cycle};
use crate::domain::foundation::{
    AchievementId, AchievementStatus, CycleId, DomainError, ErrorCode, ValidationError,
};
use crate::ports::{AchievementRepository, CycleRepository, KeyValueStore, OnboardingRepository};

/// What `archive_if_completed_and_start_new` did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArchiveOutcome {
    /// No cycle was held yet; one was loaded or created instead.
    StartedFirstCycle,
    /// The active cycle is not complete; nothing changed.
    NotCompleted,
    /// The completed cycle was archived and replaced.
    Archived {
        archived_id: CycleId,
        new_cycle: Cycle,
    },
}

/// Application-facing state holder for progress tracking.
pub struct ProgressStore {
    cycle_repository: Arc<dyn CycleRepository>,
    achievement_repository: Arc<dyn AchievementRepository>,
    onboarding_repository: Arc<dyn OnboardingRepository>,
    active_cycle: Option<Cycle>,
    archived_cycles: Vec<Cycle>,
}

impl ProgressStore {
    pub fn new(
        cycle_repository: Arc<dyn CycleRepository>,
        achievement_repository: Arc<dyn AchievementRepository>,
        onboarding_repository: Arc<dyn OnboardingRepository>,
    ) -> Self {
        Self {
            cycle_repository,
            achievement_repository,
            onboarding_repository,
            active_cycle: None,
            archived_cycles: Vec::new(),
        }
    }

    /// Wires the key-value repositories over a single store.
    pub fn from_store(store: Arc<dyn KeyValueStore>) -> Self {
        let cycles: Arc<dyn CycleRepository> =
            Arc::new(KeyValueCycleRepository::new(store.clone()));
        let achievements = Arc::new(KeyValueAchievementRepository::new(cycles.clone()));
        let onboarding = Arc::new(KeyValueOnboardingRepository::new(store));
        Self::new(cycles, achievements, onboarding)
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Published state
    // ═══════════════════════════════════════════════════════════════════════

    /// The active cycle, once `load` (or any successful action) has run.
    pub fn active_cycle(&self) -> Option<&Cycle> {
        self.active_cycle.as_ref()
    }

    /// Archived cycles, most recently archived first.
    pub fn archived_cycles(&self) -> &[Cycle] {
        &self.archived_cycles
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Actions
    // ═══════════════════════════════════════════════════════════════════════

    /// Populates the active cycle and the archive from the repository.
    ///
    /// State is only replaced when both reads succeed.
    pub async fn load(&mut self) -> Result<(), DomainError> {
        let loaded = async {
            let active = self.cycle_repository.get_or_create_active_cycle().await?;
            let archived = self.cycle_repository.fetch_archived_cycles().await?;
            Ok::<_, DomainError>((active, archived))
        }
        .await;

        match loaded {
            Ok((active, archived)) => {
                tracing::debug!(
                    cycle_id = %active.id(),
                    archived = archived.len(),
                    "Loaded progress"
                );
                self.active_cycle = Some(active);
                self.archived_cycles = archived;
                Ok(())
            }
            Err(err) => Err(log_failure("load", err)),
        }
    }

    pub async fn add_achievement(
        &mut self,
        fields: AchievementFields,
    ) -> Result<&Cycle, DomainError> {
        let fields = match normalize_title(fields) {
            Ok(fields) => fields,
            Err(err) => return Err(log_failure("add_achievement", err)),
        };
        let result = self.achievement_repository.add_achievement(fields).await;
        self.publish("add_achievement", result)
    }

    pub async fn update_achievement(
        &mut self,
        id: AchievementId,
        fields: AchievementFields,
    ) -> Result<&Cycle, DomainError> {
        let fields = match normalize_title(fields) {
            Ok(fields) => fields,
            Err(err) => return Err(log_failure("update_achievement", err)),
        };
        let result = self
            .achievement_repository
            .update_achievement(id, fields)
            .await;
        self.publish("update_achievement", result)
    }

    pub async fn delete_achievement(&mut self, id: AchievementId) -> Result<&Cycle, DomainError> {
        let result = self.achievement_repository.delete_achievement(id).await;
        self.publish("delete_achievement", result)
    }

    /// Sets the status directly. Works on done achievements too.
    pub async fn set_status(
        &mut self,
        id: AchievementId,
        status: AchievementStatus,
    ) -> Result<&Cycle, DomainError> {
        let result = self.achievement_repository.set_status(id, status).await;
        self.publish("set_status", result)
    }

    /// Flips an achievement between in-progress and done.
    pub async fn toggle_status(&mut self, id: AchievementId) -> Result<&Cycle, DomainError> {
        let current = match self.current_status(id).await {
            Ok(status) => status,
            Err(err) => return Err(log_failure("toggle_status", err)),
        };
        let result = self
            .achievement_repository
            .set_status(id, current.toggled())
            .await;
        self.publish("toggle_status", result)
    }

    /// Archives the active cycle when its last stage is complete.
    ///
    /// With no cycle held yet, the active cycle is loaded (or created) and
    /// nothing is archived.
    pub async fn archive_if_completed_and_start_new(
        &mut self,
    ) -> Result<ArchiveOutcome, DomainError> {
        let archived_id = match self.active_cycle.as_ref() {
            None => {
                return match self.cycle_repository.get_or_create_active_cycle().await {
                    Ok(cycle) => {
                        self.active_cycle = Some(cycle);
                        Ok(ArchiveOutcome::StartedFirstCycle)
                    }
                    Err(err) => Err(log_failure("archive", err)),
                };
            }
            Some(active) if !active.is_completed() => return Ok(ArchiveOutcome::NotCompleted),
            Some(active) => active.id(),
        };

        let new_cycle = match self.cycle_repository.archive_active_and_start_new().await {
            Ok(cycle) => cycle,
            Err(err) => return Err(log_failure("archive", err)),
        };
        self.active_cycle = Some(new_cycle.clone());

        match self.cycle_repository.fetch_archived_cycles().await {
            Ok(archived) => self.archived_cycles = archived,
            Err(err) => return Err(log_failure("archive", err)),
        }

        tracing::info!(
            archived_cycle_id = %archived_id,
            new_cycle_id = %new_cycle.id(),
            "Completed cycle archived"
        );
        Ok(ArchiveOutcome::Archived {
            archived_id,
            new_cycle,
        })
    }

    pub async fn is_onboarding_completed(&self) -> Result<bool, DomainError> {
        self.onboarding_repository
            .is_onboarding_completed()
            .await
            .map_err(|err| log_failure("is_onboarding_completed", err))
    }

    pub async fn complete_onboarding(&self) -> Result<(), DomainError> {
        self.onboarding_repository
            .set_onboarding_completed(true)
            .await
            .map_err(|err| log_failure("complete_onboarding", err))
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Helpers
    // ═══════════════════════════════════════════════════════════════════════

    fn publish(
        &mut self,
        action: &'static str,
        result: Result<Cycle, DomainError>,
    ) -> Result<&Cycle, DomainError> {
        match result {
            Ok(cycle) => Ok(self.active_cycle.insert(cycle)),
            Err(err) => Err(log_failure(action, err)),
        }
    }

    async fn current_status(&self, id: AchievementId) -> Result<AchievementStatus, DomainError> {
        let cycle = self.cycle_repository.get_or_create_active_cycle().await?;
        cycle
            .achievement(id)
            .map(|a| a.status())
            .ok_or_else(|| {
                DomainError::new(ErrorCode::AchievementNotFound, "Achievement not found.")
                    .with_detail("achievement_id", id.to_string())
            })
    }
}

fn normalize_title(mut fields: AchievementFields) -> Result<AchievementFields, DomainError> {
    let trimmed = fields.title.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::empty_field("title").into());
    }
    fields.title = trimmed.to_string();
    Ok(fields)
}

fn log_failure(action: &'static str, err: DomainError) -> DomainError {
    if err.is_storage() {
        tracing::error!(action, code = %err.code, error = %err, "Progress action failed");
    } else {
        tracing::warn!(action, code = %err.code, error = %err, "Progress action rejected");
    }
    err
}
