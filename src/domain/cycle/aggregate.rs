//! Cycle aggregate - The root entity for a pass through the three stages.
//!
//! A Cycle owns its achievements and enforces the stage rules: each stage
//! holds at most 20 achievements, the current stage is the first one with
//! fewer than 20 done, and done achievements are locked against editing and
//! deletion. Once archived a cycle is read-only.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    AchievementId, AchievementStatus, CycleId, DomainError, ErrorCode, Stage, Timestamp,
    STAGE_CAPACITY,
};

use super::{Achievement, AchievementFields, AchievementFilter, CycleProgress, StageProgress};

/// The Cycle aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cycle {
    id: CycleId,
    started_at: Timestamp,
    archived_at: Option<Timestamp>,
    achievements: Vec<Achievement>,
}

impl Cycle {
    /// Creates a new, empty, active cycle.
    pub fn new() -> Self {
        Self {
            id: CycleId::new(),
            started_at: Timestamp::now(),
            archived_at: None,
            achievements: Vec::new(),
        }
    }

    // ───────────────────────────────────────────────────────────────
    // Accessors
    // ───────────────────────────────────────────────────────────────

    pub fn id(&self) -> CycleId {
        self.id
    }

    pub fn started_at(&self) -> Timestamp {
        self.started_at
    }

    pub fn archived_at(&self) -> Option<Timestamp> {
        self.archived_at
    }

    /// All achievements in insertion order.
    pub fn achievements(&self) -> &[Achievement] {
        &self.achievements
    }

    pub fn achievement(&self, id: AchievementId) -> Option<&Achievement> {
        self.achievements.iter().find(|a| a.id() == id)
    }

    /// Returns true while the cycle has not been archived.
    pub fn is_active(&self) -> bool {
        self.archived_at.is_none()
    }

    // ───────────────────────────────────────────────────────────────
    // Derived progress
    // ───────────────────────────────────────────────────────────────

    pub fn achievements_in_stage(&self, stage: Stage) -> Vec<&Achievement> {
        self.achievements
            .iter()
            .filter(|a| a.stage() == stage)
            .collect()
    }

    pub fn done_count(&self, stage: Stage) -> usize {
        self.achievements
            .iter()
            .filter(|a| a.stage() == stage && a.is_done())
            .count()
    }

    pub fn total_count(&self, stage: Stage) -> usize {
        self.achievements.iter().filter(|a| a.stage() == stage).count()
    }

    /// Done achievements across all stages.
    pub fn total_done_count(&self) -> usize {
        self.achievements.iter().filter(|a| a.is_done()).count()
    }

    /// The first stage with fewer than 20 done achievements, or the last
    /// stage once all three are full.
    pub fn current_stage(&self) -> Stage {
        Stage::all()
            .iter()
            .copied()
            .find(|s| self.done_count(*s) < STAGE_CAPACITY)
            .unwrap_or_else(Stage::last)
    }

    /// True once the last stage has 20 done achievements.
    pub fn is_completed(&self) -> bool {
        self.done_count(Stage::last()) >= STAGE_CAPACITY
    }

    pub fn stage_progress(&self, stage: Stage) -> StageProgress {
        StageProgress {
            stage,
            done: self.done_count(stage),
            total: self.total_count(stage),
        }
    }

    pub fn progress(&self) -> CycleProgress {
        let stages = Stage::all().iter().map(|s| self.stage_progress(*s)).collect();
        CycleProgress::new(stages, self.current_stage())
    }

    /// Achievements of `stage` matching `filter`, newest first.
    pub fn achievements_for_display(
        &self,
        stage: Stage,
        filter: AchievementFilter,
    ) -> Vec<&Achievement> {
        let mut list: Vec<&Achievement> = self
            .achievements
            .iter()
            .filter(|a| a.stage() == stage && filter.matches(a))
            .collect();
        list.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
        list
    }

    // ───────────────────────────────────────────────────────────────
    // Achievement mutations
    // ───────────────────────────────────────────────────────────────

    /// Adds an achievement to the current stage.
    ///
    /// # Errors
    ///
    /// - `StageLimitReached` if the current stage already holds 20 achievements
    /// - `NoActiveCycle` if the cycle is archived
    pub fn add_achievement(&mut self, fields: AchievementFields) -> Result<&Achievement, DomainError> {
        self.ensure_active()?;

        let stage = self.current_stage();
        if self.total_count(stage) >= STAGE_CAPACITY {
            return Err(DomainError::new(
                ErrorCode::StageLimitReached,
                format!("Maximum {} achievements per stage.", STAGE_CAPACITY),
            )
            .with_detail("stage", stage.title()));
        }

        let idx = self.achievements.len();
        self.achievements
            .push(Achievement::new(stage, fields, Timestamp::now()));
        Ok(&self.achievements[idx])
    }

    /// Overwrites the editable fields of an in-progress achievement.
    ///
    /// # Errors
    ///
    /// - `AchievementNotFound` if no achievement has `id`
    /// - `CannotEditDone` if the achievement is already done
    /// - `NoActiveCycle` if the cycle is archived
    pub fn update_achievement(
        &mut self,
        id: AchievementId,
        fields: AchievementFields,
    ) -> Result<&Achievement, DomainError> {
        self.ensure_active()?;
        let idx = self.index_of(id)?;

        if self.achievements[idx].is_done() {
            return Err(DomainError::new(
                ErrorCode::CannotEditDone,
                "Done achievements cannot be edited.",
            )
            .with_detail("achievement_id", id.to_string()));
        }

        self.achievements[idx].apply_edit(fields, Timestamp::now());
        Ok(&self.achievements[idx])
    }

    /// Removes an in-progress achievement.
    ///
    /// # Errors
    ///
    /// - `AchievementNotFound` if no achievement has `id`
    /// - `CannotDeleteDone` if the achievement is done
    /// - `NoActiveCycle` if the cycle is archived
    pub fn remove_achievement(&mut self, id: AchievementId) -> Result<Achievement, DomainError> {
        self.ensure_active()?;
        let idx = self.index_of(id)?;

        if self.achievements[idx].is_done() {
            return Err(DomainError::new(
                ErrorCode::CannotDeleteDone,
                "Done achievements cannot be deleted.",
            )
            .with_detail("achievement_id", id.to_string()));
        }

        Ok(self.achievements.remove(idx))
    }

    /// Sets the status of any achievement, done or not.
    ///
    /// This is the quick-toggle path and intentionally skips the done-lock
    /// applied by [`Cycle::update_achievement`].
    ///
    /// # Errors
    ///
    /// - `AchievementNotFound` if no achievement has `id`
    /// - `NoActiveCycle` if the cycle is archived
    pub fn set_achievement_status(
        &mut self,
        id: AchievementId,
        status: AchievementStatus,
    ) -> Result<&Achievement, DomainError> {
        self.ensure_active()?;
        let idx = self.index_of(id)?;

        self.achievements[idx].apply_status(status, Timestamp::now());
        Ok(&self.achievements[idx])
    }

    // ───────────────────────────────────────────────────────────────
    // Lifecycle
    // ───────────────────────────────────────────────────────────────

    /// Freezes the cycle. Completion is not checked here.
    ///
    /// # Errors
    ///
    /// - `NoActiveCycle` if the cycle is already archived
    pub fn archive(&mut self) -> Result<(), DomainError> {
        self.ensure_active()?;
        self.archived_at = Some(Timestamp::now());
        Ok(())
    }

    fn ensure_active(&self) -> Result<(), DomainError> {
        if self.is_active() {
            Ok(())
        } else {
            Err(DomainError::new(
                ErrorCode::NoActiveCycle,
                "Archived cycles cannot be modified.",
            )
            .with_detail("cycle_id", self.id.to_string()))
        }
    }

    fn index_of(&self, id: AchievementId) -> Result<usize, DomainError> {
        self.achievements
            .iter()
            .position(|a| a.id() == id)
            .ok_or_else(|| {
                DomainError::new(ErrorCode::AchievementNotFound, "Achievement not found.")
                    .with_detail("achievement_id", id.to_string())
            })
    }
}

impl Default for Cycle {
    fn default() -> Self {
        Self::new()
    }
}
