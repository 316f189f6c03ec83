//! Achievement entity - a single user-defined goal bound to one stage.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AchievementId, AchievementStatus, Stage, Timestamp};

/// User-editable fields of an achievement.
///
/// Used both when creating an achievement and when editing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AchievementFields {
    pub title: String,
    pub details: String,
    pub target_date: Option<Timestamp>,
    pub status: AchievementStatus,
}

impl AchievementFields {
    /// Creates in-progress fields with the given title and no details.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            details: String::new(),
            target_date: None,
            status: AchievementStatus::InProgress,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = details.into();
        self
    }

    pub fn with_target_date(mut self, target_date: Option<Timestamp>) -> Self {
        self.target_date = target_date;
        self
    }

    pub fn with_status(mut self, status: AchievementStatus) -> Self {
        self.status = status;
        self
    }
}

/// An achievement inside a cycle.
///
/// `completed_at` is present exactly when `status` is `Done`. The stage is
/// fixed at creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    id: AchievementId,
    stage: Stage,
    title: String,
    details: String,
    status: AchievementStatus,
    completed_at: Option<Timestamp>,
    created_at: Timestamp,
    target_date: Option<Timestamp>,
}

impl Achievement {
    /// Creates a new achievement in `stage`, stamped with `now`.
    pub(crate) fn new(stage: Stage, fields: AchievementFields, now: Timestamp) -> Self {
        let mut achievement = Self {
            id: AchievementId::new(),
            stage,
            title: fields.title,
            details: fields.details,
            status: AchievementStatus::InProgress,
            completed_at: None,
            created_at: now,
            target_date: fields.target_date,
        };
        achievement.apply_status(fields.status, now);
        achievement
    }

    // ───────────────────────────────────────────────────────────────
    // Accessors
    // ───────────────────────────────────────────────────────────────

    pub fn id(&self) -> AchievementId {
        self.id
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn details(&self) -> &str {
        &self.details
    }

    pub fn status(&self) -> AchievementStatus {
        self.status
    }

    pub fn completed_at(&self) -> Option<Timestamp> {
        self.completed_at
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn target_date(&self) -> Option<Timestamp> {
        self.target_date
    }

    pub fn is_done(&self) -> bool {
        self.status.is_done()
    }

    // ───────────────────────────────────────────────────────────────
    // Mutations (validated by the owning Cycle)
    // ───────────────────────────────────────────────────────────────

    /// Sets the status, stamping `completed_at` on Done and clearing it otherwise.
    pub(crate) fn apply_status(&mut self, status: AchievementStatus, now: Timestamp) {
        self.status = status;
        self.completed_at = match status {
            AchievementStatus::Done => Some(now),
            AchievementStatus::InProgress => None,
        };
    }

    /// Overwrites the editable fields. The stage is left untouched.
    pub(crate) fn apply_edit(&mut self, fields: AchievementFields, now: Timestamp) {
        self.title = fields.title;
        self.details = fields.details;
        self.target_date = fields.target_date;
        self.apply_status(fields.status, now);
    }
}

/// List filter offered by the achievements screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AchievementFilter {
    #[default]
    All,
    Completed,
    InProgress,
}

impl AchievementFilter {
    pub fn matches(&self, achievement: &Achievement) -> bool {
        match self {
            AchievementFilter::All => true,
            AchievementFilter::Completed => achievement.is_done(),
            AchievementFilter::InProgress => !achievement.is_done(),
        }
    }
}
