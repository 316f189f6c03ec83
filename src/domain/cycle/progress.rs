//! CycleProgress value object - per-stage progress snapshot of a cycle.
//!
//! Read-only view used by the home and archive screens ("7 of 20",
//! "43 of 60").

use crate::domain::foundation::{Stage, STAGE_CAPACITY};

/// Done/total counts for one stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StageProgress {
    pub stage: Stage,
    pub done: usize,
    pub total: usize,
}

impl StageProgress {
    /// Slots per stage.
    pub fn capacity(&self) -> usize {
        STAGE_CAPACITY
    }

    /// Slots still available for new achievements.
    pub fn remaining(&self) -> usize {
        STAGE_CAPACITY.saturating_sub(self.total)
    }

    /// True when no more achievements can be added to this stage.
    pub fn is_full(&self) -> bool {
        self.total >= STAGE_CAPACITY
    }

    /// True when every slot of the stage is done.
    pub fn is_complete(&self) -> bool {
        self.done >= STAGE_CAPACITY
    }
}

/// A snapshot of progress across all three stages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CycleProgress {
    stages: Vec<StageProgress>,
    current_stage: Stage,
}

impl CycleProgress {
    pub(crate) fn new(stages: Vec<StageProgress>, current_stage: Stage) -> Self {
        Self {
            stages,
            current_stage,
        }
    }

    /// Progress of a specific stage.
    pub fn stage(&self, stage: Stage) -> StageProgress {
        self.stages
            .iter()
            .copied()
            .find(|p| p.stage == stage)
            .unwrap_or(StageProgress {
                stage,
                done: 0,
                total: 0,
            })
    }

    /// All stages in canonical order.
    pub fn stages(&self) -> &[StageProgress] {
        &self.stages
    }

    pub fn current_stage(&self) -> Stage {
        self.current_stage
    }

    /// Done achievements across the cycle.
    pub fn total_done(&self) -> usize {
        self.stages.iter().map(|p| p.done).sum()
    }

    /// Slots across the cycle (60).
    pub fn total_capacity(&self) -> usize {
        STAGE_CAPACITY * Stage::all().len()
    }

    /// Completion percentage (0-100) counted in done slots.
    pub fn percent_complete(&self) -> u8 {
        ((self.total_done().min(self.total_capacity()) * 100) / self.total_capacity()) as u8
    }

    /// True when the last stage is complete.
    pub fn is_completed(&self) -> bool {
        self.stage(Stage::last()).is_complete()
    }
}
