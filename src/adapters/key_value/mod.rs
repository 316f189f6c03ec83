//! Repository implementations over the KeyValueStore port.

mod achievement_repository;
mod cycle_repository;
mod onboarding_repository;

pub use achievement_repository::KeyValueAchievementRepository;
pub use cycle_repository::{KeyValueCycleRepository, ACTIVE_CYCLE_KEY, ARCHIVED_CYCLES_KEY};
pub use onboarding_repository::{KeyValueOnboardingRepository, ONBOARDING_COMPLETED_KEY};
