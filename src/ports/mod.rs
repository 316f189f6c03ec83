//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Storage Ports
//!
//! - `KeyValueStore` - Raw JSON persistence under string keys
//!
//! ## Repository Ports
//!
//! - `CycleRepository` - Active cycle and archived history
//! - `AchievementRepository` - Achievement mutations inside the active cycle
//! - `OnboardingRepository` - First-run onboarding flag

mod achievement_repository;
mod cycle_repository;
mod key_value_store;
mod onboarding_repository;

pub use achievement_repository::AchievementRepository;
pub use cycle_repository::CycleRepository;
pub use key_value_store::{KeyValueStore, KeyValueStoreError};
pub use onboarding_repository::OnboardingRepository;
