//! Onboarding repository port - remembers whether the intro was completed.

use crate::domain::foundation::DomainError;
use async_trait::async_trait;

#[async_trait]
pub trait OnboardingRepository: Send + Sync {
    /// Returns false until onboarding has been marked completed.
    async fn is_onboarding_completed(&self) -> Result<bool, DomainError>;

    async fn set_onboarding_completed(&self, completed: bool) -> Result<(), DomainError>;
}
