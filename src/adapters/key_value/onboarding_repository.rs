//! Key-value implementation of OnboardingRepository.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::ports::{KeyValueStore, OnboardingRepository};

pub const ONBOARDING_COMPLETED_KEY: &str = "onboarding_completed";

#[derive(Clone)]
pub struct KeyValueOnboardingRepository {
    store: Arc<dyn KeyValueStore>,
}

impl KeyValueOnboardingRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl OnboardingRepository for KeyValueOnboardingRepository {
    async fn is_onboarding_completed(&self) -> Result<bool, DomainError> {
        Ok(self
            .store
            .get_json::<bool>(ONBOARDING_COMPLETED_KEY)
            .await?
            .unwrap_or(false))
    }

    async fn set_onboarding_completed(&self, completed: bool) -> Result<(), DomainError> {
        self.store
            .set_json(ONBOARDING_COMPLETED_KEY, &completed)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemoryKeyValueStore;

    #[tokio::test]
    async fn absent_flag_means_not_completed() {
        let repo = KeyValueOnboardingRepository::new(Arc::new(InMemoryKeyValueStore::new()));
        assert!(!repo.is_onboarding_completed().await.unwrap());
    }

    #[tokio::test]
    async fn flag_roundtrips() {
        let repo = KeyValueOnboardingRepository::new(Arc::new(InMemoryKeyValueStore::new()));

        repo.set_onboarding_completed(true).await.unwrap();
        assert!(repo.is_onboarding_completed().await.unwrap());

        repo.set_onboarding_completed(false).await.unwrap();
        assert!(!repo.is_onboarding_completed().await.unwrap());
    }
}
