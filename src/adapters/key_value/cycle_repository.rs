//! Key-value implementation of CycleRepository.
//!
//! The active cycle lives under `active_cycle` as a single JSON record and
//! the history under `archived_cycles` as a JSON array, newest first.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::cycle::Cycle;
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::{CycleRepository, KeyValueStore};

pub const ACTIVE_CYCLE_KEY: &str = "active_cycle";
pub const ARCHIVED_CYCLES_KEY: &str = "archived_cycles";

/// CycleRepository backed by any KeyValueStore.
#[derive(Clone)]
pub struct KeyValueCycleRepository {
    store: Arc<dyn KeyValueStore>,
}

impl KeyValueCycleRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl CycleRepository for KeyValueCycleRepository {
    async fn get_or_create_active_cycle(&self) -> Result<Cycle, DomainError> {
        if let Some(existing) = self.store.get_json::<Cycle>(ACTIVE_CYCLE_KEY).await? {
            return Ok(existing);
        }

        let cycle = Cycle::new();
        self.save_active_cycle(&cycle).await?;
        tracing::info!(cycle_id = %cycle.id(), "Started new active cycle");
        Ok(cycle)
    }

    async fn save_active_cycle(&self, cycle: &Cycle) -> Result<(), DomainError> {
        if !cycle.is_active() {
            return Err(DomainError::new(
                ErrorCode::NoActiveCycle,
                "Archived cycles cannot be saved as the active cycle.",
            )
            .with_detail("cycle_id", cycle.id().to_string()));
        }
        self.store.set_json(ACTIVE_CYCLE_KEY, cycle).await?;
        tracing::debug!(
            cycle_id = %cycle.id(),
            achievements = cycle.achievements().len(),
            "Saved active cycle"
        );
        Ok(())
    }

    async fn fetch_archived_cycles(&self) -> Result<Vec<Cycle>, DomainError> {
        Ok(self
            .store
            .get_json::<Vec<Cycle>>(ARCHIVED_CYCLES_KEY)
            .await?
            .unwrap_or_default())
    }

    async fn save_archived_cycles(&self, cycles: &[Cycle]) -> Result<(), DomainError> {
        self.store.set_json(ARCHIVED_CYCLES_KEY, cycles).await?;
        tracing::debug!(count = cycles.len(), "Saved archived cycles");
        Ok(())
    }

    async fn archive_active_and_start_new(&self) -> Result<Cycle, DomainError> {
        let mut active = self.get_or_create_active_cycle().await?;
        let mut archived = self.fetch_archived_cycles().await?;

        active.archive()?;
        let archived_id = active.id();
        // A retry after a failed second write finds this cycle already archived.
        archived.retain(|c| c.id() != archived_id);
        archived.insert(0, active);

        // Two separate writes; a failure on the second leaves the old cycle
        // both active and archived until the archive is retried.
        self.save_archived_cycles(&archived).await?;

        let fresh = Cycle::new();
        self.save_active_cycle(&fresh).await?;

        tracing::info!(
            archived_cycle_id = %archived_id,
            new_cycle_id = %fresh.id(),
            "Archived active cycle and started a new one"
        );
        Ok(fresh)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemoryKeyValueStore;
    use crate::domain::cycle::AchievementFields;
    use crate::domain::foundation::AchievementStatus;
    use crate::ports::KeyValueStoreError;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn repo_with_store() -> (KeyValueCycleRepository, InMemoryKeyValueStore) {
        let store = InMemoryKeyValueStore::new();
        (KeyValueCycleRepository::new(Arc::new(store.clone())), store)
    }

    /// Store whose writes to one key fail a set number of times.
    struct FailingKeyStore {
        inner: InMemoryKeyValueStore,
        failing_key: &'static str,
        failures_left: AtomicUsize,
    }

    impl FailingKeyStore {
        fn new(inner: InMemoryKeyValueStore, failing_key: &'static str, failures: usize) -> Self {
            Self {
                inner,
                failing_key,
                failures_left: AtomicUsize::new(failures),
            }
        }
    }

    #[async_trait]
    impl KeyValueStore for FailingKeyStore {
        async fn get_raw(&self, key: &str) -> Result<Option<String>, KeyValueStoreError> {
            self.inner.get_raw(key).await
        }

        async fn set_raw(&self, key: &str, value: String) -> Result<(), KeyValueStoreError> {
            if key == self.failing_key
                && self
                    .failures_left
                    .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
                    .is_ok()
            {
                return Err(KeyValueStoreError::IoError("simulated write failure".to_string()));
            }
            self.inner.set_raw(key, value).await
        }

        async fn remove(&self, key: &str) -> Result<(), KeyValueStoreError> {
            self.inner.remove(key).await
        }

        async fn contains(&self, key: &str) -> Result<bool, KeyValueStoreError> {
            self.inner.contains(key).await
        }
    }

    #[tokio::test]
    async fn creates_and_persists_active_cycle_on_first_access() {
        let (repo, store) = repo_with_store();

        let cycle = repo.get_or_create_active_cycle().await.unwrap();

        assert!(cycle.is_active());
        assert!(cycle.achievements().is_empty());
        assert!(store.contains(ACTIVE_CYCLE_KEY).await.unwrap());
    }

    #[tokio::test]
    async fn returns_same_cycle_on_subsequent_access() {
        let (repo, _) = repo_with_store();

        let first = repo.get_or_create_active_cycle().await.unwrap();
        let second = repo.get_or_create_active_cycle().await.unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn saved_cycle_reloads_equal() {
        let (repo, _) = repo_with_store();
        let mut cycle = repo.get_or_create_active_cycle().await.unwrap();
        cycle
            .add_achievement(
                AchievementFields::new("Meditate")
                    .with_details("10 minutes")
                    .with_status(AchievementStatus::Done),
            )
            .unwrap();

        repo.save_active_cycle(&cycle).await.unwrap();
        let reloaded = repo.get_or_create_active_cycle().await.unwrap();

        assert_eq!(reloaded, cycle);
    }

    #[tokio::test]
    async fn archived_cycles_default_to_empty() {
        let (repo, _) = repo_with_store();
        assert!(repo.fetch_archived_cycles().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn save_archived_cycles_replaces_list() {
        let (repo, _) = repo_with_store();
        let mut a = Cycle::new();
        a.archive().unwrap();
        let mut b = Cycle::new();
        b.archive().unwrap();

        repo.save_archived_cycles(&[a.clone(), b]).await.unwrap();
        repo.save_archived_cycles(&[a.clone()]).await.unwrap();

        assert_eq!(repo.fetch_archived_cycles().await.unwrap(), vec![a]);
    }

    #[tokio::test]
    async fn archive_prepends_and_starts_new_cycle() {
        let (repo, _) = repo_with_store();
        let mut older = Cycle::new();
        older.archive().unwrap();
        repo.save_archived_cycles(&[older.clone()]).await.unwrap();

        let mut active = repo.get_or_create_active_cycle().await.unwrap();
        active
            .add_achievement(AchievementFields::new("kept"))
            .unwrap();
        repo.save_active_cycle(&active).await.unwrap();

        let fresh = repo.archive_active_and_start_new().await.unwrap();

        assert_ne!(fresh.id(), active.id());
        assert!(fresh.achievements().is_empty());
        assert_eq!(repo.get_or_create_active_cycle().await.unwrap(), fresh);

        let archived = repo.fetch_archived_cycles().await.unwrap();
        assert_eq!(archived.len(), 2);
        assert_eq!(archived[0].id(), active.id());
        assert!(archived[0].archived_at().is_some());
        assert_eq!(archived[0].achievements(), active.achievements());
        assert_eq!(archived[1], older);
    }

    #[tokio::test]
    async fn archive_does_not_check_completion() {
        let (repo, _) = repo_with_store();
        let active = repo.get_or_create_active_cycle().await.unwrap();
        assert!(!active.is_completed());

        repo.archive_active_and_start_new().await.unwrap();

        assert_eq!(repo.fetch_archived_cycles().await.unwrap()[0].id(), active.id());
    }

    #[tokio::test]
    async fn corrupt_active_record_is_a_decoding_error() {
        let (repo, store) = repo_with_store();
        store
            .set_raw(ACTIVE_CYCLE_KEY, "{\"id\": 42}".to_string())
            .await
            .unwrap();

        let err = repo.get_or_create_active_cycle().await.unwrap_err();

        assert_eq!(err.code, ErrorCode::DecodingError);
    }

    #[tokio::test]
    async fn archive_failure_on_second_write_is_reported() {
        let inner = InMemoryKeyValueStore::new();
        let seeded = KeyValueCycleRepository::new(Arc::new(inner.clone()));
        let active = seeded.get_or_create_active_cycle().await.unwrap();

        let repo = KeyValueCycleRepository::new(Arc::new(FailingKeyStore::new(
            inner.clone(),
            ACTIVE_CYCLE_KEY,
            1,
        )));

        let err = repo.archive_active_and_start_new().await.unwrap_err();

        assert_eq!(err.code, ErrorCode::StorageError);
        // First write landed, no rollback.
        let archived = seeded.fetch_archived_cycles().await.unwrap();
        assert_eq!(archived[0].id(), active.id());
    }

    #[tokio::test]
    async fn retried_archive_does_not_duplicate_history() {
        let inner = InMemoryKeyValueStore::new();
        let seeded = KeyValueCycleRepository::new(Arc::new(inner.clone()));
        let original = seeded.get_or_create_active_cycle().await.unwrap();

        let repo = KeyValueCycleRepository::new(Arc::new(FailingKeyStore::new(
            inner.clone(),
            ACTIVE_CYCLE_KEY,
            1,
        )));
        assert!(repo.archive_active_and_start_new().await.is_err());

        let still_active = repo.get_or_create_active_cycle().await.unwrap();
        assert_eq!(still_active.id(), original.id());
        assert!(still_active.is_active());

        let fresh = repo.archive_active_and_start_new().await.unwrap();

        let archived = repo.fetch_archived_cycles().await.unwrap();
        assert_eq!(archived.len(), 1);
        assert_eq!(archived[0].id(), original.id());
        assert!(archived[0].archived_at().is_some());
        assert_eq!(repo.get_or_create_active_cycle().await.unwrap(), fresh);
    }

    #[tokio::test]
    async fn archived_cycle_cannot_be_saved_as_active() {
        let (repo, _) = repo_with_store();
        let active = repo.get_or_create_active_cycle().await.unwrap();
        let mut stamped = active.clone();
        stamped.archive().unwrap();

        let err = repo.save_active_cycle(&stamped).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::NoActiveCycle);
        assert_eq!(repo.get_or_create_active_cycle().await.unwrap(), active);
        repo.archive_active_and_start_new().await.unwrap();
    }
}
