//! Cycle repository port.
//!
//! Owns the single active Cycle and the archived history. Implementations
//! decide where the records live; the archive policy (when to archive)
//! belongs to the caller.

use crate::domain::cycle::Cycle;
use crate::domain::foundation::DomainError;
use async_trait::async_trait;

/// Repository port for the active cycle and archived cycles.
#[async_trait]
pub trait CycleRepository: Send + Sync {
    /// Returns the active cycle, creating and persisting an empty one if
    /// none is stored.
    ///
    /// # Errors
    ///
    /// - `StorageError` / `DecodingError` on persistence failure
    async fn get_or_create_active_cycle(&self) -> Result<Cycle, DomainError>;

    /// Persists `cycle` as the active cycle, overwriting any previous value.
    ///
    /// # Errors
    ///
    /// - `NoActiveCycle` if `cycle` is already archived
    async fn save_active_cycle(&self, cycle: &Cycle) -> Result<(), DomainError>;

    /// Archived cycles, most recently archived first. Empty if none.
    async fn fetch_archived_cycles(&self) -> Result<Vec<Cycle>, DomainError>;

    /// Replaces the whole archived list.
    async fn save_archived_cycles(&self, cycles: &[Cycle]) -> Result<(), DomainError>;

    /// Archives the active cycle and starts a new empty one.
    ///
    /// Stamps `archived_at`, prepends the cycle to the archive, persists the
    /// archive, then persists a fresh active cycle and returns it. Does not
    /// check completion.
    async fn archive_active_and_start_new(&self) -> Result<Cycle, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Trait object safety test
    #[test]
    fn cycle_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn CycleRepository) {}
    }
}
