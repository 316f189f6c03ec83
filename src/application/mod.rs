//! Application layer - Orchestration of progress actions.
//!
//! The `ProgressStore` owns the state a front end renders and routes every
//! user action through the repository ports.

mod progress_store;

pub use progress_store::{ArchiveOutcome, ProgressStore};
