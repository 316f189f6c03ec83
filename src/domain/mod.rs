//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, enums, errors)
//! - `cycle` - Cycle aggregate, achievements and progress snapshots

pub mod cycle;
pub mod foundation;
