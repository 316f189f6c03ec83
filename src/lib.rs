//! Monarch Progress - Staged achievement tracking
//!
//! Achievements are collected through three stages of twenty (Caterpillar,
//! Chrysalis, Butterfly). A completed cycle is archived and a fresh one
//! begins. State is persisted as JSON records in a key-value store.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
