//! Spaced repetition of difficult pairs
//!
//! This module provides:
//! - Difficult pair records persisted across sessions
//! - Fixed exponential backoff review intervals
//! - Review bookkeeping with graduation after repeated successes

pub mod algorithm;
pub mod models;
pub mod store;

pub use algorithm::{calculate_next_review, format_interval};
pub use models::*;
pub use store::{ReviewUpdate, SpacedRepetitionStore, STORAGE_KEY};
