//! Deck generation for the memory trainer
//!
//! This module provides:
//! - Card data models (cues, tags, rehearsal history)
//! - Symbol pools per level tier
//! - Paired card construction driven by a level's cognitive hooks
//! - Unbiased Fisher-Yates shuffling

pub mod generator;
pub mod models;

pub use generator::{build_deck, fisher_yates_shuffle, generate_deck, generate_deck_with_rng, DeckError};
pub use models::*;
