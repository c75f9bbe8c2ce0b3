//! Mnemonic hints and category grouping
//!
//! Pure lookups over a deck snapshot. Nothing here mutates session state.

pub mod generator;
pub mod models;

pub use generator::{generate_category_groups, generate_mnemonic_hint, generate_pre_round_summary};
pub use models::*;
