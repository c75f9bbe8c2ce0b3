//! Level catalog for the memory trainer
//!
//! Levels are static definitions: how many pairs a deck holds and which
//! cognitive hooks shape its generation.

mod catalog;
pub mod models;

pub use catalog::{all_levels, find_level, resolve_level};
pub use models::*;
