//! Memory trainer core
//!
//! Levels, deck generation, spaced repetition of difficult pairs, mnemonic
//! hints and the session state machine that ties them together. The CLI in
//! `src/bin/cli` is one driver; any UI can own a `SessionEngine` the same way.

pub mod clock;
pub mod config;
pub mod deck;
pub mod hints;
pub mod levels;
pub mod repetition;
pub mod session;
pub mod storage;
