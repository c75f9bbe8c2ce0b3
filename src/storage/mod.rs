//! Scoped key-value persistence
//!
//! The game core only needs get/set/remove over string values. Two backends
//! are provided: an in-memory map and a directory of JSON files.

mod file_storage;
mod memory;
mod store;

pub use file_storage::FileStore;
pub use memory::MemoryStore;
pub use store::{KeyValueStore, Result, StorageError};
