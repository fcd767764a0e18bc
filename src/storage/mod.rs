//! Storage module for contract state persistence

pub mod kv;
pub mod persistence;

pub use kv::{load, save, validate_key, KvStore, MemoryStore, StorageError};
pub use persistence::{FileStore, StorageConfig};
