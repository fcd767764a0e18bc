//! Key-value store abstraction
//!
//! Values are JSON documents. Each contract owns one key, so the store
//! never needs cross-key transactions.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;
use std::io;
use thiserror::Error;

/// Storage errors
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
    #[error("Invalid key: {0}")]
    InvalidKey(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// A string-keyed store of JSON documents
pub trait KvStore {
    /// Raw document stored under `key`
    fn get_raw(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store a raw document under `key`, replacing any previous one
    fn put_raw(&mut self, key: &str, value: String) -> Result<(), StorageError>;

    /// Remove `key`; returns whether it existed
    fn delete(&mut self, key: &str) -> Result<bool, StorageError>;

    /// All keys currently stored, sorted
    fn keys(&self) -> Result<Vec<String>, StorageError>;

    fn contains(&self, key: &str) -> Result<bool, StorageError> {
        Ok(self.get_raw(key)?.is_some())
    }
}

/// Deserialize the document under `key`
pub fn load<T: DeserializeOwned>(
    store: &dyn KvStore,
    key: &str,
) -> Result<Option<T>, StorageError> {
    match store.get_raw(key)? {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

/// Serialize `value` under `key`
pub fn save<T: Serialize>(
    store: &mut dyn KvStore,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let raw = serde_json::to_string_pretty(value)?;
    store.put_raw(key, raw)
}

/// Keys are restricted so they map safely onto file names
pub fn validate_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && key.len() <= 64
        && key
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_');
    if !valid {
        return Err(StorageError::InvalidKey(key.to_string()));
    }
    Ok(())
}

/// Volatile store used by tests and one-shot runs
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KvStore for MemoryStore {
    fn get_raw(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn put_raw(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        validate_key(key)?;
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn delete(&mut self, key: &str) -> Result<bool, StorageError> {
        Ok(self.entries.remove(key).is_some())
    }

    fn keys(&self) -> Result<Vec<String>, StorageError> {
        Ok(self.entries.keys().cloned().collect())
    }
}
