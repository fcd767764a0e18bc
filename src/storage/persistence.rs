//! File-backed key-value store
//!
//! Each key is one pretty-printed JSON file in the data directory. Writes go
//! to a temporary file first and are renamed into place; the previous
//! version of a document is kept as a rotating backup.

use crate::storage::kv::{validate_key, KvStore, StorageError};
use std::fs;
use std::path::PathBuf;

const DOCUMENT_EXT: &str = "json";

/// Storage configuration
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
    pub backup_enabled: bool,
    pub max_backups: usize,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(".asteroid_data"),
            backup_enabled: true,
            max_backups: 5,
        }
    }
}

/// Key-value store persisted as JSON files
pub struct FileStore {
    config: StorageConfig,
}

impl FileStore {
    /// Create a store, creating the data directory if needed
    pub fn new(config: StorageConfig) -> Result<Self, StorageError> {
        fs::create_dir_all(&config.data_dir)?;
        Ok(Self { config })
    }

    /// Create with default configuration
    pub fn with_defaults() -> Result<Self, StorageError> {
        Self::new(StorageConfig::default())
    }

    pub fn data_dir(&self) -> &PathBuf {
        &self.config.data_dir
    }

    fn document_path(&self, key: &str) -> PathBuf {
        self.config.data_dir.join(format!("{}.{}", key, DOCUMENT_EXT))
    }

    fn backup_path(&self, key: &str, index: usize) -> PathBuf {
        self.config
            .data_dir
            .join(format!("{}.{}.backup.{}", key, DOCUMENT_EXT, index))
    }

    fn temp_path(&self, key: &str) -> PathBuf {
        self.config.data_dir.join(format!("{}.tmp", key))
    }

    /// Rotate backup files for a key
    fn rotate_backups(&self, key: &str) -> Result<(), StorageError> {
        if self.config.max_backups == 0 {
            return Ok(());
        }

        // Delete oldest backup
        let oldest = self.backup_path(key, self.config.max_backups - 1);
        if oldest.exists() {
            fs::remove_file(&oldest)?;
        }

        // Shift existing backups
        for i in (0..self.config.max_backups - 1).rev() {
            let current = self.backup_path(key, i);
            if current.exists() {
                fs::rename(&current, self.backup_path(key, i + 1))?;
            }
        }

        Ok(())
    }

    /// Backup indices available for a key, newest first
    pub fn list_backups(&self, key: &str) -> Vec<usize> {
        (0..self.config.max_backups)
            .filter(|&i| self.backup_path(key, i).exists())
            .collect()
    }

    /// Raw contents of a backup
    pub fn read_backup(&self, key: &str, index: usize) -> Result<String, StorageError> {
        validate_key(key)?;
        let path = self.backup_path(key, index);
        if !path.exists() {
            return Err(StorageError::InvalidData(format!(
                "Backup {} of {} not found",
                index, key
            )));
        }
        Ok(fs::read_to_string(path)?)
    }

    /// Put a backup back in place as the current document
    pub fn restore_backup(&mut self, key: &str, index: usize) -> Result<(), StorageError> {
        let data = self.read_backup(key, index)?;
        self.put_raw(key, data)?;
        log::info!("Restored {} from backup {}", key, index);
        Ok(())
    }
}

impl KvStore for FileStore {
    fn get_raw(&self, key: &str) -> Result<Option<String>, StorageError> {
        validate_key(key)?;
        let path = self.document_path(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(path)?))
    }

    fn put_raw(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        validate_key(key)?;
        let path = self.document_path(key);

        if self.config.backup_enabled && self.config.max_backups > 0 && path.exists() {
            self.rotate_backups(key)?;
            fs::copy(&path, self.backup_path(key, 0))?;
        }

        // Write to temporary file first
        let temp_path = self.temp_path(key);
        fs::write(&temp_path, value)?;

        // Atomic rename
        fs::rename(&temp_path, &path)?;

        log::debug!("Stored {:?}", path);
        Ok(())
    }

    fn delete(&mut self, key: &str) -> Result<bool, StorageError> {
        validate_key(key)?;
        let path = self.document_path(key);
        if path.exists() {
            fs::remove_file(path)?;
            return Ok(true);
        }
        Ok(false)
    }

    fn keys(&self) -> Result<Vec<String>, StorageError> {
        let mut keys = Vec::new();
        for entry in fs::read_dir(&self.config.data_dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some(DOCUMENT_EXT) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                if validate_key(stem).is_ok() {
                    keys.push(stem.to_string());
                }
            }
        }
        keys.sort();
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::kv::{load, save};

    fn store_in(dir: &tempfile::TempDir, max_backups: usize) -> FileStore {
        FileStore::new(StorageConfig {
            data_dir: dir.path().to_path_buf(),
            max_backups,
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_save_load_document() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&temp_dir, 3);

        save(&mut store, "resource-market", &vec![1u64, 2, 3]).unwrap();
        assert!(store.contains("resource-market").unwrap());

        let loaded: Option<Vec<u64>> = load(&store, "resource-market").unwrap();
        assert_eq!(loaded, Some(vec![1, 2, 3]));
        assert_eq!(store.keys().unwrap(), vec!["resource-market".to_string()]);
    }

    #[test]
    fn test_backup_rotation() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&temp_dir, 3);

        for i in 0..5u64 {
            save(&mut store, "ledger", &i).unwrap();
        }

        // Should have 3 backups (max)
        assert_eq!(store.list_backups("ledger"), vec![0, 1, 2]);
        assert_eq!(store.read_backup("ledger", 0).unwrap(), "3");
        assert_eq!(store.read_backup("ledger", 2).unwrap(), "1");

        // Backups are not listed as keys
        assert_eq!(store.keys().unwrap(), vec!["ledger".to_string()]);
    }

    #[test]
    fn test_restore_backup() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&temp_dir, 2);

        save(&mut store, "ledger", &"first").unwrap();
        save(&mut store, "ledger", &"second").unwrap();
        store.restore_backup("ledger", 0).unwrap();

        let loaded: Option<String> = load(&store, "ledger").unwrap();
        assert_eq!(loaded.as_deref(), Some("first"));
        assert!(store.restore_backup("ledger", 9).is_err());
    }

    #[test]
    fn test_delete_and_missing() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut store = store_in(&temp_dir, 1);

        assert_eq!(store.get_raw("absent").unwrap(), None);
        store.put_raw("present", "1".to_string()).unwrap();
        assert!(store.delete("present").unwrap());
        assert!(!store.delete("present").unwrap());
        assert!(store.get_raw("../etc").is_err());
    }
}
