use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

use redb::ReadableDatabase;
use thiserror::Error;

use crate::db::{open_database, tables, Db};

/// Errors raised by a storage backend
#[derive(Error, Debug)]
pub enum PersistError {
    #[error("Storage error: {0}")]
    Storage(#[from] redb::Error),

    #[error("Encoding error: {0}")]
    Encoding(#[from] serde_json::Error),
}

/// Durable storage for named board blobs
pub trait StateBackend: Send + Sync {
    /// Read the blob stored under `key`, if any
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, PersistError>;

    /// Replace the blob stored under `key`
    fn save(&self, key: &str, bytes: &[u8]) -> Result<(), PersistError>;

    /// Remove the blob stored under `key`; missing keys are fine
    fn clear(&self, key: &str) -> Result<(), PersistError>;
}

impl<T: StateBackend + ?Sized> StateBackend for Arc<T> {
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, PersistError> {
        (**self).load(key)
    }

    fn save(&self, key: &str, bytes: &[u8]) -> Result<(), PersistError> {
        (**self).save(key, bytes)
    }

    fn clear(&self, key: &str) -> Result<(), PersistError> {
        (**self).clear(key)
    }
}

// =============================================================================
// redb
// =============================================================================

/// Board blobs in a local redb file
#[derive(Clone)]
pub struct RedbBackend {
    db: Db,
}

impl RedbBackend {
    pub fn new(db: Db) -> Self {
        Self { db }
    }

    /// Open (or create) the database file and wrap it
    pub fn open(path: impl AsRef<Path>) -> Result<Self, PersistError> {
        Ok(Self::new(open_database(path)?))
    }

    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, redb::Error> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(tables::BOARD_STATE)?;
        let value = table.get(key)?.map(|guard| guard.value().to_vec());
        Ok(value)
    }

    fn write(&self, key: &str, bytes: Option<&[u8]>) -> Result<(), redb::Error> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(tables::BOARD_STATE)?;
            match bytes {
                Some(bytes) => {
                    table.insert(key, bytes)?;
                }
                None => {
                    table.remove(key)?;
                }
            }
        }
        write_txn.commit()?;
        Ok(())
    }
}

impl StateBackend for RedbBackend {
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, PersistError> {
        Ok(self.read(key)?)
    }

    fn save(&self, key: &str, bytes: &[u8]) -> Result<(), PersistError> {
        self.write(key, Some(bytes))?;
        tracing::debug!("Persisted board state under {}: {} bytes", key, bytes.len());
        Ok(())
    }

    fn clear(&self, key: &str) -> Result<(), PersistError> {
        self.write(key, None)?;
        tracing::info!("Cleared persisted board state under {}", key);
        Ok(())
    }
}

// =============================================================================
// In-memory
// =============================================================================

/// Volatile backend; state lasts as long as the value
#[derive(Debug, Default)]
pub struct MemoryBackend {
    blobs: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn blobs(&self) -> std::sync::MutexGuard<'_, HashMap<String, Vec<u8>>> {
        self.blobs.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.blobs().contains_key(key)
    }
}

impl StateBackend for MemoryBackend {
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, PersistError> {
        Ok(self.blobs().get(key).cloned())
    }

    fn save(&self, key: &str, bytes: &[u8]) -> Result<(), PersistError> {
        self.blobs().insert(key.to_string(), bytes.to_vec());
        Ok(())
    }

    fn clear(&self, key: &str) -> Result<(), PersistError> {
        self.blobs().remove(key);
        Ok(())
    }
}
