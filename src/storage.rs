use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::marker::PhantomData;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::warn;

use crate::{AppError, Result};

/// Append/read access to a persisted record collection. The ledger and the
/// alert registry only ever need these two operations, which keeps storage
/// swappable for the in-memory double in tests.
pub trait RecordStore<T>: Send + Sync {
    /// Reads every record in insertion order. A missing or corrupt backing
    /// file degrades to an empty collection; only genuine IO faults on an
    /// existing readable path would surface, and those are treated the same
    /// way since "no prior data" is the recoverable default.
    fn read_all(&self) -> Result<Vec<T>>;

    /// Appends one record. Write faults surface to the caller.
    fn append(&self, record: &T) -> Result<()>;
}

/// JSON-array file store matching the externally visible record shapes
/// (`price_history.json`, `price_alerts.json`).
pub struct JsonStore<T> {
    path: PathBuf,
    _marker: PhantomData<T>,
}

impl<T> JsonStore<T> {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _marker: PhantomData,
        }
    }
}

impl<T> RecordStore<T> for JsonStore<T>
where
    T: Serialize + DeserializeOwned + Clone + Send + Sync,
{
    fn read_all(&self) -> Result<Vec<T>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(_) => return Ok(Vec::new()),
        };

        match serde_json::from_str(&contents) {
            Ok(records) => Ok(records),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "corrupt store, treating as empty");
                Ok(Vec::new())
            }
        }
    }

    fn append(&self, record: &T) -> Result<()> {
        let mut records = self.read_all()?;
        records.push(record.clone());

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    AppError::Storage(format!("failed to create {}: {}", parent.display(), e))
                })?;
            }
        }

        let serialized = serde_json::to_string_pretty(&records)?;
        fs::write(&self.path, serialized)
            .map_err(|e| AppError::Storage(format!("failed to write {}: {}", self.path.display(), e)))?;
        Ok(())
    }
}

/// In-memory store for tests and callers that do not want files.
#[derive(Default)]
pub struct MemoryStore<T> {
    records: Mutex<Vec<T>>,
}

impl<T: Clone> MemoryStore<T> {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
        }
    }

    pub fn records(&self) -> Vec<T> {
        // A panic while holding the lock cannot corrupt a Vec of records,
        // so a poisoned lock is still readable.
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl<T: Clone + Send + Sync> RecordStore<T> for MemoryStore<T> {
    fn read_all(&self) -> Result<Vec<T>> {
        Ok(self.records())
    }

    fn append(&self, record: &T) -> Result<()> {
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(record.clone());
        Ok(())
    }
}
