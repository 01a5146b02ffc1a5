use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{Map, Value};

use kiosk_common::PlatformError;

/// The platform's local key/value store. Values are arbitrary JSON; there is
/// no schema.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Store every property of `entries` under its own key.
    async fn set(&self, entries: Map<String, Value>) -> Result<(), PlatformError>;

    /// Delete the given keys. Missing keys are not an error.
    async fn remove(&self, keys: &[String]) -> Result<(), PlatformError>;

    async fn get(&self, key: &str) -> Result<Option<Value>, PlatformError>;
}

/// In-process store backing the default shell and the test suites.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<Map<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn set(&self, entries: Map<String, Value>) -> Result<(), PlatformError> {
        let mut guard = self
            .entries
            .lock()
            .map_err(|_| PlatformError::StorageError("store lock poisoned".into()))?;
        for (key, value) in entries {
            guard.insert(key, value);
        }
        Ok(())
    }

    async fn remove(&self, keys: &[String]) -> Result<(), PlatformError> {
        let mut guard = self
            .entries
            .lock()
            .map_err(|_| PlatformError::StorageError("store lock poisoned".into()))?;
        for key in keys {
            guard.remove(key);
        }
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<Value>, PlatformError> {
        let guard = self
            .entries
            .lock()
            .map_err(|_| PlatformError::StorageError("store lock poisoned".into()))?;
        Ok(guard.get(key).cloned())
    }
}
