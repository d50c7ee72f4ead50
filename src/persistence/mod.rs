//! Durable key-value state that outlives a single boot
//!
//! Values carry an expiry; an expired value reads back as absent.

pub mod file;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::{Result, ShellError};

pub use file::FileStateStore;

pub trait StateStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str, retention: Duration) -> Result<()>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredValue {
    pub value: String,
    pub expires_at: DateTime<Utc>,
}

impl StoredValue {
    pub fn new(value: &str, retention: Duration) -> Self {
        Self {
            value: value.to_string(),
            expires_at: Utc::now() + retention,
        }
    }

    pub fn is_live(&self, now: DateTime<Utc>) -> bool {
        self.expires_at > now
    }
}

/// Keeps values for the lifetime of the process only.
#[derive(Debug, Default)]
pub struct MemoryStateStore {
    entries: Mutex<HashMap<String, StoredValue>>,
}

impl MemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStore for MemoryStateStore {
    fn get(&self, key: &str) -> Option<String> {
        let entries = self.entries.lock().ok()?;
        entries
            .get(key)
            .filter(|stored| stored.is_live(Utc::now()))
            .map(|stored| stored.value.clone())
    }

    fn set(&self, key: &str, value: &str, retention: Duration) -> Result<()> {
        let mut entries = self.entries.lock().map_err(|e| ShellError::Persistence {
            reason: e.to_string(),
        })?;
        entries.insert(key.to_string(), StoredValue::new(value, retention));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemoryStateStore::new();
        assert_eq!(store.get("tab"), None);

        store.set("tab", "Home", Duration::days(365)).unwrap();
        assert_eq!(store.get("tab").as_deref(), Some("Home"));

        store.set("tab", "Insert", Duration::days(365)).unwrap();
        assert_eq!(store.get("tab").as_deref(), Some("Insert"));
    }

    #[test]
    fn test_expired_values_are_absent() {
        let store = MemoryStateStore::new();
        store.set("tab", "Home", Duration::seconds(-1)).unwrap();
        assert_eq!(store.get("tab"), None);
    }
}
