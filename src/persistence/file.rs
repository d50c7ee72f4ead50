use chrono::{Duration, Utc};
use log::{debug, warn};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use super::{StateStore, StoredValue};
use crate::error::{Result, ShellError};

/// State kept in a small JSON file. The file is read once when the store is
/// opened and rewritten on every `set`.
#[derive(Debug)]
pub struct FileStateStore {
    path: PathBuf,
    entries: Mutex<HashMap<String, StoredValue>>,
}

impl FileStateStore {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let entries = if path.exists() {
            let content = fs::read_to_string(&path).map_err(|e| persistence(&path, e))?;
            match serde_json::from_str(&content) {
                Ok(entries) => entries,
                Err(e) => {
                    warn!("Ignoring unreadable state file {:?}: {}", path, e);
                    HashMap::new()
                }
            }
        } else {
            HashMap::new()
        };

        debug!("Opened state file {:?} with {} entries", path, entries.len());
        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write(&self, entries: &HashMap<String, StoredValue>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| persistence(parent, e))?;
        }

        let now = Utc::now();
        let live: HashMap<&String, &StoredValue> =
            entries.iter().filter(|(_, stored)| stored.is_live(now)).collect();
        let content = serde_json::to_string_pretty(&live).map_err(|e| persistence(&self.path, e))?;
        fs::write(&self.path, content).map_err(|e| persistence(&self.path, e))
    }
}

impl StateStore for FileStateStore {
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
        self.write(&entries)
    }
}

fn persistence(path: &Path, error: impl std::fmt::Display) -> ShellError {
    ShellError::Persistence {
        reason: format!("{}: {}", path.display(), error),
    }
}
