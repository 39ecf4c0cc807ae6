//! Persisted preference storage
//!
//! The browser keeps the chosen language in local storage. Here storage is a
//! small string key-value trait with an in-memory implementation and a
//! JSON-file implementation for command-line and desktop use.

use crate::error::{I18nError, I18nResult};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// String key-value store for user preferences
///
/// Writes are best effort: a store that cannot persist logs the failure and
/// keeps going, since losing a preference never breaks the page.
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&mut self, key: &str, value: &str);
}

/// Volatile store, one per session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(mut self, key: &str, value: &str) -> Self {
        self.values.insert(key.to_string(), value.to_string());
        self
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }
}

/// Store backed by a JSON object file
///
/// ```json
/// { "lang": "en" }
/// ```
///
/// The file is read once on open and rewritten on every `set`.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl FileStore {
    /// Open the store at `path`; a missing file is an empty store
    ///
    /// # Errors
    /// - `Io` when the file exists but cannot be read
    /// - `Parse` when it is not a JSON object of strings
    pub fn open(path: impl Into<PathBuf>) -> I18nResult<Self> {
        let path = path.into();
        let values = if path.exists() {
            let content = fs::read_to_string(&path)
                .map_err(|e| I18nError::Io(format!("Failed to read '{}': {}", path.display(), e)))?;
            serde_json::from_str(&content)?
        } else {
            BTreeMap::new()
        };

        Ok(Self { path, values })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> I18nResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&self.values)?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}

impl PreferenceStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
        if let Err(e) = self.persist() {
            warn!(path = %self.path.display(), error = %e, "could not persist preference");
        }
    }
}
