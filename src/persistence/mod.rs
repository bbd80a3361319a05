//! Persistent key-value storage
//!
//! The only persisted value is the high score under [`HIGH_SCORE_KEY`].
//! Backends:
//! - `MemoryStore`: in-process map
//! - `JsonFileStore`: JSON object file, written via temp file + rename
//! - `LocalStorageStore`: browser LocalStorage (wasm32 only)

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Storage key for the high score
pub const HIGH_SCORE_KEY: &str = "highScore";

/// Persistence errors
#[derive(thiserror::Error, Debug)]
pub enum PersistenceError {
    /// IO error from filesystem
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed store file
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Stored value could not be parsed
    #[error("Invalid value for '{key}': {value:?}")]
    InvalidValue { key: String, value: String },

    /// Backend not reachable (no window, storage disabled, ...)
    #[error("Storage unavailable: {0}")]
    Unavailable(&'static str),
}

pub type Result<T> = std::result::Result<T, PersistenceError>;

/// String key-value store
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Read the high score; absent means 0
pub fn load_high_score(store: &dyn KeyValueStore) -> Result<u32> {
    match store.get(HIGH_SCORE_KEY)? {
        None => Ok(0),
        Some(raw) => raw
            .trim()
            .parse::<u32>()
            .map_err(|_| PersistenceError::InvalidValue {
                key: HIGH_SCORE_KEY.to_string(),
                value: raw,
            }),
    }
}

pub fn save_high_score(store: &mut dyn KeyValueStore, high_score: u32) -> Result<()> {
    store.set(HIGH_SCORE_KEY, &high_score.to_string())
}

/// In-memory store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// JSON object file, e.g. `{ "highScore": 12 }`
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Result<BTreeMap<String, serde_json::Value>> {
        match std::fs::read_to_string(&self.path) {
            Ok(json) => Ok(serde_json::from_str(&json)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_map()?.get(key).map(|v| match v {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        }))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut map = self.read_map()?;
        let value = serde_json::from_str(value)
            .unwrap_or_else(|_| serde_json::Value::String(value.to_string()));
        map.insert(key.to_string(), value);

        let json = serde_json::to_string_pretty(&map)?;
        let tmp = self.path.with_extension("tmp");
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &self.path)?;
        log::debug!("Saved '{}' to {}", key, self.path.display());
        Ok(())
    }
}

/// Browser LocalStorage
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Default)]
pub struct LocalStorageStore;

#[cfg(target_arch = "wasm32")]
impl LocalStorageStore {
    fn storage() -> Result<web_sys::Storage> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or(PersistenceError::Unavailable("LocalStorage"))
    }
}

#[cfg(target_arch = "wasm32")]
impl KeyValueStore for LocalStorageStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Self::storage()?
            .get_item(key)
            .map_err(|_| PersistenceError::Unavailable("LocalStorage read"))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        Self::storage()?
            .set_item(key, value)
            .map_err(|_| PersistenceError::Unavailable("LocalStorage write"))
    }
}
