//! Key-value persistence for the catalog.
//!
//! The whole catalog lives under a single key as a JSON array and is
//! overwritten on every mutation. There is no incremental write.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::Product;

pub const PRODUCTS_KEY: &str = "products";

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("invalid storage key '{0}'")]
    InvalidKey(String),

    #[error("store lock poisoned")]
    Poisoned,
}

/// String-keyed store of string values.
pub trait KeyValueStore: Send + Sync {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replaces the value wholesale. Readers never observe a partial write.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

/// One `<key>.json` file per key under a data directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path { &self.dir }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty() && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(key)?) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        debug!(path = %path.display(), bytes = value.len(), "Wrote storage key");
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.path_for(key)?) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e.into()),
            _ => Ok(()),
        }
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    items: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self { Self::default() }
}

impl KeyValueStore for MemoryStore {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.items.lock().map_err(|_| StorageError::Poisoned)?.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.items.lock().map_err(|_| StorageError::Poisoned)?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.items.lock().map_err(|_| StorageError::Poisoned)?.remove(key);
        Ok(())
    }
}

pub fn save_products(store: &dyn KeyValueStore, products: &[Product]) -> Result<(), StorageError> {
    let json = serde_json::to_string(products)?;
    store.set_item(PRODUCTS_KEY, &json)
}

/// `Ok(None)` when nothing has been persisted yet.
pub fn load_products(store: &dyn KeyValueStore) -> Result<Option<Vec<Product>>, StorageError> {
    match store.get_item(PRODUCTS_KEY)? {
        Some(json) => Ok(Some(serde_json::from_str(&json)?)),
        None => Ok(None),
    }
}

/// Persisted products, or `fallback` when the key is absent or unreadable.
pub fn load_products_or(store: &dyn KeyValueStore, fallback: impl FnOnce() -> Vec<Product>) -> Vec<Product> {
    match load_products(store) {
        Ok(Some(products)) => products,
        Ok(None) => fallback(),
        Err(e) => {
            warn!(error = %e, "Persisted catalog unreadable, using sample data");
            fallback()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::sample_products;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_dir() -> PathBuf {
        let nanos = SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_nanos();
        std::env::temp_dir().join(format!("opensase_inventory_store_{nanos}"))
    }

    #[test]
    fn test_memory_round_trip() {
        let store = MemoryStore::new();
        assert!(load_products(&store).unwrap().is_none());
        let products = sample_products();
        save_products(&store, &products).unwrap();
        assert_eq!(load_products(&store).unwrap().unwrap(), products);
    }
    #[test]
    fn test_file_round_trip() {
        let dir = temp_dir();
        let store = FileStore::open(&dir).unwrap();
        let products = sample_products();
        save_products(&store, &products).unwrap();
        assert!(dir.join("products.json").exists());
        assert!(!dir.join("products.json.tmp").exists());
        let reopened = FileStore::open(&dir).unwrap();
        assert_eq!(load_products(&reopened).unwrap().unwrap(), products);
        reopened.remove_item(PRODUCTS_KEY).unwrap();
        reopened.remove_item(PRODUCTS_KEY).unwrap();
        assert!(reopened.get_item(PRODUCTS_KEY).unwrap().is_none());
        fs::remove_dir_all(dir).unwrap();
    }
    #[test]
    fn test_file_store_rejects_path_keys() {
        let dir = temp_dir();
        let store = FileStore::open(&dir).unwrap();
        assert!(matches!(store.set_item("../escape", "x"), Err(StorageError::InvalidKey(_))));
        fs::remove_dir_all(dir).unwrap();
    }
    #[test]
    fn test_corrupt_value_falls_back() {
        let store = MemoryStore::new();
        store.set_item(PRODUCTS_KEY, "{not json").unwrap();
        assert!(load_products(&store).is_err());
        assert_eq!(load_products_or(&store, sample_products).len(), 8);
    }
    #[test]
    fn test_empty_array_is_kept() {
        let store = MemoryStore::new();
        store.set_item(PRODUCTS_KEY, "[]").unwrap();
        assert!(load_products_or(&store, sample_products).is_empty());
    }
}
