//! Key-value storage backends.

use crate::error::{CatalogError, Result};
use fs2::FileExt;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Name of the advisory lock file inside a storage directory.
const LOCK_FILE: &str = "LOCK";

/// Extension of value files.
const VALUE_EXTENSION: &str = "json";

/// Durable string key-value storage.
pub trait KeyValueStorage {
    /// Read the value under `key`, or `None` if absent.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Overwrite the value under `key`.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key` entirely. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}

/// Directory-backed storage: one file per key.
///
/// Writes land in a temporary sibling that is renamed over the target, so
/// readers see either the old or the new value. Writers hold an exclusive
/// advisory lock while writing; concurrent processes end up last-write-wins.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    /// Open (creating if needed) a storage directory.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        fs::create_dir_all(&path)?;
        Ok(Self { path })
    }

    /// Directory holding the values.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn value_path(&self, key: &str) -> Result<PathBuf> {
        if key.is_empty() || key.contains(['/', '\\']) || key.starts_with('.') {
            return Err(CatalogError::Config(format!("Invalid storage key: {:?}", key)));
        }
        Ok(self.path.join(format!("{}.{}", key, VALUE_EXTENSION)))
    }

    fn lock_file(&self) -> Result<File> {
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(self.path.join(LOCK_FILE))?;
        Ok(file)
    }
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let value_path = self.value_path(key)?;
        let lock = self.lock_file()?;
        lock.lock_shared()?;

        let result = match fs::read_to_string(&value_path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        };

        // Dropping the handle releases the lock
        result
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let value_path = self.value_path(key)?;
        let tmp_path = value_path.with_extension(format!("{}.tmp", VALUE_EXTENSION));
        let lock = self.lock_file()?;
        lock.lock_exclusive()?;

        let result = (|| -> Result<()> {
            let mut file = File::create(&tmp_path)?;
            file.write_all(value.as_bytes())?;
            file.sync_all()?;
            fs::rename(&tmp_path, &value_path)?;
            Ok(())
        })();

        result
    }

    fn remove(&self, key: &str) -> Result<()> {
        let value_path = self.value_path(key)?;
        let lock = self.lock_file()?;
        lock.lock_exclusive()?;

        let result = match fs::remove_file(&value_path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        };

        result
    }
}

/// In-memory storage.
///
/// Clones share the same map, so a second adapter built from a clone sees
/// exactly what the first one wrote.
#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    values: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryStorage {
    /// Create empty storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `key` currently holds a value.
    pub fn contains(&self, key: &str) -> bool {
        self.values.read().contains_key(key)
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.read().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.values.write().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.values.write().remove(key);
        Ok(())
    }
}
