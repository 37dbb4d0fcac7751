//! Persistence adapter for the product collection.

use super::backend::KeyValueStorage;
use crate::error::{CatalogError, Result};
use crate::types::Product;
use tracing::{debug, warn};

/// Key the collection is stored under by default.
pub const DEFAULT_STORAGE_KEY: &str = "products";

/// Reads and writes the entire collection as one JSON blob.
#[derive(Debug)]
pub struct PersistenceAdapter<S> {
    storage: S,
    key: String,
}

impl<S: KeyValueStorage> PersistenceAdapter<S> {
    /// Adapter using [`DEFAULT_STORAGE_KEY`].
    pub fn new(storage: S) -> Self {
        Self::with_key(storage, DEFAULT_STORAGE_KEY)
    }

    /// Adapter using a custom key.
    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    /// The storage key.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The underlying storage.
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Load the stored collection.
    ///
    /// Absent, unreadable or malformed data all load as an empty collection.
    pub fn load(&self) -> Vec<Product> {
        let raw = match self.storage.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!(key = %self.key, "no persisted products");
                return Vec::new();
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "failed to read persisted products, starting empty");
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<Product>>(&raw) {
            Ok(products) => {
                debug!(key = %self.key, count = products.len(), "loaded products");
                products
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "discarding malformed persisted products");
                Vec::new()
            }
        }
    }

    /// Serialize the full collection and overwrite the stored blob.
    ///
    /// A record with a non-finite amount or total is refused and the stored
    /// blob is left untouched, since it could not be loaded again.
    pub fn save(&self, products: &[Product]) -> Result<()> {
        if let Some(bad) = products.iter().find(|p| !p.is_finite()) {
            return Err(CatalogError::Serialization(format!(
                "product {} has a non-finite amount or total",
                bad.id
            )));
        }
        let encoded = serde_json::to_string(products)?;
        self.storage.set(&self.key, &encoded)?;
        debug!(key = %self.key, count = products.len(), bytes = encoded.len(), "saved products");
        Ok(())
    }

    /// Remove the stored blob entirely.
    pub fn clear(&self) -> Result<()> {
        self.storage.remove(&self.key)?;
        debug!(key = %self.key, "cleared persisted products");
        Ok(())
    }
}
