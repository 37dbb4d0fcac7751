//! Catalog configuration.

use crate::error::{CatalogError, Result};
use crate::persistence::DEFAULT_STORAGE_KEY;
use crate::query::DEFAULT_PAGE_SIZE;
use crate::subscriptions::DEFAULT_BUFFER_SIZE;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Catalog configuration, loadable from TOML.
///
/// ```toml
/// data_dir = "./catalog-data"
/// storage_key = "products"
/// page_size = 5
/// ```
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CatalogConfig {
    /// Directory holding the persisted collection.
    pub data_dir: PathBuf,

    /// Key the collection is stored under.
    pub storage_key: String,

    /// Rows per listing page.
    pub page_size: usize,

    /// Default buffered change events per subscriber; see
    /// [`Store::with_event_buffer_size`](crate::Store::with_event_buffer_size).
    pub event_buffer_size: usize,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./catalog-data"),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            event_buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }
}

impl CatalogConfig {
    /// Load and validate a TOML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|e| {
            CatalogError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        let config = Self::from_toml(&raw)?;
        debug!(path = %path.display(), ?config, "loaded config");
        Ok(config)
    }

    /// Parse and validate TOML text.
    pub fn from_toml(raw: &str) -> Result<Self> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the store cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.page_size == 0 {
            return Err(CatalogError::Config("page_size must be at least 1".into()));
        }
        if self.storage_key.trim().is_empty() {
            return Err(CatalogError::Config("storage_key must not be empty".into()));
        }
        if self.event_buffer_size == 0 {
            return Err(CatalogError::Config(
                "event_buffer_size must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = CatalogConfig::from_toml("").unwrap();
        assert_eq!(config, CatalogConfig::default());
        assert_eq!(config.page_size, 5);
        assert_eq!(config.storage_key, "products");
    }

    #[test]
    fn test_partial_override() {
        let config = CatalogConfig::from_toml("page_size = 10\ndata_dir = \"/tmp/cat\"").unwrap();
        assert_eq!(config.page_size, 10);
        assert_eq!(config.data_dir, PathBuf::from("/tmp/cat"));
        assert_eq!(config.storage_key, "products");
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            CatalogConfig::from_toml("page_size = 0"),
            Err(CatalogError::Config(_))
        ));
        assert!(matches!(
            CatalogConfig::from_toml("storage_key = \"\""),
            Err(CatalogError::Config(_))
        ));
        assert!(matches!(
            CatalogConfig::from_toml("unknown = 1"),
            Err(CatalogError::Config(_))
        ));
    }

    #[test]
    fn test_load_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("catalog.toml");
        fs::write(&path, "storage_key = \"inventory\"").unwrap();

        let config = CatalogConfig::load(&path).unwrap();
        assert_eq!(config.storage_key, "inventory");

        let missing = CatalogConfig::load(dir.path().join("missing.toml"));
        assert!(matches!(missing, Err(CatalogError::Config(_))));
    }
}
