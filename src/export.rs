//! JSON export of the full collection.

use crate::error::Result;
use crate::types::Product;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

/// File name of an export.
pub const EXPORT_FILE_NAME: &str = "products.json";

/// Pretty-printed JSON array of `products` (two-space indent).
pub fn export_json(products: &[Product]) -> Result<String> {
    Ok(serde_json::to_string_pretty(products)?)
}

/// Write `products.json` into `dir`, returning its path.
pub fn write_export(products: &[Product], dir: impl AsRef<Path>) -> Result<PathBuf> {
    let path = dir.as_ref().join(EXPORT_FILE_NAME);
    let json = export_json(products)?;

    let mut file = File::create(&path)?;
    file.write_all(json.as_bytes())?;
    file.sync_all()?;

    info!(path = %path.display(), count = products.len(), "exported products");
    Ok(path)
}
