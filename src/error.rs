//! Error types for the catalog.

use crate::form::FormError;
use thiserror::Error;

/// Main error type for catalog operations.
///
/// Logical misses (updating or deleting an id that is not in the collection)
/// are never errors; these variants only cover storage, configuration and
/// form input failures.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid form input: {0}")]
    Form(#[from] FormError),

    #[error("Product id space exhausted")]
    IdsExhausted,
}

impl From<serde_json::Error> for CatalogError {
    fn from(e: serde_json::Error) -> Self {
        CatalogError::Serialization(e.to_string())
    }
}

impl From<toml::de::Error> for CatalogError {
    fn from(e: toml::de::Error) -> Self {
        CatalogError::Config(e.to_string())
    }
}

/// Result type for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;
