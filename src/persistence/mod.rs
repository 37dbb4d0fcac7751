//! Durable persistence of the product collection.
//!
//! The whole collection lives as one JSON array under a single key of a
//! key-value backend. Reads are best-effort: anything that cannot be read
//! back as a product list is treated as an empty catalog.

mod adapter;
mod backend;

pub use adapter::{PersistenceAdapter, DEFAULT_STORAGE_KEY};
pub use backend::{FileStorage, KeyValueStorage, MemoryStorage};
