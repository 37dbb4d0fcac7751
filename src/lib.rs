//! # Product Catalog
//!
//! A locally persisted product catalog: one ordered collection of product
//! records, a store that owns and mutates it, and a pure view pipeline that
//! filters, sorts and paginates it for display.
//!
//! ## Core Concepts
//!
//! - **Products**: records with four amounts and a derived, stored total
//! - **Store**: the only owner of the collection and the editing slot;
//!   persists after every mutation
//! - **Persistence**: the whole collection as one JSON blob in a key-value
//!   backend, read back best-effort
//! - **Query**: search → category filter → stable sort → page
//!
//! ## Example
//!
//! ```ignore
//! use product_catalog::{CatalogConfig, ProductDraft, Store, ViewParams};
//!
//! let mut store = Store::open_with_config(&CatalogConfig::default())?;
//!
//! let lamp = store.create_product(
//!     ProductDraft::new("Desk Lamp", "Lighting").with_amounts(40.0, 4.0, 1.0, 5.0),
//! )?;
//! assert_eq!(lamp.total, 40.0);
//!
//! let page = store.query(&ViewParams::default().with_search("lamp"));
//! println!("{} of {} pages", page.page, page.total_pages);
//! ```

pub mod config;
pub mod error;
pub mod export;
pub mod form;
pub mod ids;
pub mod persistence;
pub mod query;
pub mod store;
pub mod subscriptions;
pub mod types;

// Re-exports
pub use config::CatalogConfig;
pub use error::{CatalogError, Result};
pub use export::{export_json, write_export, EXPORT_FILE_NAME};
pub use form::{FormError, FormField, ProductForm, Submission};
pub use ids::IdGenerator;
pub use persistence::{
    FileStorage, KeyValueStorage, MemoryStorage, PersistenceAdapter, DEFAULT_STORAGE_KEY,
};
pub use query::{
    available_categories, run_query, CategoryFilter, Page, SortKey, SortOrder, ViewParams,
    ALL_CATEGORIES, DEFAULT_PAGE_SIZE,
};
pub use store::Store;
pub use subscriptions::{
    DropReason, StoreEvent, SubscriptionConfig, SubscriptionFilter, SubscriptionHandle,
    SubscriptionId, SubscriptionManager,
};
pub use types::*;
