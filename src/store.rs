//! The catalog store: sole owner of the product collection.

use crate::config::CatalogConfig;
use crate::error::{CatalogError, Result};
use crate::export;
use crate::form::Submission;
use crate::ids::IdGenerator;
use crate::persistence::{FileStorage, KeyValueStorage, PersistenceAdapter};
use crate::query::{self, Page, ViewParams, DEFAULT_PAGE_SIZE};
use crate::subscriptions::{
    StoreEvent, SubscriptionConfig, SubscriptionHandle, SubscriptionId, SubscriptionManager,
};
use crate::types::{Product, ProductDraft, ProductId, ProductPatch};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// The product catalog store.
///
/// Holds the ordered collection and the editing slot. Every mutating
/// operation updates memory, then persists through the adapter, then
/// notifies subscribers, all before returning.
///
/// If persisting fails the in-memory change is kept and the error is
/// returned; the next successful write brings storage back in line.
pub struct Store<S: KeyValueStorage = FileStorage> {
    persistence: PersistenceAdapter<S>,

    /// Insertion-ordered collection.
    products: Vec<Product>,

    /// Record currently loaded into the edit form.
    editing: Option<Product>,

    ids: IdGenerator,

    page_size: usize,

    subscriptions: SubscriptionManager,
}

impl Store<FileStorage> {
    /// Open the file-backed store described by `config`.
    pub fn open_with_config(config: &CatalogConfig) -> Result<Self> {
        config.validate()?;
        let storage = FileStorage::open(&config.data_dir)?;
        let adapter = PersistenceAdapter::with_key(storage, config.storage_key.clone());
        Ok(Self::open(adapter)
            .with_page_size(config.page_size)
            .with_event_buffer_size(config.event_buffer_size))
    }
}

impl<S: KeyValueStorage> Store<S> {
    /// Empty store (nothing loaded yet).
    pub fn new(persistence: PersistenceAdapter<S>) -> Self {
        Self {
            persistence,
            products: Vec::new(),
            editing: None,
            ids: IdGenerator::new(),
            page_size: DEFAULT_PAGE_SIZE,
            subscriptions: SubscriptionManager::new(),
        }
    }

    /// Store hydrated from whatever the adapter has persisted.
    pub fn open(persistence: PersistenceAdapter<S>) -> Self {
        let records = persistence.load();
        let mut store = Self::new(persistence);
        store.hydrate(records);
        store
    }

    /// Use a custom id generator.
    pub fn with_id_generator(mut self, mut ids: IdGenerator) -> Self {
        ids.reseed(self.products.iter().map(|p| &p.id));
        self.ids = ids;
        self
    }

    /// Use a custom listing page size.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Default buffered events per subscriber.
    ///
    /// Applies to [`Store::subscribe`] calls whose config leaves
    /// `buffer_size` unset. Set it before subscribing.
    pub fn with_event_buffer_size(mut self, buffer_size: usize) -> Self {
        self.subscriptions = SubscriptionManager::with_buffer_size(buffer_size);
        self
    }

    // --- Mutations ---

    /// Replace the entire collection. Does not persist.
    pub fn hydrate(&mut self, records: Vec<Product>) {
        self.products = records;
        self.ids.reseed(self.products.iter().map(|p| &p.id));
        info!(count = self.products.len(), "hydrated store");
        self.subscriptions.broadcast(StoreEvent::Hydrated {
            count: self.products.len(),
        });
    }

    /// Append a record as-is and persist.
    ///
    /// The id is not checked for uniqueness; use [`Store::create_product`]
    /// to get a fresh one.
    pub fn add_product(&mut self, record: Product) -> Result<()> {
        let id = record.id;
        self.ids.observe(id);
        self.products.push(record);
        debug!(%id, count = self.products.len(), "added product");

        self.persistence.save(&self.products)?;
        self.subscriptions.broadcast(StoreEvent::ProductAdded { id });
        Ok(())
    }

    /// Create a product from a draft with a freshly generated id.
    ///
    /// Fails without touching the collection once the id space is used up.
    pub fn create_product(&mut self, draft: ProductDraft) -> Result<Product> {
        let id = self.ids.next().ok_or(CatalogError::IdsExhausted)?;
        let product = Product::from_draft(id, draft);
        self.add_product(product.clone())?;
        Ok(product)
    }

    /// Shallow-merge `patch` into the record with `id` and persist.
    ///
    /// A missing id is a silent no-op. The total is not recomputed: build
    /// the patch with [`ProductPatch::from_draft`] when amounts change.
    pub fn update_product(&mut self, id: ProductId, patch: ProductPatch) -> Result<()> {
        let Some(product) = self.products.iter_mut().find(|p| p.id == id) else {
            debug!(%id, "update skipped, no such product");
            return Ok(());
        };

        product.apply_patch(patch);
        debug!(%id, "updated product");

        self.persistence.save(&self.products)?;
        self.subscriptions.broadcast(StoreEvent::ProductUpdated { id });
        Ok(())
    }

    /// Remove the record with `id` (if any) and persist either way.
    pub fn delete_product(&mut self, id: ProductId) -> Result<()> {
        let before = self.products.len();
        self.products.retain(|p| p.id != id);
        let removed = self.products.len() != before;
        debug!(%id, removed, "deleted product");

        self.persistence.save(&self.products)?;
        self.subscriptions
            .broadcast(StoreEvent::ProductDeleted { id, removed });
        Ok(())
    }

    /// Empty the collection and remove the persisted blob.
    pub fn delete_all_products(&mut self) -> Result<()> {
        let count = self.products.len();
        self.products.clear();
        info!(count, "deleted all products");

        self.persistence.clear()?;
        self.subscriptions.broadcast(StoreEvent::AllDeleted);
        Ok(())
    }

    /// Load a copy of `record` into the editing slot.
    pub fn set_editing_product(&mut self, record: &Product) {
        self.editing = Some(record.clone());
        debug!(id = %record.id, "editing product");
        self.subscriptions
            .broadcast(StoreEvent::EditingChanged { id: Some(record.id) });
    }

    /// Empty the editing slot.
    pub fn clear_editing_product(&mut self) {
        if self.editing.take().is_some() {
            self.subscriptions
                .broadcast(StoreEvent::EditingChanged { id: None });
        }
    }

    /// Apply a validated form submission, returning the affected id.
    ///
    /// The editing slot is left as it is.
    pub fn apply(&mut self, submission: Submission) -> Result<ProductId> {
        match submission {
            Submission::Create(draft) => Ok(self.create_product(draft)?.id),
            Submission::Update { id, patch } => {
                self.update_product(id, patch)?;
                Ok(id)
            }
        }
    }

    // --- Reads ---

    /// The full collection in insertion order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn get_product(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// The record in the editing slot.
    pub fn editing_product(&self) -> Option<&Product> {
        self.editing.as_ref()
    }

    /// Distinct categories across the whole collection.
    pub fn categories(&self) -> Vec<String> {
        query::available_categories(&self.products)
    }

    /// Run the listing pipeline with this store's page size.
    pub fn query(&self, params: &ViewParams) -> Page {
        query::run_query(&self.products, params, self.page_size)
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Pretty-printed JSON of the full collection.
    pub fn export_json(&self) -> Result<String> {
        export::export_json(&self.products)
    }

    /// Write `products.json` into `dir`.
    pub fn export_to(&self, dir: impl AsRef<Path>) -> Result<PathBuf> {
        export::write_export(&self.products, dir)
    }

    /// The persistence adapter.
    pub fn persistence(&self) -> &PersistenceAdapter<S> {
        &self.persistence
    }

    // --- Subscriptions ---

    /// Subscribe to change events.
    pub fn subscribe(&self, config: SubscriptionConfig) -> SubscriptionHandle {
        self.subscriptions.subscribe(config)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.subscriptions.unsubscribe(id);
    }
}
