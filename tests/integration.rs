//! Integration tests for the catalog store.

use product_catalog::{
    CatalogConfig, FileStorage, PersistenceAdapter, ProductDraft, ProductForm, ProductId,
    ProductPatch, SortKey, SortOrder, Store, StoreEvent, SubscriptionConfig, SubscriptionFilter,
    ViewParams, EXPORT_FILE_NAME,
};
use tempfile::TempDir;

fn test_config(dir: &TempDir) -> CatalogConfig {
    CatalogConfig {
        data_dir: dir.path().join("data"),
        ..Default::default()
    }
}

fn draft(title: &str, price: f64, category: &str) -> ProductDraft {
    ProductDraft::new(title, category)
        .with_amounts(price, price * 0.1, 1.0, 0.0)
        .with_image("data:image/png;base64,AAAA")
}

// --- Realistic Workflow Tests ---

#[test]
fn test_form_create_edit_workflow() {
    let dir = TempDir::new().unwrap();
    let mut store = Store::open_with_config(&test_config(&dir)).unwrap();

    // User fills the form and submits
    let mut form = ProductForm::new();
    form.title = "Desk Lamp".into();
    form.price = "40".into();
    form.taxes = "4".into();
    form.ads = "1".into();
    form.discount = "5".into();
    form.category = "Lighting".into();
    form.image = Some("blob:lamp".into());
    assert_eq!(form.total_preview(), 40.0);

    let id = store.apply(form.submit().unwrap()).unwrap();
    form.reset();

    // User clicks "Update" on the row
    let product = store.get_product(id).unwrap().clone();
    store.set_editing_product(&product);

    let mut form = ProductForm::edit(store.editing_product().unwrap());
    form.discount = "10".into();
    store.apply(form.submit().unwrap()).unwrap();

    let updated = store.get_product(id).unwrap();
    assert_eq!(updated.discount, 10.0);
    assert_eq!(updated.total, 35.0);

    // The editing slot is not cleared by the update
    assert_eq!(store.editing_product().unwrap().id, id);
    assert_eq!(store.editing_product().unwrap().discount, 5.0);
}

#[test]
fn test_persistence_across_restarts() {
    let dir = TempDir::new().unwrap();
    let config = test_config(&dir);

    let created = {
        let mut store = Store::open_with_config(&config).unwrap();
        let a = store.create_product(draft("Chair", 50.0, "Furniture")).unwrap();
        let b = store.create_product(draft("Mug", 8.0, "Kitchen")).unwrap();
        store
            .update_product(
                a.id,
                ProductPatch {
                    title: Some("Office Chair".into()),
                    ..Default::default()
                },
            )
            .unwrap();
        vec![a.id, b.id]
    };

    let store = Store::open_with_config(&config).unwrap();
    let ids: Vec<ProductId> = store.products().iter().map(|p| p.id).collect();
    assert_eq!(ids, created);
    assert_eq!(store.products()[0].title, "Office Chair");
}

#[test]
fn test_ids_stay_unique_after_restart() {
    let dir = TempDir::new().unwrap();
    let config = test_config(&dir);

    let first = {
        let mut store = Store::open_with_config(&config).unwrap();
        store.create_product(draft("A", 1.0, "X")).unwrap().id
    };

    let mut store = Store::open_with_config(&config).unwrap();
    let second = store.create_product(draft("B", 1.0, "X")).unwrap().id;
    assert!(second > first);
}

#[test]
fn test_delete_all_then_fresh_load_is_empty() {
    let dir = TempDir::new().unwrap();
    let config = test_config(&dir);

    let mut store = Store::open_with_config(&config).unwrap();
    store.create_product(draft("A", 1.0, "X")).unwrap();
    store.delete_all_products().unwrap();

    let adapter = PersistenceAdapter::new(FileStorage::open(&config.data_dir).unwrap());
    assert!(adapter.load().is_empty());
    assert!(!config.data_dir.join("products.json").exists());
}

#[test]
fn test_listing_view() {
    let dir = TempDir::new().unwrap();
    let mut store = Store::open_with_config(&test_config(&dir)).unwrap();

    for i in 0..12 {
        let category = if i % 3 == 0 { "Lighting" } else { "Furniture" };
        store
            .create_product(draft(&format!("Item {:02}", i), i as f64, category))
            .unwrap();
    }

    let page = store.query(&ViewParams::default());
    assert_eq!(page.total_pages, 3);
    assert_eq!(page.records.len(), 5);

    let page = store.query(&ViewParams::default().on_page(3));
    assert_eq!(page.records.len(), 2);

    let params = ViewParams::default()
        .with_category("Lighting")
        .sorted_by(SortKey::Total, SortOrder::Descending);
    let page = store.query(&params);
    let titles: Vec<_> = page.records.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["Item 09", "Item 06", "Item 03", "Item 00"]);

    assert_eq!(store.categories(), vec!["Lighting", "Furniture"]);
}

#[test]
fn test_export_writes_full_collection() {
    let dir = TempDir::new().unwrap();
    let mut store = Store::open_with_config(&test_config(&dir)).unwrap();
    store.create_product(draft("A", 1.0, "X")).unwrap();
    store.create_product(draft("B", 2.0, "Y")).unwrap();

    let path = store.export_to(dir.path()).unwrap();
    assert_eq!(path, dir.path().join(EXPORT_FILE_NAME));

    let raw = std::fs::read_to_string(path).unwrap();
    let exported: Vec<product_catalog::Product> = serde_json::from_str(&raw).unwrap();
    assert_eq!(exported, store.products());
    assert!(raw.contains("\n  {"));
}

#[test]
fn test_subscriber_sees_mutations() {
    let dir = TempDir::new().unwrap();
    let mut store = Store::open_with_config(&test_config(&dir)).unwrap();
    let handle = store.subscribe(SubscriptionConfig {
        filter: SubscriptionFilter::collection(),
        ..Default::default()
    });

    let product = store.create_product(draft("A", 1.0, "X")).unwrap();
    store.set_editing_product(&product);
    store
        .update_product(product.id, ProductPatch::from_draft(draft("A", 2.0, "X")))
        .unwrap();

    assert_eq!(
        handle.drain(),
        vec![
            StoreEvent::ProductAdded { id: product.id },
            StoreEvent::ProductUpdated { id: product.id },
        ]
    );
}
