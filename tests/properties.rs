//! Property tests for the store and the view pipeline.

use proptest::prelude::*;
use product_catalog::{
    compute_total, run_query, IdGenerator, MemoryStorage, PersistenceAdapter, Product,
    ProductDraft, ProductId, ProductPatch, SortKey, SortOrder, Store, ViewParams,
};
use std::collections::HashSet;

fn frozen() -> u64 {
    1_700_000_000_000
}

fn amount() -> impl Strategy<Value = f64> {
    (0u32..100_000).prop_map(|cents| cents as f64 / 100.0)
}

fn draft() -> impl Strategy<Value = ProductDraft> {
    (
        "[A-Za-z ]{1,12}",
        amount(),
        amount(),
        amount(),
        amount(),
        prop::sample::select(vec!["Home", "Office", "Garden", "Kitchen"]),
    )
        .prop_map(|(title, price, taxes, ads, discount, category)| {
            ProductDraft::new(title, category).with_amounts(price, taxes, ads, discount)
        })
}

fn collection() -> impl Strategy<Value = Vec<Product>> {
    prop::collection::vec(draft(), 0..40).prop_map(|drafts| {
        drafts
            .into_iter()
            .enumerate()
            .map(|(i, d)| Product::from_draft(ProductId(i as u64 + 1), d))
            .collect()
    })
}

fn params() -> impl Strategy<Value = ViewParams> {
    (
        "[a-z]{0,2}",
        prop::option::of(prop::sample::select(vec![SortKey::Title, SortKey::Total])),
        prop::bool::ANY,
        0usize..12,
    )
        .prop_map(|(search, sort, descending, page)| {
            let mut params = ViewParams::default().with_search(search).on_page(page);
            if let Some(key) = sort {
                let order = if descending {
                    SortOrder::Descending
                } else {
                    SortOrder::Ascending
                };
                params = params.sorted_by(key, order);
            }
            params
        })
}

fn memory_store() -> Store<MemoryStorage> {
    Store::new(PersistenceAdapter::new(MemoryStorage::new()))
        .with_id_generator(IdGenerator::with_clock(frozen))
}

proptest! {
    #[test]
    fn created_ids_are_unique(drafts in prop::collection::vec(draft(), 1..50)) {
        let mut store = memory_store();
        let count = drafts.len();
        for d in drafts {
            store.create_product(d).unwrap();
        }

        let ids: HashSet<ProductId> = store.products().iter().map(|p| p.id).collect();
        prop_assert_eq!(store.len(), count);
        prop_assert_eq!(ids.len(), count);
    }

    #[test]
    fn update_from_draft_matches_formula(first in draft(), second in draft()) {
        let mut store = memory_store();
        let product = store.create_product(first).unwrap();
        store
            .update_product(product.id, ProductPatch::from_draft(second.clone()))
            .unwrap();

        let updated = store.get_product(product.id).unwrap();
        prop_assert_eq!(
            updated.total,
            compute_total(second.price, second.taxes, second.ads, second.discount)
        );
    }

    #[test]
    fn save_load_roundtrip(products in collection()) {
        let storage = MemoryStorage::new();
        PersistenceAdapter::new(storage.clone()).save(&products).unwrap();
        let loaded = PersistenceAdapter::new(storage).load();
        prop_assert_eq!(loaded, products);
    }

    #[test]
    fn query_is_idempotent(products in collection(), params in params()) {
        let before = products.clone();
        let first = run_query(&products, &params, 5);
        let second = run_query(&products, &params, 5);
        prop_assert_eq!(first, second);
        prop_assert_eq!(products, before);
    }

    #[test]
    fn pages_partition_the_view(products in collection(), search in "[a-z]{0,1}") {
        let base = ViewParams::default().with_search(search);
        let all = run_query(&products, &base, usize::MAX);

        let mut seen = Vec::new();
        let first = run_query(&products, &base, 5);
        for page in first.page_numbers() {
            let result = run_query(&products, &base.clone().on_page(page), 5);
            prop_assert!(result.records.len() <= 5);
            seen.extend(result.records);
        }

        prop_assert_eq!(seen, all.records);
        prop_assert_eq!(first.total_pages, first.total_filtered.div_ceil(5));
    }

    #[test]
    fn total_sort_is_ordered_and_stable(products in collection()) {
        let params = ViewParams::default().sorted_by(SortKey::Total, SortOrder::Ascending);
        let page = run_query(&products, &params, usize::MAX);

        for pair in page.records.windows(2) {
            prop_assert!(pair[0].total <= pair[1].total);
            if pair[0].total == pair[1].total {
                // ids follow insertion order
                prop_assert!(pair[0].id < pair[1].id);
            }
        }
    }
}
