//! Read-side view pipeline: filter, sort, paginate.
//!
//! Everything here is pure. The pipeline takes a borrowed collection and a
//! set of view parameters and returns an owned page; the collection is never
//! reordered or modified, so it is safe to run on every render.
//!
//! # Example
//!
//! ```ignore
//! let params = ViewParams::default()
//!     .with_search("lamp")
//!     .sorted_by(SortKey::Total, SortOrder::Descending);
//! let page = run_query(store.products(), &params, DEFAULT_PAGE_SIZE);
//! for (i, product) in page.records.iter().enumerate() {
//!     println!("{} {}", page.row_number(i), product.title);
//! }
//! ```

mod params;
mod pipeline;

pub use params::{CategoryFilter, SortKey, SortOrder, ViewParams, ALL_CATEGORIES};
pub use pipeline::{available_categories, locale_cmp, run_query, Page, DEFAULT_PAGE_SIZE};
