//! The filter → sort → paginate pipeline.

use super::params::{SortKey, SortOrder, ViewParams};
use crate::types::Product;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::HashSet;
use std::ops::RangeInclusive;

/// Rows per listing page.
pub const DEFAULT_PAGE_SIZE: usize = 5;

/// One page of the filtered, sorted view.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Page {
    /// Records visible on this page.
    pub records: Vec<Product>,
    /// `ceil(total_filtered / page_size)`.
    pub total_pages: usize,
    /// Records that passed the filters, across all pages.
    pub total_filtered: usize,
    /// The requested page (1-based, possibly out of range).
    pub page: usize,
    pub page_size: usize,
}

impl Page {
    /// 1-based position of the `index`-th visible record in the whole view.
    pub fn row_number(&self, index: usize) -> usize {
        self.page.saturating_sub(1) * self.page_size + index + 1
    }

    /// Page numbers to offer in a pager.
    pub fn page_numbers(&self) -> RangeInclusive<usize> {
        1..=self.total_pages
    }

    /// Whether nothing is visible on this page.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Locale-style string ordering.
///
/// Case-insensitive first; among strings equal ignoring case, lowercase
/// sorts before uppercase, then plain code point order.
///
/// There are no collation tables: accented letters and punctuation sort by
/// code point, so "Éclair" comes after "Zebra".
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    let folded = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));
    if folded != Ordering::Equal {
        return folded;
    }

    for (x, y) in a.chars().zip(b.chars()) {
        if x != y {
            match (x.is_lowercase(), y.is_lowercase()) {
                (true, false) => return Ordering::Less,
                (false, true) => return Ordering::Greater,
                _ => return x.cmp(&y),
            }
        }
    }
    a.len().cmp(&b.len())
}

fn compare(a: &Product, b: &Product, key: SortKey) -> Ordering {
    match key {
        SortKey::Title => locale_cmp(&a.title, &b.title),
        SortKey::Total => a.total.partial_cmp(&b.total).unwrap_or(Ordering::Equal),
    }
}

/// Run the view pipeline over `products`.
///
/// 1. keep records whose title or category contains the search term,
///    ignoring case;
/// 2. apply the category filter;
/// 3. stable-sort if a sort key is set;
/// 4. slice out the requested page.
pub fn run_query(products: &[Product], params: &ViewParams, page_size: usize) -> Page {
    let needle = params.search_term.to_lowercase();

    let mut filtered: Vec<&Product> = products
        .iter()
        .filter(|p| {
            needle.is_empty()
                || p.title.to_lowercase().contains(&needle)
                || p.category.to_lowercase().contains(&needle)
        })
        .filter(|p| params.category.matches(&p.category))
        .collect();

    if let Some(key) = params.sort_by {
        // Reversing the comparator (not the output) keeps ties in order.
        match params.sort_order {
            SortOrder::Ascending => filtered.sort_by(|a, b| compare(a, b, key)),
            SortOrder::Descending => filtered.sort_by(|a, b| compare(b, a, key)),
        }
    }

    let total_filtered = filtered.len();
    let total_pages = if page_size == 0 {
        0
    } else {
        total_filtered.div_ceil(page_size)
    };

    let records = match params.page.checked_sub(1) {
        Some(index) if page_size > 0 => filtered
            .into_iter()
            .skip(index.saturating_mul(page_size))
            .take(page_size)
            .cloned()
            .collect(),
        _ => Vec::new(),
    };

    Page {
        records,
        total_pages,
        total_filtered,
        page: params.page,
        page_size,
    }
}

/// Distinct categories of the full collection, in first-seen order.
pub fn available_categories(products: &[Product]) -> Vec<String> {
    let mut seen = HashSet::new();
    products
        .iter()
        .filter(|p| seen.insert(p.category.as_str()))
        .map(|p| p.category.clone())
        .collect()
}
