//! View parameters for the listing pipeline.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Category selector value meaning "no category filter".
pub const ALL_CATEGORIES: &str = "All";

/// Category filter.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CategoryFilter {
    #[default]
    All,
    /// Keep only records whose category equals this exactly.
    Only(String),
}

impl CategoryFilter {
    /// Whether `category` passes the filter.
    pub fn matches(&self, category: &str) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => wanted == category,
        }
    }
}

impl From<&str> for CategoryFilter {
    fn from(value: &str) -> Self {
        if value == ALL_CATEGORIES {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(value.to_string())
        }
    }
}

impl From<String> for CategoryFilter {
    fn from(value: String) -> Self {
        if value == ALL_CATEGORIES {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(value)
        }
    }
}

/// Field to sort by.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    Title,
    Total,
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "title" => Ok(SortKey::Title),
            "total" => Ok(SortKey::Total),
            other => Err(format!("unknown sort key: {}", other)),
        }
    }
}

/// Sort direction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    /// The opposite direction.
    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::Ascending,
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOrder::Ascending => write!(f, "asc"),
            SortOrder::Descending => write!(f, "desc"),
        }
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" | "ascending" => Ok(SortOrder::Ascending),
            "desc" | "descending" => Ok(SortOrder::Descending),
            other => Err(format!("unknown sort order: {}", other)),
        }
    }
}

/// Transient view parameters (never persisted).
///
/// Callers should reset `page` to 1 whenever the search term or category
/// filter changes; the pipeline does not clamp out-of-range pages.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ViewParams {
    /// Case-insensitive substring matched against title and category.
    pub search_term: String,
    pub category: CategoryFilter,
    /// `None` keeps collection order.
    pub sort_by: Option<SortKey>,
    pub sort_order: SortOrder,
    /// 1-based page number.
    pub page: usize,
}

impl Default for ViewParams {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            category: CategoryFilter::All,
            sort_by: None,
            sort_order: SortOrder::Ascending,
            page: 1,
        }
    }
}

impl ViewParams {
    /// Set the search term and go back to page 1.
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search_term = term.into();
        self.page = 1;
        self
    }

    /// Set the category filter and go back to page 1.
    pub fn with_category(mut self, category: impl Into<CategoryFilter>) -> Self {
        self.category = category.into();
        self.page = 1;
        self
    }

    /// Sort by `key` in `order`.
    pub fn sorted_by(mut self, key: SortKey, order: SortOrder) -> Self {
        self.sort_by = Some(key);
        self.sort_order = order;
        self
    }

    /// Select a page.
    pub fn on_page(mut self, page: usize) -> Self {
        self.page = page;
        self
    }
}
