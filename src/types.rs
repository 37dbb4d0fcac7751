//! Core types for the catalog.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a product.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ProductId(pub u64);

impl fmt::Debug for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ProductId({})", self.0)
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Derived total of a product: `price + taxes + ads - discount`.
///
/// No rounding is applied. Every write path goes through this function so
/// the stored total never drifts from its inputs.
pub fn compute_total(price: f64, taxes: f64, ads: f64, discount: f64) -> f64 {
    price + taxes + ads - discount
}

/// A single product record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub price: f64,
    pub taxes: f64,
    pub ads: f64,
    pub discount: f64,

    /// Stored redundantly; see [`compute_total`].
    pub total: f64,

    pub category: String,

    /// Opaque image reference (data URL, object URL or path).
    pub image: Option<String>,
}

impl Product {
    /// Build a product from a draft, computing its total.
    pub fn from_draft(id: ProductId, draft: ProductDraft) -> Self {
        let total = draft.total();
        Self {
            id,
            title: draft.title,
            price: draft.price,
            taxes: draft.taxes,
            ads: draft.ads,
            discount: draft.discount,
            total,
            category: draft.category,
            image: draft.image,
        }
    }

    /// Whether every amount and the total are finite.
    ///
    /// JSON has no encoding for NaN or infinity, so only finite records can
    /// be persisted and read back.
    pub fn is_finite(&self) -> bool {
        [self.price, self.taxes, self.ads, self.discount, self.total]
            .iter()
            .all(|v| v.is_finite())
    }

    /// Overwrite every field present in `patch`.
    ///
    /// The total is taken from the patch as-is, never recomputed here.
    pub fn apply_patch(&mut self, patch: ProductPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(taxes) = patch.taxes {
            self.taxes = taxes;
        }
        if let Some(ads) = patch.ads {
            self.ads = ads;
        }
        if let Some(discount) = patch.discount {
            self.discount = discount;
        }
        if let Some(total) = patch.total {
            self.total = total;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(image) = patch.image {
            self.image = image;
        }
    }
}

/// Input for creating a product (before id and total are assigned).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProductDraft {
    pub title: String,
    pub price: f64,
    pub taxes: f64,
    pub ads: f64,
    pub discount: f64,
    pub category: String,
    pub image: Option<String>,
}

impl ProductDraft {
    /// Create a draft with the given title and category and zero amounts.
    pub fn new(title: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            category: category.into(),
            ..Default::default()
        }
    }

    /// Set the four amounts.
    pub fn with_amounts(mut self, price: f64, taxes: f64, ads: f64, discount: f64) -> Self {
        self.price = price;
        self.taxes = taxes;
        self.ads = ads;
        self.discount = discount;
        self
    }

    /// Set the image reference.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Total this draft would be stored with.
    pub fn total(&self) -> f64 {
        compute_total(self.price, self.taxes, self.ads, self.discount)
    }
}

/// Partial field set for updating a product (shallow overwrite).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProductPatch {
    pub title: Option<String>,
    pub price: Option<f64>,
    pub taxes: Option<f64>,
    pub ads: Option<f64>,
    pub discount: Option<f64>,
    pub total: Option<f64>,
    pub category: Option<String>,

    /// `None` leaves the image alone, `Some(None)` clears it.
    pub image: Option<Option<String>>,
}

impl ProductPatch {
    /// Full overwrite from a draft, with a freshly computed total.
    pub fn from_draft(draft: ProductDraft) -> Self {
        let total = draft.total();
        Self {
            title: Some(draft.title),
            price: Some(draft.price),
            taxes: Some(draft.taxes),
            ads: Some(draft.ads),
            discount: Some(draft.discount),
            total: Some(total),
            category: Some(draft.category),
            image: Some(draft.image),
        }
    }

    /// Whether applying this patch would change nothing.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
