//! Product edit form model.
//!
//! Holds the raw text a user typed, shows a live total, and turns a
//! complete form into a [`Submission`] for the store. Validation lives here,
//! not in the store: the store accepts whatever records it is given.

use crate::types::{compute_total, Product, ProductDraft, ProductId, ProductPatch};
use std::fmt;
use thiserror::Error;

/// Form inputs that can fail validation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormField {
    Title,
    Price,
    Taxes,
    Ads,
    Discount,
    Category,
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FormField::Title => "title",
            FormField::Price => "price",
            FormField::Taxes => "taxes",
            FormField::Ads => "ads",
            FormField::Discount => "discount",
            FormField::Category => "category",
        };
        f.write_str(name)
    }
}

/// Validation failure.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum FormError {
    #[error("{0} is required")]
    MissingField(FormField),

    #[error("an image is required")]
    MissingImage,

    #[error("{field} is not a number: {value:?}")]
    InvalidAmount { field: FormField, value: String },

    #[error("{field} must not be negative")]
    NegativeAmount { field: FormField },

    #[error("total is out of range")]
    TotalOutOfRange,
}

/// Validated output of the form.
#[derive(Clone, Debug, PartialEq)]
pub enum Submission {
    Create(ProductDraft),
    Update { id: ProductId, patch: ProductPatch },
}

/// Raw form state.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProductForm {
    pub title: String,
    pub price: String,
    pub taxes: String,
    pub ads: String,
    pub discount: String,
    pub category: String,
    pub image: Option<String>,
    editing: Option<ProductId>,
}

fn parse_amount(field: FormField, raw: &str) -> Result<f64, FormError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(FormError::MissingField(field));
    }
    let value: f64 = raw.parse().map_err(|_| FormError::InvalidAmount {
        field,
        value: raw.to_string(),
    })?;
    if !value.is_finite() {
        return Err(FormError::InvalidAmount {
            field,
            value: raw.to_string(),
        });
    }
    if value < 0.0 {
        return Err(FormError::NegativeAmount { field });
    }
    Ok(value)
}

fn required(field: FormField, raw: &str) -> Result<String, FormError> {
    let value = raw.trim();
    if value.is_empty() {
        Err(FormError::MissingField(field))
    } else {
        Ok(value.to_string())
    }
}

impl ProductForm {
    /// Empty form in create mode.
    pub fn new() -> Self {
        Self::default()
    }

    /// Form pre-filled from an existing record, in edit mode.
    pub fn edit(product: &Product) -> Self {
        Self {
            title: product.title.clone(),
            price: product.price.to_string(),
            taxes: product.taxes.to_string(),
            ads: product.ads.to_string(),
            discount: product.discount.to_string(),
            category: product.category.clone(),
            image: product.image.clone(),
            editing: Some(product.id),
        }
    }

    /// The record being edited, if any.
    pub fn editing(&self) -> Option<ProductId> {
        self.editing
    }

    pub fn is_edit_mode(&self) -> bool {
        self.editing.is_some()
    }

    /// Live total shown while typing.
    ///
    /// Blank amounts count as zero; if any amount is not a number the
    /// preview is zero.
    pub fn total_preview(&self) -> f64 {
        let amount = |raw: &str| -> Option<f64> {
            let raw = raw.trim();
            if raw.is_empty() {
                Some(0.0)
            } else {
                raw.parse::<f64>().ok().filter(|v| v.is_finite())
            }
        };

        match (
            amount(&self.price),
            amount(&self.taxes),
            amount(&self.ads),
            amount(&self.discount),
        ) {
            (Some(price), Some(taxes), Some(ads), Some(discount)) => {
                compute_total(price, taxes, ads, discount)
            }
            _ => 0.0,
        }
    }

    /// Validate into a draft.
    pub fn validate(&self) -> Result<ProductDraft, FormError> {
        let title = required(FormField::Title, &self.title)?;
        let price = parse_amount(FormField::Price, &self.price)?;
        let taxes = parse_amount(FormField::Taxes, &self.taxes)?;
        let ads = parse_amount(FormField::Ads, &self.ads)?;
        let discount = parse_amount(FormField::Discount, &self.discount)?;
        let category = required(FormField::Category, &self.category)?;

        let image = match &self.image {
            Some(image) if !image.trim().is_empty() => image.clone(),
            _ => return Err(FormError::MissingImage),
        };

        let draft = ProductDraft {
            title,
            price,
            taxes,
            ads,
            discount,
            category,
            image: Some(image),
        };
        if !draft.total().is_finite() {
            return Err(FormError::TotalOutOfRange);
        }
        Ok(draft)
    }

    /// Validate and produce a create or update submission.
    pub fn submit(&self) -> Result<Submission, FormError> {
        let draft = self.validate()?;
        Ok(match self.editing {
            Some(id) => Submission::Update {
                id,
                patch: ProductPatch::from_draft(draft),
            },
            None => Submission::Create(draft),
        })
    }

    /// Back to an empty create-mode form.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> ProductForm {
        ProductForm {
            title: "Lamp".into(),
            price: "100".into(),
            taxes: "14".into(),
            ads: "6".into(),
            discount: "20".into(),
            category: "Home".into(),
            image: Some("data:image/png;base64,AAAA".into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_create_submission() {
        let submission = filled().submit().unwrap();
        match submission {
            Submission::Create(draft) => {
                assert_eq!(draft.title, "Lamp");
                assert_eq!(draft.total(), 100.0);
            }
            other => panic!("expected create, got {:?}", other),
        }
    }

    #[test]
    fn test_edit_submission_recomputes_total() {
        let product = Product::from_draft(
            ProductId(9),
            ProductDraft::new("Lamp", "Home")
                .with_amounts(10.0, 0.0, 0.0, 0.0)
                .with_image("img"),
        );
        let mut form = ProductForm::edit(&product);
        assert!(form.is_edit_mode());
        assert_eq!(form.price, "10");

        form.price = "50".into();
        match form.submit().unwrap() {
            Submission::Update { id, patch } => {
                assert_eq!(id, ProductId(9));
                assert_eq!(patch.total, Some(50.0));
            }
            other => panic!("expected update, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_fields() {
        let mut form = filled();
        form.title = "  ".into();
        assert_eq!(form.validate(), Err(FormError::MissingField(FormField::Title)));

        let mut form = filled();
        form.discount.clear();
        assert_eq!(
            form.validate(),
            Err(FormError::MissingField(FormField::Discount))
        );

        let mut form = filled();
        form.image = None;
        assert_eq!(form.validate(), Err(FormError::MissingImage));
    }

    #[test]
    fn test_invalid_amounts() {
        let mut form = filled();
        form.ads = "abc".into();
        assert!(matches!(
            form.validate(),
            Err(FormError::InvalidAmount { field: FormField::Ads, .. })
        ));

        let mut form = filled();
        form.price = "NaN".into();
        assert!(matches!(form.validate(), Err(FormError::InvalidAmount { .. })));

        let mut form = filled();
        form.taxes = "-1".into();
        assert_eq!(
            form.validate(),
            Err(FormError::NegativeAmount {
                field: FormField::Taxes
            })
        );
    }

    #[test]
    fn test_overflowing_total_rejected() {
        let mut form = filled();
        form.price = "1e308".into();
        form.taxes = "1e308".into();
        assert_eq!(form.validate(), Err(FormError::TotalOutOfRange));
        assert!(form.submit().is_err());
    }

    #[test]
    fn test_total_preview() {
        let mut form = ProductForm::new();
        assert_eq!(form.total_preview(), 0.0);

        form.price = "12.5".into();
        form.discount = "2.5".into();
        assert_eq!(form.total_preview(), 10.0);

        form.ads = "x".into();
        assert_eq!(form.total_preview(), 0.0);
    }

    #[test]
    fn test_reset() {
        let mut form = filled();
        form.reset();
        assert_eq!(form, ProductForm::new());
        assert!(!form.is_edit_mode());
    }
}
