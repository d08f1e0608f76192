use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ProductId(pub i64);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A persisted catalog record.
///
/// `price` serializes as a JSON number that keeps its scale, so a stored
/// `9.50` goes over the wire as `9.50` rather than `9.5`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(default)]
    pub id: ProductId,
    pub name: String,
    pub category: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_file: Option<String>,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub price: Decimal,
}

/// Every field of a product except the store-assigned id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProductDraft {
    pub name: String,
    pub category: String,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub image_file: Option<String>,
    pub price: Decimal,
}

impl Product {
    pub fn from_draft(id: ProductId, draft: ProductDraft) -> Self {
        Self {
            id,
            name: draft.name,
            category: draft.category,
            summary: draft.summary,
            description: draft.description,
            image_file: draft.image_file,
            price: draft.price,
        }
    }

    /// Drops the id, keeping every other field.
    pub fn into_draft(self) -> ProductDraft {
        ProductDraft {
            name: self.name,
            category: self.category,
            summary: self.summary,
            description: self.description,
            image_file: self.image_file,
            price: self.price,
        }
    }

    pub fn in_category(&self, text: &str) -> bool {
        category_matches(&self.category, text)
    }
}

/// Case-insensitive substring test used by every store backend.
///
/// Both sides go through the Unicode default lowercase mapping with no locale
/// tailoring; an empty needle matches every category.
pub fn category_matches(category: &str, text: &str) -> bool {
    if text.is_empty() {
        return true;
    }
    category.to_lowercase().contains(&text.to_lowercase())
}
