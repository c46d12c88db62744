//! Catalog reference data.
//!
//! Loaded once and never mutated. `category` holds the slug of a
//! [`Category`] and is compared by exact equality when filtering.

use serde::{Deserialize, Serialize};

use kurdbook_core::{ArtProductId, ArtisanId, BookId, LocalizedText, Price};

/// Which shelf a category belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryKind {
    Book,
    Art,
}

/// A browsable category such as `poetry` or `textiles`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Slug used in filters and URLs.
    pub id: String,
    pub kind: CategoryKind,
    pub name: LocalizedText,
}

/// A book in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub title: LocalizedText,
    pub author: LocalizedText,
    pub category: String,
    pub price: Price,
    pub description: LocalizedText,
    #[serde(default)]
    pub pages: Option<u32>,
    #[serde(default)]
    pub published_year: Option<i32>,
    #[serde(default)]
    pub is_new: bool,
    #[serde(default)]
    pub is_bestseller: bool,
    #[serde(default)]
    pub featured: bool,
    #[serde(default = "in_stock_default")]
    pub in_stock: bool,
    /// Cover image path.
    #[serde(default)]
    pub cover: Option<String>,
}

/// A handmade product sold on behalf of an artisan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtProduct {
    pub id: ArtProductId,
    pub title: LocalizedText,
    /// Artisan's display name, denormalized for search and cart snapshots.
    pub creator: LocalizedText,
    pub artisan_id: ArtisanId,
    pub category: String,
    pub price: Price,
    pub description: LocalizedText,
    #[serde(default)]
    pub materials: Vec<LocalizedText>,
    #[serde(default)]
    pub is_new: bool,
    #[serde(default)]
    pub featured: bool,
    #[serde(default = "in_stock_default")]
    pub in_stock: bool,
    #[serde(default)]
    pub image: Option<String>,
}

/// A craftsperson whose work is listed in the art shop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artisan {
    pub id: ArtisanId,
    pub name: LocalizedText,
    /// Craft, e.g. "Kilim weaving".
    pub craft: LocalizedText,
    /// Home town or region.
    pub region: LocalizedText,
    pub bio: LocalizedText,
    #[serde(default)]
    pub featured: bool,
}

const fn in_stock_default() -> bool {
    true
}
