//! Book and art catalog.
//!
//! The catalog is read-only reference data. [`Catalog::builtin`] parses the
//! JSON seed embedded in the binary once and hands out shared references.

mod filter;

pub use filter::{CatalogFilter, CatalogFlag, CatalogFlagError, Filterable};

use std::collections::HashSet;
use std::sync::{Arc, LazyLock};

use serde::Deserialize;
use thiserror::Error;

use kurdbook_core::{ArtProductId, ArtisanId, BookId};

use crate::models::{
    ArtProduct, Artisan, Book, CatalogRef, Category, CategoryKind, ItemSnapshot,
};

/// Errors loading a catalog.
#[derive(Debug, Clone, Error)]
pub enum CatalogError {
    #[error("invalid catalog JSON: {0}")]
    Parse(String),

    #[error("duplicate {kind} id {id}")]
    DuplicateId { kind: &'static str, id: i64 },

    #[error("{entry} references unknown category {category:?}")]
    UnknownCategory { entry: CatalogRef, category: String },

    #[error("art product {product} references unknown artisan {artisan}")]
    UnknownArtisan {
        product: ArtProductId,
        artisan: ArtisanId,
    },
}

static BUILTIN: LazyLock<Result<Arc<Catalog>, CatalogError>> = LazyLock::new(|| {
    Catalog::from_json(include_str!("../../data/catalog.json")).map(Arc::new)
});

/// Books, art products, the artisans who make them, and categories.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    categories: Vec<Category>,
    #[serde(default)]
    books: Vec<Book>,
    #[serde(default)]
    artisans: Vec<Artisan>,
    #[serde(default)]
    art_products: Vec<ArtProduct>,
}

impl Catalog {
    /// The catalog shipped with the storefront.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the embedded seed is invalid.
    pub fn builtin() -> Result<Arc<Self>, CatalogError> {
        BUILTIN.clone()
    }

    /// Parse and validate a catalog document.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Parse` for malformed JSON, or a validation
    /// error for duplicate ids and dangling category or artisan references.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let catalog: Self =
            serde_json::from_str(json).map_err(|e| CatalogError::Parse(e.to_string()))?;
        catalog.validate()?;
        tracing::debug!(
            books = catalog.books.len(),
            art_products = catalog.art_products.len(),
            artisans = catalog.artisans.len(),
            "Catalog loaded"
        );
        Ok(catalog)
    }

    fn validate(&self) -> Result<(), CatalogError> {
        unique_ids("book", self.books.iter().map(|b| b.id.as_i64()))?;
        unique_ids("art product", self.art_products.iter().map(|p| p.id.as_i64()))?;
        unique_ids("artisan", self.artisans.iter().map(|a| a.id.as_i64()))?;

        for book in &self.books {
            self.check_category(CatalogRef::Book(book.id), &book.category, CategoryKind::Book)?;
        }
        for product in &self.art_products {
            self.check_category(CatalogRef::Art(product.id), &product.category, CategoryKind::Art)?;
            if self.artisan(product.artisan_id).is_none() {
                return Err(CatalogError::UnknownArtisan {
                    product: product.id,
                    artisan: product.artisan_id,
                });
            }
        }
        Ok(())
    }

    fn check_category(
        &self,
        entry: CatalogRef,
        category: &str,
        kind: CategoryKind,
    ) -> Result<(), CatalogError> {
        if self.categories(kind).any(|c| c.id == category) {
            Ok(())
        } else {
            Err(CatalogError::UnknownCategory {
                entry,
                category: category.to_string(),
            })
        }
    }

    #[must_use]
    pub fn books(&self) -> &[Book] {
        &self.books
    }

    #[must_use]
    pub fn art_products(&self) -> &[ArtProduct] {
        &self.art_products
    }

    #[must_use]
    pub fn artisans(&self) -> &[Artisan] {
        &self.artisans
    }

    #[must_use]
    pub fn book(&self, id: BookId) -> Option<&Book> {
        self.books.iter().find(|b| b.id == id)
    }

    #[must_use]
    pub fn art_product(&self, id: ArtProductId) -> Option<&ArtProduct> {
        self.art_products.iter().find(|p| p.id == id)
    }

    #[must_use]
    pub fn artisan(&self, id: ArtisanId) -> Option<&Artisan> {
        self.artisans.iter().find(|a| a.id == id)
    }

    /// Art products made by `artisan`, in catalog order.
    pub fn products_by(&self, artisan: ArtisanId) -> impl Iterator<Item = &ArtProduct> {
        self.art_products
            .iter()
            .filter(move |p| p.artisan_id == artisan)
    }

    pub fn categories(&self, kind: CategoryKind) -> impl Iterator<Item = &Category> {
        self.categories.iter().filter(move |c| c.kind == kind)
    }

    /// Whether `entry` exists in the catalog.
    #[must_use]
    pub fn contains(&self, entry: CatalogRef) -> bool {
        self.entry_snapshot(entry).is_some()
    }

    /// Display fields for a cart or wishlist line.
    #[must_use]
    pub fn entry_snapshot(&self, entry: CatalogRef) -> Option<ItemSnapshot> {
        match entry {
            CatalogRef::Book(id) => self.book(id).map(|book| ItemSnapshot {
                title: book.title.clone(),
                creator: Some(book.author.clone()),
                price: book.price,
            }),
            CatalogRef::Art(id) => self.art_product(id).map(|product| ItemSnapshot {
                title: product.title.clone(),
                creator: Some(product.creator.clone()),
                price: product.price,
            }),
        }
    }
}

fn unique_ids(kind: &'static str, ids: impl Iterator<Item = i64>) -> Result<(), CatalogError> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(CatalogError::DuplicateId { kind, id });
        }
    }
    Ok(())
}
