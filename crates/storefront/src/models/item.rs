//! Entries held by the cart, wishlist and favorites stores.
//!
//! Lines keep a snapshot of the product's display fields taken when they
//! were added, so a cart still renders if the catalog entry disappears.

use core::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use kurdbook_core::{ArtProductId, BookId, LocalizedText, Price, PriceError};

/// Reference to a purchasable catalog entry.
///
/// Books and art products use separate id spaces, so the kind is part of
/// the identity. Serialized as `{"kind":"book","id":3}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum CatalogRef {
    Book(BookId),
    Art(ArtProductId),
}

/// Error parsing a `book:<id>` / `art:<id>` reference.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid catalog reference {0:?}, expected book:<id> or art:<id>")]
pub struct CatalogRefError(pub String);

impl fmt::Display for CatalogRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Book(id) => write!(f, "book:{id}"),
            Self::Art(id) => write!(f, "art:{id}"),
        }
    }
}

impl FromStr for CatalogRef {
    type Err = CatalogRefError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || CatalogRefError(s.to_string());
        let (kind, id) = s.split_once(':').ok_or_else(err)?;
        match kind.trim() {
            "book" => id.parse().map(Self::Book).map_err(|_| err()),
            "art" => id.parse().map(Self::Art).map_err(|_| err()),
            _ => Err(err()),
        }
    }
}

/// Display fields copied from the catalog into a cart or wishlist line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemSnapshot {
    pub title: LocalizedText,
    /// Author for books, artisan for art products.
    pub creator: Option<LocalizedText>,
    pub price: Price,
}

/// A cart line. At most one line per [`CatalogRef`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub item: CatalogRef,
    pub title: LocalizedText,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator: Option<LocalizedText>,
    pub unit_price: Price,
    pub quantity: u32,
    pub added_at: DateTime<Utc>,
}

impl CartItem {
    /// A new line. Quantities below one are raised to one.
    #[must_use]
    pub fn new(item: CatalogRef, snapshot: ItemSnapshot, quantity: u32, now: DateTime<Utc>) -> Self {
        Self {
            item,
            title: snapshot.title,
            creator: snapshot.creator,
            unit_price: snapshot.price,
            quantity: quantity.max(1),
            added_at: now,
        }
    }

    /// Unit price times quantity.
    ///
    /// # Errors
    ///
    /// Returns `PriceError::Overflow` if the total does not fit.
    pub fn line_total(&self) -> Result<Price, PriceError> {
        self.unit_price.times(self.quantity)
    }
}

/// A saved-for-later product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WishlistItem {
    pub item: CatalogRef,
    pub title: LocalizedText,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator: Option<LocalizedText>,
    pub price: Price,
    pub added_at: DateTime<Utc>,
}

impl WishlistItem {
    #[must_use]
    pub fn new(item: CatalogRef, snapshot: ItemSnapshot, now: DateTime<Utc>) -> Self {
        Self {
            item,
            title: snapshot.title,
            creator: snapshot.creator,
            price: snapshot.price,
            added_at: now,
        }
    }

    /// The display fields, for moving the entry into the cart.
    #[must_use]
    pub fn snapshot(&self) -> ItemSnapshot {
        ItemSnapshot {
            title: self.title.clone(),
            creator: self.creator.clone(),
            price: self.price,
        }
    }
}

/// A favorited ("hearted") product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteItem {
    pub item: CatalogRef,
    pub added_at: DateTime<Utc>,
}
