//! Shopping cart store.

use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;

use kurdbook_core::{CurrencyCode, Price, PriceError};

use super::collection::{AddOutcome, Collection, CollectionItem, DuplicatePolicy, Hydration};
use crate::error::StoreError;
use crate::models::{CartItem, CatalogRef, ItemSnapshot, storage_keys};
use crate::storage::Storage;

/// Errors computing cart totals.
#[derive(Debug, Error)]
pub enum CartError {
    /// Lines are priced in another currency, or a total overflowed.
    #[error("cannot total cart: {0}")]
    Total(#[from] PriceError),
}

impl CollectionItem for CartItem {
    type Key = CatalogRef;

    fn key(&self) -> CatalogRef {
        self.item
    }

    fn merge(&mut self, incoming: Self) {
        self.quantity = self.quantity.saturating_add(incoming.quantity);
    }

    fn is_valid(&self) -> bool {
        self.quantity >= 1
    }
}

/// The visitor's cart, persisted under [`storage_keys::CART`].
///
/// With the default [`DuplicatePolicy::Merge`], adding a product that is
/// already in the cart increments its quantity.
#[derive(Debug)]
pub struct CartStore {
    lines: Collection<CartItem>,
}

impl CartStore {
    pub fn hydrate(storage: Arc<dyn Storage>, policy: DuplicatePolicy) -> Self {
        Self {
            lines: Collection::hydrate(storage, storage_keys::CART, policy),
        }
    }

    /// Add `quantity` units of `item`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the cart cannot be written back.
    pub fn add(
        &mut self,
        item: CatalogRef,
        snapshot: ItemSnapshot,
        quantity: u32,
    ) -> Result<AddOutcome, StoreError> {
        let line = CartItem::new(item, snapshot, quantity, Utc::now());
        let outcome = self.lines.add(line)?;
        tracing::debug!(%item, quantity, ?outcome, "Added to cart");
        Ok(outcome)
    }

    /// Set a line's quantity; zero removes the line. Returns whether the
    /// line existed.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the cart cannot be written back.
    pub fn set_quantity(&mut self, item: CatalogRef, quantity: u32) -> Result<bool, StoreError> {
        if quantity == 0 {
            return self.lines.remove(item);
        }
        self.lines.update(item, |line| line.quantity = quantity)
    }

    /// Remove a line. Returns whether it existed.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the cart cannot be written back.
    pub fn remove(&mut self, item: CatalogRef) -> Result<bool, StoreError> {
        self.lines.remove(item)
    }

    /// Empty the cart, e.g. after checkout.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the cart cannot be written back.
    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.lines.clear()
    }

    /// Persist the current lines.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the cart cannot be written back.
    pub fn persist(&self) -> Result<(), StoreError> {
        self.lines.persist()
    }

    #[must_use]
    pub fn lines(&self) -> &[CartItem] {
        self.lines.items()
    }

    #[must_use]
    pub fn line(&self, item: CatalogRef) -> Option<&CartItem> {
        self.lines.find(item)
    }

    #[must_use]
    pub fn contains(&self, item: CatalogRef) -> bool {
        self.lines.contains(item)
    }

    /// Total number of units, for the header badge.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines
            .items()
            .iter()
            .fold(0, |acc, line| acc.saturating_add(line.quantity))
    }

    /// Sum of line totals. An empty cart totals zero in `currency`.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Total` if a line is not priced in `currency` or
    /// the sum overflows.
    pub fn subtotal(&self, currency: CurrencyCode) -> Result<Price, CartError> {
        self.lines
            .items()
            .iter()
            .try_fold(Price::zero(currency), |acc, line| {
                acc.checked_add(&line.line_total()?)
            })
            .map_err(CartError::from)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    #[must_use]
    pub const fn hydration(&self) -> Hydration {
        self.lines.hydration()
    }
}
