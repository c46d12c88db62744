//! Wishlist store.

use std::sync::Arc;

use chrono::Utc;

use super::collection::{AddOutcome, Collection, CollectionItem, DuplicatePolicy, Hydration};
use crate::error::StoreError;
use crate::models::{CatalogRef, ItemSnapshot, WishlistItem, storage_keys};
use crate::storage::Storage;

impl CollectionItem for WishlistItem {
    type Key = CatalogRef;

    fn key(&self) -> CatalogRef {
        self.item
    }
}

/// Products saved for later, persisted under [`storage_keys::WISHLIST`].
/// Holds at most one entry per product.
#[derive(Debug)]
pub struct WishlistStore {
    entries: Collection<WishlistItem>,
}

impl WishlistStore {
    pub fn hydrate(storage: Arc<dyn Storage>) -> Self {
        Self {
            entries: Collection::hydrate(storage, storage_keys::WISHLIST, DuplicatePolicy::Ignore),
        }
    }

    /// Save `item`. Adding a product that is already saved does nothing.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the wishlist cannot be written back.
    pub fn add(&mut self, item: CatalogRef, snapshot: ItemSnapshot) -> Result<AddOutcome, StoreError> {
        self.entries.add(WishlistItem::new(item, snapshot, Utc::now()))
    }

    /// Remove a product. Returns whether it was saved.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the wishlist cannot be written back.
    pub fn remove(&mut self, item: CatalogRef) -> Result<bool, StoreError> {
        self.entries.remove(item)
    }

    /// # Errors
    ///
    /// Returns `StoreError` if the wishlist cannot be written back.
    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.entries.clear()
    }

    /// # Errors
    ///
    /// Returns `StoreError` if the wishlist cannot be written back.
    pub fn persist(&self) -> Result<(), StoreError> {
        self.entries.persist()
    }

    #[must_use]
    pub fn get(&self, item: CatalogRef) -> Option<&WishlistItem> {
        self.entries.find(item)
    }

    #[must_use]
    pub fn contains(&self, item: CatalogRef) -> bool {
        self.entries.contains(item)
    }

    #[must_use]
    pub fn items(&self) -> &[WishlistItem] {
        self.entries.items()
    }

    /// Saved books only.
    #[must_use]
    pub fn books(&self) -> Vec<&WishlistItem> {
        self.entries
            .query(|entry| matches!(entry.item, CatalogRef::Book(_)))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub const fn hydration(&self) -> Hydration {
        self.entries.hydration()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;

    use kurdbook_core::{ArtProductId, BookId, CurrencyCode, LocalizedText, Price};

    use super::*;
    use crate::storage::{MemoryStorage, Storage};

    fn snapshot() -> ItemSnapshot {
        ItemSnapshot {
            title: LocalizedText::new("Kurdish Folk Tales").unwrap(),
            creator: Some(LocalizedText::new("Various").unwrap()),
            price: Price::new(Decimal::new(8_000, 0), CurrencyCode::IQD),
        }
    }

    #[test]
    fn test_adding_twice_keeps_one_entry() {
        let storage = MemoryStorage::new();
        let mut wishlist = WishlistStore::hydrate(Arc::new(storage.clone()));
        let book = CatalogRef::Book(BookId::new(4));

        assert_eq!(wishlist.add(book, snapshot()).unwrap(), AddOutcome::Inserted);
        assert_eq!(wishlist.add(book, snapshot()).unwrap(), AddOutcome::Ignored);
        assert_eq!(wishlist.len(), 1);

        let reloaded = WishlistStore::hydrate(Arc::new(storage));
        assert_eq!(reloaded.len(), 1);
        assert!(reloaded.contains(book));
    }

    #[test]
    fn test_remove_and_filter_books() {
        let mut wishlist = WishlistStore::hydrate(Arc::new(MemoryStorage::new()));
        let book = CatalogRef::Book(BookId::new(4));
        let art = CatalogRef::Art(ArtProductId::new(4));
        wishlist.add(book, snapshot()).unwrap();
        wishlist.add(art, snapshot()).unwrap();

        assert_eq!(wishlist.books().len(), 1);
        assert!(wishlist.remove(art).unwrap());
        assert!(!wishlist.remove(art).unwrap());
        assert_eq!(wishlist.items().len(), 1);
    }

    #[test]
    fn test_corrupt_value_starts_empty() {
        let storage = MemoryStorage::new();
        storage
            .set_item(storage_keys::WISHLIST, "[{\"item\":")
            .unwrap();

        let wishlist = WishlistStore::hydrate(Arc::new(storage));
        assert!(wishlist.is_empty());
        assert_eq!(wishlist.hydration(), Hydration::Recovered);
    }
}
