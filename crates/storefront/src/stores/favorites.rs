//! Favorites ("heart") store.

use std::sync::Arc;

use chrono::Utc;

use super::collection::{Collection, CollectionItem, DuplicatePolicy, Hydration};
use crate::error::StoreError;
use crate::models::{CatalogRef, FavoriteItem, storage_keys};
use crate::storage::Storage;

impl CollectionItem for FavoriteItem {
    type Key = CatalogRef;

    fn key(&self) -> CatalogRef {
        self.item
    }
}

/// Set of hearted products, persisted under [`storage_keys::FAVORITES`].
#[derive(Debug)]
pub struct FavoritesStore {
    entries: Collection<FavoriteItem>,
}

impl FavoritesStore {
    pub fn hydrate(storage: Arc<dyn Storage>) -> Self {
        Self {
            entries: Collection::hydrate(storage, storage_keys::FAVORITES, DuplicatePolicy::Ignore),
        }
    }

    /// Flip the heart on `item`. Returns `true` when it is now a favorite.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the favorites cannot be written back.
    pub fn toggle(&mut self, item: CatalogRef) -> Result<bool, StoreError> {
        if self.entries.remove(item)? {
            return Ok(false);
        }
        self.entries.add(FavoriteItem {
            item,
            added_at: Utc::now(),
        })?;
        Ok(true)
    }

    /// # Errors
    ///
    /// Returns `StoreError` if the favorites cannot be written back.
    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.entries.clear()
    }

    #[must_use]
    pub fn contains(&self, item: CatalogRef) -> bool {
        self.entries.contains(item)
    }

    #[must_use]
    pub fn items(&self) -> &[FavoriteItem] {
        self.entries.items()
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
