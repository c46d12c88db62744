//! Generic persistent collection backing the list-shaped stores.
//!
//! A [`Collection`] owns a `Vec` of items, hydrates it from one storage key
//! and writes the whole vector back after every change. Duplicate handling
//! is an explicit [`DuplicatePolicy`] chosen per store.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::StoreError;
use crate::storage::Storage;

/// An item that can live in a [`Collection`].
pub trait CollectionItem: Clone + Serialize + DeserializeOwned {
    /// Identity used for duplicate detection and removal.
    type Key: Copy + Eq + fmt::Display;

    fn key(&self) -> Self::Key;

    /// Fold `incoming` into `self` when both share a key and the policy is
    /// [`DuplicatePolicy::Merge`]. The default keeps `self` unchanged.
    fn merge(&mut self, incoming: Self) {
        let _ = incoming;
    }

    /// Whether a stored item satisfies the type's invariants. Items that
    /// fail are dropped during hydration.
    fn is_valid(&self) -> bool {
        true
    }
}

/// What to do when an added item's key is already present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
    /// Keep the existing entry and drop the new one.
    #[default]
    Ignore,
    /// Fold the new entry into the existing one via [`CollectionItem::merge`].
    Merge,
    /// Keep both entries.
    Append,
}

/// Error for an unknown policy name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown duplicate policy {0:?}, expected ignore, merge or append")]
pub struct DuplicatePolicyError(pub String);

impl FromStr for DuplicatePolicy {
    type Err = DuplicatePolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ignore" => Ok(Self::Ignore),
            "merge" => Ok(Self::Merge),
            "append" => Ok(Self::Append),
            _ => Err(DuplicatePolicyError(s.to_string())),
        }
    }
}

/// How a collection obtained its initial contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hydration {
    /// Parsed from storage.
    Loaded,
    /// Nothing stored and no seed data.
    Empty,
    /// Nothing stored; seed data was used.
    Seeded,
    /// Stored data was unreadable; fell back to the seed (possibly empty).
    Recovered,
}

/// Result of [`Collection::add`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Inserted,
    Merged,
    /// The key was present and the policy is `Ignore`; nothing was written.
    Ignored,
}

/// A persisted list of items under one storage key.
pub struct Collection<T> {
    key: &'static str,
    storage: Arc<dyn Storage>,
    policy: DuplicatePolicy,
    items: Vec<T>,
    hydration: Hydration,
}

impl<T: fmt::Debug> fmt::Debug for Collection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collection")
            .field("key", &self.key)
            .field("policy", &self.policy)
            .field("hydration", &self.hydration)
            .field("items", &self.items)
            .finish_non_exhaustive()
    }
}

impl<T: CollectionItem> Collection<T> {
    /// Hydrate from `key`, starting empty when nothing usable is stored.
    pub fn hydrate(storage: Arc<dyn Storage>, key: &'static str, policy: DuplicatePolicy) -> Self {
        Self::hydrate_with_seed(storage, key, policy, Vec::new)
    }

    /// Hydrate from `key`, falling back to `seed` when the key is absent or
    /// unreadable. Seed data is not written back until the first change.
    ///
    /// Stored items are re-inserted under `policy`, so a hand-edited value
    /// with duplicate keys is folded back into shape.
    pub fn hydrate_with_seed(
        storage: Arc<dyn Storage>,
        key: &'static str,
        policy: DuplicatePolicy,
        seed: impl FnOnce() -> Vec<T>,
    ) -> Self {
        let mut collection = Self {
            key,
            storage,
            policy,
            items: Vec::new(),
            hydration: Hydration::Empty,
        };

        let (stored, hydration) = match collection.storage.get_item(key) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<T>>(&raw) {
                Ok(items) => (items, Hydration::Loaded),
                Err(e) => {
                    tracing::warn!(key, error = %e, "Stored value is corrupt, falling back");
                    (seed(), Hydration::Recovered)
                }
            },
            Ok(None) => {
                let items = seed();
                let hydration = if items.is_empty() {
                    Hydration::Empty
                } else {
                    Hydration::Seeded
                };
                (items, hydration)
            }
            Err(e) => {
                tracing::warn!(key, error = %e, "Failed to read storage, falling back");
                (seed(), Hydration::Recovered)
            }
        };

        for item in stored {
            if item.is_valid() {
                collection.insert(item);
            } else {
                tracing::warn!(key, item = %item.key(), "Dropping invalid stored item");
            }
        }
        collection.hydration = hydration;

        tracing::debug!(
            key,
            items = collection.items.len(),
            ?hydration,
            "Hydrated collection"
        );
        collection
    }

    /// Add an item under the collection's policy and persist.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the write fails. The item has been applied
    /// in memory regardless.
    pub fn add(&mut self, item: T) -> Result<AddOutcome, StoreError> {
        let outcome = self.insert(item);
        if outcome != AddOutcome::Ignored {
            self.persist()?;
        }
        Ok(outcome)
    }

    /// Remove every entry with `key` and persist. Returns whether anything
    /// was removed; nothing is written when nothing matched.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the write fails.
    pub fn remove(&mut self, key: T::Key) -> Result<bool, StoreError> {
        let before = self.items.len();
        self.items.retain(|item| item.key() != key);
        let removed = self.items.len() != before;
        if removed {
            self.persist()?;
        }
        Ok(removed)
    }

    /// Modify the first entry with `key` in place and persist. Returns
    /// whether an entry was found.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the write fails.
    pub fn update(&mut self, key: T::Key, f: impl FnOnce(&mut T)) -> Result<bool, StoreError> {
        let Some(item) = self.items.iter_mut().find(|item| item.key() == key) else {
            return Ok(false);
        };
        f(item);
        self.persist()?;
        Ok(true)
    }

    /// Remove everything and persist the empty list.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the write fails.
    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.items.clear();
        self.persist()
    }

    /// Items matching `predicate`, in insertion order.
    pub fn query(&self, predicate: impl Fn(&T) -> bool) -> Vec<&T> {
        self.items.iter().filter(|item| predicate(item)).collect()
    }

    #[must_use]
    pub fn find(&self, key: T::Key) -> Option<&T> {
        self.items.iter().find(|item| item.key() == key)
    }

    #[must_use]
    pub fn contains(&self, key: T::Key) -> bool {
        self.find(key).is_some()
    }

    /// Serialize every item and write it under the collection's key.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if serialization or the storage write fails.
    pub fn persist(&self) -> Result<(), StoreError> {
        let result = serde_json::to_string(&self.items)
            .map_err(StoreError::from)
            .and_then(|json| {
                self.storage
                    .set_item(self.key, &json)
                    .map_err(StoreError::from)
            });

        match &result {
            Ok(()) => tracing::debug!(key = self.key, items = self.items.len(), "Persisted"),
            Err(e) => tracing::warn!(
                key = self.key,
                error = %e,
                "Failed to persist, in-memory state kept"
            ),
        }
        result
    }

    /// Apply the duplicate policy without persisting.
    fn insert(&mut self, item: T) -> AddOutcome {
        if self.policy == DuplicatePolicy::Append {
            self.items.push(item);
            return AddOutcome::Inserted;
        }

        let key = item.key();
        match self.items.iter_mut().find(|existing| existing.key() == key) {
            None => {
                self.items.push(item);
                AddOutcome::Inserted
            }
            Some(existing) if self.policy == DuplicatePolicy::Merge => {
                existing.merge(item);
                AddOutcome::Merged
            }
            Some(_) => AddOutcome::Ignored,
        }
    }

    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub const fn hydration(&self) -> Hydration {
        self.hydration
    }

    #[must_use]
    pub const fn policy(&self) -> DuplicatePolicy {
        self.policy
    }

    #[must_use]
    pub const fn storage_key(&self) -> &'static str {
        self.key
    }
}
