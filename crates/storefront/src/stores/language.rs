//! Selected UI language.

use std::sync::Arc;

use kurdbook_core::{Locale, TextDirection};

use crate::error::StoreError;
use crate::models::storage_keys;
use crate::storage::Storage;

/// The visitor's chosen locale, persisted as a bare code such as `ku`.
#[derive(Debug)]
pub struct LanguageStore {
    storage: Arc<dyn Storage>,
    locale: Locale,
}

impl LanguageStore {
    /// Load the stored locale, or `default` when it is absent or not a
    /// known code.
    pub fn hydrate(storage: Arc<dyn Storage>, default: Locale) -> Self {
        let stored = storage.get_item(storage_keys::LANGUAGE).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Failed to read language");
            None
        });

        let locale = match stored.as_deref().map(str::parse::<Locale>) {
            Some(Ok(locale)) => locale,
            Some(Err(e)) => {
                tracing::warn!(error = %e, "Stored language is invalid, using default");
                default
            }
            None => default,
        };

        Self { storage, locale }
    }

    /// Switch the UI language.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the choice cannot be written. The new locale
    /// is active in memory either way.
    pub fn set(&mut self, locale: Locale) -> Result<(), StoreError> {
        self.locale = locale;
        tracing::debug!(locale = locale.code(), "Language changed");
        self.storage.set_item(storage_keys::LANGUAGE, locale.code())?;
        Ok(())
    }

    #[must_use]
    pub const fn locale(&self) -> Locale {
        self.locale
    }

    /// Layout direction for the active locale.
    #[must_use]
    pub const fn direction(&self) -> TextDirection {
        self.locale.direction()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    #[test]
    fn test_default_when_nothing_stored() {
        let store = LanguageStore::hydrate(Arc::new(MemoryStorage::new()), Locale::En);
        assert_eq!(store.locale(), Locale::En);
    }

    #[test]
    fn test_set_persists_bare_code() {
        let storage = MemoryStorage::new();
        let mut store = LanguageStore::hydrate(Arc::new(storage.clone()), Locale::Ku);
        assert_eq!(store.direction(), TextDirection::Rtl);

        store.set(Locale::Kmr).unwrap();
        assert_eq!(store.direction(), TextDirection::Ltr);
        assert_eq!(
            storage.get_item(storage_keys::LANGUAGE).unwrap().as_deref(),
            Some("kmr")
        );
        assert_eq!(
            LanguageStore::hydrate(Arc::new(storage), Locale::Ku).locale(),
            Locale::Kmr
        );
    }

    #[test]
    fn test_unknown_code_falls_back() {
        let storage = MemoryStorage::new();
        storage.set_item(storage_keys::LANGUAGE, "fr").unwrap();
        let store = LanguageStore::hydrate(Arc::new(storage), Locale::De);
        assert_eq!(store.locale(), Locale::De);
    }
}
