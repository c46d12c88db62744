//! Storefront state shared by every page.
//!
//! [`Storefront`] hydrates every store over one storage backend and wires
//! them to the catalog. Its convenience actions log write failures and
//! keep going, since the in-memory state is still valid for the session.

use std::sync::Arc;

use kurdbook_core::{Locale, Price};

use crate::catalog::Catalog;
use crate::config::StorefrontConfig;
use crate::error::{StoreError, StorefrontError};
use crate::i18n::Translations;
use crate::models::{CatalogRef, ItemSnapshot};
use crate::storage::Storage;
use crate::stores::{
    AdminSession, AuthStore, CartError, CartStore, FavoritesStore, LanguageStore, ReviewStore,
    WishlistStore,
};

/// A cart line resolved for display in one locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLineView {
    pub item: CatalogRef,
    pub title: String,
    pub creator: Option<String>,
    pub quantity: u32,
    pub unit_price: Price,
    pub line_total: Price,
}

/// Every store of one visitor, plus the catalog they refer to.
#[derive(Debug)]
pub struct Storefront {
    config: StorefrontConfig,
    catalog: Arc<Catalog>,
    translations: Arc<Translations>,
    auth: AuthStore,
    admin: AdminSession,
    language: LanguageStore,
    cart: CartStore,
    wishlist: WishlistStore,
    favorites: FavoritesStore,
    reviews: ReviewStore,
}

impl Storefront {
    /// Hydrate every store from `storage` against the built-in catalog.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError::Catalog` if the built-in catalog is invalid.
    pub fn open(
        config: StorefrontConfig,
        storage: Arc<dyn Storage>,
    ) -> Result<Self, StorefrontError> {
        let catalog = Catalog::builtin()?;
        Ok(Self::with_catalog(config, storage, catalog))
    }

    /// Hydrate every store from `storage` against `catalog`.
    pub fn with_catalog(
        config: StorefrontConfig,
        storage: Arc<dyn Storage>,
        catalog: Arc<Catalog>,
    ) -> Self {
        let storefront = Self {
            auth: AuthStore::hydrate(Arc::clone(&storage), config.latency),
            admin: AdminSession::hydrate(Arc::clone(&storage), config.admin.clone()),
            language: LanguageStore::hydrate(Arc::clone(&storage), config.default_locale),
            cart: CartStore::hydrate(Arc::clone(&storage), config.cart_duplicates),
            wishlist: WishlistStore::hydrate(Arc::clone(&storage)),
            favorites: FavoritesStore::hydrate(Arc::clone(&storage)),
            reviews: ReviewStore::hydrate(storage),
            translations: Translations::builtin(),
            catalog,
            config,
        };

        tracing::debug!(
            cart = ?storefront.cart.hydration(),
            wishlist = ?storefront.wishlist.hydration(),
            favorites = ?storefront.favorites.hydration(),
            reviews = ?storefront.reviews.hydration(),
            authenticated = storefront.auth.is_authenticated(),
            "Storefront opened"
        );
        storefront
    }

    /// Add `quantity` units of a catalog entry to the cart.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError::UnknownItem` if `item` is not in the catalog.
    pub fn add_to_cart(&mut self, item: CatalogRef, quantity: u32) -> Result<(), StorefrontError> {
        let snapshot = self.snapshot(item)?;
        log_write("cart", self.cart.add(item, snapshot, quantity).map(drop));
        Ok(())
    }

    /// Save a catalog entry to the wishlist. Returns `false` if it was
    /// already saved.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError::UnknownItem` if `item` is not in the catalog.
    pub fn add_to_wishlist(&mut self, item: CatalogRef) -> Result<bool, StorefrontError> {
        let snapshot = self.snapshot(item)?;
        let added = !self.wishlist.contains(item);
        log_write("wishlist", self.wishlist.add(item, snapshot).map(drop));
        Ok(added)
    }

    /// Move a wishlist entry into the cart as one unit. Returns `false` if
    /// the entry was not on the wishlist.
    ///
    /// Uses the snapshot saved with the wishlist entry, so this works even
    /// if the product has since left the catalog.
    pub fn move_to_cart(&mut self, item: CatalogRef) -> bool {
        let Some(snapshot) = self.wishlist.get(item).map(|entry| entry.snapshot()) else {
            return false;
        };
        log_write("wishlist", self.wishlist.remove(item).map(drop));
        log_write("cart", self.cart.add(item, snapshot, 1).map(drop));
        tracing::debug!(%item, "Moved wishlist entry to cart");
        true
    }

    /// Flip the favorite flag on a catalog entry. Returns `true` when it is
    /// now a favorite.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError::UnknownItem` if `item` is not in the catalog.
    pub fn toggle_favorite(&mut self, item: CatalogRef) -> Result<bool, StorefrontError> {
        if !self.catalog.contains(item) {
            return Err(StorefrontError::UnknownItem(item));
        }
        let now_favorite = !self.favorites.contains(item);
        log_write("favorites", self.favorites.toggle(item).map(drop));
        Ok(now_favorite)
    }

    /// Cart lines with titles resolved for `locale`.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Total` if a line total overflows.
    pub fn cart_lines(&self, locale: Locale) -> Result<Vec<CartLineView>, CartError> {
        self.cart
            .lines()
            .iter()
            .map(|line| -> Result<CartLineView, CartError> {
                Ok(CartLineView {
                    item: line.item,
                    title: line.title.resolve(locale).to_string(),
                    creator: line
                        .creator
                        .as_ref()
                        .map(|creator| creator.resolve(locale).to_string()),
                    quantity: line.quantity,
                    unit_price: line.unit_price,
                    line_total: line.line_total()?,
                })
            })
            .collect()
    }

    /// Cart subtotal in the configured currency.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Total` if a line is priced in another currency
    /// or the sum overflows.
    pub fn cart_subtotal(&self) -> Result<Price, CartError> {
        self.cart.subtotal(self.config.currency)
    }

    /// The active UI locale.
    #[must_use]
    pub const fn locale(&self) -> Locale {
        self.language.locale()
    }

    /// A UI message in the active locale.
    #[must_use]
    pub fn t<'a>(&'a self, key: &'a str) -> &'a str {
        self.translations.translate(key, self.locale())
    }

    fn snapshot(&self, item: CatalogRef) -> Result<ItemSnapshot, StorefrontError> {
        self.catalog
            .entry_snapshot(item)
            .ok_or(StorefrontError::UnknownItem(item))
    }

    #[must_use]
    pub const fn config(&self) -> &StorefrontConfig {
        &self.config
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub const fn auth(&self) -> &AuthStore {
        &self.auth
    }

    pub const fn auth_mut(&mut self) -> &mut AuthStore {
        &mut self.auth
    }

    #[must_use]
    pub const fn admin(&self) -> &AdminSession {
        &self.admin
    }

    pub const fn admin_mut(&mut self) -> &mut AdminSession {
        &mut self.admin
    }

    #[must_use]
    pub const fn language(&self) -> &LanguageStore {
        &self.language
    }

    pub const fn language_mut(&mut self) -> &mut LanguageStore {
        &mut self.language
    }

    #[must_use]
    pub const fn cart(&self) -> &CartStore {
        &self.cart
    }

    pub const fn cart_mut(&mut self) -> &mut CartStore {
        &mut self.cart
    }

    #[must_use]
    pub const fn wishlist(&self) -> &WishlistStore {
        &self.wishlist
    }

    pub const fn wishlist_mut(&mut self) -> &mut WishlistStore {
        &mut self.wishlist
    }

    #[must_use]
    pub const fn favorites(&self) -> &FavoritesStore {
        &self.favorites
    }

    pub const fn favorites_mut(&mut self) -> &mut FavoritesStore {
        &mut self.favorites
    }

    #[must_use]
    pub const fn reviews(&self) -> &ReviewStore {
        &self.reviews
    }

    pub const fn reviews_mut(&mut self) -> &mut ReviewStore {
        &mut self.reviews
    }
}

fn log_write(store: &'static str, result: Result<(), StoreError>) {
    if let Err(e) = result {
        tracing::warn!(store, error = %e, "Change kept in memory but not saved");
    }
}
