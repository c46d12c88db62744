//! Client-side stores.
//!
//! Each store owns one slice of visitor state and round-trips it through a
//! shared [`Storage`](crate::storage::Storage) under its own key (see
//! [`storage_keys`](crate::models::storage_keys)).
//!
//! - [`CartStore`], [`WishlistStore`], [`FavoritesStore`] and
//!   [`ReviewStore`] are lists built on [`Collection`]
//! - [`AuthStore`] holds the mock-authenticated session
//! - [`AdminSession`] gates the admin panel
//! - [`LanguageStore`] remembers the UI locale

pub mod admin;
pub mod auth;
pub mod cart;
pub mod collection;
pub mod favorites;
pub mod language;
pub mod reviews;
pub mod wishlist;

pub use admin::{AdminCredentials, AdminSession};
pub use auth::{AuthError, AuthStatus, AuthStore};
pub use cart::{CartError, CartStore};
pub use collection::{
    AddOutcome, Collection, CollectionItem, DuplicatePolicy, DuplicatePolicyError, Hydration,
};
pub use favorites::FavoritesStore;
pub use language::LanguageStore;
pub use reviews::{ReviewStore, ReviewSummary};
pub use wishlist::WishlistStore;
