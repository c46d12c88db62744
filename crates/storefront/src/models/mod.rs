//! Domain models for the storefront.
//!
//! - [`catalog`] - Immutable reference data (books, art products, artisans)
//! - [`item`] - Cart, wishlist and favorites entries and the [`CatalogRef`]
//!   they point at
//! - [`review`] - Book reviews
//! - [`user`] - Mock-authenticated users and their profile data
//! - [`session`] - Storage keys reserved by each store

pub mod catalog;
pub mod item;
pub mod review;
pub mod session;
pub mod user;

pub use catalog::{ArtProduct, Artisan, Book, Category, CategoryKind};
pub use item::{CartItem, CatalogRef, CatalogRefError, FavoriteItem, ItemSnapshot, WishlistItem};
pub use review::{NewReview, Review};
pub use session::keys as storage_keys;
pub use user::{Address, NewAccount, Preferences, ProfileUpdate, User};
