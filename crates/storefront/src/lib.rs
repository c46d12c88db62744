//! KurdBook storefront library.
//!
//! Client-side state for a multilingual (Sorani, Kurmanji, English, German)
//! bookstore and artisan shop: the catalog, per-visitor stores persisted
//! through a pluggable [`Storage`](storage::Storage) backend, mock
//! authentication, and the [`Storefront`](state::Storefront) facade tying
//! them together.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod error;
pub mod i18n;
pub mod latency;
pub mod models;
pub mod state;
pub mod storage;
pub mod stores;

pub use catalog::{Catalog, CatalogFilter, CatalogFlag};
pub use config::StorefrontConfig;
pub use error::{StoreError, StorefrontError};
pub use state::{CartLineView, Storefront};
