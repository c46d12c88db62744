//! KurdBook Core - Shared types library.
//!
//! This crate provides common types used across all KurdBook components:
//! - `storefront` - Client-side stores, catalog and locale resolution
//! - `cli` - Command-line front end over file-backed storage
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no storage access,
//! no clocks. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for ids, prices, emails, ratings and
//!   multi-language text

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
