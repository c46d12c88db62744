//! Core types for KurdBook.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod locale;
pub mod price;
pub mod rating;

pub use email::{Email, EmailError};
pub use id::*;
pub use locale::{Locale, LocaleError, LocalizedText, LocalizedTextError, TextDirection};
pub use price::{CurrencyCode, Price, PriceError};
pub use rating::{Rating, RatingError};
