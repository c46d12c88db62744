//! Subcommand implementations.
//!
//! Every command works on an opened [`Storefront`] and reports through
//! `tracing`, like the rest of the workspace's tooling.

pub mod account;
pub mod admin;
pub mod cart;
pub mod catalog;
pub mod favorites;
pub mod language;
pub mod reviews;
pub mod wishlist;

use thiserror::Error;

use kurdbook_core::{RatingError, ReviewId};
use kurdbook_storefront::models::CatalogRef;
use kurdbook_storefront::stores::{AuthError, CartError};
use kurdbook_storefront::{StoreError, StorefrontError};

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Storefront(#[from] StorefrontError),

    #[error("Could not save: {0}")]
    Store(#[from] StoreError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Cart(#[from] CartError),

    #[error(transparent)]
    Rating(#[from] RatingError),

    #[error("{0} is not in the catalog")]
    UnknownItem(CatalogRef),

    #[error("{0} is not in the cart")]
    NotInCart(CatalogRef),

    #[error("{0} is not on the wishlist")]
    NotInWishlist(CatalogRef),

    #[error("No review with id {0}")]
    UnknownReview(ReviewId),

    #[error("Invalid admin username or password")]
    AdminLoginRejected,

    #[error("Admin login required")]
    AdminRequired,
}

/// Format a stock flag for listings.
pub(crate) const fn availability(in_stock: bool) -> &'static str {
    if in_stock { "in stock" } else { "out of stock" }
}

