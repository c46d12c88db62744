//! Storage layout shared by all stores.

/// Storage keys reserved by each store.
///
/// Values are JSON unless noted.
pub mod keys {
    /// Sanitized logged-in [`User`](crate::models::User) record.
    pub const USER: &str = "kurdbook_user";

    /// Bare `mock-token-<id>` string.
    pub const TOKEN: &str = "kurdbook_token";

    /// Array of [`CartItem`](crate::models::CartItem).
    pub const CART: &str = "kurdbook_cart";

    /// Array of [`WishlistItem`](crate::models::WishlistItem).
    pub const WISHLIST: &str = "kurdbook_wishlist";

    /// Array of [`FavoriteItem`](crate::models::FavoriteItem).
    pub const FAVORITES: &str = "kurdbook_favorites";

    /// Array of [`Review`](crate::models::Review).
    pub const REVIEWS: &str = "kurdbook_reviews";

    /// Bare locale code such as `ku`.
    pub const LANGUAGE: &str = "kurdbook_language";

    /// Bare string `true` while the admin panel is unlocked.
    pub const ADMIN_SESSION: &str = "kurdbook_admin_session";
}

/// Prefix of the fabricated session token.
pub const TOKEN_PREFIX: &str = "mock-token-";
