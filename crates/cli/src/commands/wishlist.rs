//! Wishlist commands.

use kurdbook_core::Locale;
use kurdbook_storefront::Storefront;
use kurdbook_storefront::models::CatalogRef;

use super::CommandError;

pub fn list(store: &Storefront, locale: Locale) {
    let entries = store.wishlist().items();
    tracing::info!("{} ({})", store.t("wishlist.title"), entries.len());
    for entry in entries {
        tracing::info!(
            "  {:<8} {} ({}), saved {}",
            entry.item.to_string(),
            entry.title.resolve(locale),
            entry.price,
            entry.added_at.format("%Y-%m-%d"),
        );
    }
}

pub fn add(store: &mut Storefront, item: CatalogRef) -> Result<(), CommandError> {
    if store.add_to_wishlist(item)? {
        tracing::info!("Saved {item} to wishlist");
    } else {
        tracing::info!("{item} is already on the wishlist");
    }
    Ok(())
}

pub fn remove(store: &mut Storefront, item: CatalogRef) -> Result<(), CommandError> {
    if !store.wishlist_mut().remove(item)? {
        return Err(CommandError::NotInWishlist(item));
    }
    tracing::info!("Removed {item} from wishlist");
    Ok(())
}

/// Move a saved product into the cart as one unit.
pub fn move_to_cart(store: &mut Storefront, item: CatalogRef) -> Result<(), CommandError> {
    if !store.move_to_cart(item) {
        return Err(CommandError::NotInWishlist(item));
    }
    tracing::info!("Moved {item} to cart");
    Ok(())
}
