//! Shopping cart commands.
//!
//! # Usage
//!
//! ```bash
//! kb-cli cart add book:1 --quantity 2
//! kb-cli cart set book:1 3
//! kb-cli cart list
//! kb-cli cart clear
//! ```

use kurdbook_core::Locale;
use kurdbook_storefront::Storefront;
use kurdbook_storefront::models::CatalogRef;

use super::CommandError;

/// Print each line and the subtotal.
pub fn list(store: &Storefront, locale: Locale) -> Result<(), CommandError> {
    let lines = store.cart_lines(locale)?;
    if lines.is_empty() {
        tracing::info!("{}", store.t("cart.empty"));
        return Ok(());
    }

    tracing::info!("{}", store.t("cart.title"));
    for line in &lines {
        let creator = line
            .creator
            .as_deref()
            .map(|creator| format!(" - {creator}"))
            .unwrap_or_default();
        tracing::info!(
            "  {:<8} {}{} x{} = {}",
            line.item.to_string(),
            line.title,
            creator,
            line.quantity,
            line.line_total,
        );
    }

    let subtotal = store.cart_subtotal()?;
    tracing::info!(
        "{}: {} ({} items)",
        store.t("cart.subtotal"),
        subtotal,
        store.cart().item_count()
    );
    Ok(())
}

/// Add `quantity` units of `item`.
pub fn add(store: &mut Storefront, item: CatalogRef, quantity: u32) -> Result<(), CommandError> {
    store.add_to_cart(item, quantity)?;
    let in_cart = store.cart().line(item).map_or(0, |line| line.quantity);
    tracing::info!("Added {item} to cart (now {in_cart})");
    Ok(())
}

/// Set a line's quantity, removing it at zero.
pub fn set_quantity(
    store: &mut Storefront,
    item: CatalogRef,
    quantity: u32,
) -> Result<(), CommandError> {
    if !store.cart_mut().set_quantity(item, quantity)? {
        return Err(CommandError::NotInCart(item));
    }
    if quantity == 0 {
        tracing::info!("Removed {item} from cart");
    } else {
        tracing::info!("Set {item} quantity to {quantity}");
    }
    Ok(())
}

pub fn remove(store: &mut Storefront, item: CatalogRef) -> Result<(), CommandError> {
    if !store.cart_mut().remove(item)? {
        return Err(CommandError::NotInCart(item));
    }
    tracing::info!("Removed {item} from cart");
    Ok(())
}

pub fn clear(store: &mut Storefront) -> Result<(), CommandError> {
    store.cart_mut().clear()?;
    tracing::info!("Cart cleared");
    Ok(())
}
