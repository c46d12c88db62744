//! Favorites commands.

use kurdbook_core::Locale;
use kurdbook_storefront::Storefront;
use kurdbook_storefront::models::CatalogRef;

use super::CommandError;

pub fn list(store: &Storefront, locale: Locale) {
    let favorites = store.favorites().items();
    tracing::info!("{} ({})", store.t("favorites.title"), favorites.len());
    for favorite in favorites {
        let title = store
            .catalog()
            .entry_snapshot(favorite.item)
            .map_or_else(
                || "(no longer listed)".to_string(),
                |snapshot| snapshot.title.resolve(locale).to_string(),
            );
        tracing::info!("  {:<8} {}", favorite.item.to_string(), title);
    }
}

pub fn toggle(store: &mut Storefront, item: CatalogRef) -> Result<(), CommandError> {
    if store.toggle_favorite(item)? {
        tracing::info!("Added {item} to favorites");
    } else {
        tracing::info!("Removed {item} from favorites");
    }
    Ok(())
}
