//! Catalog browsing commands.
//!
//! # Usage
//!
//! ```bash
//! kb-cli catalog list --category poetry
//! kb-cli catalog list --art --flag new --search silver
//! kb-cli catalog show book:3 --locale de
//! kb-cli catalog artisans
//! ```

use kurdbook_core::Locale;
use kurdbook_storefront::models::{CatalogRef, CategoryKind};
use kurdbook_storefront::{CatalogFilter, CatalogFlag, Storefront};

use super::{CommandError, availability};

/// List books, or art products with `art`, that pass the filter.
pub fn list(
    store: &Storefront,
    locale: Locale,
    art: bool,
    category: Option<String>,
    search: Option<String>,
    flags: Vec<CatalogFlag>,
) {
    let filter = CatalogFilter {
        category,
        search,
        flags,
    };
    let catalog = store.catalog();

    if art {
        let products = filter.apply(catalog.art_products());
        tracing::info!("{} art products", products.len());
        for product in products {
            tracing::info!(
                "  {:<8} {} - {} ({}, {})",
                CatalogRef::Art(product.id).to_string(),
                product.title.resolve(locale),
                product.creator.resolve(locale),
                product.price,
                availability(product.in_stock),
            );
        }
    } else {
        let books = filter.apply(catalog.books());
        tracing::info!("{} books", books.len());
        for book in books {
            tracing::info!(
                "  {:<8} {} - {} ({}, {})",
                CatalogRef::Book(book.id).to_string(),
                book.title.resolve(locale),
                book.author.resolve(locale),
                book.price,
                availability(book.in_stock),
            );
        }
    }
}

/// Show one catalog entry with its reviews summary.
pub fn show(store: &Storefront, locale: Locale, item: CatalogRef) -> Result<(), CommandError> {
    let catalog = store.catalog();
    match item {
        CatalogRef::Book(id) => {
            let book = catalog.book(id).ok_or(CommandError::UnknownItem(item))?;
            tracing::info!("{}", book.title.resolve(locale));
            tracing::info!("  Author: {}", book.author.resolve(locale));
            tracing::info!("  Category: {}", book.category);
            tracing::info!("  Price: {} ({})", book.price, availability(book.in_stock));
            if let Some(pages) = book.pages {
                tracing::info!("  Pages: {pages}");
            }
            if let Some(year) = book.published_year {
                tracing::info!("  Published: {year}");
            }
            tracing::info!("  {}", book.description.resolve(locale));

            let summary = store.reviews().summary(id);
            match summary.average {
                Some(average) => {
                    tracing::info!("  Rating: {average:.1}/5 from {} reviews", summary.count);
                }
                None => tracing::info!("  No reviews yet"),
            }
        }
        CatalogRef::Art(id) => {
            let product = catalog.art_product(id).ok_or(CommandError::UnknownItem(item))?;
            tracing::info!("{}", product.title.resolve(locale));
            tracing::info!("  Artisan: {}", product.creator.resolve(locale));
            tracing::info!("  Category: {}", product.category);
            tracing::info!(
                "  Price: {} ({})",
                product.price,
                availability(product.in_stock)
            );
            let materials: Vec<&str> = product
                .materials
                .iter()
                .map(|material| material.resolve(locale))
                .collect();
            if !materials.is_empty() {
                tracing::info!("  Materials: {}", materials.join(", "));
            }
            tracing::info!("  {}", product.description.resolve(locale));
        }
    }

    let favorite = store.favorites().contains(item);
    let saved = store.wishlist().contains(item);
    tracing::info!("  Favorite: {favorite}, on wishlist: {saved}");
    Ok(())
}

/// List book and art categories.
pub fn categories(store: &Storefront, locale: Locale) {
    for (label, kind) in [("Books", CategoryKind::Book), ("Art", CategoryKind::Art)] {
        tracing::info!("{label}:");
        for category in store.catalog().categories(kind) {
            tracing::info!("  {:<10} {}", category.id, category.name.resolve(locale));
        }
    }
}

/// List artisans with the products they sell.
pub fn artisans(store: &Storefront, locale: Locale) {
    let catalog = store.catalog();
    for artisan in catalog.artisans() {
        tracing::info!(
            "{} - {}, {}",
            artisan.name.resolve(locale),
            artisan.craft.resolve(locale),
            artisan.region.resolve(locale),
        );
        for product in catalog.products_by(artisan.id) {
            tracing::info!(
                "  {:<8} {} ({})",
                CatalogRef::Art(product.id).to_string(),
                product.title.resolve(locale),
                product.price,
            );
        }
    }
}
