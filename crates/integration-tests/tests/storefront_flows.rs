//! Integration tests for storefront actions that span several stores.

#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;

use kurdbook_core::{ArtProductId, BookId, Locale};
use kurdbook_integration_tests::open_memory;
use kurdbook_storefront::models::{CatalogRef, storage_keys};
use kurdbook_storefront::storage::{MemoryStorage, Storage};
use kurdbook_storefront::stores::Hydration;

const NALI: CatalogRef = CatalogRef::Book(BookId::new(1));
const HISTORY: CatalogRef = CatalogRef::Book(BookId::new(3));
const NECKLACE: CatalogRef = CatalogRef::Art(ArtProductId::new(4));

// =============================================================================
// Cart and Wishlist
// =============================================================================

#[test]
fn test_same_product_twice_increments_cart_quantity() {
    let storage = MemoryStorage::new();
    let mut store = open_memory(&storage);

    store.add_to_cart(NALI, 1).unwrap();
    store.add_to_cart(NALI, 1).unwrap();

    let lines = store.cart_lines(Locale::En).unwrap();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].quantity, 2);
    assert_eq!(lines[0].line_total.amount, Decimal::new(30_000, 0));
}

#[test]
fn test_same_product_twice_keeps_one_wishlist_entry() {
    let storage = MemoryStorage::new();
    let mut store = open_memory(&storage);

    assert!(store.add_to_wishlist(NECKLACE).unwrap());
    assert!(!store.add_to_wishlist(NECKLACE).unwrap());
    assert_eq!(store.wishlist().len(), 1);
    assert_eq!(open_memory(&storage).wishlist().len(), 1);
}

#[test]
fn test_every_mutation_is_visible_after_reopen() {
    let storage = MemoryStorage::new();
    {
        let mut store = open_memory(&storage);
        store.add_to_cart(HISTORY, 2).unwrap();
        store.add_to_wishlist(NECKLACE).unwrap();
        store.toggle_favorite(NALI).unwrap();
        store.language_mut().set(Locale::Kmr).unwrap();
    }

    let store = open_memory(&storage);
    assert_eq!(store.cart().hydration(), Hydration::Loaded);
    assert_eq!(store.cart().item_count(), 2);
    assert!(store.wishlist().contains(NECKLACE));
    assert!(store.favorites().contains(NALI));
    assert_eq!(store.locale(), Locale::Kmr);
}

#[test]
fn test_cart_lines_resolve_in_requested_locale() {
    let mut store = open_memory(&MemoryStorage::new());
    store.add_to_cart(HISTORY, 1).unwrap();

    // No Kurmanji title: English wins over the Sorani one
    let kmr = store.cart_lines(Locale::Kmr).unwrap();
    assert_eq!(kmr[0].title, "A Modern History of the Kurds");

    let de = store.cart_lines(Locale::De).unwrap();
    assert_eq!(de[0].title, "Eine moderne Geschichte der Kurden");
    assert_eq!(de[0].creator.as_deref(), Some("David McDowall"));
}

// =============================================================================
// Recovery
// =============================================================================

#[test]
fn test_corrupt_values_fall_back_without_failing() {
    let storage = MemoryStorage::new();
    for key in [
        storage_keys::CART,
        storage_keys::WISHLIST,
        storage_keys::FAVORITES,
        storage_keys::REVIEWS,
        storage_keys::USER,
        storage_keys::LANGUAGE,
    ] {
        storage.set_item(key, "{not json").unwrap();
    }
    storage.set_item(storage_keys::TOKEN, "mock-token-1").unwrap();

    let store = open_memory(&storage);
    assert!(store.cart().is_empty());
    assert_eq!(store.cart().hydration(), Hydration::Recovered);
    assert!(store.wishlist().is_empty());
    assert!(store.favorites().is_empty());
    assert_eq!(store.reviews().hydration(), Hydration::Recovered);
    assert!(!store.reviews().is_empty());
    assert!(!store.auth().is_authenticated());
    assert_eq!(store.locale(), Locale::Ku);
}

#[test]
fn test_quota_exhaustion_keeps_session_state() {
    let storage = MemoryStorage::with_quota(64);
    let mut store = open_memory(&storage);

    store.add_to_cart(NALI, 1).unwrap();
    store.add_to_cart(NECKLACE, 3).unwrap();

    assert_eq!(store.cart().item_count(), 4);
    let err = store.cart().persist().unwrap_err();
    assert!(err.is_quota_exceeded());
    assert!(open_memory(&storage).cart().is_empty());
}
