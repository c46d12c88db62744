//! Integration tests for the on-disk storage backend.

#![allow(clippy::unwrap_used)]

use kurdbook_core::{BookId, Locale};
use kurdbook_integration_tests::open_dir;
use kurdbook_storefront::models::{CatalogRef, storage_keys};

const MEM_U_ZIN: CatalogRef = CatalogRef::Book(BookId::new(2));

#[test]
fn test_state_survives_across_processes() {
    let dir = tempfile::tempdir().unwrap();
    {
        let mut store = open_dir(dir.path());
        store.add_to_cart(MEM_U_ZIN, 2).unwrap();
        store.language_mut().set(Locale::De).unwrap();
    }

    assert!(dir.path().join(storage_keys::CART).is_file());
    let language = std::fs::read_to_string(dir.path().join(storage_keys::LANGUAGE)).unwrap();
    assert_eq!(language, "de");

    let store = open_dir(dir.path());
    assert_eq!(store.cart().line(MEM_U_ZIN).unwrap().quantity, 2);
    assert_eq!(store.locale(), Locale::De);
}

#[test]
fn test_unreadable_file_recovers_to_empty() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(storage_keys::WISHLIST), "[{]").unwrap();

    let store = open_dir(dir.path());
    assert!(store.wishlist().is_empty());
}

#[tokio::test]
async fn test_logout_deletes_session_files() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = open_dir(dir.path());
    store
        .auth_mut()
        .login("demo@kurdbook.com", "demo123")
        .await
        .unwrap();
    assert!(dir.path().join(storage_keys::TOKEN).is_file());

    store.auth_mut().logout().unwrap();
    assert!(!dir.path().join(storage_keys::USER).exists());
    assert!(!dir.path().join(storage_keys::TOKEN).exists());
}
