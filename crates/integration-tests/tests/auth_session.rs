//! Integration tests for mock authentication and the admin session.

#![allow(clippy::unwrap_used)]

use secrecy::SecretString;

use kurdbook_core::Locale;
use kurdbook_integration_tests::open_memory;
use kurdbook_storefront::models::{NewAccount, ProfileUpdate, storage_keys};
use kurdbook_storefront::storage::{MemoryStorage, Storage};
use kurdbook_storefront::stores::{AuthError, AuthStatus};

#[tokio::test]
async fn test_admin_login_persists_session() {
    let storage = MemoryStorage::new();
    let mut store = open_memory(&storage);

    let user = store
        .auth_mut()
        .login("admin@kurdbook.com", "admin123")
        .await
        .unwrap();
    assert_eq!(user.name, "Admin");
    assert!(store.auth().is_authenticated());

    let raw = storage.get_item(storage_keys::USER).unwrap().unwrap();
    let stored: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(stored["email"], "admin@kurdbook.com");
    assert!(stored.get("password").is_none());
    assert_eq!(
        storage.get_item(storage_keys::TOKEN).unwrap().as_deref(),
        Some("mock-token-1")
    );

    let reopened = open_memory(&storage);
    assert_eq!(reopened.auth().status(), AuthStatus::Authenticated);
    assert_eq!(reopened.auth().current_user(), Some(&user));
}

#[tokio::test]
async fn test_wrong_password_changes_nothing() {
    let storage = MemoryStorage::new();
    let mut store = open_memory(&storage);

    let err = store
        .auth_mut()
        .login("admin@kurdbook.com", "wrong")
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::InvalidCredentials));
    assert_eq!(store.auth().status(), AuthStatus::Unauthenticated);
    assert!(store.auth().token().is_none());
    assert!(storage.is_empty());
}

#[tokio::test]
async fn test_logout_removes_both_keys() {
    let storage = MemoryStorage::new();
    let mut store = open_memory(&storage);
    store
        .auth_mut()
        .login("demo@kurdbook.com", "demo123")
        .await
        .unwrap();

    store.auth_mut().logout().unwrap();
    assert!(storage.get_item(storage_keys::USER).unwrap().is_none());
    assert!(storage.get_item(storage_keys::TOKEN).unwrap().is_none());
    assert!(!open_memory(&storage).auth().is_authenticated());
}

#[tokio::test]
async fn test_duplicate_registration_is_rejected() {
    let mut store = open_memory(&MemoryStorage::new());
    let account = |email: &str| NewAccount {
        email: email.to_string(),
        name: "Reader".to_string(),
        password: SecretString::from("pass"),
        phone: None,
    };

    let err = store
        .auth_mut()
        .register(account("demo@kurdbook.com"))
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::UserAlreadyExists));

    store.auth_mut().register(account("reader@example.com")).await.unwrap();
    let err = store
        .auth_mut()
        .register(account("reader@example.com"))
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::UserAlreadyExists));
    assert!(store.auth().is_authenticated());
}

#[tokio::test]
async fn test_profile_update_survives_reopen() {
    let storage = MemoryStorage::new();
    let mut store = open_memory(&storage);
    store
        .auth_mut()
        .login("demo@kurdbook.com", "demo123")
        .await
        .unwrap();

    store
        .auth_mut()
        .update_profile(ProfileUpdate {
            name: Some("Rojda".to_string()),
            language: Some(Locale::Kmr),
            newsletter: Some(true),
            ..ProfileUpdate::default()
        })
        .await
        .unwrap();

    let reopened = open_memory(&storage);
    let user = reopened.auth().current_user().unwrap();
    assert_eq!(user.name, "Rojda");
    assert_eq!(user.preferences.language, Locale::Kmr);
    assert!(user.preferences.newsletter);
}

#[test]
fn test_admin_panel_flag() {
    let storage = MemoryStorage::new();
    let mut store = open_memory(&storage);

    assert!(!store.admin_mut().login("admin", "nope").unwrap());
    assert!(store.admin_mut().login("admin", "admin123").unwrap());
    assert!(open_memory(&storage).admin().is_logged_in());

    store.admin_mut().logout().unwrap();
    assert!(!open_memory(&storage).admin().is_logged_in());
}
