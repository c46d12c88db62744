//! Authentication store.
//!
//! Mock sign-in against an in-memory account table. The signed-in user and
//! a bearer token are persisted so a reload restores the session. Passwords
//! live only in the account table and never reach storage.

mod error;

pub use error::AuthError;

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, SecretString};

use kurdbook_core::{Email, UserId};

use crate::error::StoreError;
use crate::latency::SimulatedLatency;
use crate::models::session::TOKEN_PREFIX;
use crate::models::{NewAccount, Preferences, ProfileUpdate, User, storage_keys};
use crate::storage::Storage;

/// Where the auth state machine currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthStatus {
    #[default]
    Unauthenticated,
    /// A login or register call is waiting out its latency.
    Authenticating,
    Authenticated,
}

/// A row of the mock account table.
struct Account {
    user: User,
    password: SecretString,
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("user", &self.user.email)
            .finish_non_exhaustive()
    }
}

/// Session holder backed by the mock account table.
#[derive(Debug)]
pub struct AuthStore {
    storage: Arc<dyn Storage>,
    latency: SimulatedLatency,
    accounts: Vec<Account>,
    status: AuthStatus,
    user: Option<User>,
    token: Option<String>,
}

impl AuthStore {
    /// Restore the session from [`storage_keys::USER`] and
    /// [`storage_keys::TOKEN`].
    ///
    /// Both must be present and the user must parse, otherwise the store
    /// starts signed out.
    pub fn hydrate(storage: Arc<dyn Storage>, latency: SimulatedLatency) -> Self {
        let mut store = Self {
            storage,
            latency,
            accounts: seed_accounts(),
            status: AuthStatus::Unauthenticated,
            user: None,
            token: None,
        };

        if let Some((user, token)) = store.load_session() {
            tracing::debug!(user_id = %user.id, "Restored session");
            store.user = Some(user);
            store.token = Some(token);
            store.status = AuthStatus::Authenticated;
        }
        store
    }

    fn load_session(&self) -> Option<(User, String)> {
        let raw_user = self.read(storage_keys::USER)?;
        let token = self.read(storage_keys::TOKEN)?;

        match serde_json::from_str::<User>(&raw_user) {
            Ok(user) if !token.trim().is_empty() => Some((user, token)),
            Ok(_) => None,
            Err(e) => {
                tracing::warn!(error = %e, "Stored user is unreadable, starting signed out");
                None
            }
        }
    }

    fn read(&self, key: &str) -> Option<String> {
        self.storage.get_item(key).unwrap_or_else(|e| {
            tracing::warn!(key, error = %e, "Failed to read session");
            None
        })
    }

    /// Sign in with an exact, case-sensitive email and password match.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` when no account matches. The
    /// previous status is restored in that case.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<User, AuthError> {
        self.round_trip().await;

        let matched = self
            .accounts
            .iter()
            .find(|account| {
                account.user.email.as_str() == email
                    && account.password.expose_secret() == password
            })
            .map(|account| account.user.clone());

        let Some(user) = matched else {
            tracing::info!("Login rejected");
            return Err(AuthError::InvalidCredentials);
        };

        tracing::info!(user_id = %user.id, "User logged in");
        self.start_session(user.clone());
        Ok(user)
    }

    /// Create an account and sign it in.
    ///
    /// The new account lives in memory only; it is gone after a restart
    /// even though the session itself is persisted.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidEmail` if the email format is invalid.
    /// Returns `AuthError::MissingField` if the name or password is blank.
    /// Returns `AuthError::UserAlreadyExists` if the email is already registered.
    pub async fn register(&mut self, account: NewAccount) -> Result<User, AuthError> {
        let email = Email::parse(&account.email)?;
        let name = account.name.trim();
        if name.is_empty() {
            return Err(AuthError::MissingField("name"));
        }
        if account.password.expose_secret().is_empty() {
            return Err(AuthError::MissingField("password"));
        }

        self.round_trip().await;

        if self.has_account(&email) {
            return Err(AuthError::UserAlreadyExists);
        }

        let now = Utc::now();
        let user = User {
            id: self.next_user_id(now),
            email,
            name: name.to_string(),
            phone: account.phone.filter(|p| !p.trim().is_empty()),
            address: None,
            preferences: Preferences::default(),
            created_at: now,
            updated_at: now,
        };
        self.accounts.push(Account {
            user: user.clone(),
            password: account.password,
        });

        tracing::info!(user_id = %user.id, "User registered");
        self.start_session(user.clone());
        Ok(user)
    }

    /// Sign out and forget the stored session.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the session keys cannot be removed. The
    /// in-memory session is cleared either way.
    pub fn logout(&mut self) -> Result<(), StoreError> {
        if let Some(user) = self.user.take() {
            tracing::info!(user_id = %user.id, "User logged out");
        }
        self.token = None;
        self.status = AuthStatus::Unauthenticated;
        self.persist_session()
    }

    /// Merge `update` into the signed-in user.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::NotAuthenticated` if nobody is signed in.
    pub async fn update_profile(&mut self, update: ProfileUpdate) -> Result<User, AuthError> {
        if self.status != AuthStatus::Authenticated {
            return Err(AuthError::NotAuthenticated);
        }
        self.latency.pause().await;

        let Some(user) = self.user.as_mut() else {
            return Err(AuthError::NotAuthenticated);
        };
        update.apply_to(user, Utc::now());
        let user = user.clone();

        if let Some(account) = self.accounts.iter_mut().find(|a| a.user.id == user.id) {
            account.user = user.clone();
        }

        tracing::info!(user_id = %user.id, "Profile updated");
        self.log_persist();
        Ok(user)
    }

    /// Write the current session, or remove it when signed out.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the session cannot be written.
    pub fn persist_session(&self) -> Result<(), StoreError> {
        match (&self.user, &self.token) {
            (Some(user), Some(token)) => {
                let json = serde_json::to_string(user)?;
                self.storage.set_item(storage_keys::USER, &json)?;
                self.storage.set_item(storage_keys::TOKEN, token)?;
            }
            _ => {
                self.storage.remove_item(storage_keys::USER)?;
                self.storage.remove_item(storage_keys::TOKEN)?;
            }
        }
        Ok(())
    }

    /// Wait out the simulated latency in `Authenticating`.
    async fn round_trip(&mut self) {
        let _pending = PendingStatus::begin(&mut self.status);
        self.latency.pause().await;
    }

    fn start_session(&mut self, user: User) {
        self.token = Some(format!("{TOKEN_PREFIX}{}", user.id));
        self.user = Some(user);
        self.status = AuthStatus::Authenticated;
        self.log_persist();
    }

    fn log_persist(&self) {
        if let Err(e) = self.persist_session() {
            tracing::warn!(error = %e, "Failed to persist session");
        }
    }

    fn next_user_id(&self, now: DateTime<Utc>) -> UserId {
        let stamp = now.timestamp_millis();
        let after_last = self
            .accounts
            .iter()
            .map(|account| account.user.id.as_i64().saturating_add(1))
            .max()
            .unwrap_or(stamp);
        UserId::new(stamp.max(after_last))
    }

    /// Whether `email` is in the account table.
    #[must_use]
    pub fn has_account(&self, email: &Email) -> bool {
        self.accounts.iter().any(|account| &account.user.email == email)
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.status == AuthStatus::Authenticated
    }

    #[must_use]
    pub const fn current_user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    #[must_use]
    pub const fn status(&self) -> AuthStatus {
        self.status
    }
}

/// Accounts available on a fresh start.
/// Holds `Authenticating` for one simulated round trip. The previous status
/// comes back on drop, including when the caller's future is cancelled.
struct PendingStatus<'a> {
    status: &'a mut AuthStatus,
    previous: AuthStatus,
}

impl<'a> PendingStatus<'a> {
    fn begin(status: &'a mut AuthStatus) -> Self {
        let previous = std::mem::replace(status, AuthStatus::Authenticating);
        Self { status, previous }
    }
}

impl Drop for PendingStatus<'_> {
    fn drop(&mut self) {
        *self.status = self.previous;
    }
}

fn seed_accounts() -> Vec<Account> {
    let created_at = DateTime::from_timestamp(1_704_067_200, 0).unwrap_or_default();
    let seed = [
        (1, "admin@kurdbook.com", "Admin", "admin123"),
        (2, "demo@kurdbook.com", "Demo Reader", "demo123"),
    ];

    seed.into_iter()
        .filter_map(|(id, email, name, password)| {
            Some(Account {
                user: User {
                    id: UserId::new(id),
                    email: Email::parse(email).ok()?,
                    name: name.to_string(),
                    phone: None,
                    address: None,
                    preferences: Preferences::default(),
                    created_at,
                    updated_at: created_at,
                },
                password: SecretString::from(password),
            })
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use kurdbook_core::Locale;

    use super::*;
    use crate::storage::{MemoryStorage, StorageError};

    fn store(storage: &MemoryStorage) -> AuthStore {
        AuthStore::hydrate(Arc::new(storage.clone()), SimulatedLatency::NONE)
    }

    fn new_account(email: &str) -> NewAccount {
        NewAccount {
            email: email.to_string(),
            name: "Shirin".to_string(),
            password: SecretString::from("secret1"),
            phone: None,
        }
    }

    #[tokio::test]
    async fn test_login_with_seed_account() {
        let storage = MemoryStorage::new();
        let mut auth = store(&storage);
        assert_eq!(auth.status(), AuthStatus::Unauthenticated);

        let user = auth.login("admin@kurdbook.com", "admin123").await.unwrap();
        assert_eq!(user.name, "Admin");
        assert!(auth.is_authenticated());
        assert_eq!(auth.token(), Some("mock-token-1"));

        let stored = storage.get_item(storage_keys::USER).unwrap().unwrap();
        assert!(!stored.contains("admin123"));
        assert_eq!(
            storage.get_item(storage_keys::TOKEN).unwrap().as_deref(),
            Some("mock-token-1")
        );
    }

    #[tokio::test]
    async fn test_login_is_case_sensitive() {
        let storage = MemoryStorage::new();
        let mut auth = store(&storage);

        let err = auth.login("Admin@kurdbook.com", "admin123").await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
        assert!(auth.login("admin@kurdbook.com", "ADMIN123").await.is_err());
        assert_eq!(auth.status(), AuthStatus::Unauthenticated);
        assert!(storage.is_empty());
    }

    #[tokio::test]
    async fn test_failed_login_keeps_existing_session() {
        let mut auth = store(&MemoryStorage::new());
        auth.login("demo@kurdbook.com", "demo123").await.unwrap();

        assert!(auth.login("demo@kurdbook.com", "nope").await.is_err());
        assert_eq!(auth.status(), AuthStatus::Authenticated);
        assert_eq!(auth.current_user().unwrap().email.as_str(), "demo@kurdbook.com");
    }

    #[tokio::test]
    async fn test_session_survives_reload_and_logout_clears_it() {
        let storage = MemoryStorage::new();
        store(&storage).login("demo@kurdbook.com", "demo123").await.unwrap();

        let mut reloaded = store(&storage);
        assert!(reloaded.is_authenticated());
        assert_eq!(reloaded.token(), Some("mock-token-2"));

        reloaded.logout().unwrap();
        assert!(!reloaded.is_authenticated());
        assert!(reloaded.current_user().is_none());
        assert!(storage.is_empty());
        assert!(!store(&storage).is_authenticated());
    }

    #[test]
    fn test_user_without_token_is_signed_out() {
        let storage = MemoryStorage::new();
        storage
            .set_item(storage_keys::USER, "{\"id\":1}")
            .unwrap();
        assert!(!store(&storage).is_authenticated());

        storage.set_item(storage_keys::TOKEN, "mock-token-1").unwrap();
        let auth = store(&storage);
        assert_eq!(auth.status(), AuthStatus::Unauthenticated);
    }

    #[tokio::test]
    async fn test_register_then_duplicate() {
        let storage = MemoryStorage::new();
        let mut auth = store(&storage);

        let user = auth.register(new_account("shirin@example.com")).await.unwrap();
        assert!(user.id.as_i64() > 2);
        assert!(auth.is_authenticated());
        assert_eq!(auth.token().unwrap(), format!("mock-token-{}", user.id));

        auth.logout().unwrap();
        auth.login("shirin@example.com", "secret1").await.unwrap();

        let err = auth.register(new_account("shirin@example.com")).await.unwrap_err();
        assert!(matches!(err, AuthError::UserAlreadyExists));
        let err = auth.register(new_account("demo@kurdbook.com")).await.unwrap_err();
        assert!(matches!(err, AuthError::UserAlreadyExists));
    }

    #[tokio::test]
    async fn test_registered_account_is_not_persisted() {
        let storage = MemoryStorage::new();
        let mut auth = store(&storage);
        auth.register(new_account("new@example.com")).await.unwrap();
        auth.logout().unwrap();

        let mut fresh = store(&storage);
        assert!(fresh.login("new@example.com", "secret1").await.is_err());
    }

    #[tokio::test]
    async fn test_register_validates_input() {
        let mut auth = store(&MemoryStorage::new());
        assert!(matches!(
            auth.register(new_account("not-an-email")).await,
            Err(AuthError::InvalidEmail(_))
        ));

        let mut blank_name = new_account("a@b.com");
        blank_name.name = "  ".to_string();
        assert!(matches!(
            auth.register(blank_name).await,
            Err(AuthError::MissingField("name"))
        ));
        assert_eq!(auth.status(), AuthStatus::Unauthenticated);
    }

    #[tokio::test]
    async fn test_update_profile_requires_session() {
        let storage = MemoryStorage::new();
        let mut auth = store(&storage);
        let update = ProfileUpdate {
            language: Some(Locale::De),
            ..ProfileUpdate::default()
        };
        assert!(matches!(
            auth.update_profile(update.clone()).await,
            Err(AuthError::NotAuthenticated)
        ));

        auth.login("demo@kurdbook.com", "demo123").await.unwrap();
        let user = auth.update_profile(update).await.unwrap();
        assert_eq!(user.preferences.language, Locale::De);
        assert!(user.updated_at > user.created_at);

        assert_eq!(
            store(&storage).current_user().unwrap().preferences.language,
            Locale::De
        );

        auth.logout().unwrap();
        let again = auth.login("demo@kurdbook.com", "demo123").await.unwrap();
        assert_eq!(again.preferences.language, Locale::De);
    }

    #[tokio::test]
    async fn test_login_succeeds_when_session_write_fails() {
        let storage = MemoryStorage::with_quota(10);
        let mut auth = store(&storage);

        auth.login("demo@kurdbook.com", "demo123").await.unwrap();
        assert!(auth.is_authenticated());
        assert!(storage.is_empty());
        assert!(matches!(
            auth.persist_session(),
            Err(StoreError::Storage(StorageError::QuotaExceeded { .. }))
        ));
    }

    #[tokio::test]
    async fn test_register_after_largest_possible_id() {
        let mut auth = store(&MemoryStorage::new());
        let mut user = auth.accounts[0].user.clone();
        user.id = UserId::new(i64::MAX);
        user.email = Email::parse("max@example.com").unwrap();
        auth.accounts.push(Account {
            user,
            password: SecretString::from("secret1"),
        });

        let registered = auth.register(new_account("next@example.com")).await.unwrap();
        assert_eq!(registered.id, UserId::new(i64::MAX));
        assert!(auth.is_authenticated());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_login_keeps_existing_session() {
        let mut auth = AuthStore::hydrate(
            Arc::new(MemoryStorage::new()),
            SimulatedLatency::from_millis(500),
        );
        auth.login("demo@kurdbook.com", "demo123").await.unwrap();

        let cancelled = tokio::time::timeout(
            std::time::Duration::from_millis(100),
            auth.login("admin@kurdbook.com", "admin123"),
        )
        .await;
        assert!(cancelled.is_err());
        assert_eq!(auth.status(), AuthStatus::Authenticated);
        assert!(auth.is_authenticated());
        assert_eq!(
            auth.current_user().unwrap().email.as_str(),
            "demo@kurdbook.com"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_register_leaves_signed_out() {
        let mut auth = AuthStore::hydrate(
            Arc::new(MemoryStorage::new()),
            SimulatedLatency::from_millis(500),
        );
        let cancelled = tokio::time::timeout(
            std::time::Duration::from_millis(100),
            auth.register(new_account("late@example.com")),
        )
        .await;
        assert!(cancelled.is_err());
        assert_eq!(auth.status(), AuthStatus::Unauthenticated);
    }

    #[tokio::test(start_paused = true)]
    async fn test_login_waits_for_latency() {
        let mut auth = AuthStore::hydrate(
            Arc::new(MemoryStorage::new()),
            SimulatedLatency::from_millis(500),
        );
        let start = tokio::time::Instant::now();
        auth.login("demo@kurdbook.com", "demo123").await.unwrap();
        assert!(start.elapsed() >= std::time::Duration::from_millis(500));
    }
}
