//! Admin panel session.
//!
//! A single configured username/password pair unlocks the panel. This is a
//! demo gate, not access control: anyone who can write storage can set the
//! flag.

use std::fmt;
use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};

use crate::error::StoreError;
use crate::models::storage_keys;
use crate::storage::Storage;

/// Value stored under [`storage_keys::ADMIN_SESSION`] while unlocked.
const LOGGED_IN: &str = "true";

/// Configured admin username and password.
#[derive(Clone)]
pub struct AdminCredentials {
    pub username: String,
    pub password: SecretString,
}

impl fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminCredentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

impl Default for AdminCredentials {
    fn default() -> Self {
        Self {
            username: "admin".to_string(),
            password: SecretString::from("admin123"),
        }
    }
}

/// Admin panel login flag.
#[derive(Debug)]
pub struct AdminSession {
    storage: Arc<dyn Storage>,
    credentials: AdminCredentials,
    logged_in: bool,
}

impl AdminSession {
    /// Restore the flag. Only the exact stored string `true` counts.
    pub fn hydrate(storage: Arc<dyn Storage>, credentials: AdminCredentials) -> Self {
        let logged_in = match storage.get_item(storage_keys::ADMIN_SESSION) {
            Ok(value) => value.as_deref() == Some(LOGGED_IN),
            Err(e) => {
                tracing::warn!(error = %e, "Failed to read admin session");
                false
            }
        };
        Self {
            storage,
            credentials,
            logged_in,
        }
    }

    /// Unlock the panel. Returns `false` on a credential mismatch, leaving
    /// the current flag untouched.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the flag cannot be written. The session is
    /// unlocked in memory either way.
    pub fn login(&mut self, username: &str, password: &str) -> Result<bool, StoreError> {
        if username != self.credentials.username
            || password != self.credentials.password.expose_secret()
        {
            tracing::info!("Admin login rejected");
            return Ok(false);
        }

        self.logged_in = true;
        tracing::info!(username, "Admin logged in");
        self.storage.set_item(storage_keys::ADMIN_SESSION, LOGGED_IN)?;
        Ok(true)
    }

    /// # Errors
    ///
    /// Returns `StoreError` if the flag cannot be removed.
    pub fn logout(&mut self) -> Result<(), StoreError> {
        self.logged_in = false;
        self.storage.remove_item(storage_keys::ADMIN_SESSION)?;
        Ok(())
    }

    #[must_use]
    pub const fn is_logged_in(&self) -> bool {
        self.logged_in
    }
}
