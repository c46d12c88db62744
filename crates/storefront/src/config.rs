//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `KURDBOOK_STORAGE_DIR` - Directory for persisted state (default: .kurdbook)
//! - `KURDBOOK_DEFAULT_LOCALE` - Locale when none is stored (default: ku)
//! - `KURDBOOK_CURRENCY` - Display currency for totals (default: IQD)
//! - `KURDBOOK_SIMULATED_LATENCY_MS` - Delay on auth calls (default: 500)
//! - `KURDBOOK_CART_DUPLICATES` - `merge` or `append` (default: merge)
//! - `KURDBOOK_ADMIN_USERNAME` - Admin panel username (default: admin)
//! - `KURDBOOK_ADMIN_PASSWORD` - Admin panel password (default: admin123)
//! - `SENTRY_DSN` - Sentry error tracking DSN

use std::path::PathBuf;
use std::str::FromStr;

use secrecy::SecretString;
use thiserror::Error;

use kurdbook_core::{CurrencyCode, Locale};

use crate::latency::SimulatedLatency;
use crate::stores::{AdminCredentials, DuplicatePolicy};

const DEFAULT_LATENCY_MS: u64 = 500;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Where the CLI's file storage lives
    pub storage_dir: PathBuf,
    /// Locale used until the visitor picks one
    pub default_locale: Locale,
    /// Currency totals are computed in
    pub currency: CurrencyCode,
    /// Delay applied to login, register and profile updates
    pub latency: SimulatedLatency,
    /// How the cart treats a product that is already in it
    pub cart_duplicates: DuplicatePolicy,
    /// Admin panel login
    pub admin: AdminCredentials,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            storage_dir: PathBuf::from(".kurdbook"),
            default_locale: Locale::default(),
            currency: CurrencyCode::default(),
            latency: SimulatedLatency::from_millis(DEFAULT_LATENCY_MS),
            cart_duplicates: DuplicatePolicy::Merge,
            admin: AdminCredentials::default(),
            sentry_dsn: None,
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unparseable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an unparseable value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let storage_dir = get("KURDBOOK_STORAGE_DIR").map_or(defaults.storage_dir, PathBuf::from);
        let default_locale = parse_or(
            get("KURDBOOK_DEFAULT_LOCALE"),
            "KURDBOOK_DEFAULT_LOCALE",
            defaults.default_locale,
        )?;
        let currency = parse_or(get("KURDBOOK_CURRENCY"), "KURDBOOK_CURRENCY", defaults.currency)?;
        let latency = parse_or(
            get("KURDBOOK_SIMULATED_LATENCY_MS"),
            "KURDBOOK_SIMULATED_LATENCY_MS",
            DEFAULT_LATENCY_MS,
        )
        .map(SimulatedLatency::from_millis)?;
        let cart_duplicates = parse_or(
            get("KURDBOOK_CART_DUPLICATES"),
            "KURDBOOK_CART_DUPLICATES",
            defaults.cart_duplicates,
        )?;
        if cart_duplicates == DuplicatePolicy::Ignore {
            return Err(ConfigError::InvalidEnvVar(
                "KURDBOOK_CART_DUPLICATES".to_string(),
                "must be merge or append".to_string(),
            ));
        }

        let admin = AdminCredentials {
            username: get("KURDBOOK_ADMIN_USERNAME").unwrap_or(defaults.admin.username),
            password: get("KURDBOOK_ADMIN_PASSWORD")
                .map_or(defaults.admin.password, SecretString::from),
        };

        Ok(Self {
            storage_dir,
            default_locale,
            currency,
            latency,
            cart_duplicates,
            admin,
            sentry_dsn: get("SENTRY_DSN"),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse an optional variable, keeping `default` when it is unset.
fn parse_or<T>(value: Option<String>, key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value.map_or(Ok(default), |raw| {
        raw.trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::HashMap;
    use std::time::Duration;

    use secrecy::ExposeSecret;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<StorefrontConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        StorefrontConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.storage_dir, PathBuf::from(".kurdbook"));
        assert_eq!(config.default_locale, Locale::Ku);
        assert_eq!(config.currency, CurrencyCode::IQD);
        assert_eq!(config.latency.delay(), Duration::from_millis(500));
        assert_eq!(config.cart_duplicates, DuplicatePolicy::Merge);
        assert_eq!(config.admin.username, "admin");
        assert_eq!(config.admin.password.expose_secret(), "admin123");
        assert!(config.sentry_dsn.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("KURDBOOK_STORAGE_DIR", "/tmp/kb"),
            ("KURDBOOK_DEFAULT_LOCALE", "DE"),
            ("KURDBOOK_CURRENCY", "usd"),
            ("KURDBOOK_SIMULATED_LATENCY_MS", "0"),
            ("KURDBOOK_CART_DUPLICATES", "append"),
            ("KURDBOOK_ADMIN_PASSWORD", "hunter2"),
        ])
        .unwrap();
        assert_eq!(config.storage_dir, PathBuf::from("/tmp/kb"));
        assert_eq!(config.default_locale, Locale::De);
        assert_eq!(config.currency, CurrencyCode::USD);
        assert_eq!(config.latency, SimulatedLatency::NONE);
        assert_eq!(config.cart_duplicates, DuplicatePolicy::Append);
        assert_eq!(config.admin.password.expose_secret(), "hunter2");
    }

    #[test]
    fn test_blank_values_use_defaults() {
        let config = load(&[("KURDBOOK_DEFAULT_LOCALE", "  "), ("SENTRY_DSN", "")]).unwrap();
        assert_eq!(config.default_locale, Locale::Ku);
        assert!(config.sentry_dsn.is_none());
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        for (key, value) in [
            ("KURDBOOK_DEFAULT_LOCALE", "fr"),
            ("KURDBOOK_CURRENCY", "GBP"),
            ("KURDBOOK_SIMULATED_LATENCY_MS", "-1"),
            ("KURDBOOK_CART_DUPLICATES", "ignore"),
        ] {
            let err = load(&[(key, value)]).unwrap_err();
            let ConfigError::InvalidEnvVar(name, _) = err;
            assert_eq!(name, key);
        }
    }
}
