//! Error types shared by the stores.
//!
//! Nothing in this layer is fatal. Read failures are recovered during
//! hydration and never reach callers; write failures come back as
//! [`StoreError`] after the in-memory change has already been applied, so
//! the current session keeps working and only the next reload loses data.

use thiserror::Error;

use crate::catalog::CatalogError;
use crate::models::CatalogRef;
use crate::storage::StorageError;

/// A store could not write its state back to storage.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backend rejected the write.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// The state could not be serialized.
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl StoreError {
    /// Whether the backend ran out of space.
    #[must_use]
    pub const fn is_quota_exceeded(&self) -> bool {
        matches!(self, Self::Storage(StorageError::QuotaExceeded { .. }))
    }
}

/// Errors from [`Storefront`](crate::state::Storefront) actions.
///
/// Persistence failures are logged by the facade and never show up here.
#[derive(Debug, Error)]
pub enum StorefrontError {
    /// The referenced product does not exist.
    #[error("{0} is not in the catalog")]
    UnknownItem(CatalogRef),

    /// The catalog could not be loaded.
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Result type alias for `StoreError`.
pub type Result<T> = std::result::Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_display() {
        let err = StoreError::from(StorageError::QuotaExceeded {
            key: "kurdbook_cart".to_string(),
            needed: 12,
            limit: 10,
        });
        assert!(err.is_quota_exceeded());
        assert_eq!(
            err.to_string(),
            "storage error: storage quota exceeded writing kurdbook_cart (12 bytes, limit 10)"
        );

        let err = StoreError::from(StorageError::InvalidKey("a/b".to_string()));
        assert!(!err.is_quota_exceeded());
    }
}
