//! Integration tests for KurdBook.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p kurdbook-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `storefront_flows` - Facade actions across store boundaries
//! - `auth_session` - Mock login, registration and session restore
//! - `file_storage` - Persistence through the on-disk backend
//! - `catalog_browse` - Filtering the built-in catalog

use std::path::Path;
use std::sync::Arc;

use kurdbook_storefront::latency::SimulatedLatency;
use kurdbook_storefront::storage::{FileStorage, MemoryStorage, Storage};
use kurdbook_storefront::{Storefront, StorefrontConfig};

/// Configuration with no simulated latency.
#[must_use]
pub fn test_config() -> StorefrontConfig {
    StorefrontConfig {
        latency: SimulatedLatency::NONE,
        ..StorefrontConfig::default()
    }
}

/// A storefront over `storage`, as a fresh page load would see it.
///
/// # Panics
///
/// Panics if the built-in catalog fails to load.
#[must_use]
pub fn open(storage: Arc<dyn Storage>) -> Storefront {
    Storefront::open(test_config(), storage).unwrap_or_else(|e| panic!("open storefront: {e}"))
}

/// A storefront over a shared in-memory backend.
#[must_use]
pub fn open_memory(storage: &MemoryStorage) -> Storefront {
    open(Arc::new(storage.clone()))
}

/// A storefront over files in `dir`.
///
/// # Panics
///
/// Panics if the directory cannot be created.
#[must_use]
pub fn open_dir(dir: &Path) -> Storefront {
    let storage = FileStorage::open(dir).unwrap_or_else(|e| panic!("open {}: {e}", dir.display()));
    open(Arc::new(storage))
}
