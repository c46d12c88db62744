//! Persistence port for client state.
//!
//! Every store reads and writes one string value under a reserved key, the
//! way a browser store would use `localStorage`. The backend is injected as
//! an `Arc<dyn Storage>` so tests run against [`MemoryStorage`] and the CLI
//! against [`FileStorage`].
//!
//! Writes are synchronous and unbatched. Two processes sharing one backend
//! race with last-write-wins semantics; nothing here detects conflicts.

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use std::fmt;

use thiserror::Error;

/// Errors raised by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Writing the value would exceed the backend's capacity.
    #[error("storage quota exceeded writing {key} ({needed} bytes, limit {limit})")]
    QuotaExceeded {
        key: String,
        needed: usize,
        limit: usize,
    },

    /// The key is not usable by this backend.
    #[error("invalid storage key: {0}")]
    InvalidKey(String),

    /// Backend I/O failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backend is poisoned or otherwise unusable.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Synchronous key-value persistence.
///
/// Values are opaque strings; stores put JSON or bare tokens in them.
pub trait Storage: Send + Sync + fmt::Debug {
    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the write fails or exceeds the quota.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete `key`. Deleting a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}
