//! Durable key-value storage for the cart.
//!
//! The cart store never touches a storage API directly. It is handed a
//! [`CartStorage`] at construction and reads and writes whole slots through
//! it. Two implementations ship with the crate:
//!
//! - [`MemoryStorage`] - shared in-process map, for tests and throwaway sessions
//! - [`FileStorage`] - one JSON file per slot in a directory

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use thiserror::Error;

/// Errors raised by a storage backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying I/O failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The slot name cannot be used by this backend.
    #[error("invalid slot name '{0}'")]
    InvalidSlot(String),

    /// The backend refused the operation.
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// A named-slot byte store.
///
/// Implementations take `&self` so one backend can be shared by several
/// handles (clones of [`MemoryStorage`] all see the same slots).
pub trait CartStorage {
    /// Read a slot. Returns `Ok(None)` when nothing has been written to it.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the slot exists but cannot be read.
    fn read(&self, slot: &str) -> Result<Option<Vec<u8>>, StorageError>;

    /// Replace the contents of a slot.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the bytes could not be stored.
    fn write(&self, slot: &str, bytes: &[u8]) -> Result<(), StorageError>;
}

impl<T: CartStorage + ?Sized> CartStorage for &T {
    fn read(&self, slot: &str) -> Result<Option<Vec<u8>>, StorageError> {
        (**self).read(slot)
    }

    fn write(&self, slot: &str, bytes: &[u8]) -> Result<(), StorageError> {
        (**self).write(slot, bytes)
    }
}

impl<T: CartStorage + ?Sized> CartStorage for Box<T> {
    fn read(&self, slot: &str) -> Result<Option<Vec<u8>>, StorageError> {
        (**self).read(slot)
    }

    fn write(&self, slot: &str, bytes: &[u8]) -> Result<(), StorageError> {
        (**self).write(slot, bytes)
    }
}

/// Check that a slot name is safe to use as a file stem.
///
/// Allowed: ASCII letters, digits, `-` and `_`; at least one character.
pub(crate) fn validate_slot(slot: &str) -> Result<(), StorageError> {
    let valid = !slot.is_empty()
        && slot
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidSlot(slot.to_string()))
    }
}
