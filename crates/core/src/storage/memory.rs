//! In-memory slot storage.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use super::{CartStorage, StorageError};

/// Shared in-memory storage.
///
/// Cloning yields another handle onto the same slots, so a test can keep a
/// handle, drop the cart store, and open a new store over the same data.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slots: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

impl MemoryStorage {
    /// Create empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create storage with one slot pre-filled.
    #[must_use]
    pub fn with_slot(slot: &str, bytes: impl Into<Vec<u8>>) -> Self {
        let storage = Self::new();
        storage
            .slots
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(slot.to_string(), bytes.into());
        storage
    }

    /// Current contents of a slot, if any.
    #[must_use]
    pub fn get(&self, slot: &str) -> Option<Vec<u8>> {
        self.slots
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(slot)
            .cloned()
    }
}

impl CartStorage for MemoryStorage {
    fn read(&self, slot: &str) -> Result<Option<Vec<u8>>, StorageError> {
        Ok(self.get(slot))
    }

    fn write(&self, slot: &str, bytes: &[u8]) -> Result<(), StorageError> {
        self.slots
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(slot.to_string(), bytes.to_vec());
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_slot_reads_none() {
        let storage = MemoryStorage::new();
        assert!(storage.read("cart").unwrap().is_none());
    }

    #[test]
    fn test_clones_share_slots() {
        let storage = MemoryStorage::new();
        let other = storage.clone();
        storage.write("cart", b"[]").unwrap();
        assert_eq!(other.read("cart").unwrap().as_deref(), Some(&b"[]"[..]));
    }

    #[test]
    fn test_write_replaces() {
        let storage = MemoryStorage::with_slot("cart", "old");
        storage.write("cart", b"new").unwrap();
        assert_eq!(storage.get("cart").unwrap(), b"new");
    }
}
