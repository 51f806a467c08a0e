//! Client-local persistence of the last-known username.
//!
//! Only the username is ever written. It drives optimistic display before
//! reconciliation finishes and is never trusted for authorization.

use std::cell::RefCell;

use crate::error::StorageError;

/// Durable single-key store for the last-known username.
pub trait UsernameStorage {
    /// Read the stored username.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the backing store cannot be read.
    fn load(&self) -> Result<Option<String>, StorageError>;

    /// Persist `username`, replacing any prior value.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the backing store rejects the write.
    fn save(&self, username: &str) -> Result<(), StorageError>;

    /// Remove the stored username. Removing a missing entry succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] when the backing store rejects the delete.
    fn remove(&self) -> Result<(), StorageError>;
}

/// Process-local storage used by tests and ephemeral shells.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    value: RefCell<Option<String>>,
}

impl MemoryStorage {
    /// Storage pre-seeded with a username, as after a page reload.
    #[must_use]
    pub fn with_username(username: impl Into<String>) -> Self {
        Self {
            value: RefCell::new(Some(username.into())),
        }
    }
}

impl UsernameStorage for MemoryStorage {
    fn load(&self) -> Result<Option<String>, StorageError> {
        Ok(self.value.borrow().clone())
    }

    fn save(&self, username: &str) -> Result<(), StorageError> {
        *self.value.borrow_mut() = Some(username.to_string());
        Ok(())
    }

    fn remove(&self) -> Result<(), StorageError> {
        self.value.borrow_mut().take();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_storage_round_trips_and_removes() -> Result<(), StorageError> {
        let storage = MemoryStorage::default();
        assert_eq!(storage.load()?, None);
        storage.save("alice")?;
        assert_eq!(storage.load()?.as_deref(), Some("alice"));
        storage.remove()?;
        storage.remove()?;
        assert_eq!(storage.load()?, None);
        Ok(())
    }
}
