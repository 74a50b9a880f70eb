//! Lock store
//!
//! The single shared mutable resource of the lock core. Creation is an
//! atomic check-and-insert keyed by version id, so two concurrent saves of
//! the same version cannot both install a lock; removal is idempotent.
//! All mutation flows through the lifecycle manager or the unlock action.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Mutex;

use uuid::Uuid;

use super::errors::{LockError, LockResult};
use super::record::VersionLock;

/// Durable mapping from version id to its current lock.
pub trait LockStore: Send + Sync {
    /// Atomically create a lock for a version. Fails with
    /// `LockError::Conflict` if the version is already locked.
    fn create(&self, version_id: Uuid, created_by: Uuid) -> LockResult<VersionLock>;

    /// Remove the lock for a version, returning it if one existed.
    /// Removing a non-existent lock is a no-op, not an error.
    fn remove(&self, version_id: Uuid) -> LockResult<Option<VersionLock>>;

    /// Read the current lock for a version, if any.
    fn get(&self, version_id: Uuid) -> LockResult<Option<VersionLock>>;
}

/// In-memory lock store for tests and embedded use.
#[derive(Debug, Default)]
pub struct InMemoryLockStore {
    locks: Mutex<HashMap<Uuid, VersionLock>>,
}

impl InMemoryLockStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LockStore for InMemoryLockStore {
    fn create(&self, version_id: Uuid, created_by: Uuid) -> LockResult<VersionLock> {
        let mut locks = self
            .locks
            .lock()
            .map_err(|_| LockError::Store("Lock poisoned".to_string()))?;

        match locks.entry(version_id) {
            Entry::Occupied(_) => Err(LockError::Conflict),
            Entry::Vacant(slot) => {
                let lock = VersionLock::new(version_id, created_by);
                slot.insert(lock.clone());
                Ok(lock)
            }
        }
    }

    fn remove(&self, version_id: Uuid) -> LockResult<Option<VersionLock>> {
        let mut locks = self
            .locks
            .lock()
            .map_err(|_| LockError::Store("Lock poisoned".to_string()))?;
        Ok(locks.remove(&version_id))
    }

    fn get(&self, version_id: Uuid) -> LockResult<Option<VersionLock>> {
        let locks = self
            .locks
            .lock()
            .map_err(|_| LockError::Store("Lock poisoned".to_string()))?;
        Ok(locks.get(&version_id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_then_get() {
        let store = InMemoryLockStore::new();
        let version_id = Uuid::new_v4();
        let owner = Uuid::new_v4();

        let lock = store.create(version_id, owner).unwrap();
        assert_eq!(lock.version_id, version_id);
        assert_eq!(store.get(version_id).unwrap(), Some(lock));
    }

    #[test]
    fn test_duplicate_create_is_conflict() {
        let store = InMemoryLockStore::new();
        let version_id = Uuid::new_v4();

        store.create(version_id, Uuid::new_v4()).unwrap();
        let err = store.create(version_id, Uuid::new_v4()).unwrap_err();
        assert!(matches!(err, LockError::Conflict));
    }

    #[test]
    fn test_remove_is_idempotent() {
        let store = InMemoryLockStore::new();
        let version_id = Uuid::new_v4();

        store.create(version_id, Uuid::new_v4()).unwrap();
        assert!(store.remove(version_id).unwrap().is_some());
        // Second removal finds nothing and does not error.
        assert!(store.remove(version_id).unwrap().is_none());
        assert!(store.get(version_id).unwrap().is_none());
    }
}
