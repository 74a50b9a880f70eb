//! Lock authorization gate
//!
//! The single place that answers "may this actor edit this version" and
//! "should this actor see the unlock affordance". The edit-permission check
//! and the UI edit-affordance check both go through `content_is_unlocked`
//! so they can never diverge.

use std::sync::Arc;

use crate::auth::{capabilities, Actor};
use crate::version::Version;

use super::errors::LockResult;
use super::store::LockStore;

/// Read-only queries over the lock store.
#[derive(Clone)]
pub struct AuthorizationGate {
    store: Arc<dyn LockStore>,
}

impl AuthorizationGate {
    pub fn new(store: Arc<dyn LockStore>) -> Self {
        Self { store }
    }

    /// True if the version carries no lock, or carries one owned by this
    /// actor. False for every other actor while a lock exists.
    pub fn content_is_unlocked(&self, version: &Version, actor: &Actor) -> LockResult<bool> {
        match self.store.get(version.id)? {
            None => Ok(true),
            Some(lock) => Ok(lock.is_owned_by(actor.id)),
        }
    }

    /// True only if a lock exists and the actor holds the unlock capability.
    ///
    /// Affordance check only: the unlock action re-checks the capability
    /// authoritatively before mutating anything.
    pub fn lock_can_be_removed_for_user(
        &self,
        version: &Version,
        actor: &Actor,
    ) -> LockResult<bool> {
        if self.store.get(version.id)?.is_none() {
            return Ok(false);
        }
        Ok(actor.has_permission(capabilities::DELETE_VERSION_LOCK))
    }

    /// Edit permission: the collaborator's base permission AND an unlocked
    /// (or self-locked) version. Lock state only narrows permission.
    pub fn can_edit(&self, version: &Version, actor: &Actor) -> LockResult<bool> {
        if !actor.has_permission(capabilities::CHANGE_VERSION) {
            return Ok(false);
        }
        self.content_is_unlocked(version, actor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lock::store::{InMemoryLockStore, LockStore};
    use crate::version::Version;
    use uuid::Uuid;

    fn gate_with_store() -> (Arc<InMemoryLockStore>, AuthorizationGate) {
        let store = Arc::new(InMemoryLockStore::new());
        let gate = AuthorizationGate::new(store.clone());
        (store, gate)
    }

    #[test]
    fn test_unlocked_version_is_open_to_anyone() {
        let (_, gate) = gate_with_store();
        let version = Version::new_draft(Uuid::new_v4(), Uuid::new_v4());
        let actor = Actor::new("anyone");

        assert!(gate.content_is_unlocked(&version, &actor).unwrap());
    }

    #[test]
    fn test_locked_version_is_open_only_to_its_owner() {
        let (store, gate) = gate_with_store();
        let owner = Actor::new("owner");
        let other = Actor::new("other");
        let version = Version::new_draft(Uuid::new_v4(), owner.id);
        store.create(version.id, owner.id).unwrap();

        assert!(gate.content_is_unlocked(&version, &owner).unwrap());
        assert!(!gate.content_is_unlocked(&version, &other).unwrap());
    }

    #[test]
    fn test_unlock_affordance_requires_lock_and_capability() {
        let (store, gate) = gate_with_store();
        let admin = Actor::with_capabilities("admin", &[capabilities::DELETE_VERSION_LOCK]);
        let plain = Actor::new("plain");
        let version = Version::new_draft(Uuid::new_v4(), Uuid::new_v4());

        // No lock yet: nothing to remove, regardless of capability.
        assert!(!gate.lock_can_be_removed_for_user(&version, &admin).unwrap());

        store.create(version.id, Uuid::new_v4()).unwrap();
        assert!(gate.lock_can_be_removed_for_user(&version, &admin).unwrap());
        assert!(!gate.lock_can_be_removed_for_user(&version, &plain).unwrap());
    }

    #[test]
    fn test_lock_state_only_narrows_edit_permission() {
        let (store, gate) = gate_with_store();
        let version = Version::new_draft(Uuid::new_v4(), Uuid::new_v4());

        // Without the base permission the lock state is irrelevant.
        let no_base = Actor::new("no_base");
        assert!(!gate.can_edit(&version, &no_base).unwrap());

        let editor = Actor::with_capabilities("editor", &[capabilities::CHANGE_VERSION]);
        assert!(gate.can_edit(&version, &editor).unwrap());

        // Someone else's lock narrows it away again.
        store.create(version.id, Uuid::new_v4()).unwrap();
        assert!(!gate.can_edit(&version, &editor).unwrap());
    }
}
