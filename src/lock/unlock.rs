//! Unlock action
//!
//! Forcibly releases a lock without any version-state transition: the draft
//! stays a draft, now unprotected. Preconditions are checked in order and
//! each failure is a distinct outcome:
//!
//! 1. write-style invocation (enforced at the HTTP layer, before any lookup)
//! 2. the version exists, otherwise `NotFound`
//! 3. the version is in draft state, otherwise `NotFound` (by invariant a
//!    non-draft carries no lock, so there is nothing to unlock)
//! 4. the actor holds the unlock capability, otherwise `Forbidden` with no
//!    mutation

use std::sync::Arc;

use uuid::Uuid;

use crate::auth::{capabilities, Actor};
use crate::observability::Logger;
use crate::version::VersionRepository;

use super::errors::{LockError, LockResult};
use super::store::LockStore;

/// Successful unlock: the caller is directed back to the listing scoped to
/// the version's grouper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnlockOutcome {
    pub version_id: Uuid,
    pub grouper: Uuid,
}

/// The explicit, capability-gated lock release operation.
#[derive(Clone)]
pub struct UnlockAction {
    versions: Arc<dyn VersionRepository>,
    store: Arc<dyn LockStore>,
}

impl UnlockAction {
    pub fn new(versions: Arc<dyn VersionRepository>, store: Arc<dyn LockStore>) -> Self {
        Self { versions, store }
    }

    /// Remove the lock for a draft version.
    pub fn unlock(&self, version_id: Uuid, actor: &Actor) -> LockResult<UnlockOutcome> {
        let version = self
            .versions
            .get(version_id)
            .map_err(|e| LockError::Store(e.to_string()))?
            .ok_or(LockError::NotFound)?;

        if !version.state.is_draft() {
            return Err(LockError::NotFound);
        }

        if !actor.has_permission(capabilities::DELETE_VERSION_LOCK) {
            let vid = version_id.to_string();
            Logger::warn(
                "UNLOCK_DENIED",
                &[("actor", &actor.name), ("version", &vid)],
            );
            return Err(LockError::Forbidden);
        }

        // A concurrent release may already have removed it; that is still a
        // successful unlock.
        let removed = self.store.remove(version_id)?;

        let vid = version_id.to_string();
        let owner = removed
            .map(|l| l.created_by.to_string())
            .unwrap_or_else(|| "none".to_string());
        Logger::info(
            "VERSION_UNLOCKED",
            &[
                ("actor", &actor.name),
                ("previous_owner", &owner),
                ("version", &vid),
            ],
        );

        Ok(UnlockOutcome {
            version_id,
            grouper: version.grouper,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lock::store::{InMemoryLockStore, LockStore};
    use crate::version::{InMemoryVersionRepository, Version, VersionState};

    struct Fixture {
        versions: Arc<InMemoryVersionRepository>,
        store: Arc<InMemoryLockStore>,
        action: UnlockAction,
    }

    fn fixture() -> Fixture {
        let versions = Arc::new(InMemoryVersionRepository::new());
        let store = Arc::new(InMemoryLockStore::new());
        let action = UnlockAction::new(versions.clone(), store.clone());
        Fixture {
            versions,
            store,
            action,
        }
    }

    fn admin() -> Actor {
        Actor::with_capabilities("admin", &[capabilities::DELETE_VERSION_LOCK])
    }

    #[test]
    fn test_unlock_missing_version_is_not_found() {
        let f = fixture();
        let err = f.action.unlock(Uuid::new_v4(), &admin()).unwrap_err();
        assert!(matches!(err, LockError::NotFound));
    }

    #[test]
    fn test_unlock_non_draft_is_not_found() {
        let f = fixture();
        let mut version = Version::new_draft(Uuid::new_v4(), Uuid::new_v4());
        version.state = VersionState::Published;
        f.versions.put(version.clone()).unwrap();

        let err = f.action.unlock(version.id, &admin()).unwrap_err();
        assert!(matches!(err, LockError::NotFound));
    }

    #[test]
    fn test_unlock_without_capability_is_forbidden_and_mutates_nothing() {
        let f = fixture();
        let version = Version::new_draft(Uuid::new_v4(), Uuid::new_v4());
        f.versions.put(version.clone()).unwrap();
        f.store.create(version.id, version.created_by).unwrap();

        let err = f.action.unlock(version.id, &Actor::new("bob")).unwrap_err();
        assert!(matches!(err, LockError::Forbidden));
        assert!(f.store.get(version.id).unwrap().is_some());
    }

    #[test]
    fn test_unlock_removes_lock_and_reports_grouper() {
        let f = fixture();
        let version = Version::new_draft(Uuid::new_v4(), Uuid::new_v4());
        f.versions.put(version.clone()).unwrap();
        f.store.create(version.id, version.created_by).unwrap();

        let outcome = f.action.unlock(version.id, &admin()).unwrap();
        assert_eq!(outcome.grouper, version.grouper);
        assert!(f.store.get(version.id).unwrap().is_none());
        // Version state untouched.
        assert_eq!(
            f.versions.get(version.id).unwrap().unwrap().state,
            VersionState::Draft
        );
    }

    #[test]
    fn test_unlock_already_released_is_still_success() {
        let f = fixture();
        let version = Version::new_draft(Uuid::new_v4(), Uuid::new_v4());
        f.versions.put(version.clone()).unwrap();

        // No lock present (raced away); unlock still succeeds.
        let outcome = f.action.unlock(version.id, &admin()).unwrap();
        assert_eq!(outcome.version_id, version.id);
    }
}
