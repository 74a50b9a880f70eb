//! Version workflow
//!
//! The save path for versions. Every operation that writes a version record
//! invokes the lock lifecycle manager as a required step of the same
//! operation, after the record is written, so there is no window where a
//! draft exists unlocked or a non-draft exists locked.

use std::sync::Arc;

use uuid::Uuid;

use crate::lock::LockLifecycleManager;

use super::errors::{VersionError, VersionResult};
use super::model::Version;
use super::repository::VersionRepository;
use super::state::VersionState;

/// Owns version-state transitions and their lock side effects.
#[derive(Clone)]
pub struct VersionWorkflow {
    versions: Arc<dyn VersionRepository>,
    lifecycle: LockLifecycleManager,
}

impl VersionWorkflow {
    pub fn new(versions: Arc<dyn VersionRepository>, lifecycle: LockLifecycleManager) -> Self {
        Self {
            versions,
            lifecycle,
        }
    }

    /// Create a new draft version for a content object. The draft comes
    /// into existence locked by its creator. At most one draft per grouper.
    pub fn create_draft(&self, grouper: Uuid, created_by: Uuid) -> VersionResult<Version> {
        if self.versions.draft_for_grouper(grouper)?.is_some() {
            return Err(VersionError::DraftExists);
        }

        let version = Version::new_draft(grouper, created_by);
        self.save(&version)?;
        Ok(version)
    }

    /// Re-save a version without changing its state. For a draft this
    /// re-affirms the existing lock (self-loop, no duplicate).
    pub fn resave(&self, version_id: Uuid) -> VersionResult<Version> {
        let version = self
            .versions
            .get(version_id)?
            .ok_or(VersionError::NotFound)?;
        self.save(&version)?;
        Ok(version)
    }

    /// Publish a draft. Its lock is released as part of the same save.
    pub fn publish(&self, version_id: Uuid) -> VersionResult<Version> {
        self.transition(version_id, VersionState::Published)
    }

    /// Take published content down.
    pub fn unpublish(&self, version_id: Uuid) -> VersionResult<Version> {
        self.transition(version_id, VersionState::Unpublished)
    }

    /// Discard a draft. Its lock is released as part of the same save.
    pub fn archive(&self, version_id: Uuid) -> VersionResult<Version> {
        self.transition(version_id, VersionState::Archived)
    }

    /// Create a fresh draft from an archived or unpublished version. The
    /// new draft is a new version owned (and locked) by the reverting
    /// actor, not the original owner.
    pub fn revert(&self, version_id: Uuid, actor_id: Uuid) -> VersionResult<Version> {
        let source = self
            .versions
            .get(version_id)?
            .ok_or(VersionError::NotFound)?;
        if !source.state.is_revertable() {
            return Err(VersionError::NotRevertable(source.state));
        }
        self.create_draft(source.grouper, actor_id)
    }

    /// Fetch a version by id.
    pub fn get(&self, version_id: Uuid) -> VersionResult<Option<Version>> {
        self.versions.get(version_id)
    }

    /// All versions of one content object.
    pub fn list_for_grouper(&self, grouper: Uuid) -> VersionResult<Vec<Version>> {
        self.versions.list_for_grouper(grouper)
    }

    /// All versions.
    pub fn list(&self) -> VersionResult<Vec<Version>> {
        self.versions.list()
    }

    fn transition(&self, version_id: Uuid, to: VersionState) -> VersionResult<Version> {
        let mut version = self
            .versions
            .get(version_id)?
            .ok_or(VersionError::NotFound)?;

        if !version.state.can_transition_to(to) {
            return Err(VersionError::InvalidTransition {
                from: version.state,
                to,
            });
        }

        version.state = to;
        self.save(&version)?;
        Ok(version)
    }

    /// Write the record, then run the lock lifecycle step. One logical
    /// operation: a lifecycle failure fails the save.
    fn save(&self, version: &Version) -> VersionResult<()> {
        self.versions.put(version.clone())?;
        self.lifecycle.on_version_saved(version)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lock::{InMemoryLockStore, LockStore};
    use crate::version::InMemoryVersionRepository;

    fn workflow() -> (Arc<InMemoryLockStore>, VersionWorkflow) {
        let store = Arc::new(InMemoryLockStore::new());
        let versions = Arc::new(InMemoryVersionRepository::new());
        let lifecycle = LockLifecycleManager::new(store.clone());
        (store, VersionWorkflow::new(versions, lifecycle))
    }

    #[test]
    fn test_create_draft_locks_for_creator() {
        let (store, workflow) = workflow();
        let creator = Uuid::new_v4();

        let draft = workflow.create_draft(Uuid::new_v4(), creator).unwrap();

        let lock = store.get(draft.id).unwrap().unwrap();
        assert_eq!(lock.created_by, creator);
    }

    #[test]
    fn test_second_draft_for_grouper_is_rejected() {
        let (_, workflow) = workflow();
        let grouper = Uuid::new_v4();

        workflow.create_draft(grouper, Uuid::new_v4()).unwrap();
        let err = workflow.create_draft(grouper, Uuid::new_v4()).unwrap_err();
        assert!(matches!(err, VersionError::DraftExists));
    }

    #[test]
    fn test_publish_releases_the_lock() {
        let (store, workflow) = workflow();
        let draft = workflow
            .create_draft(Uuid::new_v4(), Uuid::new_v4())
            .unwrap();

        let published = workflow.publish(draft.id).unwrap();
        assert_eq!(published.state, VersionState::Published);
        assert!(store.get(draft.id).unwrap().is_none());
    }

    #[test]
    fn test_publish_published_version_is_invalid() {
        let (_, workflow) = workflow();
        let draft = workflow
            .create_draft(Uuid::new_v4(), Uuid::new_v4())
            .unwrap();
        workflow.publish(draft.id).unwrap();

        let err = workflow.publish(draft.id).unwrap_err();
        assert!(matches!(err, VersionError::InvalidTransition { .. }));
    }

    #[test]
    fn test_revert_creates_new_locked_draft_for_new_actor() {
        let (store, workflow) = workflow();
        let grouper = Uuid::new_v4();
        let original_author = Uuid::new_v4();
        let reverter = Uuid::new_v4();

        let draft = workflow.create_draft(grouper, original_author).unwrap();
        workflow.publish(draft.id).unwrap();
        workflow.unpublish(draft.id).unwrap();

        let new_draft = workflow.revert(draft.id, reverter).unwrap();
        assert_ne!(new_draft.id, draft.id);
        assert_eq!(new_draft.created_by, reverter);

        let lock = store.get(new_draft.id).unwrap().unwrap();
        assert_eq!(lock.created_by, reverter);
    }

    #[test]
    fn test_revert_draft_is_rejected() {
        let (_, workflow) = workflow();
        let draft = workflow
            .create_draft(Uuid::new_v4(), Uuid::new_v4())
            .unwrap();

        let err = workflow.revert(draft.id, Uuid::new_v4()).unwrap_err();
        assert!(matches!(err, VersionError::NotRevertable(_)));
    }

    #[test]
    fn test_resave_draft_keeps_single_lock() {
        let (store, workflow) = workflow();
        let draft = workflow
            .create_draft(Uuid::new_v4(), Uuid::new_v4())
            .unwrap();
        let before = store.get(draft.id).unwrap().unwrap();

        workflow.resave(draft.id).unwrap();
        let after = store.get(draft.id).unwrap().unwrap();
        assert_eq!(before, after);
    }
}
