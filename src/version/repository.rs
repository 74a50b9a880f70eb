//! Version repository
//!
//! Owned by the versioning collaborator; the lock core only reads from it.

use std::collections::HashMap;
use std::sync::RwLock;

use uuid::Uuid;

use super::errors::{VersionError, VersionResult};
use super::model::Version;
use super::state::VersionState;

/// Storage for version records.
pub trait VersionRepository: Send + Sync {
    /// Insert or overwrite a version record.
    fn put(&self, version: Version) -> VersionResult<()>;

    /// Fetch a version by id.
    fn get(&self, id: Uuid) -> VersionResult<Option<Version>>;

    /// All versions of one content object, oldest first.
    fn list_for_grouper(&self, grouper: Uuid) -> VersionResult<Vec<Version>>;

    /// All versions, oldest first.
    fn list(&self) -> VersionResult<Vec<Version>>;

    /// The current draft version of a content object, if any.
    fn draft_for_grouper(&self, grouper: Uuid) -> VersionResult<Option<Version>>;
}

/// In-memory version repository.
#[derive(Debug, Default)]
pub struct InMemoryVersionRepository {
    versions: RwLock<HashMap<Uuid, Version>>,
}

impl InMemoryVersionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl VersionRepository for InMemoryVersionRepository {
    fn put(&self, version: Version) -> VersionResult<()> {
        let mut versions = self
            .versions
            .write()
            .map_err(|_| VersionError::Store("Lock poisoned".to_string()))?;
        versions.insert(version.id, version);
        Ok(())
    }

    fn get(&self, id: Uuid) -> VersionResult<Option<Version>> {
        let versions = self
            .versions
            .read()
            .map_err(|_| VersionError::Store("Lock poisoned".to_string()))?;
        Ok(versions.get(&id).cloned())
    }

    fn list_for_grouper(&self, grouper: Uuid) -> VersionResult<Vec<Version>> {
        let versions = self
            .versions
            .read()
            .map_err(|_| VersionError::Store("Lock poisoned".to_string()))?;
        let mut matching: Vec<Version> = versions
            .values()
            .filter(|v| v.grouper == grouper)
            .cloned()
            .collect();
        matching.sort_by_key(|v| v.created);
        Ok(matching)
    }

    fn list(&self) -> VersionResult<Vec<Version>> {
        let versions = self
            .versions
            .read()
            .map_err(|_| VersionError::Store("Lock poisoned".to_string()))?;
        let mut all: Vec<Version> = versions.values().cloned().collect();
        all.sort_by_key(|v| v.created);
        Ok(all)
    }

    fn draft_for_grouper(&self, grouper: Uuid) -> VersionResult<Option<Version>> {
        let versions = self
            .versions
            .read()
            .map_err(|_| VersionError::Store("Lock poisoned".to_string()))?;
        Ok(versions
            .values()
            .find(|v| v.grouper == grouper && v.state == VersionState::Draft)
            .cloned())
    }
}
