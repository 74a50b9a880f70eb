//! VersionLock record
//!
//! The only state this crate persists: an exclusive edit claim on exactly
//! one version. At most one lock exists per version, and a lock exists iff
//! the version is in draft state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Exclusive edit claim on one draft version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionLock {
    /// The locked version (unique across the store)
    pub version_id: Uuid,

    /// The actor who may edit the draft
    pub created_by: Uuid,

    /// When the lock was established
    pub created: DateTime<Utc>,
}

impl VersionLock {
    /// Create a lock record timestamped now.
    pub fn new(version_id: Uuid, created_by: Uuid) -> Self {
        Self {
            version_id,
            created_by,
            created: Utc::now(),
        }
    }

    /// Returns true if the given actor owns this lock.
    pub fn is_owned_by(&self, actor_id: Uuid) -> bool {
        self.created_by == actor_id
    }
}
