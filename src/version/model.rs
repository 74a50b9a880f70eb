//! Version model
//!
//! One revision of a content object. Versions of the same logical object
//! share a grouper id. The lock core only reads `state` and `created_by`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::state::VersionState;

/// A single revision of a content object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Version {
    /// Unique version identifier
    pub id: Uuid,

    /// Groups all versions of the same logical content object
    pub grouper: Uuid,

    /// Lifecycle state
    pub state: VersionState,

    /// The actor who created this version
    pub created_by: Uuid,

    /// When the version was created
    pub created: DateTime<Utc>,
}

impl Version {
    /// Create a brand-new draft version for a content object.
    pub fn new_draft(grouper: Uuid, created_by: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            grouper,
            state: VersionState::Draft,
            created_by,
            created: Utc::now(),
        }
    }
}
