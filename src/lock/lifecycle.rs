//! Lock lifecycle manager
//!
//! Runs as a required step inside every version save, after the version
//! record is written: a resulting draft state must carry a lock owned by the
//! version's creator, any other state must carry none. Duplicate creation is
//! recovered locally as a no-op, as is removing an absent lock.
//!
//! After mutating the store the manager re-checks the core invariant
//! `has_lock(v) == (state(v) == Draft)`. A violation is an integrity fault:
//! logged at fatal severity and surfaced, never silently tolerated.

use std::sync::Arc;

use crate::observability::Logger;
use crate::version::Version;

use super::errors::{LockError, LockResult};
use super::store::LockStore;

/// Creates and removes lock records in response to version-state
/// transitions.
#[derive(Clone)]
pub struct LockLifecycleManager {
    store: Arc<dyn LockStore>,
}

impl LockLifecycleManager {
    pub fn new(store: Arc<dyn LockStore>) -> Self {
        Self { store }
    }

    /// React to a version save. Called with the version as durably written.
    pub fn on_version_saved(&self, version: &Version) -> LockResult<()> {
        if version.state.is_draft() {
            // A draft version is locked by default, owned by its creator.
            match self.store.create(version.id, version.created_by) {
                Ok(lock) => {
                    let version_id = version.id.to_string();
                    let owner = lock.created_by.to_string();
                    Logger::info(
                        "LOCK_ACQUIRED",
                        &[("version", &version_id), ("owner", &owner)],
                    );
                }
                // Already locked: a later save re-affirming draft state.
                Err(LockError::Conflict) => {}
                Err(e) => return Err(e),
            }
        } else if let Some(lock) = self.store.remove(version.id)? {
            let version_id = version.id.to_string();
            let owner = lock.created_by.to_string();
            let state = version.state.to_string();
            Logger::info(
                "LOCK_RELEASED",
                &[
                    ("owner", &owner),
                    ("state", &state),
                    ("version", &version_id),
                ],
            );
        }

        self.verify_invariant(version)
    }

    /// Check that lock presence matches draft state for this version.
    fn verify_invariant(&self, version: &Version) -> LockResult<()> {
        let has_lock = self.store.get(version.id)?.is_some();
        let is_draft = version.state.is_draft();
        if has_lock == is_draft {
            return Ok(());
        }

        let detail = format!(
            "version {} is in state {} but has_lock={}",
            version.id, version.state, has_lock
        );
        let version_id = version.id.to_string();
        let state = version.state.to_string();
        let locked = has_lock.to_string();
        Logger::fatal(
            "LOCK_INTEGRITY_FAULT",
            &[
                ("locked", &locked),
                ("state", &state),
                ("version", &version_id),
            ],
        );
        Err(LockError::IntegrityFault(detail))
    }
}
