//! Version locking core
//!
//! The lock lifecycle state machine and its authorization gate. A lock has
//! two states, UNLOCKED and LOCKED(owner):
//!
//! - UNLOCKED -> LOCKED(creator) when a version transitions into draft
//! - LOCKED(*) -> UNLOCKED when it transitions out of draft
//! - LOCKED(owner) -> UNLOCKED on a successful unlock action, the version
//!   remaining a draft
//! - LOCKED(owner) -> LOCKED(owner) on any save re-affirming draft state
//!
//! The lock store is the only shared mutable resource; creation is atomic
//! per version id and all mutation goes through `LockLifecycleManager` or
//! `UnlockAction`.

mod errors;
mod gate;
mod journal;
mod lifecycle;
mod record;
mod store;
mod unlock;

pub use errors::{JournalError, LockError, LockResult};
pub use gate::AuthorizationGate;
pub use journal::JournalLockStore;
pub use lifecycle::LockLifecycleManager;
pub use record::VersionLock;
pub use store::{InMemoryLockStore, LockStore};
pub use unlock::{UnlockAction, UnlockOutcome};
