//! Versioning collaborator
//!
//! A minimal implementation of the versioning system the lock core reacts
//! to: version records with a lifecycle state, a repository, and the
//! workflow that owns state transitions. The lock lifecycle manager is a
//! required dependency of the workflow's save path, not a retrofit.

mod errors;
mod model;
mod repository;
mod state;
mod workflow;

pub use errors::{VersionError, VersionResult};
pub use model::Version;
pub use repository::{InMemoryVersionRepository, VersionRepository};
pub use state::VersionState;
pub use workflow::VersionWorkflow;
