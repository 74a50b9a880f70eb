//! Authorization collaborator surface
//!
//! draftlock does not own role storage; it only asks whether an actor holds
//! a named capability. This module provides the `Actor` model carrying a
//! capability set, the well-known capability names, and a small in-memory
//! directory for resolving request identities.

pub mod actor;
pub mod capabilities;
pub mod errors;

pub use actor::{Actor, ActorDirectory};
pub use errors::{AuthError, AuthResult};
