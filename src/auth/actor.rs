//! Actor model and directory
//!
//! An actor is anyone who saves versions or requests unlocks. Capability
//! grants come from the surrounding application; here they are just a set
//! of names attached to the actor.

use std::collections::HashMap;
use std::collections::HashSet;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::errors::{AuthError, AuthResult};

/// An authenticated actor with a set of granted capabilities.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    /// Unique actor identifier
    pub id: Uuid,

    /// Display name (unique within a directory)
    pub name: String,

    /// Granted capability names
    capabilities: HashSet<String>,
}

impl Actor {
    /// Create a new actor with no capabilities.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            capabilities: HashSet::new(),
        }
    }

    /// Create a new actor holding the given capabilities.
    pub fn with_capabilities(name: impl Into<String>, capabilities: &[&str]) -> Self {
        let mut actor = Self::new(name);
        for cap in capabilities {
            actor.grant(cap);
        }
        actor
    }

    /// Grant a capability to this actor.
    pub fn grant(&mut self, capability: &str) {
        self.capabilities.insert(capability.to_string());
    }

    /// The capability check consumed by the lock core. Returns true iff the
    /// actor holds the named capability.
    pub fn has_permission(&self, capability: &str) -> bool {
        self.capabilities.contains(capability)
    }
}

/// In-memory actor directory keyed by name.
///
/// Stands in for the surrounding application's session layer: HTTP requests
/// name their actor and the directory resolves it.
#[derive(Debug, Default)]
pub struct ActorDirectory {
    actors: RwLock<HashMap<String, Actor>>,
}

impl ActorDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an actor. Names are unique.
    pub fn register(&self, actor: Actor) -> AuthResult<()> {
        let mut actors = self
            .actors
            .write()
            .map_err(|_| AuthError::DirectoryPoisoned)?;
        if actors.contains_key(&actor.name) {
            return Err(AuthError::DuplicateActor);
        }
        actors.insert(actor.name.clone(), actor);
        Ok(())
    }

    /// Resolve an actor by name.
    pub fn find(&self, name: &str) -> AuthResult<Option<Actor>> {
        let actors = self
            .actors
            .read()
            .map_err(|_| AuthError::DirectoryPoisoned)?;
        Ok(actors.get(name).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::capabilities;

    #[test]
    fn test_actor_capability_check() {
        let actor = Actor::with_capabilities("admin", &[capabilities::DELETE_VERSION_LOCK]);
        assert!(actor.has_permission(capabilities::DELETE_VERSION_LOCK));
        assert!(!actor.has_permission(capabilities::CHANGE_VERSION));
    }

    #[test]
    fn test_grant_adds_capability() {
        let mut actor = Actor::new("bob");
        assert!(!actor.has_permission(capabilities::CHANGE_VERSION));
        actor.grant(capabilities::CHANGE_VERSION);
        assert!(actor.has_permission(capabilities::CHANGE_VERSION));
    }

    #[test]
    fn test_directory_register_and_find() {
        let directory = ActorDirectory::new();
        directory.register(Actor::new("alice")).unwrap();

        let found = directory.find("alice").unwrap();
        assert!(found.is_some());
        assert!(directory.find("nobody").unwrap().is_none());
    }

    #[test]
    fn test_directory_rejects_duplicate_names() {
        let directory = ActorDirectory::new();
        directory.register(Actor::new("alice")).unwrap();
        let err = directory.register(Actor::new("alice")).unwrap_err();
        assert!(matches!(err, AuthError::DuplicateActor));
    }
}
