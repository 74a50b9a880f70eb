//! Version lifecycle states
//!
//! Draft is the single mutable state and the only one that may carry a
//! lock. The legal transitions:
//!
//! ```text
//! Draft -----> Published -----> Unpublished
//!   |
//!   +--------> Archived
//! ```
//!
//! Unpublished and archived versions are terminal for that version; revert
//! creates a brand-new draft version instead of transitioning back.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Lifecycle state of a version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VersionState {
    /// Mutable, in-progress; the only state that may carry a lock
    Draft,
    /// Live content
    Published,
    /// Taken down after being published
    Unpublished,
    /// Discarded without ever being published
    Archived,
}

impl VersionState {
    /// Returns the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            VersionState::Draft => "draft",
            VersionState::Published => "published",
            VersionState::Unpublished => "unpublished",
            VersionState::Archived => "archived",
        }
    }

    /// Returns true for the draft state.
    pub fn is_draft(&self) -> bool {
        matches!(self, VersionState::Draft)
    }

    /// Returns true if a direct transition to `to` is legal.
    pub fn can_transition_to(&self, to: VersionState) -> bool {
        matches!(
            (self, to),
            (VersionState::Draft, VersionState::Published)
                | (VersionState::Draft, VersionState::Archived)
                | (VersionState::Published, VersionState::Unpublished)
        )
    }

    /// Returns true if a new draft may be created from a version in this
    /// state via revert.
    pub fn is_revertable(&self) -> bool {
        matches!(self, VersionState::Unpublished | VersionState::Archived)
    }
}

impl fmt::Display for VersionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legal_transitions() {
        assert!(VersionState::Draft.can_transition_to(VersionState::Published));
        assert!(VersionState::Draft.can_transition_to(VersionState::Archived));
        assert!(VersionState::Published.can_transition_to(VersionState::Unpublished));
    }

    #[test]
    fn test_illegal_transitions() {
        assert!(!VersionState::Published.can_transition_to(VersionState::Draft));
        assert!(!VersionState::Archived.can_transition_to(VersionState::Published));
        assert!(!VersionState::Unpublished.can_transition_to(VersionState::Draft));
        assert!(!VersionState::Draft.can_transition_to(VersionState::Draft));
    }

    #[test]
    fn test_only_terminal_states_are_revertable() {
        assert!(VersionState::Unpublished.is_revertable());
        assert!(VersionState::Archived.is_revertable());
        assert!(!VersionState::Draft.is_revertable());
        assert!(!VersionState::Published.is_revertable());
    }
}
