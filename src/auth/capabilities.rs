//! Well-known capability names
//!
//! Capabilities are plain strings granted by the surrounding application;
//! draftlock only checks for their presence.

/// May forcibly remove a version lock held by someone else.
pub const DELETE_VERSION_LOCK: &str = "delete_version_lock";

/// Base permission to edit version content. Lock state can only narrow
/// this, never widen it.
pub const CHANGE_VERSION: &str = "change_version";
