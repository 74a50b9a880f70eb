//! draftlock - exclusive edit locking for versioned content
//!
//! Each content object (a "grouper") carries a sequence of versions; at most
//! one of them is in the mutable draft state at a time. draftlock guarantees
//! that a draft is editable by exactly one owner: a lock is created when a
//! version enters the draft state, removed when it leaves it, and may be
//! forcibly removed early by an actor holding the unlock capability.

pub mod auth;
pub mod cli;
pub mod http_server;
pub mod lock;
pub mod observability;
pub mod version;
