//! Observability subsystem for draftlock
//!
//! Structured, synchronous JSON logging. One log line is one event; field
//! ordering is deterministic (alphabetical) so log output is diffable and
//! assertable.
//!
//! Observability is read-only: nothing in this module mutates lock or
//! version state.

mod logger;

pub use logger::{Logger, Severity};
