//! Structured JSON logger
//!
//! - One log line = one event
//! - Synchronous, no buffering
//! - Deterministic key ordering (event, severity, then fields alphabetically)
//! - Info and below go to stdout, Error and Fatal to stderr

use std::fmt;
use std::io::{self, Write};

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Debug-level detail
    Trace = 0,
    /// Normal operations
    Info = 1,
    /// Recoverable issues
    Warn = 2,
    /// Operation failures
    Error = 3,
    /// Invariant violations; the operation cannot be trusted
    Fatal = 4,
}

impl Severity {
    /// Returns the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Trace => "TRACE",
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
            Severity::Fatal => "FATAL",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Synchronous structured logger.
pub struct Logger;

impl Logger {
    /// Log a normal-operations event to stdout.
    pub fn info(event: &str, fields: &[(&str, &str)]) {
        Self::write_line(Severity::Info, event, fields, &mut io::stdout());
    }

    /// Log a recoverable issue to stdout.
    pub fn warn(event: &str, fields: &[(&str, &str)]) {
        Self::write_line(Severity::Warn, event, fields, &mut io::stdout());
    }

    /// Log an operation failure to stderr.
    pub fn error(event: &str, fields: &[(&str, &str)]) {
        Self::write_line(Severity::Error, event, fields, &mut io::stderr());
    }

    /// Log an invariant violation to stderr.
    pub fn fatal(event: &str, fields: &[(&str, &str)]) {
        Self::write_line(Severity::Fatal, event, fields, &mut io::stderr());
    }

    fn write_line<W: Write>(
        severity: Severity,
        event: &str,
        fields: &[(&str, &str)],
        writer: &mut W,
    ) {
        let mut line = String::with_capacity(128);
        line.push_str("{\"event\":\"");
        Self::push_escaped(&mut line, event);
        line.push_str("\",\"severity\":\"");
        line.push_str(severity.as_str());
        line.push('"');

        let mut sorted: Vec<&(&str, &str)> = fields.iter().collect();
        sorted.sort_by_key(|(k, _)| *k);
        for (key, value) in sorted {
            line.push_str(",\"");
            Self::push_escaped(&mut line, key);
            line.push_str("\":\"");
            Self::push_escaped(&mut line, value);
            line.push('"');
        }
        line.push('}');

        // A failed log write must never fail the operation being logged.
        let _ = writeln!(writer, "{}", line);
    }

    fn push_escaped(out: &mut String, raw: &str) {
        for c in raw.chars() {
            match c {
                '"' => out.push_str("\\\""),
                '\\' => out.push_str("\\\\"),
                '\n' => out.push_str("\\n"),
                '\r' => out.push_str("\\r"),
                '\t' => out.push_str("\\t"),
                c if (c as u32) < 0x20 => {
                    out.push_str(&format!("\\u{:04x}", c as u32));
                }
                c => out.push(c),
            }
        }
    }
}
