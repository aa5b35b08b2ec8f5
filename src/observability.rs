//! Structured logging
//!
//! One log line = one event, emitted synchronously as a single JSON object
//! with deterministic key order: `event` first, then `severity`, then the
//! caller's fields sorted by key. INFO goes to stdout, WARN and ERROR to
//! stderr. Logging never affects execution.

use std::fmt::Write as _;
use std::io::{self, Write};

#[cfg(test)]
thread_local! {
    static CAPTURED: std::cell::RefCell<Vec<String>> =
        const { std::cell::RefCell::new(Vec::new()) };
}

/// Log severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Info,
    Warn,
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
        }
    }
}

/// The process-wide structured logger.
pub struct Logger;

impl Logger {
    pub fn info(event: &str, fields: &[(&str, &str)]) {
        Self::emit(Severity::Info, event, fields, &mut io::stdout());
    }

    pub fn warn(event: &str, fields: &[(&str, &str)]) {
        Self::emit(Severity::Warn, event, fields, &mut io::stderr());
    }

    pub fn error(event: &str, fields: &[(&str, &str)]) {
        Self::emit(Severity::Error, event, fields, &mut io::stderr());
    }

    fn emit<W: Write>(severity: Severity, event: &str, fields: &[(&str, &str)], out: &mut W) {
        let line = Self::render(severity, event, fields);
        #[cfg(test)]
        CAPTURED.with(|log| log.borrow_mut().push(line.clone()));
        // One write, one flush; log lines never interleave mid-line.
        let _ = out.write_all(line.as_bytes());
        let _ = out.flush();
    }

    /// Lines emitted on the current thread since the last clear. Test-only.
    #[cfg(test)]
    pub fn captured() -> Vec<String> {
        CAPTURED.with(|log| log.borrow().clone())
    }

    #[cfg(test)]
    pub fn clear_captured() {
        CAPTURED.with(|log| log.borrow_mut().clear());
    }

    fn render(severity: Severity, event: &str, fields: &[(&str, &str)]) -> String {
        let mut line = String::with_capacity(128);
        line.push_str("{\"event\":\"");
        escape_into(&mut line, event);
        let _ = write!(line, "\",\"severity\":\"{}\"", severity.as_str());

        let mut sorted: Vec<(&str, &str)> = fields.to_vec();
        sorted.sort_by_key(|&(key, _)| key);
        for (key, value) in sorted {
            line.push_str(",\"");
            escape_into(&mut line, key);
            line.push_str("\":\"");
            escape_into(&mut line, value);
            line.push('"');
        }

        line.push_str("}\n");
        line
    }
}

fn escape_into(out: &mut String, s: &str) {
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
}
