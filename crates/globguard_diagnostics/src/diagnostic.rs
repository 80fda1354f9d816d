//! Structured diagnostic messages with severity, codes, and backtraces.

use crate::code::DiagnosticCode;
use crate::severity::Severity;
use globguard_source::Backtrace;
use serde::{Deserialize, Serialize};

/// A structured diagnostic message pointing at the call site that caused it.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Diagnostic {
    /// The severity level of this diagnostic.
    pub severity: Severity,
    /// The code identifying the kind of diagnostic.
    pub code: DiagnosticCode,
    /// The main message. May span several lines.
    pub message: String,
    /// Where the problem was detected; empty when no call site applies.
    pub backtrace: Backtrace,
    /// Explanatory footnotes (e.g., "note: ...").
    pub notes: Vec<String>,
    /// Actionable suggestions (e.g., "help: ...").
    pub help: Vec<String>,
}

impl Diagnostic {
    /// Creates a diagnostic with the given severity.
    pub fn new(
        severity: Severity,
        code: DiagnosticCode,
        message: impl Into<String>,
        backtrace: Backtrace,
    ) -> Self {
        Self {
            severity,
            code,
            message: message.into(),
            backtrace,
            notes: Vec::new(),
            help: Vec::new(),
        }
    }

    /// Creates a fatal diagnostic that aborts the configuration pass.
    pub fn fatal(code: DiagnosticCode, message: impl Into<String>, backtrace: Backtrace) -> Self {
        Self::new(Severity::Fatal, code, message, backtrace)
    }

    /// Creates an error diagnostic.
    pub fn error(code: DiagnosticCode, message: impl Into<String>, backtrace: Backtrace) -> Self {
        Self::new(Severity::Error, code, message, backtrace)
    }

    /// Creates a warning diagnostic.
    pub fn warning(code: DiagnosticCode, message: impl Into<String>, backtrace: Backtrace) -> Self {
        Self::new(Severity::Warning, code, message, backtrace)
    }

    /// Adds a note to this diagnostic.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Adds a help message to this diagnostic.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help.push(help.into());
        self
    }
}
