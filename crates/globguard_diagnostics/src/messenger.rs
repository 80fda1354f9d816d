//! The diagnostic channel used by the glob cache.

use crate::diagnostic::Diagnostic;
use crate::sink::DiagnosticSink;
use globguard_source::Backtrace;
use std::path::PathBuf;

/// Channel for reporting problems and rendering call-site titles.
///
/// The glob cache never aborts on its own; it hands diagnostics to a
/// `Messenger` and the driver decides what a fatal diagnostic means.
pub trait Messenger {
    /// Renders the title of a backtrace as it follows a variable name in
    /// comments and messages, e.g. `" at globguard.toml:4 (glob)"`.
    ///
    /// Returns an empty string for an empty backtrace.
    fn backtrace_title(&self, backtrace: &Backtrace) -> String;

    /// Reports a diagnostic.
    fn issue(&self, diagnostic: Diagnostic);
}

/// A [`Messenger`] that collects diagnostics into a [`DiagnosticSink`].
///
/// Paths in backtrace titles are shown relative to the top source directory
/// (the project root) when they lie under it.
pub struct SinkMessenger {
    top_source: Option<PathBuf>,
    sink: DiagnosticSink,
}

impl SinkMessenger {
    /// Creates a messenger that prints paths as recorded.
    pub fn new() -> Self {
        Self {
            top_source: None,
            sink: DiagnosticSink::new(),
        }
    }

    /// Creates a messenger that shortens paths under `top_source`.
    pub fn with_top_source(top_source: impl Into<PathBuf>) -> Self {
        Self {
            top_source: Some(top_source.into()),
            sink: DiagnosticSink::new(),
        }
    }

    /// Returns the top source directory, if set.
    pub fn top_source(&self) -> Option<&PathBuf> {
        self.top_source.as_ref()
    }

    /// Returns the sink collecting issued diagnostics.
    pub fn sink(&self) -> &DiagnosticSink {
        &self.sink
    }
}

impl Default for SinkMessenger {
    fn default() -> Self {
        Self::new()
    }
}

impl Messenger for SinkMessenger {
    fn backtrace_title(&self, backtrace: &Backtrace) -> String {
        let Some(top) = backtrace.top() else {
            return String::new();
        };
        let frame = match &self.top_source {
            Some(base) => top.relative_to(base),
            None => top.clone(),
        };
        let preposition = if frame.line != 0 { "at" } else { "in" };
        format!(" {preposition} {frame}")
    }

    fn issue(&self, diagnostic: Diagnostic) {
        self.sink.emit(diagnostic);
    }
}
