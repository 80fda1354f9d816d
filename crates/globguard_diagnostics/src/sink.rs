//! Thread-safe diagnostic accumulator.

use crate::diagnostic::Diagnostic;
use crate::severity::Severity;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// A thread-safe accumulator for diagnostics emitted during a pass.
///
/// The error count and fatal flag are tracked atomically so the driver can
/// poll them without locking the diagnostic vector.
pub struct DiagnosticSink {
    diagnostics: Mutex<Vec<Diagnostic>>,
    error_count: AtomicUsize,
    fatal: AtomicBool,
}

impl DiagnosticSink {
    /// Creates a new empty diagnostic sink.
    pub fn new() -> Self {
        Self {
            diagnostics: Mutex::new(Vec::new()),
            error_count: AtomicUsize::new(0),
            fatal: AtomicBool::new(false),
        }
    }

    /// Emits a diagnostic into the sink.
    pub fn emit(&self, diag: Diagnostic) {
        if diag.severity.is_error() {
            self.error_count.fetch_add(1, Ordering::Relaxed);
        }
        if diag.severity == Severity::Fatal {
            self.fatal.store(true, Ordering::Relaxed);
        }
        self.lock().push(diag);
    }

    /// Returns `true` if any error or fatal diagnostics have been emitted.
    pub fn has_errors(&self) -> bool {
        self.error_count.load(Ordering::Relaxed) > 0
    }

    /// Returns `true` once a fatal diagnostic has been emitted.
    pub fn has_fatal(&self) -> bool {
        self.fatal.load(Ordering::Relaxed)
    }

    /// Returns the number of error and fatal diagnostics emitted so far.
    pub fn error_count(&self) -> usize {
        self.error_count.load(Ordering::Relaxed)
    }

    /// Returns a snapshot of the diagnostics emitted so far, in order.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.lock().clone()
    }

    // A panic while pushing cannot leave the vector half-updated.
    fn lock(&self) -> MutexGuard<'_, Vec<Diagnostic>> {
        self.diagnostics.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for DiagnosticSink {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::code::DiagnosticCode;
    use globguard_source::Backtrace;

    fn make_error() -> Diagnostic {
        Diagnostic::error(DiagnosticCode::ARTIFACT_IO, "io", Backtrace::empty())
    }

    fn make_fatal() -> Diagnostic {
        Diagnostic::fatal(DiagnosticCode::INCONSISTENT_GLOB, "conflict", Backtrace::empty())
    }

    #[test]
    fn empty_sink() {
        let sink = DiagnosticSink::new();
        assert!(!sink.has_errors());
        assert!(!sink.has_fatal());
        assert!(sink.diagnostics().is_empty());
    }

    #[test]
    fn emit_error_is_not_fatal() {
        let sink = DiagnosticSink::new();
        sink.emit(make_error());
        assert!(sink.has_errors());
        assert!(!sink.has_fatal());
        assert_eq!(sink.error_count(), 1);
    }

    #[test]
    fn emit_fatal_counts_as_error() {
        let sink = DiagnosticSink::new();
        sink.emit(make_fatal());
        assert!(sink.has_fatal());
        assert_eq!(sink.error_count(), 1);
    }

    #[test]
    fn warning_not_counted() {
        let sink = DiagnosticSink::new();
        sink.emit(Diagnostic::warning(
            DiagnosticCode::GLOB_DRIFT,
            "drift",
            Backtrace::empty(),
        ));
        assert!(!sink.has_errors());
        assert_eq!(sink.diagnostics().len(), 1);
    }

    #[test]
    fn diagnostics_keep_emission_order() {
        let sink = DiagnosticSink::new();
        sink.emit(make_error());
        sink.emit(make_fatal());
        let codes: Vec<DiagnosticCode> = sink.diagnostics().iter().map(|d| d.code).collect();
        assert_eq!(
            codes,
            vec![DiagnosticCode::ARTIFACT_IO, DiagnosticCode::INCONSISTENT_GLOB]
        );
        assert_eq!(sink.error_count(), 2);
    }

    #[test]
    fn thread_safety() {
        use std::sync::Arc;
        use std::thread;

        let sink = Arc::new(DiagnosticSink::new());
        let mut handles = Vec::new();
        for _ in 0..8 {
            let sink = Arc::clone(&sink);
            handles.push(thread::spawn(move || {
                for _ in 0..50 {
                    sink.emit(make_error());
                }
            }));
        }
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(sink.error_count(), 400);
        assert_eq!(sink.diagnostics().len(), 400);
    }
}
