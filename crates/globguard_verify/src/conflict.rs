//! Reporting of contradictory glob results within one pass.

use std::fmt;

use globguard_diagnostics::{Diagnostic, DiagnosticCode, Messenger};
use globguard_source::Backtrace;

use crate::entry::Provenance;

/// The same glob resolved to two different file lists in one pass.
///
/// Returned by [`add_cache_entry`](crate::GlobVerificationManager::add_cache_entry)
/// instead of aborting; the caller turns it into a fatal diagnostic.
///
/// `backtrace` is a configuration call stack, not a
/// `std::backtrace::Backtrace`; the `Error` impl provides no backtrace.
#[derive(Debug, Clone)]
pub struct GlobConflict {
    /// The glob rendered with the conflicting request's variable as result.
    pub glob_command: String,
    /// Every earlier request for the same glob.
    pub previous: Vec<Provenance>,
    /// Where the conflicting request was made.
    pub backtrace: Backtrace,
}

impl fmt::Display for GlobConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "the glob expression {} changed during the configuration run",
            self.glob_command
        )
    }
}

impl std::error::Error for GlobConflict {}

impl GlobConflict {
    /// Builds the fatal diagnostic for this conflict, rendering each earlier
    /// request's backtrace title through `messenger`.
    pub fn to_diagnostic(&self, messenger: &dyn Messenger) -> Diagnostic {
        let mut message = String::from("The glob expression\n ");
        message.push_str(&self.glob_command);
        message.push_str(
            "\nwas already present in the glob cache but the directory \
             contents have changed during the configuration run.\n",
        );
        message.push_str("Matching glob expressions:");
        for prov in &self.previous {
            message.push_str("\n  ");
            message.push_str(&prov.variable);
            message.push_str(&messenger.backtrace_title(&prov.backtrace));
        }
        Diagnostic::fatal(
            DiagnosticCode::INCONSISTENT_GLOB,
            message,
            self.backtrace.clone(),
        )
    }

    /// Issues the fatal diagnostic for this conflict through `messenger`.
    pub fn report(&self, messenger: &dyn Messenger) {
        messenger.issue(self.to_diagnostic(messenger));
    }
}
