//! Diagnostic rendering for terminal output.

use crate::diagnostic::Diagnostic;
use std::path::PathBuf;

/// Trait for rendering diagnostics into formatted output strings.
pub trait DiagnosticRenderer {
    /// Renders a single diagnostic into a formatted string.
    fn render(&self, diag: &Diagnostic) -> String;
}

/// Renders diagnostics in a compiler-style terminal format.
///
/// ```text
/// fatal error[E101]: The glob expression
///  file(GLOB SOURCES LIST_DIRECTORIES false "/work/demo/src/*.c")
/// was already present in the glob cache ...
///   --> globguard.toml:12 (glob)
///    = note: ...
/// ```
pub struct TerminalRenderer {
    /// Whether to use ANSI color codes in output.
    pub color: bool,
    /// Directory that frame paths are shown relative to.
    pub top_source: Option<PathBuf>,
}

impl TerminalRenderer {
    /// Creates a new terminal renderer.
    pub fn new(color: bool, top_source: Option<PathBuf>) -> Self {
        Self { color, top_source }
    }

    fn paint(&self, text: &str, ansi: &str) -> String {
        if self.color {
            format!("\x1b[{ansi}m{text}\x1b[0m")
        } else {
            text.to_string()
        }
    }
}

impl DiagnosticRenderer for TerminalRenderer {
    fn render(&self, diag: &Diagnostic) -> String {
        let mut out = String::new();

        let ansi = if diag.severity.is_error() { "1;31" } else { "1;33" };
        let header = format!("{}[{}]", diag.severity, diag.code);
        out.push_str(&format!("{}: {}\n", self.paint(&header, ansi), diag.message));

        for (depth, frame) in diag.backtrace.frames().enumerate() {
            let frame = match &self.top_source {
                Some(base) => frame.relative_to(base),
                None => frame.clone(),
            };
            if depth == 0 {
                out.push_str(&format!("  --> {frame}\n"));
            } else {
                out.push_str(&format!("      called from {frame}\n"));
            }
        }

        for note in &diag.notes {
            out.push_str(&format!("   = note: {note}\n"));
        }
        for help in &diag.help {
            out.push_str(&format!("   = help: {help}\n"));
        }

        out
    }
}
