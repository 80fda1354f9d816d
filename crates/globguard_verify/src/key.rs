//! Identity of one glob query.

use serde::{Deserialize, Serialize};

/// The identity of one glob query.
///
/// Keys order lexicographically over `(recurse, list_directories,
/// follow_symlinks, relative, expression)` with `false < true` and byte-wise
/// strings. The verification script is emitted in this order, so it must
/// stay stable across runs.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub struct GlobKey {
    recurse: bool,
    list_directories: bool,
    follow_symlinks: bool,
    relative: String,
    expression: String,
}

impl GlobKey {
    /// Creates a key from the five glob parameters.
    pub fn new(
        recurse: bool,
        list_directories: bool,
        follow_symlinks: bool,
        relative: impl Into<String>,
        expression: impl Into<String>,
    ) -> Self {
        Self {
            recurse,
            list_directories,
            follow_symlinks,
            relative: relative.into(),
            expression: expression.into(),
        }
    }

    /// Whether subdirectories are traversed.
    pub fn recurse(&self) -> bool {
        self.recurse
    }

    /// Whether directories are reported as matches.
    pub fn list_directories(&self) -> bool {
        self.list_directories
    }

    /// Whether symlinked directories are followed while recursing.
    pub fn follow_symlinks(&self) -> bool {
        self.follow_symlinks
    }

    /// Base directory for relative results, empty when results are absolute.
    pub fn relative(&self) -> &str {
        &self.relative
    }

    /// The glob pattern.
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// Appends the `file(GLOB ...)` command that re-runs this query into
    /// `result_var`.
    pub fn write_glob_command(&self, out: &mut String, result_var: &str) {
        out.push_str(if self.recurse {
            "file(GLOB_RECURSE "
        } else {
            "file(GLOB "
        });
        out.push_str(result_var);
        out.push(' ');
        if self.recurse && self.follow_symlinks {
            out.push_str("FOLLOW_SYMLINKS ");
        }
        out.push_str(&format!("LIST_DIRECTORIES {} ", self.list_directories));
        if !self.relative.is_empty() {
            out.push_str(&format!("RELATIVE \"{}\" ", self.relative));
        }
        out.push_str(&format!("\"{}\")", self.expression));
    }

    /// Returns the `file(GLOB ...)` command as a new string.
    pub fn glob_command(&self, result_var: &str) -> String {
        let mut out = String::new();
        self.write_glob_command(&mut out, result_var);
        out
    }
}
