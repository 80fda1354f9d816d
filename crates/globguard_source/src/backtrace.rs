//! Call-site backtraces attached to glob requests and diagnostics.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// One call site: a file, a line within it, and the command invoked there.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Frame {
    /// Path of the file containing the call.
    pub file_path: PathBuf,
    /// 1-indexed line of the call, `0` when only the file is known, or
    /// [`Frame::DEFERRED_LINE`] for calls deferred to the end of a file.
    pub line: i64,
    /// Name of the command that was invoked (e.g. `glob`).
    pub name: String,
}

impl Frame {
    /// Line marker for a call whose execution was deferred.
    pub const DEFERRED_LINE: i64 = -1;

    /// Creates a frame for a call at `line` in `file_path`.
    pub fn new(file_path: impl Into<PathBuf>, line: i64, name: impl Into<String>) -> Self {
        Self {
            file_path: file_path.into(),
            line,
            name: name.into(),
        }
    }

    /// Returns `true` if this frame marks a deferred call.
    pub fn is_deferred(&self) -> bool {
        self.line == Self::DEFERRED_LINE
    }

    /// Returns a copy whose path is relative to `base` when it lies under it.
    pub fn relative_to(&self, base: &Path) -> Frame {
        match self.file_path.strip_prefix(base) {
            Ok(rel) if !rel.as_os_str().is_empty() => Frame {
                file_path: rel.to_path_buf(),
                line: self.line,
                name: self.name.clone(),
            },
            _ => self.clone(),
        }
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.file_path.display())?;
        if self.line > 0 {
            write!(f, ":{}", self.line)?;
            if !self.name.is_empty() {
                write!(f, " ({})", self.name)?;
            }
        } else if self.is_deferred() {
            write!(f, ":DEFERRED")?;
        }
        Ok(())
    }
}

/// A stack of call sites, innermost call on top.
///
/// Empty backtraces are valid and mean "no known location".
#[derive(Clone, Default, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct Backtrace {
    frames: Vec<Frame>,
}

impl Backtrace {
    /// Creates an empty backtrace.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates a backtrace consisting of a single call.
    pub fn new(frame: Frame) -> Self {
        Self {
            frames: vec![frame],
        }
    }

    /// Returns this backtrace with `frame` pushed as the new innermost call.
    pub fn push(mut self, frame: Frame) -> Self {
        self.frames.push(frame);
        self
    }

    /// Returns the innermost call, if any.
    pub fn top(&self) -> Option<&Frame> {
        self.frames.last()
    }

    /// Returns `true` if no call site is recorded.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Iterates from the innermost call outwards.
    pub fn frames(&self) -> impl Iterator<Item = &Frame> {
        self.frames.iter().rev()
    }
}
