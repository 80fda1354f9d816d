//! Cache records and the exchange format used to populate them.

use globguard_source::Backtrace;
use serde::{Deserialize, Serialize};

use crate::key::GlobKey;

/// One resolved glob, as produced by a resolver or read back from the cache.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct GlobCacheEntry {
    /// Whether subdirectories are traversed.
    pub recurse: bool,
    /// Whether directories are reported as matches.
    pub list_directories: bool,
    /// Whether symlinked directories are followed while recursing.
    pub follow_symlinks: bool,
    /// Base directory for relative results, empty when results are absolute.
    pub relative: String,
    /// The glob pattern.
    pub expression: String,
    /// The matches, in resolver order.
    pub files: Vec<String>,
}

impl GlobCacheEntry {
    /// Returns the key identifying this entry's query.
    pub fn key(&self) -> GlobKey {
        GlobKey::new(
            self.recurse,
            self.list_directories,
            self.follow_symlinks,
            self.relative.clone(),
            self.expression.clone(),
        )
    }

    pub(crate) fn from_key(key: &GlobKey, files: Vec<String>) -> Self {
        Self {
            recurse: key.recurse(),
            list_directories: key.list_directories(),
            follow_symlinks: key.follow_symlinks(),
            relative: key.relative().to_string(),
            expression: key.expression().to_string(),
            files,
        }
    }
}

/// A call site that requested a glob: the variable it stored the result in
/// and the backtrace of the request.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Provenance {
    /// The variable that received the glob result.
    pub variable: String,
    /// Where the request was made.
    pub backtrace: Backtrace,
}

/// The accumulated state of one key within a configuration pass.
#[derive(Clone, Default, Debug)]
pub struct GlobRecord {
    pub(crate) initialized: bool,
    pub(crate) files: Vec<String>,
    pub(crate) backtraces: Vec<Provenance>,
}

impl GlobRecord {
    /// Whether a result has been recorded.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// The recorded matches.
    pub fn files(&self) -> &[String] {
        &self.files
    }

    /// Every call site that requested this glob, in request order.
    pub fn backtraces(&self) -> &[Provenance] {
        &self.backtraces
    }
}
