//! A configuration file held in memory with a line index.

use globguard_common::ContentHash;
use std::path::PathBuf;

/// The text of one configuration file.
///
/// Line starts are computed once on load; the TOML parser reports byte
/// offsets and backtraces want line numbers.
pub struct SourceFile {
    /// Path the text was read from, or a synthetic name.
    pub path: PathBuf,
    /// The full text.
    pub content: String,
    /// Hash of `content`, recorded in the glob manifest.
    pub content_hash: ContentHash,
    line_starts: Vec<usize>,
}

impl SourceFile {
    /// Indexes `content` read from `path`.
    pub fn new(path: PathBuf, content: String) -> Self {
        let line_starts = std::iter::once(0)
            .chain(content.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        let content_hash = ContentHash::from_bytes(content.as_bytes());
        Self {
            path,
            content,
            content_hash,
            line_starts,
        }
    }

    /// Returns the 1-indexed line containing `offset`.
    ///
    /// Offsets past the end map to the last line.
    pub fn line_of(&self, offset: usize) -> usize {
        self.line_starts.partition_point(|&start| start <= offset)
    }

    /// Number of lines, counting a trailing partial line.
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}
