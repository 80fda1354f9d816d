//! The configuration files read during one pass.

use crate::backtrace::Frame;
use crate::source_file::SourceFile;
use std::io;
use std::ops::Range;
use std::path::{Path, PathBuf};

/// Handle to a file stored in a [`SourceDb`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct FileId(usize);

/// Owns the loaded configuration text and maps parser offsets to [`Frame`]s.
#[derive(Default)]
pub struct SourceDb {
    files: Vec<SourceFile>,
}

impl SourceDb {
    /// Creates an empty database.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads `path` from disk.
    pub fn load_file(&mut self, path: &Path) -> Result<FileId, io::Error> {
        let content = std::fs::read_to_string(path)?;
        Ok(self.add_source(path, content))
    }

    /// Adds in-memory text under `name`, which is shown in backtraces.
    pub fn add_source(&mut self, name: impl Into<PathBuf>, content: String) -> FileId {
        self.files.push(SourceFile::new(name.into(), content));
        FileId(self.files.len() - 1)
    }

    /// Returns the file behind `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` came from another database.
    pub fn get_file(&self, id: FileId) -> &SourceFile {
        &self.files[id.0]
    }

    /// Builds the frame for a command named `name` whose text starts at
    /// `span.start` in `file`.
    pub fn frame_at(&self, file: FileId, span: Range<usize>, name: &str) -> Frame {
        let source = self.get_file(file);
        let line = source.line_of(span.start);
        Frame::new(source.path.clone(), line as i64, name)
    }
}
