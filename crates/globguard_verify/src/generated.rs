//! Generated files that are only rewritten when their content changes.

use std::path::{Path, PathBuf};

use crate::error::VerifyError;

/// A file whose content is assembled in memory and written on [`commit`].
///
/// With copy-if-different enabled, committing content identical to what is
/// already on disk leaves the file and its modification time untouched, so
/// that tools watching the file do not see a spurious change. Changed content
/// goes through a sibling `.tmp` file and a rename.
///
/// [`commit`]: GeneratedFile::commit
pub struct GeneratedFile {
    path: PathBuf,
    content: String,
    copy_if_different: bool,
}

impl GeneratedFile {
    /// Starts a new, empty generated file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            content: String::new(),
            copy_if_different: false,
        }
    }

    /// Enables or disables copy-if-different.
    pub fn copy_if_different(mut self, enabled: bool) -> Self {
        self.copy_if_different = enabled;
        self
    }

    /// The destination path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends text to the pending content.
    pub fn push_str(&mut self, text: &str) {
        self.content.push_str(text);
    }

    /// The pending content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Writes the content to disk. Returns `false` if the file was left
    /// untouched because it already had this content.
    pub fn commit(self) -> Result<bool, VerifyError> {
        if self.copy_if_different {
            if let Ok(existing) = std::fs::read(&self.path) {
                if existing == self.content.as_bytes() {
                    tracing::debug!(path = %self.path.display(), "generated file unchanged");
                    return Ok(false);
                }
            }
        }

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        std::fs::write(&tmp, self.content.as_bytes()).map_err(|e| VerifyError::Io {
            path: tmp.clone(),
            source: e,
        })?;
        if let Err(e) = std::fs::rename(&tmp, &self.path) {
            std::fs::remove_file(&tmp).ok();
            return Err(VerifyError::Io {
                path: self.path,
                source: e,
            });
        }
        tracing::debug!(path = %self.path.display(), "generated file written");
        Ok(true)
    }
}
