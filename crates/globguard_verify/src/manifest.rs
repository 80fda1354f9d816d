//! Persistent record of the glob cache between runs.
//!
//! The manifest is stored as `GlobCache.json` next to the verification
//! script. `globguard check` and `globguard list` read it instead of
//! re-evaluating the configuration, and `configure` compares against it to
//! report globs whose results moved since the last run.

use std::path::{Path, PathBuf};

use globguard_common::ContentHash;
use serde::{Deserialize, Serialize};

use crate::conflict::GlobConflict;
use crate::entry::{GlobCacheEntry, Provenance};
use crate::error::VerifyError;
use crate::manager::GlobVerificationManager;
use crate::script::CMAKE_FILES_DIR;

/// Name of the manifest file within `<outDir>/CMakeFiles`.
pub const MANIFEST_FILE: &str = "GlobCache.json";

/// Bumped whenever the on-disk layout changes. Older manifests are ignored.
const FORMAT_VERSION: u32 = 1;

/// Identifies the configuration file a manifest was produced from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigFingerprint {
    /// Path of the configuration file.
    pub path: PathBuf,
    /// Hash of its contents at configure time.
    pub hash: ContentHash,
}

impl ConfigFingerprint {
    /// Records that the configuration at `path` hashed to `hash`.
    pub fn new(path: impl Into<PathBuf>, hash: ContentHash) -> Self {
        Self {
            path: path.into(),
            hash,
        }
    }

    /// Returns `true` if the file at `path` still hashes to this fingerprint.
    ///
    /// A missing or unreadable file never matches.
    pub fn matches_file(&self) -> bool {
        ContentHash::from_file(&self.path).is_ok_and(|hash| hash == self.hash)
    }
}

/// One cache record as stored in the manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestGlob {
    /// Key fields and the files the glob resolved to.
    #[serde(flatten)]
    pub entry: GlobCacheEntry,
    /// Every request that received this result, in registration order.
    pub provenance: Vec<Provenance>,
}

/// Snapshot of a [`GlobVerificationManager`] written after configure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobManifest {
    /// Layout version of this file.
    pub format_version: u32,
    /// globguard version that produced the manifest.
    pub generator_version: String,
    /// Configuration file the globs were declared in, if any.
    pub config: Option<ConfigFingerprint>,
    /// Initialized cache records in key order.
    pub globs: Vec<ManifestGlob>,
}

impl GlobManifest {
    /// Captures every initialized record of `manager`.
    pub fn from_manager(
        manager: &GlobVerificationManager,
        config: Option<ConfigFingerprint>,
    ) -> Self {
        let globs = manager
            .records()
            .map(|(key, record)| ManifestGlob {
                entry: GlobCacheEntry::from_key(key, record.files().to_vec()),
                provenance: record.backtraces().to_vec(),
            })
            .collect();
        Self {
            format_version: FORMAT_VERSION,
            generator_version: manager.generator().version.clone(),
            config,
            globs,
        }
    }

    /// Replays the stored records into `manager` through
    /// [`GlobVerificationManager::add_cache_entry`].
    ///
    /// A hand-edited manifest can hold the same key twice with different
    /// files; that surfaces as the usual [`GlobConflict`].
    pub fn restore_into(&self, manager: &mut GlobVerificationManager) -> Result<(), GlobConflict> {
        for glob in &self.globs {
            for prov in &glob.provenance {
                manager.add_cache_entry(&glob.entry, &prov.variable, &prov.backtrace)?;
            }
        }
        Ok(())
    }

    /// Returns the manifest path for a build output directory.
    pub fn path(out_dir: &Path) -> PathBuf {
        out_dir.join(CMAKE_FILES_DIR).join(MANIFEST_FILE)
    }

    /// Loads the manifest from `out_dir`, returning `None` if it is missing,
    /// unreadable, or written in another format version.
    pub fn load(out_dir: &Path) -> Option<Self> {
        let path = Self::path(out_dir);
        let content = std::fs::read_to_string(&path).ok()?;
        match Self::from_json(&content) {
            Ok(manifest) if manifest.format_version == FORMAT_VERSION => Some(manifest),
            Ok(manifest) => {
                tracing::debug!(
                    found = manifest.format_version,
                    expected = FORMAT_VERSION,
                    "ignoring glob manifest with another format version"
                );
                None
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "ignoring unreadable glob manifest");
                None
            }
        }
    }

    /// Parses a manifest from JSON text.
    pub fn from_json(content: &str) -> Result<Self, VerifyError> {
        serde_json::from_str(content).map_err(|e| VerifyError::ManifestParse {
            reason: e.to_string(),
        })
    }

    /// Writes the manifest into `out_dir`, creating `CMakeFiles` if needed.
    pub fn save(&self, out_dir: &Path) -> Result<(), VerifyError> {
        let dir = out_dir.join(CMAKE_FILES_DIR);
        std::fs::create_dir_all(&dir).map_err(|e| VerifyError::Io {
            path: dir.clone(),
            source: e,
        })?;
        let path = dir.join(MANIFEST_FILE);
        let json = serde_json::to_string_pretty(self).map_err(|e| VerifyError::Serialization {
            reason: e.to_string(),
        })?;
        std::fs::write(&path, json).map_err(|e| VerifyError::Io { path, source: e })
    }

    /// Returns the number of stored globs.
    pub fn len(&self) -> usize {
        self.globs.len()
    }

    /// Returns `true` if the manifest stores no globs.
    pub fn is_empty(&self) -> bool {
        self.globs.is_empty()
    }
}
