//! The per-pass glob verification cache.
//!
//! [`GlobVerificationManager`] maps each [`GlobKey`] to the files it resolved
//! to and the call sites that asked for it. It is owned by one configuration
//! pass: rules register globs as they evaluate them, the driver writes the
//! verification artifacts once at the end, and [`reset`] starts over.
//!
//! [`reset`]: GlobVerificationManager::reset

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use globguard_diagnostics::{Diagnostic, DiagnosticCode, Messenger};
use globguard_source::Backtrace;

use crate::conflict::GlobConflict;
use crate::entry::{GlobCacheEntry, GlobRecord, Provenance};
use crate::error::VerifyError;
use crate::generated::GeneratedFile;
use crate::key::GlobKey;
use crate::script::{
    self, GeneratorInfo, CMAKE_FILES_DIR, VERIFY_SCRIPT_FILE, VERIFY_STAMP_FILE,
};

/// Cache of every glob evaluated during one configuration pass.
///
/// Insertion is `&mut self`: a pass has a single writer. Drivers that resolve
/// globs on several threads must funnel the results through one owner.
#[derive(Debug)]
pub struct GlobVerificationManager {
    cache: BTreeMap<GlobKey, GlobRecord>,
    generator: GeneratorInfo,
    verify_script: Option<PathBuf>,
    verify_stamp: Option<PathBuf>,
}

impl GlobVerificationManager {
    /// Creates an empty cache that stamps artifacts with the running globguard version.
    pub fn new() -> Self {
        Self::with_generator(GeneratorInfo::current())
    }

    /// Creates an empty cache that stamps artifacts with `generator`.
    pub fn with_generator(generator: GeneratorInfo) -> Self {
        Self {
            cache: BTreeMap::new(),
            generator,
            verify_script: None,
            verify_stamp: None,
        }
    }

    /// Records that `variable`, requested at `backtrace`, received the
    /// result of `entry`.
    ///
    /// The first request for a key stores its files. Later requests with the
    /// same files only add their provenance. A later request with different
    /// files leaves the cache unchanged and returns a [`GlobConflict`] listing
    /// the earlier requests and pointing at this one.
    pub fn add_cache_entry(
        &mut self,
        entry: &GlobCacheEntry,
        variable: &str,
        backtrace: &Backtrace,
    ) -> Result<(), GlobConflict> {
        let key = entry.key();
        let provenance = Provenance {
            variable: variable.to_string(),
            backtrace: backtrace.clone(),
        };

        let record = self.cache.entry(key.clone()).or_default();
        if !record.initialized {
            record.files = entry.files.clone();
            record.initialized = true;
            record.backtraces.push(provenance);
        } else if record.files != entry.files {
            tracing::debug!(expression = key.expression(), variable, "glob result conflict");
            return Err(GlobConflict {
                glob_command: key.glob_command(variable),
                previous: record.backtraces.clone(),
                backtrace: backtrace.clone(),
            });
        } else {
            record.backtraces.push(provenance);
        }
        Ok(())
    }

    /// Returns every initialized entry in key order.
    pub fn get_cache_entries(&self) -> Vec<GlobCacheEntry> {
        self.records()
            .map(|(key, record)| GlobCacheEntry::from_key(key, record.files.clone()))
            .collect()
    }

    /// Iterates initialized records in key order.
    pub fn records(&self) -> impl Iterator<Item = (&GlobKey, &GlobRecord)> {
        self.cache.iter().filter(|(_, record)| record.initialized)
    }

    /// Returns the number of keys in the cache.
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    /// Returns `true` if no glob has been registered.
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Clears the cache and forgets any written artifacts.
    pub fn reset(&mut self) {
        self.cache.clear();
        self.verify_script = None;
        self.verify_stamp = None;
    }

    /// Returns `true` if this pass produced both the script and the stamp,
    /// i.e. the build should run the verification step.
    pub fn do_write_verify_target(&self) -> bool {
        self.verify_script.is_some() && self.verify_stamp.is_some()
    }

    /// Path of the verification script written in this pass.
    pub fn verify_script(&self) -> Option<&Path> {
        self.verify_script.as_deref()
    }

    /// Path of the stamp file written in this pass.
    pub fn verify_stamp(&self) -> Option<&Path> {
        self.verify_stamp.as_deref()
    }

    /// The generator recorded in artifact headers.
    pub fn generator(&self) -> &GeneratorInfo {
        &self.generator
    }

    /// Renders the verification script that would be written for `out_dir`.
    pub fn render_script(&self, out_dir: &Path, messenger: &dyn Messenger) -> String {
        let stamp = out_dir.join(CMAKE_FILES_DIR).join(VERIFY_STAMP_FILE);
        let mut out = String::new();
        script::write_header(&mut out, &self.generator);
        for (key, record) in self.records() {
            script::write_entry(&mut out, key, record, &stamp, messenger);
        }
        out
    }

    /// Writes `<out_dir>/CMakeFiles/VerifyGlobs.cmake` and
    /// `<out_dir>/CMakeFiles/cmake.verify_globs`.
    ///
    /// An empty cache writes nothing and succeeds. The script is written
    /// copy-if-different; the stamp is always rewritten after it. Failures
    /// are issued as errors through `messenger` and returned; the artifact
    /// paths are only recorded when both files were written, and paths from
    /// an earlier save are forgotten once a new save starts.
    pub fn save_verification_script(
        &mut self,
        out_dir: &Path,
        messenger: &dyn Messenger,
    ) -> Result<(), VerifyError> {
        if self.cache.is_empty() {
            return Ok(());
        }
        self.verify_script = None;
        self.verify_stamp = None;

        let files_dir = out_dir.join(CMAKE_FILES_DIR);
        let script_path = files_dir.join(VERIFY_SCRIPT_FILE);
        let stamp_path = files_dir.join(VERIFY_STAMP_FILE);

        std::fs::create_dir_all(&files_dir).map_err(|e| {
            report_io(
                messenger,
                "Unable to create verification directory.",
                &files_dir,
                e,
            )
        })?;

        let mut script_file = GeneratedFile::new(&script_path).copy_if_different(true);
        script_file.push_str(&self.render_script(out_dir, messenger));
        if let Err(err) = script_file.commit() {
            return Err(report_failure(
                messenger,
                "Unable to open verification script file for save.",
                &script_path,
                err,
            ));
        }

        std::fs::write(&stamp_path, script::stamp_contents(&self.generator)).map_err(|e| {
            report_io(
                messenger,
                "Unable to open verification stamp file for write.",
                &stamp_path,
                e,
            )
        })?;

        tracing::info!(
            script = %script_path.display(),
            globs = self.records().count(),
            "wrote glob verification script"
        );
        self.verify_script = Some(script_path);
        self.verify_stamp = Some(stamp_path);
        Ok(())
    }
}

impl Default for GlobVerificationManager {
    fn default() -> Self {
        Self::new()
    }
}

fn report_io(
    messenger: &dyn Messenger,
    message: &str,
    path: &Path,
    err: std::io::Error,
) -> VerifyError {
    report_failure(
        messenger,
        message,
        path,
        VerifyError::Io {
            path: path.to_path_buf(),
            source: err,
        },
    )
}

fn report_failure(
    messenger: &dyn Messenger,
    message: &str,
    path: &Path,
    err: VerifyError,
) -> VerifyError {
    messenger.issue(
        Diagnostic::error(
            DiagnosticCode::ARTIFACT_IO,
            format!("{message} {}", path.display()),
            Backtrace::empty(),
        )
        .with_note(err.to_string()),
    );
    err
}
