//! Shared pipeline helpers for CLI commands.
//!
//! Contains the project lookup used by every command: finding
//! `globguard.toml`, loading it, and working out the build output directory,
//! plus diagnostic rendering.

use std::path::{Path, PathBuf};

use globguard_config::{load_config_file, LoadedConfig, CONFIG_FILE};
use globguard_diagnostics::{DiagnosticRenderer, SinkMessenger, TerminalRenderer};
use globguard_glob::GlobRequest;
use globguard_source::SourceDb;
use globguard_verify::GlobCacheEntry;

use crate::GlobalArgs;

/// A loaded project: where it lives, its configuration, and its build directory.
pub struct Project {
    /// Directory containing the configuration file.
    pub root: PathBuf,
    /// The configuration, registered in `source_db`.
    pub loaded: LoadedConfig,
    /// Source database holding the configuration text.
    pub source_db: SourceDb,
    /// Build output directory.
    pub out_dir: PathBuf,
}

impl Project {
    /// Loads the project selected by the global flags.
    ///
    /// `output_dir` overrides `project.output_dir`; both are relative to the
    /// project root unless absolute.
    pub fn load(
        global: &GlobalArgs,
        output_dir: Option<&str>,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let config_path = resolve_config_path(global)?;
        let root = config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));

        let mut source_db = SourceDb::new();
        let loaded = load_config_file(&config_path, &mut source_db)
            .map_err(|e| format!("{}: {e}", config_path.display()))?;
        let out_dir = root.join(output_dir.unwrap_or(&loaded.config.project.output_dir));

        tracing::debug!(
            root = %root.display(),
            out_dir = %out_dir.display(),
            "project loaded"
        );
        Ok(Self {
            root,
            loaded,
            source_db,
            out_dir,
        })
    }

    /// Creates a messenger that shows paths relative to the project root.
    pub fn messenger(&self) -> SinkMessenger {
        SinkMessenger::with_top_source(&self.root)
    }
}

/// Walks up from `start` looking for the nearest directory containing `globguard.toml`.
///
/// Returns the directory containing `globguard.toml`, or an error if none is found.
pub fn find_project_root(start: &Path) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let mut current = start.to_path_buf();
    loop {
        if current.join(CONFIG_FILE).exists() {
            return Ok(current);
        }
        if !current.pop() {
            return Err(format!(
                "could not find {CONFIG_FILE} in {} or any parent directory",
                start.display()
            )
            .into());
        }
    }
}

/// Resolves the configuration file from global CLI args.
///
/// If `--config` is specified, uses that path (directory → its
/// `globguard.toml`). Otherwise walks up from the current directory. The
/// result is absolute so backtraces and script paths are stable.
pub fn resolve_config_path(global: &GlobalArgs) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let cwd = std::env::current_dir()?;
    match global.config {
        Some(ref config_path) => {
            let p = cwd.join(config_path);
            if p.is_dir() {
                Ok(p.join(CONFIG_FILE))
            } else {
                Ok(p)
            }
        }
        None => Ok(find_project_root(&cwd)?.join(CONFIG_FILE)),
    }
}

/// Renders all diagnostics collected by `messenger` to stderr.
///
/// Returns the number of diagnostics rendered.
pub fn render_diagnostics(messenger: &SinkMessenger, color: bool) -> usize {
    let diagnostics = messenger.sink().diagnostics();
    let renderer = TerminalRenderer::new(color, messenger.top_source().cloned());
    for diag in &diagnostics {
        eprint!("{}", renderer.render(diag));
    }
    diagnostics.len()
}

/// Pairs a resolved request with its result.
pub fn cache_entry(request: &GlobRequest, files: Vec<String>) -> GlobCacheEntry {
    GlobCacheEntry {
        recurse: request.recurse,
        list_directories: request.list_directories,
        follow_symlinks: request.follow_symlinks,
        relative: request.relative.clone(),
        expression: request.expression.clone(),
        files,
    }
}

/// Rebuilds the request that produced a recorded entry.
pub fn glob_request(entry: &GlobCacheEntry) -> GlobRequest {
    GlobRequest::new(entry.expression.clone())
        .recurse(entry.recurse)
        .list_directories(entry.list_directories)
        .follow_symlinks(entry.follow_symlinks)
        .relative(entry.relative.clone())
}

/// Updates the modification time of `path` if it exists; never creates it.
///
/// Returns `Ok(false)` when the file is absent.
pub fn touch_nocreate(path: &Path) -> std::io::Result<bool> {
    if !path.exists() {
        return Ok(false);
    }
    filetime::set_file_mtime(path, filetime::FileTime::now())?;
    Ok(true)
}
