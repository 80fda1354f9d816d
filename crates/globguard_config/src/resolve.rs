//! Turning glob declarations into requests with call-site backtraces.

use crate::loader::LoadedConfig;
use globguard_glob::path::to_glob_string;
use globguard_glob::GlobRequest;
use globguard_source::{Backtrace, SourceDb};
use std::path::Path;

/// Command name recorded in the frame of every declared glob.
const GLOB_COMMAND: &str = "glob";

/// A `[[glob]]` declaration ready to be resolved and cached.
#[derive(Debug, Clone)]
pub struct DeclaredGlob {
    /// Variable receiving the result.
    pub variable: String,
    /// Request with the expression and relative base made absolute.
    pub request: GlobRequest,
    /// Where the glob was declared.
    pub backtrace: Backtrace,
}

/// Builds one [`DeclaredGlob`] per `[[glob]]` entry, in file order.
///
/// Expressions and relative bases are joined onto `project_dir`; absolute
/// ones are kept as written. Each backtrace has a single frame at the line of
/// the entry's `variable` key.
pub fn resolve_globs(loaded: &LoadedConfig, project_dir: &Path, db: &SourceDb) -> Vec<DeclaredGlob> {
    loaded
        .config
        .globs
        .iter()
        .map(|decl| {
            let frame = db.frame_at(loaded.file, decl.variable.span(), GLOB_COMMAND);

            let mut request = GlobRequest::new(to_glob_string(&project_dir.join(&decl.expression)))
                .recurse(decl.recurse)
                .list_directories(decl.list_directories())
                .follow_symlinks(decl.follow_symlinks);
            if let Some(relative) = &decl.relative {
                request = request.relative(to_glob_string(&project_dir.join(relative)));
            }

            DeclaredGlob {
                variable: decl.variable().to_string(),
                request,
                backtrace: Backtrace::new(frame),
            }
        })
        .collect()
}
