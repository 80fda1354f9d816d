//! Evaluation of glob requests against the filesystem.

use std::path::{Path, PathBuf};

use glob::{MatchOptions, Pattern};
use walkdir::WalkDir;

use crate::error::GlobError;
use crate::path::{literal_prefix, relative_path, to_glob_string};
use crate::request::GlobRequest;

/// Resolves a [`GlobRequest`] into the ordered list of matching paths.
///
/// Implementations must be deterministic: the same request against the same
/// filesystem state must yield the same list, element for element.
pub trait GlobResolver {
    /// Resolves the request.
    fn resolve(&self, request: &GlobRequest) -> Result<Vec<String>, GlobError>;
}

/// Resolves globs against the real filesystem.
///
/// `*`, `?` and `[...]` never match a `/`. Non-recursive globs match the
/// whole expression; recursive globs walk the longest wildcard-free
/// directory of the expression and match every entry below it against
/// `<directory pattern>/**/<file pattern>`. Results are sorted byte-wise.
#[derive(Clone, Copy, Debug, Default)]
pub struct FsResolver;

impl FsResolver {
    /// Creates a filesystem resolver.
    pub fn new() -> Self {
        Self
    }

    fn match_options() -> MatchOptions {
        MatchOptions {
            case_sensitive: true,
            require_literal_separator: true,
            require_literal_leading_dot: false,
        }
    }

    fn resolve_flat(&self, request: &GlobRequest) -> Result<Vec<PathBuf>, GlobError> {
        let paths = glob::glob_with(&request.expression, Self::match_options()).map_err(|e| {
            GlobError::Pattern {
                expression: request.expression.clone(),
                reason: e.msg.to_string(),
            }
        })?;

        let mut matches = Vec::new();
        for entry in paths {
            let path = entry.map_err(|e| GlobError::Io {
                path: e.path().to_path_buf(),
                source: e.into(),
            })?;
            if path.is_dir() && !request.list_directories {
                continue;
            }
            matches.push(path);
        }
        Ok(matches)
    }

    fn resolve_recursive(&self, request: &GlobRequest) -> Result<Vec<PathBuf>, GlobError> {
        let expression = request.expression.as_str();
        let pattern_text = match expression.rfind('/') {
            Some(0) => format!("/**/{}", &expression[1..]),
            Some(idx) => format!("{}/**/{}", &expression[..idx], &expression[idx + 1..]),
            None => format!("**/{expression}"),
        };
        let pattern = Pattern::new(&pattern_text).map_err(|e| GlobError::Pattern {
            expression: request.expression.clone(),
            reason: e.msg.to_string(),
        })?;

        let (root, _) = literal_prefix(expression);
        if !root.is_dir() {
            tracing::debug!(root = %root.display(), "glob root does not exist");
            return Ok(Vec::new());
        }

        let follow = request.follow_symlinks;
        let mut matches = Vec::new();
        for entry in WalkDir::new(&root).min_depth(1).follow_links(follow) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.loop_ancestor().is_some() => {
                    let path = e.path().map(to_glob_string).unwrap_or_default();
                    tracing::warn!(%path, "skipping cyclic symlink while resolving glob");
                    continue;
                }
                Err(e) => {
                    return Err(GlobError::Walk {
                        root: root.clone(),
                        reason: e.to_string(),
                    })
                }
            };
            if entry.file_type().is_dir() && !request.list_directories {
                continue;
            }
            if pattern.matches_path_with(entry.path(), Self::match_options()) {
                matches.push(entry.into_path());
            }
        }
        Ok(matches)
    }
}

impl GlobResolver for FsResolver {
    fn resolve(&self, request: &GlobRequest) -> Result<Vec<String>, GlobError> {
        let matches = if request.recurse {
            self.resolve_recursive(request)?
        } else {
            self.resolve_flat(request)?
        };

        let base = Path::new(&request.relative);
        let mut files: Vec<String> = matches
            .iter()
            .map(|path| {
                if request.relative.is_empty() {
                    to_glob_string(path)
                } else {
                    to_glob_string(&relative_path(base, path))
                }
            })
            .collect();
        files.sort();
        files.dedup();

        tracing::debug!(
            expression = %request.expression,
            recurse = request.recurse,
            matches = files.len(),
            "resolved glob"
        );
        Ok(files)
    }
}
