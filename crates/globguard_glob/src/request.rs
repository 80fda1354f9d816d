//! The parameters of one glob query.

/// A glob query as issued by a configuration rule.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GlobRequest {
    /// Descend into subdirectories.
    pub recurse: bool,
    /// Report directories as matches.
    pub list_directories: bool,
    /// Follow symlinked directories while recursing. Ignored without `recurse`.
    pub follow_symlinks: bool,
    /// When non-empty, matches are reported relative to this directory.
    pub relative: String,
    /// The pattern, normally an absolute path with wildcards in it.
    pub expression: String,
}

impl GlobRequest {
    /// Creates a non-recursive request that does not list directories.
    pub fn new(expression: impl Into<String>) -> Self {
        Self {
            expression: expression.into(),
            ..Self::default()
        }
    }

    /// Sets recursion.
    pub fn recurse(mut self, recurse: bool) -> Self {
        self.recurse = recurse;
        self
    }

    /// Sets directory listing.
    pub fn list_directories(mut self, list: bool) -> Self {
        self.list_directories = list;
        self
    }

    /// Sets symlink following.
    pub fn follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    /// Sets the relative base directory.
    pub fn relative(mut self, relative: impl Into<String>) -> Self {
        self.relative = relative.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_fields() {
        let req = GlobRequest::new("/src/*.c")
            .recurse(true)
            .list_directories(true)
            .follow_symlinks(true)
            .relative("/src");
        assert!(req.recurse);
        assert!(req.list_directories);
        assert!(req.follow_symlinks);
        assert_eq!(req.relative, "/src");
        assert_eq!(req.expression, "/src/*.c");
    }

    #[test]
    fn defaults_are_off() {
        let req = GlobRequest::new("*.h");
        assert!(!req.recurse && !req.list_directories && !req.follow_symlinks);
        assert!(req.relative.is_empty());
    }
}
