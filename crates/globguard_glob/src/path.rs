//! Path helpers shared by the resolver.

use std::path::{Component, Path, PathBuf};

/// Converts a path to the `/`-separated string form stored in glob results.
pub fn to_glob_string(path: &Path) -> String {
    let s = path.to_string_lossy();
    if cfg!(windows) {
        s.replace('\\', "/")
    } else {
        s.into_owned()
    }
}

/// Returns `path` expressed relative to `base`, stepping out with `..` where
/// the two diverge.
pub fn relative_path(base: &Path, path: &Path) -> PathBuf {
    let base: Vec<Component<'_>> = base.components().collect();
    let target: Vec<Component<'_>> = path.components().collect();
    let common = base
        .iter()
        .zip(target.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut rel = PathBuf::new();
    for _ in common..base.len() {
        rel.push("..");
    }
    for component in &target[common..] {
        rel.push(component.as_os_str());
    }
    rel
}

/// Splits a glob expression into the longest leading directory that
/// contains no wildcard and the remaining pattern.
pub fn literal_prefix(expression: &str) -> (PathBuf, &str) {
    let mut prefix_end = 0;
    for (idx, ch) in expression.char_indices() {
        if matches!(ch, '*' | '?' | '[') {
            break;
        }
        if ch == '/' {
            prefix_end = idx + 1;
        }
    }
    let prefix = &expression[..prefix_end];
    let root = if prefix.is_empty() {
        PathBuf::from(".")
    } else if prefix == "/" {
        PathBuf::from("/")
    } else {
        PathBuf::from(prefix.trim_end_matches('/'))
    };
    (root, &expression[prefix_end..])
}
