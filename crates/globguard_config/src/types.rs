//! Configuration types deserialized from `globguard.toml`.

use serde::Deserialize;
use toml::Spanned;

/// The top-level project configuration parsed from `globguard.toml`.
#[derive(Debug, Deserialize)]
pub struct ProjectConfig {
    /// Project metadata and output location.
    pub project: ProjectMeta,
    /// Glob declarations, in file order.
    #[serde(default, rename = "glob")]
    pub globs: Vec<GlobDecl>,
}

/// The `[project]` table.
#[derive(Debug, Deserialize)]
pub struct ProjectMeta {
    /// Project name, shown in status output.
    pub name: String,
    /// Build output directory, relative to the project directory.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
}

fn default_output_dir() -> String {
    "build".to_string()
}

/// One `[[glob]]` entry.
#[derive(Debug, Deserialize)]
pub struct GlobDecl {
    /// Variable that receives the result. Its span locates the declaration.
    pub variable: Spanned<String>,
    /// Glob expression, relative to the project directory unless absolute.
    pub expression: String,
    /// Use `GLOB_RECURSE` instead of `GLOB`.
    #[serde(default)]
    pub recurse: bool,
    /// Report directories as matches. Defaults to `true` for `GLOB` and
    /// `false` for `GLOB_RECURSE`.
    #[serde(default)]
    pub list_directories: Option<bool>,
    /// Descend into symlinked directories. Only valid with `recurse`.
    #[serde(default)]
    pub follow_symlinks: bool,
    /// Directory the results are reported relative to.
    #[serde(default)]
    pub relative: Option<String>,
}

impl GlobDecl {
    /// Returns the effective `LIST_DIRECTORIES` setting.
    pub fn list_directories(&self) -> bool {
        self.list_directories.unwrap_or(!self.recurse)
    }

    /// Returns the variable name.
    pub fn variable(&self) -> &str {
        self.variable.get_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> ProjectConfig {
        toml::from_str(s).unwrap()
    }

    #[test]
    fn output_dir_defaults_to_build() {
        let config = parse("[project]\nname = \"demo\"\n");
        assert_eq!(config.project.output_dir, "build");
        assert!(config.globs.is_empty());
    }

    #[test]
    fn list_directories_default_depends_on_recurse() {
        let config = parse(
            r#"
[project]
name = "demo"

[[glob]]
variable = "A"
expression = "src/*"

[[glob]]
variable = "B"
expression = "src/*"
recurse = true

[[glob]]
variable = "C"
expression = "src/*"
recurse = true
list_directories = true
"#,
        );
        assert!(config.globs[0].list_directories());
        assert!(!config.globs[1].list_directories());
        assert!(config.globs[2].list_directories());
    }

    #[test]
    fn variable_span_points_into_source() {
        let src = "[project]\nname = \"demo\"\n\n[[glob]]\nvariable = \"SRCS\"\nexpression = \"*.c\"\n";
        let config = parse(src);
        let decl = &config.globs[0];
        assert_eq!(decl.variable(), "SRCS");
        assert_eq!(&src[decl.variable.span()], "\"SRCS\"");
    }

    #[test]
    fn unknown_project_field_is_ignored() {
        let config = parse("[project]\nname = \"demo\"\nversion = \"1.0\"\n");
        assert_eq!(config.project.name, "demo");
    }
}
