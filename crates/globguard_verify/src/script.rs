//! Text of the verification script and stamp file.

use std::path::Path;

use globguard_diagnostics::Messenger;

use crate::entry::GlobRecord;
use crate::key::GlobKey;

/// Subdirectory of the output directory holding the artifacts.
pub const CMAKE_FILES_DIR: &str = "CMakeFiles";
/// File name of the verification script.
pub const VERIFY_SCRIPT_FILE: &str = "VerifyGlobs.cmake";
/// File name of the stamp file.
pub const VERIFY_STAMP_FILE: &str = "cmake.verify_globs";

/// Result variable the script re-runs each glob into.
const NEW_GLOB_VAR: &str = "NEW_GLOB";

/// Identifies the tool that generated the artifacts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratorInfo {
    /// Tool name.
    pub name: String,
    /// `major.minor` version.
    pub version: String,
}

impl GeneratorInfo {
    /// Creates generator info with an explicit name and version.
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }

    /// The running build of globguard.
    pub fn current() -> Self {
        Self::new(
            "globguard",
            format!(
                "{}.{}",
                env!("CARGO_PKG_VERSION_MAJOR"),
                env!("CARGO_PKG_VERSION_MINOR")
            ),
        )
    }
}

impl Default for GeneratorInfo {
    fn default() -> Self {
        Self::current()
    }
}

/// Appends the script header and the policy pinning glob semantics.
pub(crate) fn write_header(out: &mut String, generator: &GeneratorInfo) {
    out.push_str(&format!(
        "# {} generated file: DO NOT EDIT!\n",
        generator.name
    ));
    out.push_str(&format!(
        "# Generated by {} Version {}\n",
        generator.name, generator.version
    ));
    out.push_str("cmake_policy(SET CMP0009 NEW)\n");
}

/// Appends the re-check block for one cache entry.
pub(crate) fn write_entry(
    out: &mut String,
    key: &GlobKey,
    record: &GlobRecord,
    stamp: &Path,
    messenger: &dyn Messenger,
) {
    out.push('\n');

    for prov in record.backtraces() {
        out.push_str("# ");
        out.push_str(&prov.variable);
        out.push_str(&messenger.backtrace_title(&prov.backtrace));
        out.push('\n');
    }

    key.write_glob_command(out, NEW_GLOB_VAR);
    out.push('\n');

    out.push_str("set(OLD_GLOB\n");
    for file in record.files() {
        out.push_str(&format!("  \"{file}\"\n"));
    }
    out.push_str("  )\n");

    out.push_str("if(NOT \"${NEW_GLOB}\" STREQUAL \"${OLD_GLOB}\")\n");
    out.push_str("  message(\"-- GLOB mismatch!\")\n");
    out.push_str(&format!("  file(TOUCH_NOCREATE \"{}\")\n", stamp.display()));
    out.push_str("endif()\n");
}

/// The content written to the stamp file.
pub(crate) fn stamp_contents(generator: &GeneratorInfo) -> String {
    format!(
        "# This file is generated by {} for checking of the {VERIFY_SCRIPT_FILE} file\n",
        generator.name
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn current_generator_uses_crate_version() {
        let info = GeneratorInfo::current();
        assert_eq!(info.name, "globguard");
        assert_eq!(info.version.split('.').count(), 2);
    }

    #[test]
    fn header_lines() {
        let mut out = String::new();
        write_header(&mut out, &GeneratorInfo::new("globguard", "1.4"));
        assert_eq!(
            out,
            "# globguard generated file: DO NOT EDIT!\n\
             # Generated by globguard Version 1.4\n\
             cmake_policy(SET CMP0009 NEW)\n"
        );
    }

    #[test]
    fn stamp_is_one_comment_line() {
        let stamp = stamp_contents(&GeneratorInfo::new("globguard", "1.4"));
        assert!(stamp.starts_with("# "));
        assert!(stamp.contains("VerifyGlobs.cmake"));
        assert_eq!(stamp.lines().count(), 1);
    }
}
