//! End-to-end tests for the `globguard` binary.
//!
//! Each test builds a throwaway project in a tempdir and drives the binary
//! through `configure`, `check`, and `list` with `--config` pointing at it,
//! so no test depends on the working directory.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

const CONFIG: &str = r#"[project]
name = "demo"

[[glob]]
variable = "SOURCES"
expression = "src/*.c"
list_directories = false

[[glob]]
variable = "HEADERS"
expression = "include/*.h"
recurse = true
relative = "include"
"#;

fn globguard_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_globguard"))
}

fn project() -> TempDir {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path();
    fs::write(root.join("globguard.toml"), CONFIG).unwrap();
    fs::create_dir_all(root.join("src")).unwrap();
    fs::create_dir_all(root.join("include/detail")).unwrap();
    fs::write(root.join("src/main.c"), "int main(void) { return 0; }\n").unwrap();
    fs::write(root.join("src/util.c"), "").unwrap();
    fs::write(root.join("include/util.h"), "").unwrap();
    fs::write(root.join("include/detail/impl.h"), "").unwrap();
    tmp
}

fn run(root: &Path, args: &[&str]) -> Output {
    Command::new(globguard_bin())
        .arg("--config")
        .arg(root)
        .arg("--color")
        .arg("never")
        .args(args)
        .output()
        .unwrap()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn configure_writes_verification_script() {
    let tmp = project();
    let root = tmp.path();
    let out = run(root, &["configure"]);
    assert!(out.status.success(), "{}", stderr(&out));
    assert!(stderr(&out).contains("Configuring demo"));
    assert!(stderr(&out).contains("2 glob(s), 4 file(s)"));

    let files_dir = root.join("build/CMakeFiles");
    let script = fs::read_to_string(files_dir.join("VerifyGlobs.cmake")).unwrap();
    assert!(script.starts_with("# globguard generated file: DO NOT EDIT!\n"));
    assert!(script.contains("cmake_policy(SET CMP0009 NEW)\n"));
    assert!(script.contains("# SOURCES at globguard.toml:5 (glob)\n"));
    assert!(script.contains("# HEADERS at globguard.toml:10 (glob)\n"));
    assert!(script.contains("file(GLOB_RECURSE NEW_GLOB LIST_DIRECTORIES false RELATIVE \""));
    assert!(script.contains("  \"detail/impl.h\"\n  \"util.h\"\n  )\n"));
    assert!(script.contains("message(\"-- GLOB mismatch!\")"));

    let stamp = fs::read_to_string(files_dir.join("cmake.verify_globs")).unwrap();
    assert!(stamp.starts_with("# This file is generated by globguard"));
    assert!(files_dir.join("GlobCache.json").exists());
}

#[test]
fn reconfigure_keeps_identical_script() {
    use filetime::FileTime;

    let tmp = project();
    let root = tmp.path();
    assert!(run(root, &["configure"]).status.success());

    let script = root.join("build/CMakeFiles/VerifyGlobs.cmake");
    let old = FileTime::from_unix_time(1_000_000, 0);
    filetime::set_file_mtime(&script, old).unwrap();

    assert!(run(root, &["configure"]).status.success());
    let meta = fs::metadata(&script).unwrap();
    assert_eq!(FileTime::from_last_modification_time(&meta), old);
}

#[test]
fn check_detects_new_file() {
    let tmp = project();
    let root = tmp.path();
    assert!(run(root, &["configure"]).status.success());

    let clean = run(root, &["check"]);
    assert_eq!(clean.status.code(), Some(0), "{}", stderr(&clean));
    assert!(!stderr(&clean).contains("GLOB mismatch"));

    fs::write(root.join("include/detail/extra.h"), "").unwrap();
    let drift = run(root, &["check"]);
    assert_eq!(drift.status.code(), Some(2));
    let text = stderr(&drift);
    assert_eq!(text.matches("-- GLOB mismatch!").count(), 1);
    assert!(text.contains("W401"));
}

#[test]
fn reconfigure_after_drift_warns_and_check_passes() {
    let tmp = project();
    let root = tmp.path();
    assert!(run(root, &["configure"]).status.success());
    fs::remove_file(root.join("src/util.c")).unwrap();

    let out = run(root, &["configure"]);
    assert!(out.status.success());
    assert!(stderr(&out).contains("warning[W401]"));
    assert!(stderr(&out).contains("2 file(s) before, 1 now"));

    assert_eq!(run(root, &["check"]).status.code(), Some(0));
}

#[test]
fn list_json_matches_manifest() {
    let tmp = project();
    let root = tmp.path();
    assert!(run(root, &["configure"]).status.success());

    let out = run(root, &["list", "--format", "json"]);
    assert!(out.status.success());
    let globs: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    let globs = globs.as_array().unwrap();
    assert_eq!(globs.len(), 2);
    assert_eq!(globs[0]["provenance"][0]["variable"], "SOURCES");
    assert_eq!(globs[0]["files"].as_array().unwrap().len(), 2);
    assert_eq!(globs[1]["recurse"], true);
}

#[test]
fn list_text_shows_requesters() {
    let tmp = project();
    let root = tmp.path();
    assert!(run(root, &["configure"]).status.success());
    let out = run(root, &["list"]);
    let text = String::from_utf8_lossy(&out.stdout);
    assert!(text.contains("  # HEADERS at globguard.toml:10 (glob)\n"));
    assert!(text.contains("  util.h\n"));
}

#[test]
fn invalid_config_fails() {
    let tmp = tempfile::tempdir().unwrap();
    fs::write(
        tmp.path().join("globguard.toml"),
        "[project]\nname = \"demo\"\n[[glob]]\nvariable = \"A\"\nexpression = \"*.c\"\nfollow_symlinks = true\n",
    )
    .unwrap();
    let out = run(tmp.path(), &["configure"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("follow_symlinks requires recurse"));
}

#[test]
fn check_without_configure_fails() {
    let tmp = project();
    let out = run(tmp.path(), &["check"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("run `globguard configure` first"));
}
