//! `globguard configure`: resolve every declared glob and write the
//! verification artifacts.
//!
//! 1. Load `globguard.toml` and turn each `[[glob]]` into a request
//! 2. Resolve each request on the filesystem
//! 3. Register the results with the verification cache
//! 4. Write `VerifyGlobs.cmake`, the stamp, and the glob manifest

use std::collections::BTreeMap;

use globguard_diagnostics::{Diagnostic, DiagnosticCode, Messenger, SinkMessenger};
use globguard_glob::{FsResolver, GlobResolver};
use globguard_source::Backtrace;
use globguard_verify::{ConfigFingerprint, GlobKey, GlobManifest, GlobVerificationManager};

use crate::pipeline::{cache_entry, render_diagnostics, Project};
use crate::{GlobalArgs, OutputArgs};

/// Runs the `globguard configure` command.
///
/// Returns exit code 0 on success and 1 if any glob failed to resolve,
/// conflicted, or the artifacts could not be written.
pub fn run(args: &OutputArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let project = Project::load(global, args.output_dir.as_deref())?;
    let config = &project.loaded.config;

    if !global.quiet {
        eprintln!("   Configuring {}", config.project.name);
    }

    let messenger = project.messenger();
    let mut manager = GlobVerificationManager::new();
    let resolver = FsResolver::new();

    for glob in globguard_config::resolve_globs(&project.loaded, &project.root, &project.source_db) {
        let files = match resolver.resolve(&glob.request) {
            Ok(files) => files,
            Err(e) => {
                messenger.issue(Diagnostic::error(
                    DiagnosticCode::GLOB_RESOLUTION,
                    format!("cannot evaluate glob for {}: {e}", glob.variable),
                    glob.backtrace.clone(),
                ));
                continue;
            }
        };
        let entry = cache_entry(&glob.request, files);
        if let Err(conflict) = manager.add_cache_entry(&entry, &glob.variable, &glob.backtrace) {
            conflict.report(&messenger);
            break;
        }
    }

    if messenger.sink().has_errors() {
        render_diagnostics(&messenger, global.color);
        if messenger.sink().has_fatal() {
            eprintln!("   Configuring aborted");
        } else {
            eprintln!("   Configuring incomplete, errors occurred!");
        }
        return Ok(1);
    }

    report_drift(&project, &manager, &messenger);

    if manager.save_verification_script(&project.out_dir, &messenger).is_err() {
        render_diagnostics(&messenger, global.color);
        return Ok(1);
    }

    let source = project.source_db.get_file(project.loaded.file);
    let fingerprint = ConfigFingerprint::new(&source.path, source.content_hash);
    let manifest = GlobManifest::from_manager(&manager, Some(fingerprint));
    if let Err(e) = manifest.save(&project.out_dir) {
        messenger.issue(Diagnostic::error(
            DiagnosticCode::MANIFEST_IO,
            format!("cannot save glob manifest: {e}"),
            Backtrace::empty(),
        ));
        render_diagnostics(&messenger, global.color);
        return Ok(1);
    }

    render_diagnostics(&messenger, global.color);

    if !global.quiet {
        if let Some(script) = manager.verify_script() {
            eprintln!("   Wrote {}", script.display());
        }
        let file_count: usize = manager.records().map(|(_, r)| r.files().len()).sum();
        eprintln!(
            "   Result: {} glob(s), {} file(s)",
            manager.get_cache_entries().len(),
            file_count
        );
    }

    Ok(0)
}

/// Warns about globs whose results differ from the previous configure.
fn report_drift(project: &Project, manager: &GlobVerificationManager, messenger: &SinkMessenger) {
    let Some(previous) = GlobManifest::load(&project.out_dir) else {
        return;
    };
    let current: BTreeMap<GlobKey, &[String]> = manager
        .records()
        .map(|(key, record)| (key.clone(), record.files()))
        .collect();

    for glob in &previous.globs {
        let key = glob.entry.key();
        let Some(files) = current.get(&key) else {
            continue;
        };
        if *files != glob.entry.files.as_slice() {
            let variable = glob
                .provenance
                .first()
                .map(|p| p.variable.as_str())
                .unwrap_or("NEW_GLOB");
            let backtrace = glob
                .provenance
                .first()
                .map(|p| p.backtrace.clone())
                .unwrap_or_default();
            messenger.issue(
                Diagnostic::warning(
                    DiagnosticCode::GLOB_DRIFT,
                    format!(
                        "glob result changed since the last configure: {}",
                        key.glob_command(variable)
                    ),
                    backtrace,
                )
                .with_note(format!(
                    "{} file(s) before, {} now",
                    glob.entry.files.len(),
                    files.len()
                )),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn setup() -> (TempDir, GlobalArgs) {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("globguard.toml"),
            "[project]\nname = \"demo\"\n\n[[glob]]\nvariable = \"SOURCES\"\nexpression = \"src/*.c\"\n",
        )
        .unwrap();
        fs::create_dir_all(tmp.path().join("src")).unwrap();
        fs::write(tmp.path().join("src/a.c"), "").unwrap();
        let global = GlobalArgs {
            quiet: true,
            verbose: false,
            color: false,
            config: Some(tmp.path().to_string_lossy().into_owned()),
        };
        (tmp, global)
    }

    #[test]
    fn writes_script_stamp_and_manifest() {
        let (tmp, global) = setup();
        let code = run(&OutputArgs { output_dir: None }, &global).unwrap();
        assert_eq!(code, 0);

        let files = tmp.path().join("build").join("CMakeFiles");
        let script = fs::read_to_string(files.join("VerifyGlobs.cmake")).unwrap();
        assert!(script.contains("# SOURCES at globguard.toml:5 (glob)"));
        assert!(script.contains("/src/a.c\""));
        assert!(files.join("cmake.verify_globs").exists());

        let manifest = GlobManifest::load(&tmp.path().join("build")).unwrap();
        assert_eq!(manifest.len(), 1);
        assert!(manifest.config.unwrap().matches_file());
    }

    #[test]
    fn drift_since_last_configure_is_warned() {
        let (tmp, global) = setup();
        let args = OutputArgs { output_dir: None };
        run(&args, &global).unwrap();
        fs::write(tmp.path().join("src/b.c"), "").unwrap();

        let project = Project::load(&global, None).unwrap();
        let messenger = project.messenger();
        let mut manager = GlobVerificationManager::new();
        for glob in globguard_config::resolve_globs(&project.loaded, &project.root, &project.source_db) {
            let files = FsResolver::new().resolve(&glob.request).unwrap();
            let entry = cache_entry(&glob.request, files);
            manager
                .add_cache_entry(&entry, &glob.variable, &glob.backtrace)
                .unwrap();
        }
        report_drift(&project, &manager, &messenger);

        let diags = messenger.sink().diagnostics();
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].code, DiagnosticCode::GLOB_DRIFT);
        assert_eq!(diags[0].notes, vec!["1 file(s) before, 2 now"]);
    }

    #[test]
    fn output_dir_override() {
        let (tmp, global) = setup();
        let code = run(
            &OutputArgs {
                output_dir: Some("out".to_string()),
            },
            &global,
        )
        .unwrap();
        assert_eq!(code, 0);
        assert!(tmp.path().join("out/CMakeFiles/VerifyGlobs.cmake").exists());
        assert!(!tmp.path().join("build").exists());
    }

    #[test]
    fn no_globs_writes_nothing() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("globguard.toml"), "[project]\nname = \"demo\"\n").unwrap();
        let global = GlobalArgs {
            quiet: true,
            verbose: false,
            color: false,
            config: Some(tmp.path().to_string_lossy().into_owned()),
        };
        let code = run(&OutputArgs { output_dir: None }, &global).unwrap();
        assert_eq!(code, 0);
        assert!(!tmp.path().join("build/CMakeFiles/VerifyGlobs.cmake").exists());
    }
}
