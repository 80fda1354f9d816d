//! `globguard check`: the build-time half of glob verification.
//!
//! Re-runs every glob recorded by the last configure and compares the result
//! with the recorded file list, the same comparison `VerifyGlobs.cmake`
//! performs. Any difference prints `-- GLOB mismatch!` and touches the stamp
//! file, which makes the build re-run configure.

use globguard_diagnostics::{Diagnostic, DiagnosticCode, Messenger};
use globguard_glob::{FsResolver, GlobResolver};
use globguard_verify::script::{CMAKE_FILES_DIR, VERIFY_STAMP_FILE};
use globguard_verify::{GlobManifest, GlobVerificationManager};

use crate::pipeline::{glob_request, render_diagnostics, touch_nocreate, Project};
use crate::{GlobalArgs, OutputArgs};

/// Exit code reported when at least one glob drifted.
pub const DRIFT_EXIT_CODE: i32 = 2;

/// Runs the `globguard check` command.
///
/// Returns 0 when every glob still matches, [`DRIFT_EXIT_CODE`] when any
/// glob or the configuration changed, and 1 if there is nothing to check or
/// the manifest holds two different file lists for one glob.
pub fn run(args: &OutputArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let project = Project::load(global, args.output_dir.as_deref())?;

    let Some(manifest) = GlobManifest::load(&project.out_dir) else {
        eprintln!(
            "error: no glob manifest in {}; run `globguard configure` first",
            project.out_dir.display()
        );
        return Ok(1);
    };

    let messenger = project.messenger();

    let mut recorded = GlobVerificationManager::new();
    if let Err(conflict) = manifest.restore_into(&mut recorded) {
        conflict.report(&messenger);
        if !global.quiet {
            render_diagnostics(&messenger, global.color);
        }
        eprintln!(
            "error: glob manifest {} is inconsistent; run `globguard configure`",
            GlobManifest::path(&project.out_dir).display()
        );
        return Ok(1);
    }
    tracing::debug!(globs = recorded.len(), "restored glob manifest");

    let resolver = FsResolver::new();
    let mut drifted = 0usize;

    if let Some(config) = &manifest.config {
        if !config.matches_file() {
            eprintln!("-- {} changed", config.path.display());
            drifted += 1;
        }
    }

    for glob in &manifest.globs {
        let request = glob_request(&glob.entry);
        let current = match resolver.resolve(&request) {
            Ok(files) => files,
            Err(e) => {
                tracing::warn!(expression = %request.expression, %e, "glob no longer resolves");
                Vec::new()
            }
        };
        if current == glob.entry.files {
            continue;
        }

        eprintln!("-- GLOB mismatch!");
        drifted += 1;
        let backtrace = glob
            .provenance
            .first()
            .map(|p| p.backtrace.clone())
            .unwrap_or_default();
        messenger.issue(
            Diagnostic::warning(
                DiagnosticCode::GLOB_DRIFT,
                format!("glob result changed: \"{}\"", glob.entry.expression),
                backtrace,
            )
            .with_note(format!(
                "{} file(s) recorded, {} now",
                glob.entry.files.len(),
                current.len()
            ))
            .with_help("run `globguard configure` to record the new file list"),
        );
    }

    if !global.quiet {
        render_diagnostics(&messenger, global.color);
    }

    if drifted == 0 {
        if !global.quiet {
            eprintln!("   Result: {} glob(s) up to date", manifest.len());
        }
        return Ok(0);
    }

    let stamp = project.out_dir.join(CMAKE_FILES_DIR).join(VERIFY_STAMP_FILE);
    match touch_nocreate(&stamp) {
        Ok(true) => tracing::debug!(stamp = %stamp.display(), "touched verification stamp"),
        Ok(false) => tracing::debug!(stamp = %stamp.display(), "no verification stamp to touch"),
        Err(e) => return Err(format!("cannot touch {}: {e}", stamp.display()).into()),
    }
    Ok(DRIFT_EXIT_CODE)
}
