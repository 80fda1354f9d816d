//! `globguard list`: print the globs recorded by the last configure.

use globguard_diagnostics::Messenger;
use globguard_verify::GlobManifest;

use crate::pipeline::Project;
use crate::{GlobalArgs, ListArgs, ReportFormat};

/// Runs the `globguard list` command.
///
/// Text output shows each glob command, the variables that requested it,
/// and its files. JSON output is the manifest's glob records.
pub fn run(args: &ListArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let project = Project::load(global, args.output_dir.as_deref())?;

    let Some(manifest) = GlobManifest::load(&project.out_dir) else {
        eprintln!(
            "error: no glob manifest in {}; run `globguard configure` first",
            project.out_dir.display()
        );
        return Ok(1);
    };

    match args.format {
        ReportFormat::Text => print!("{}", render_text(&manifest, &project.messenger())),
        ReportFormat::Json => println!("{}", serde_json::to_string_pretty(&manifest.globs)?),
    }
    Ok(0)
}

fn render_text(manifest: &GlobManifest, messenger: &dyn Messenger) -> String {
    let mut out = String::new();
    for glob in &manifest.globs {
        let key = glob.entry.key();
        let variable = glob
            .provenance
            .first()
            .map(|p| p.variable.as_str())
            .unwrap_or("NEW_GLOB");
        out.push_str(&key.glob_command(variable));
        out.push('\n');
        for prov in &glob.provenance {
            out.push_str(&format!(
                "  # {}{}\n",
                prov.variable,
                messenger.backtrace_title(&prov.backtrace)
            ));
        }
        for file in &glob.entry.files {
            out.push_str(&format!("  {file}\n"));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use globguard_diagnostics::SinkMessenger;
    use globguard_source::{Backtrace, Frame};
    use globguard_verify::{GlobCacheEntry, GlobVerificationManager};

    #[test]
    fn text_lists_commands_requesters_and_files() {
        let mut manager = GlobVerificationManager::new();
        let entry = GlobCacheEntry {
            recurse: false,
            list_directories: true,
            follow_symlinks: false,
            relative: String::new(),
            expression: "/p/src/*.c".to_string(),
            files: vec!["/p/src/a.c".to_string(), "/p/src/b.c".to_string()],
        };
        let bt = Backtrace::new(Frame::new("/p/globguard.toml", 5, "glob"));
        manager.add_cache_entry(&entry, "SOURCES", &bt).unwrap();
        manager
            .add_cache_entry(&entry, "ALL", &Backtrace::empty())
            .unwrap();

        let manifest = GlobManifest::from_manager(&manager, None);
        let text = render_text(&manifest, &SinkMessenger::with_top_source("/p"));
        assert_eq!(
            text,
            "file(GLOB SOURCES LIST_DIRECTORIES true \"/p/src/*.c\")\n\
             \x20 # SOURCES at globguard.toml:5 (glob)\n\
             \x20 # ALL\n\
             \x20 /p/src/a.c\n\
             \x20 /p/src/b.c\n"
        );
    }

    #[test]
    fn empty_manifest_renders_nothing() {
        let manifest = GlobManifest::from_manager(&GlobVerificationManager::new(), None);
        assert!(render_text(&manifest, &SinkMessenger::new()).is_empty());
    }
}
