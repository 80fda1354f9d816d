//! globguard CLI: glob verification for CMake-style build trees.
//!
//! Provides `globguard configure` to resolve the globs declared in
//! `globguard.toml` and write the verification script, `globguard check` to
//! re-run the globs against the recorded results, and `globguard list` to
//! inspect what the last configure recorded.

#![warn(missing_docs)]

mod check;
mod configure;
mod list;
mod pipeline;

use std::io::IsTerminal;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::util::SubscriberInitExt;

/// globguard: detect when globbed source lists go stale.
#[derive(Parser, Debug)]
#[command(name = "globguard", version, about = "Glob verification for build trees")]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose (debug-level) output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Control colored output.
    #[arg(long, global = true, value_enum, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,

    /// Path to a custom `globguard.toml` configuration file.
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve every declared glob and write the verification script.
    Configure(OutputArgs),
    /// Re-run the recorded globs and touch the stamp if any result changed.
    Check(OutputArgs),
    /// Print the globs recorded by the last configure.
    List(ListArgs),
}

/// Arguments shared by commands that read or write the build directory.
#[derive(Parser, Debug)]
pub struct OutputArgs {
    /// Build output directory (overrides `project.output_dir`).
    #[arg(short, long)]
    pub output_dir: Option<String>,
}

/// Arguments for the `globguard list` subcommand.
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Build output directory (overrides `project.output_dir`).
    #[arg(short, long)]
    pub output_dir: Option<String>,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,
}

/// Controls whether colored output is produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Detect from terminal capabilities.
    Auto,
    /// Always produce colored output.
    Always,
    /// Never produce colored output.
    Never,
}

/// Listing output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable terminal output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// Global settings derived from CLI flags.
pub struct GlobalArgs {
    /// Whether to suppress non-error output.
    pub quiet: bool,
    /// Whether to print verbose/debug information.
    pub verbose: bool,
    /// Whether to use colored output.
    pub color: bool,
    /// Optional path to a custom config file.
    pub config: Option<String>,
}

impl GlobalArgs {
    fn log_level(&self) -> LevelFilter {
        if self.quiet {
            LevelFilter::ERROR
        } else if self.verbose {
            LevelFilter::DEBUG
        } else {
            LevelFilter::WARN
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let color = match cli.color {
        ColorChoice::Auto => std::io::stderr().is_terminal(),
        ColorChoice::Always => true,
        ColorChoice::Never => false,
    };

    let global = GlobalArgs {
        quiet: cli.quiet,
        verbose: cli.verbose,
        color,
        config: cli.config,
    };

    let _ = tracing_subscriber::fmt()
        .with_max_level(global.log_level())
        .with_writer(std::io::stderr)
        .with_ansi(global.color)
        .with_target(false)
        .without_time()
        .finish()
        .try_init();

    let result = match cli.command {
        Command::Configure(ref args) => configure::run(args, &global),
        Command::Check(ref args) => check::run(args, &global),
        Command::List(ref args) => list::run(args, &global),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn parse_configure_default() {
        let cli = Cli::parse_from(["globguard", "configure"]);
        match cli.command {
            Command::Configure(ref args) => assert!(args.output_dir.is_none()),
            _ => panic!("expected Configure command"),
        }
    }

    #[test]
    fn parse_configure_output_dir() {
        let cli = Cli::parse_from(["globguard", "configure", "--output-dir", "out"]);
        match cli.command {
            Command::Configure(ref args) => assert_eq!(args.output_dir.as_deref(), Some("out")),
            _ => panic!("expected Configure command"),
        }
    }

    #[test]
    fn parse_check_short_output_dir() {
        let cli = Cli::parse_from(["globguard", "check", "-o", "build2"]);
        match cli.command {
            Command::Check(ref args) => assert_eq!(args.output_dir.as_deref(), Some("build2")),
            _ => panic!("expected Check command"),
        }
    }

    #[test]
    fn parse_list_default() {
        let cli = Cli::parse_from(["globguard", "list"]);
        match cli.command {
            Command::List(ref args) => {
                assert_eq!(args.format, ReportFormat::Text);
                assert!(args.output_dir.is_none());
            }
            _ => panic!("expected List command"),
        }
    }

    #[test]
    fn parse_list_json() {
        let cli = Cli::parse_from(["globguard", "list", "--format", "json"]);
        match cli.command {
            Command::List(ref args) => assert_eq!(args.format, ReportFormat::Json),
            _ => panic!("expected List command"),
        }
    }

    #[test]
    fn parse_global_flags() {
        let cli = Cli::parse_from(["globguard", "--quiet", "--color", "never", "check"]);
        assert!(cli.quiet);
        assert!(!cli.verbose);
        assert_eq!(cli.color, ColorChoice::Never);
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::parse_from(["globguard", "configure", "--verbose"]);
        assert!(cli.verbose);
    }

    #[test]
    fn parse_config_path() {
        let cli = Cli::parse_from(["globguard", "--config", "/path/to/globguard.toml", "list"]);
        assert_eq!(cli.config.as_deref(), Some("/path/to/globguard.toml"));
    }

    #[test]
    fn unknown_format_rejected() {
        assert!(Cli::try_parse_from(["globguard", "list", "--format", "yaml"]).is_err());
    }

    #[test]
    fn log_level_follows_flags() {
        let mut global = GlobalArgs {
            quiet: false,
            verbose: false,
            color: false,
            config: None,
        };
        assert_eq!(global.log_level(), LevelFilter::WARN);
        global.verbose = true;
        assert_eq!(global.log_level(), LevelFilter::DEBUG);
        global.quiet = true;
        assert_eq!(global.log_level(), LevelFilter::ERROR);
    }
}
