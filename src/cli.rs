//! Command-line interface module for dirsort.
//!
//! This module handles:
//! - Argument parsing
//! - Settings and action log setup
//! - Organization orchestration and console reporting

use crate::classifier::Classifier;
use crate::config::Settings;
use crate::content::FsTextExtractor;
use crate::file_category::RuleTable;
use crate::file_organizer::{ActionOutcome, RunReport, organize_directory};
use crate::logging::init_action_log;
use crate::output::OutputFormatter;
use clap::Parser;
use std::path::{Path, PathBuf};

/// Sort the files of a directory into subfolders.
#[derive(Debug, Parser)]
#[command(name = "dirsort")]
#[command(about = "Organize files based on content and type")]
#[command(version)]
pub struct Cli {
    /// The path to the directory to scan and organize
    pub path: PathBuf,

    /// Show what would be moved without changing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Settings file (default: ./.dirsortrc.toml, then ~/.config/dirsort/config.toml)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Runs the CLI application for parsed arguments.
///
/// Loads settings, opens the action log, then organizes the directory.
/// Every error returned here should end the process with a failure status.
///
/// # Examples
///
/// ```no_run
/// use clap::Parser;
/// use dirsort::cli::{Cli, run_cli};
///
/// let cli = Cli::parse_from(["dirsort", "/path/to/directory"]);
/// match run_cli(&cli) {
///     Ok(report) => println!("{} files moved", report.moved_count()),
///     Err(e) => eprintln!("Error: {}", e),
/// }
/// ```
pub fn run_cli(cli: &Cli) -> Result<RunReport, String> {
    let settings = Settings::load(cli.config.as_deref())
        .map_err(|e| format!("Error loading configuration: {}", e))?;
    let level = settings
        .logging
        .level_filter()
        .map_err(|e| format!("Error loading configuration: {}", e))?;
    init_action_log(&settings.logging.file, level).map_err(|e| e.to_string())?;

    run_organizer(&cli.path, cli.dry_run)
}

/// Organizes `base_path` with the built-in rule table.
///
/// Does not install a logger, so library callers and tests decide where
/// log records go.
pub fn run_organizer(base_path: &Path, dry_run: bool) -> Result<RunReport, String> {
    if dry_run {
        OutputFormatter::dry_run_notice(&format!(
            "Analyzing directory: {}",
            base_path.display()
        ));
    } else {
        OutputFormatter::plain(&format!(
            "Running file organization on directory: {}",
            base_path.display()
        ));
    }

    let rules = RuleTable::default();
    let classifier = Classifier::new(&rules, FsTextExtractor);
    let report = organize_directory(base_path, &classifier, dry_run).map_err(|e| e.to_string())?;

    let errors = report.errors().count();
    if dry_run {
        for record in &report.records {
            if let ActionOutcome::WouldMove { destination } = &record.outcome {
                OutputFormatter::dry_run_notice(&format!(
                    "{} -> {}",
                    record.path.display(),
                    destination.display()
                ));
            }
        }
        OutputFormatter::success(&format!(
            "Dry run complete: {} to move, {} to leave in place. No files were modified.",
            report.planned_count(),
            report.left_in_place_count()
        ));
    } else {
        OutputFormatter::success(&OutputFormatter::summary_line(
            report.moved_count(),
            report.left_in_place_count(),
            errors,
        ));
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_parses_positional_path() {
        let cli = Cli::parse_from(["dirsort", "/tmp/inbox"]);
        assert_eq!(cli.path, PathBuf::from("/tmp/inbox"));
        assert!(!cli.dry_run);
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_cli_parses_flags() {
        let cli = Cli::parse_from([
            "dirsort",
            "--dry-run",
            "--config",
            "sort.toml",
            "/tmp/inbox",
        ]);
        assert!(cli.dry_run);
        assert_eq!(cli.config, Some(PathBuf::from("sort.toml")));
    }

    #[test]
    fn test_cli_requires_path() {
        assert!(Cli::try_parse_from(["dirsort"]).is_err());
    }

    #[test]
    fn test_run_organizer_missing_directory() {
        let result = run_organizer(Path::new("/non/existent/inbox"), false);
        let message = result.unwrap_err();
        assert!(message.starts_with("Error reading directory"));
    }
}
