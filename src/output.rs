//! Console output.
//!
//! Per-file outcomes go to the action log only; the console gets the start
//! line, one completion line and fatal errors.

use colored::*;

/// Formats and prints console status lines.
pub struct OutputFormatter;

impl OutputFormatter {
    /// Prints a success message in green with a checkmark.
    pub fn success(message: &str) {
        println!("{} {}", "✓".green(), message);
    }

    /// Prints an error message in red with an X mark.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use dirsort::output::OutputFormatter;
    /// OutputFormatter::error("Failed to organize file");
    /// ```
    pub fn error(message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Prints a regular message without styling.
    pub fn plain(message: &str) {
        println!("{}", message);
    }

    /// Prints a dry-run notice message.
    pub fn dry_run_notice(message: &str) {
        println!("{}", format!("[DRY RUN] {}", message).yellow());
    }

    /// Builds the one-line completion summary.
    ///
    /// # Example
    ///
    /// ```
    /// use dirsort::output::OutputFormatter;
    /// assert_eq!(
    ///     OutputFormatter::summary_line(3, 1, 0),
    ///     "Organization complete: 3 files moved, 1 file left in place, 0 extraction errors"
    /// );
    /// ```
    pub fn summary_line(moved: usize, left_in_place: usize, errors: usize) -> String {
        format!(
            "Organization complete: {} {} moved, {} {} left in place, {} extraction {}",
            moved,
            plural(moved, "file", "files"),
            left_in_place,
            plural(left_in_place, "file", "files"),
            errors,
            plural(errors, "error", "errors"),
        )
    }
}

fn plural<'a>(count: usize, one: &'a str, many: &'a str) -> &'a str {
    if count == 1 { one } else { many }
}
