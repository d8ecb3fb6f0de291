//! dirsort - sort the files of a directory into subfolders
//!
//! Each regular file directly inside the target directory is routed by an
//! ordered rule chain: a keyword in its name, the same keyword in its text or
//! PDF content, then its extension. Moves are recorded in an append-only
//! action log.

pub mod classifier;
pub mod cli;
pub mod config;
pub mod content;
pub mod file_category;
pub mod file_organizer;
pub mod logging;
pub mod output;

pub use classifier::{Classification, Classifier};
pub use config::{ConfigError, Settings};
pub use content::{ExtractionError, FsTextExtractor, TextExtractor};
pub use file_category::{Decision, KeywordMatch, RuleTable};
pub use file_organizer::{FileOrganizer, OrganizeError, RunReport, organize_directory};

pub use cli::{Cli, run_cli, run_organizer};
