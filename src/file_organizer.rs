/// Directory scan and file relocation.
///
/// This module enumerates the immediate entries of a directory, classifies each
/// regular file, moves it into its destination folder and records the outcome
/// both in the action log and in an in-memory [`RunReport`].
use crate::classifier::{Classifier, KEYWORD};
use crate::content::TextExtractor;
use crate::file_category::{Decision, KeywordMatch};
use log::{debug, error, info};
use std::fs;
use std::path::{Path, PathBuf};

/// A single completed file move.
#[derive(Debug, Clone)]
pub struct Operation {
    /// The original path of the file before the move.
    pub original_path: PathBuf,
    /// The new path of the file after the move.
    pub new_path: PathBuf,
}

/// What happened to one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The file was moved to `destination`.
    Moved { destination: PathBuf },
    /// Dry run: the file would have been moved to `destination`.
    WouldMove { destination: PathBuf },
    /// No rule matched.
    LeftInPlace,
}

/// One entry of the action log, kept in memory for the caller.
#[derive(Debug, Clone)]
pub struct ActionRecord {
    /// Path of the file as found in the source directory.
    pub path: PathBuf,
    pub decision: Decision,
    pub outcome: ActionOutcome,
    /// Content extraction error, if one occurred.
    pub error: Option<String>,
}

/// All records of a single run, in processing order.
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    pub records: Vec<ActionRecord>,
}

impl RunReport {
    pub fn moved_count(&self) -> usize {
        self.records
            .iter()
            .filter(|r| matches!(r.outcome, ActionOutcome::Moved { .. }))
            .count()
    }

    pub fn planned_count(&self) -> usize {
        self.records
            .iter()
            .filter(|r| matches!(r.outcome, ActionOutcome::WouldMove { .. }))
            .count()
    }

    pub fn left_in_place_count(&self) -> usize {
        self.records
            .iter()
            .filter(|r| r.outcome == ActionOutcome::LeftInPlace)
            .count()
    }

    /// Records that carry an extraction error.
    pub fn errors(&self) -> impl Iterator<Item = &ActionRecord> {
        self.records.iter().filter(|r| r.error.is_some())
    }

    /// Finds the record for a file name.
    pub fn record_for(&self, file_name: &str) -> Option<&ActionRecord> {
        self.records
            .iter()
            .find(|r| r.path.file_name().is_some_and(|n| n == file_name))
    }
}

/// Errors that abort a run.
#[derive(Debug)]
pub enum OrganizeError {
    /// Failed to create a destination folder.
    DirectoryCreationFailed {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Failed to move a file into its destination folder.
    FileMoveFailure {
        source: PathBuf,
        destination: PathBuf,
        source_error: std::io::Error,
    },
    /// The source directory path is invalid or doesn't exist.
    InvalidBasePath {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Listing the source directory failed.
    ReadDirFailed {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl std::fmt::Display for OrganizeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DirectoryCreationFailed { path, source } => {
                write!(
                    f,
                    "Failed to create directory {}: {}",
                    path.display(),
                    source
                )
            }
            Self::FileMoveFailure {
                source,
                destination,
                source_error,
            } => {
                write!(
                    f,
                    "Failed to move {} to {}: {}",
                    source.display(),
                    destination.display(),
                    source_error
                )
            }
            Self::InvalidBasePath { path, source } => {
                write!(f, "Invalid base path {}: {}", path.display(), source)
            }
            Self::ReadDirFailed { path, source } => {
                write!(f, "Error reading directory {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for OrganizeError {}

/// Result type for file organization operations.
pub type OrganizeResult<T> = Result<T, OrganizeError>;

/// Moves files into named subfolders of a base directory.
pub struct FileOrganizer;

impl FileOrganizer {
    /// Moves a file into `folder` under `base_path` and records the operation.
    ///
    /// The folder is created if it doesn't exist and the file keeps its name.
    /// An existing file of the same name at the destination is handled by
    /// `std::fs::rename` as-is (replaced on Unix).
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use dirsort::file_organizer::FileOrganizer;
    /// use std::path::Path;
    ///
    /// let result = FileOrganizer::move_to_folder_with_record(
    ///     Path::new("/path/to/base"),
    ///     Path::new("/path/to/base/image.png"),
    ///     "Images"
    /// );
    ///
    /// match result {
    ///     Ok(op) => println!("Moved {} to {}", op.original_path.display(), op.new_path.display()),
    ///     Err(e) => eprintln!("Organization failed: {}", e),
    /// }
    /// ```
    pub fn move_to_folder_with_record(
        base_path: &Path,
        file_path: &Path,
        folder: &str,
    ) -> OrganizeResult<Operation> {
        if !base_path.exists() {
            return Err(OrganizeError::InvalidBasePath {
                path: base_path.to_path_buf(),
                source: std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "base path does not exist",
                ),
            });
        }

        let folder_path = base_path.join(folder);
        fs::create_dir_all(&folder_path).map_err(|e| OrganizeError::DirectoryCreationFailed {
            path: folder_path.clone(),
            source: e,
        })?;

        let destination_path = Self::destination_for(base_path, file_path, folder)?;

        fs::rename(file_path, &destination_path).map_err(|e| OrganizeError::FileMoveFailure {
            source: file_path.to_path_buf(),
            destination: destination_path.clone(),
            source_error: e,
        })?;

        Ok(Operation {
            original_path: file_path.to_path_buf(),
            new_path: destination_path,
        })
    }

    /// Computes where a file would land without touching the filesystem.
    pub fn destination_for(
        base_path: &Path,
        file_path: &Path,
        folder: &str,
    ) -> OrganizeResult<PathBuf> {
        let folder_path = base_path.join(folder);
        let file_name = file_path
            .file_name()
            .ok_or_else(|| OrganizeError::FileMoveFailure {
                source: file_path.to_path_buf(),
                destination: folder_path.clone(),
                source_error: std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    "file has no name component",
                ),
            })?;
        Ok(folder_path.join(file_name))
    }
}

/// Classifies and relocates every regular file directly inside `base_path`.
///
/// Subdirectories are never entered. The listing is taken before any move, so
/// folders created during the run are not rescanned. Extraction errors are
/// logged and recorded; any directory-listing, folder-creation or move failure
/// aborts the run.
///
/// With `dry_run` set, decisions are logged but nothing on disk changes.
pub fn organize_directory<E: TextExtractor>(
    base_path: &Path,
    classifier: &Classifier<'_, E>,
    dry_run: bool,
) -> OrganizeResult<RunReport> {
    let files = list_regular_files(base_path)?;
    debug!("Found {} files in {}", files.len(), base_path.display());

    let mut report = RunReport::default();
    for file_path in files {
        let record = process_file(base_path, &file_path, classifier, dry_run)?;
        report.records.push(record);
    }

    Ok(report)
}

fn list_regular_files(base_path: &Path) -> OrganizeResult<Vec<PathBuf>> {
    let read_dir_error = |e| OrganizeError::ReadDirFailed {
        path: base_path.to_path_buf(),
        source: e,
    };

    let mut files = Vec::new();
    for entry in fs::read_dir(base_path).map_err(read_dir_error)? {
        let path = entry.map_err(read_dir_error)?.path();
        // Follows symlinks; dangling links and directories are skipped.
        if path.is_file() {
            files.push(path);
        }
    }
    Ok(files)
}

fn process_file<E: TextExtractor>(
    base_path: &Path,
    file_path: &Path,
    classifier: &Classifier<'_, E>,
    dry_run: bool,
) -> OrganizeResult<ActionRecord> {
    let classification = classifier.classify(file_path);

    let error = classification.extraction_error.map(|e| {
        error!("Error reading {}: {}", file_path.display(), e);
        e.to_string()
    });

    let decision = classification.decision;
    let outcome = match decision.folder() {
        None => {
            let file_name = file_path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default();
            info!("No category found for {}, left in place.", file_name);
            ActionOutcome::LeftInPlace
        }
        Some(folder) if dry_run => {
            let destination = FileOrganizer::destination_for(base_path, file_path, folder)?;
            info!(
                "Would move {} to {}",
                file_path.display(),
                destination.display()
            );
            ActionOutcome::WouldMove { destination }
        }
        Some(folder) => {
            let operation =
                FileOrganizer::move_to_folder_with_record(base_path, file_path, folder)?;
            info!(
                "Moved {} to {}{}",
                operation.original_path.display(),
                operation.new_path.display(),
                reason_suffix(&decision)
            );
            ActionOutcome::Moved {
                destination: operation.new_path,
            }
        }
    };

    Ok(ActionRecord {
        path: file_path.to_path_buf(),
        decision,
        outcome,
        error,
    })
}

fn reason_suffix(decision: &Decision) -> String {
    match decision {
        Decision::MoveToKeywordFolder {
            matched: KeywordMatch::FileName,
            ..
        } => format!(" due to keyword \"{}\" in file name", KEYWORD),
        Decision::MoveToKeywordFolder {
            matched: KeywordMatch::Content,
            ..
        } => format!(" due to content \"{}\"", KEYWORD),
        _ => String::new(),
    }
}
