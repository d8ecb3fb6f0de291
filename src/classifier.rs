//! The ordered rule chain that decides where a file goes.
//!
//! Rules are tried in this order and the first match wins:
//! 1. the keyword occurs in the file name (case-insensitive)
//! 2. the keyword occurs in the lowercased content of a `.txt`/`.pdf` file
//! 3. the extension is in the [`RuleTable`]
//! 4. otherwise the file is left in place

use crate::content::{ContentKind, ExtractionError, TextExtractor};
use crate::file_category::{Decision, KeywordMatch, RuleTable};
use std::path::Path;

/// Lowercase keyword searched for in names and content.
pub const KEYWORD: &str = "linear";

/// Folder that keyword matches are moved into.
pub const KEYWORD_FOLDER: &str = "Linear";

/// The result of classifying one file.
#[derive(Debug)]
pub struct Classification {
    pub decision: Decision,
    /// Set when content extraction failed; the content rule then did not match.
    pub extraction_error: Option<ExtractionError>,
}

/// Applies the rule chain using an explicit rule table and text extractor.
pub struct Classifier<'a, E: TextExtractor> {
    rules: &'a RuleTable,
    extractor: E,
}

impl<'a, E: TextExtractor> Classifier<'a, E> {
    pub fn new(rules: &'a RuleTable, extractor: E) -> Self {
        Self { rules, extractor }
    }

    /// Classifies the file at `path`.
    ///
    /// Only reads the file when the content rule applies; never touches the
    /// filesystem otherwise.
    ///
    /// # Examples
    ///
    /// ```
    /// use dirsort::classifier::Classifier;
    /// use dirsort::content::FsTextExtractor;
    /// use dirsort::file_category::{Decision, RuleTable};
    /// use std::path::Path;
    ///
    /// let rules = RuleTable::default();
    /// let classifier = Classifier::new(&rules, FsTextExtractor);
    /// let result = classifier.classify(Path::new("holiday.jpg"));
    /// assert_eq!(result.decision, Decision::MoveToExtensionFolder("Images".into()));
    /// ```
    pub fn classify(&self, path: &Path) -> Classification {
        if name_contains_keyword(path) {
            return Classification {
                decision: keyword_decision(KeywordMatch::FileName),
                extraction_error: None,
            };
        }

        let mut extraction_error = None;
        if ContentKind::for_path(path).is_some() {
            match self.extractor.extract(path) {
                Ok(text) if text.to_lowercase().contains(KEYWORD) => {
                    return Classification {
                        decision: keyword_decision(KeywordMatch::Content),
                        extraction_error: None,
                    };
                }
                Ok(_) => {}
                Err(e) => extraction_error = Some(e),
            }
        }

        let decision = match self.rules.folder_for_path(path) {
            Some(folder) => Decision::MoveToExtensionFolder(folder.to_string()),
            None => Decision::LeaveInPlace,
        };

        Classification {
            decision,
            extraction_error,
        }
    }
}

fn name_contains_keyword(path: &Path) -> bool {
    path.file_name()
        .map(|name| name.to_string_lossy().to_lowercase().contains(KEYWORD))
        .unwrap_or(false)
}

fn keyword_decision(matched: KeywordMatch) -> Decision {
    Decision::MoveToKeywordFolder {
        folder: KEYWORD_FOLDER.to_string(),
        matched,
    }
}
