/// Routing vocabulary for the classifier.
///
/// This module holds the fixed extension-to-folder table and the `Decision`
/// produced for every file the classifier looks at.
///
/// # Examples
///
/// ```
/// use dirsort::file_category::RuleTable;
///
/// let rules = RuleTable::default();
/// assert_eq!(rules.folder_for_extension(".pdf"), Some("PDFDocuments"));
/// assert_eq!(rules.folder_for_extension(".png"), Some("Images"));
/// assert_eq!(rules.folder_for_extension(".csv"), None);
/// ```
use std::path::Path;

/// Which keyword rule produced a keyword-folder decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordMatch {
    /// The keyword occurs in the file name.
    FileName,
    /// The keyword occurs in the extracted text content.
    Content,
}

/// The outcome of classifying one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Move into the keyword folder.
    MoveToKeywordFolder {
        /// Name of the keyword folder.
        folder: String,
        /// The rule that matched.
        matched: KeywordMatch,
    },
    /// Move into the folder mapped to the file's extension.
    MoveToExtensionFolder(String),
    /// No rule matched.
    LeaveInPlace,
}

impl Decision {
    /// Returns the destination folder name, or `None` when the file stays put.
    ///
    /// # Examples
    ///
    /// ```
    /// use dirsort::file_category::Decision;
    ///
    /// let decision = Decision::MoveToExtensionFolder("Images".to_string());
    /// assert_eq!(decision.folder(), Some("Images"));
    /// assert_eq!(Decision::LeaveInPlace.folder(), None);
    /// ```
    pub fn folder(&self) -> Option<&str> {
        match self {
            Decision::MoveToKeywordFolder { folder, .. } => Some(folder.as_str()),
            Decision::MoveToExtensionFolder(folder) => Some(folder.as_str()),
            Decision::LeaveInPlace => None,
        }
    }
}

/// Ordered mapping from file extension to destination folder name.
///
/// Keys include the leading dot (e.g. `.pdf`) and are matched exactly, so
/// `.JPG` does not hit the `.jpg` entry. The table is built once and never
/// changes during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleTable {
    entries: Vec<(String, String)>,
}

impl RuleTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Appends a mapping. The first entry for an extension wins on lookup.
    pub fn with_mapping(mut self, extension: &str, folder: &str) -> Self {
        self.entries
            .push((extension.to_string(), folder.to_string()));
        self
    }

    /// Looks up the folder for an extension such as `.txt`.
    pub fn folder_for_extension(&self, extension: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(ext, _)| ext == extension)
            .map(|(_, folder)| folder.as_str())
    }

    /// Looks up the folder for a file path by its extension.
    ///
    /// # Examples
    ///
    /// ```
    /// use dirsort::file_category::RuleTable;
    /// use std::path::Path;
    ///
    /// let rules = RuleTable::default();
    /// assert_eq!(rules.folder_for_path(Path::new("notes.txt")), Some("TextFiles"));
    /// assert_eq!(rules.folder_for_path(Path::new("PHOTO.JPG")), None);
    /// assert_eq!(rules.folder_for_path(Path::new("Makefile")), None);
    /// ```
    pub fn folder_for_path(&self, path: &Path) -> Option<&str> {
        extension_of(path).and_then(|ext| self.folder_for_extension(&ext))
    }

    /// Iterates the mappings in table order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(ext, folder)| (ext.as_str(), folder.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::new()
            .with_mapping(".txt", "TextFiles")
            .with_mapping(".pdf", "PDFDocuments")
            .with_mapping(".jpg", "Images")
            .with_mapping(".png", "Images")
    }
}

/// Returns the extension of a path with its leading dot, case preserved.
///
/// Dotfiles such as `.bashrc` have no extension.
pub fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
}
