//! Text extraction for content-bearing files.
//!
//! Only `.txt` and `.pdf` files carry content the classifier looks at. Every
//! failure is returned as an [`ExtractionError`] value so the caller can treat
//! it as "no match" and keep going.

use std::fs;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};

/// The kinds of file whose content can be searched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    /// UTF-8 plain text.
    Text,
    /// PDF document.
    Pdf,
}

impl ContentKind {
    /// Determines the content kind from the file name suffix.
    ///
    /// The suffix check is case-sensitive: `notes.TXT` is not searched.
    ///
    /// # Examples
    ///
    /// ```
    /// use dirsort::content::ContentKind;
    /// use std::path::Path;
    ///
    /// assert_eq!(ContentKind::for_path(Path::new("a.txt")), Some(ContentKind::Text));
    /// assert_eq!(ContentKind::for_path(Path::new("a.pdf")), Some(ContentKind::Pdf));
    /// assert_eq!(ContentKind::for_path(Path::new("a.PDF")), None);
    /// ```
    pub fn for_path(path: &Path) -> Option<Self> {
        let name = path.file_name()?.to_string_lossy();
        if name.ends_with(".txt") {
            Some(ContentKind::Text)
        } else if name.ends_with(".pdf") {
            Some(ContentKind::Pdf)
        } else {
            None
        }
    }
}

/// Errors raised while reading the content of a single file.
#[derive(Debug)]
pub enum ExtractionError {
    /// The file could not be read.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// A text file is not valid UTF-8.
    InvalidUtf8 { path: PathBuf, reason: String },
    /// A PDF could not be parsed.
    Pdf { path: PathBuf, reason: String },
    /// The file is not a content-bearing kind.
    Unsupported { path: PathBuf },
}

impl std::fmt::Display for ExtractionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { source, .. } => write!(f, "{}", source),
            Self::InvalidUtf8 { reason, .. } => write!(f, "invalid UTF-8: {}", reason),
            Self::Pdf { reason, .. } => write!(f, "PDF extraction failed: {}", reason),
            Self::Unsupported { path } => {
                write!(f, "no text extractor for {}", path.display())
            }
        }
    }
}

impl std::error::Error for ExtractionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Extracts searchable text from a file.
pub trait TextExtractor {
    /// Returns the raw (not yet lowercased) text of the file.
    fn extract(&self, path: &Path) -> Result<String, ExtractionError>;
}

/// Reads text and PDF files straight from disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsTextExtractor;

impl TextExtractor for FsTextExtractor {
    fn extract(&self, path: &Path) -> Result<String, ExtractionError> {
        match ContentKind::for_path(path) {
            Some(ContentKind::Text) => read_text(path),
            Some(ContentKind::Pdf) => read_pdf(path),
            None => Err(ExtractionError::Unsupported {
                path: path.to_path_buf(),
            }),
        }
    }
}

fn read_bytes(path: &Path) -> Result<Vec<u8>, ExtractionError> {
    fs::read(path).map_err(|e| ExtractionError::Io {
        path: path.to_path_buf(),
        source: e,
    })
}

fn read_text(path: &Path) -> Result<String, ExtractionError> {
    let bytes = read_bytes(path)?;
    String::from_utf8(bytes).map_err(|e| ExtractionError::InvalidUtf8 {
        path: path.to_path_buf(),
        reason: e.utf8_error().to_string(),
    })
}

/// Concatenates the text of every page. Pages without text add nothing.
fn read_pdf(path: &Path) -> Result<String, ExtractionError> {
    let bytes = read_bytes(path)?;

    // The PDF parser panics on some malformed inputs. Silence the hook so the
    // panic only surfaces as an extraction error.
    let previous_hook = panic::take_hook();
    panic::set_hook(Box::new(|_| {}));
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        pdf_extract::extract_text_from_mem(&bytes)
    }));
    panic::set_hook(previous_hook);

    match outcome {
        Ok(Ok(text)) => Ok(text),
        Ok(Err(e)) => Err(ExtractionError::Pdf {
            path: path.to_path_buf(),
            reason: e.to_string(),
        }),
        Err(payload) => Err(ExtractionError::Pdf {
            path: path.to_path_buf(),
            reason: panic_message(payload.as_ref()),
        }),
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "parser panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_extract_plain_text() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("notes.txt");
        fs::write(&path, "Linear Algebra").expect("Failed to write test file");

        let text = FsTextExtractor.extract(&path).expect("Extraction failed");
        assert_eq!(text, "Linear Algebra");
    }

    #[test]
    fn test_extract_invalid_utf8_is_error() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("binary.txt");
        fs::write(&path, [0xff, 0xfe, 0x00, 0x80]).expect("Failed to write test file");

        let err = FsTextExtractor.extract(&path).unwrap_err();
        assert!(matches!(err, ExtractionError::InvalidUtf8 { path: ref p, .. } if p == &path));
    }

    #[test]
    fn test_extract_missing_file_is_io_error() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("gone.txt");

        let err = FsTextExtractor.extract(&path).unwrap_err();
        assert!(matches!(err, ExtractionError::Io { .. }));
    }

    #[test]
    fn test_extract_garbage_pdf_is_error() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("broken.pdf");
        fs::write(&path, "this is not a pdf").expect("Failed to write test file");

        let err = FsTextExtractor.extract(&path).unwrap_err();
        assert!(matches!(err, ExtractionError::Pdf { .. }));
        assert!(err.to_string().starts_with("PDF extraction failed"));
    }

    /// A one-page PDF that shows text without ever selecting a font.
    fn pdf_without_font() -> Vec<u8> {
        use lopdf::content::{Content, Operation};
        use lopdf::{Document, Object, Stream, dictionary};

        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tj", vec![Object::string_literal("linear")]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(
            dictionary! {},
            content.encode().expect("Failed to encode content"),
        ));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => dictionary! {},
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        });
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => vec![page_id.into()],
                "Count" => 1,
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes).expect("Failed to save PDF");
        bytes
    }

    #[test]
    fn test_extract_pdf_parser_panic_is_error() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("nofont.pdf");
        fs::write(&path, pdf_without_font()).expect("Failed to write test file");

        let err = FsTextExtractor.extract(&path).unwrap_err();
        match err {
            ExtractionError::Pdf { reason, .. } => assert!(reason.contains("unwrap"), "{}", reason),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_panic_message_payloads() {
        let from_str: Box<dyn std::any::Any + Send> = Box::new("static message");
        let from_string: Box<dyn std::any::Any + Send> = Box::new("owned".to_string());
        let other: Box<dyn std::any::Any + Send> = Box::new(7_u8);
        assert_eq!(panic_message(from_str.as_ref()), "static message");
        assert_eq!(panic_message(from_string.as_ref()), "owned");
        assert_eq!(panic_message(other.as_ref()), "parser panicked");
    }

    #[test]
    fn test_extract_unsupported_kind() {
        let err = FsTextExtractor
            .extract(Path::new("photo.jpg"))
            .unwrap_err();
        assert!(matches!(err, ExtractionError::Unsupported { .. }));
    }

    #[test]
    fn test_content_kind_requires_exact_suffix() {
        assert_eq!(ContentKind::for_path(Path::new("a.TXT")), None);
        assert_eq!(ContentKind::for_path(Path::new("a.txt.bak")), None);
        assert_eq!(ContentKind::for_path(Path::new(".txt")), Some(ContentKind::Text));
    }
}
