//! The panic hook is process-wide, so hook handling is checked in its own
//! test binary.

use dirsort::content::{ExtractionError, FsTextExtractor, TextExtractor};
use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};
use std::fs;
use std::panic;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tempfile::TempDir;

/// A one-page PDF that shows text without selecting a font.
fn pdf_without_font() -> Vec<u8> {
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
fn test_parser_panic_is_silent_and_hook_is_restored() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let path = temp_dir.path().join("nofont.pdf");
    fs::write(&path, pdf_without_font()).expect("Failed to write PDF");

    let hook_calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&hook_calls);
    panic::set_hook(Box::new(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    }));

    let result = FsTextExtractor.extract(&path);

    assert_eq!(
        hook_calls.load(Ordering::SeqCst),
        0,
        "the installed hook must not see parser panics"
    );
    assert!(matches!(result, Err(ExtractionError::Pdf { .. })));

    // Our hook is back in place afterwards.
    let caught = panic::catch_unwind(|| panic!("after extraction"));
    let _ = panic::take_hook();
    assert!(caught.is_err());
    assert_eq!(hook_calls.load(Ordering::SeqCst), 1);
}
