//! Integration tests for directory batch processing.

mod common;

use std::fs;
use std::sync::atomic::{AtomicUsize, Ordering};

use common::report_pdf;
use pdfoutline::batch::{list_pdfs, process_directory, process_directory_with_progress};
use pdfoutline::{BatchOptions, DocumentOutcome, JsonFormat, ParseOptions};
use tempfile::TempDir;

fn read_outcome(path: &std::path::Path) -> DocumentOutcome {
    let json = fs::read_to_string(path).unwrap();
    serde_json::from_str(&json).unwrap()
}

#[test]
fn test_batch_mixed_directory() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();

    fs::write(input.path().join("report.pdf"), report_pdf()).unwrap();
    fs::write(input.path().join("UPPER.PDF"), report_pdf()).unwrap();
    fs::write(input.path().join("broken.pdf"), b"this is not a pdf").unwrap();
    fs::write(input.path().join("notes.txt"), b"ignored").unwrap();
    fs::create_dir(input.path().join("nested.pdf")).unwrap();

    let options = BatchOptions::new(input.path(), output.path()).with_jobs(2);
    let summary = process_directory(&options).unwrap();

    assert_eq!(summary.len(), 3);
    assert_eq!(summary.succeeded(), 2);
    assert_eq!(summary.failed(), 1);

    let names: Vec<String> = summary.documents.iter().map(|d| d.file_name()).collect();
    assert_eq!(names, vec!["UPPER.PDF", "broken.pdf", "report.pdf"]);

    match read_outcome(&output.path().join("report.json")) {
        DocumentOutcome::Outline(result) => {
            assert_eq!(result.title, "Annual Report Summary");
            assert_eq!(result.outline.len(), 2);
        }
        other => panic!("expected outline, got {:?}", other),
    }
    assert!(output.path().join("UPPER.json").exists());

    match read_outcome(&output.path().join("broken.json")) {
        DocumentOutcome::Failed(report) => {
            assert_eq!(report.message, "Failed to process broken.pdf");
            assert!(!report.error.is_empty());
        }
        other => panic!("expected error report, got {:?}", other),
    }

    assert!(!output.path().join("notes.json").exists());
}

#[test]
fn test_batch_sequential_compact() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    fs::write(input.path().join("a.pdf"), report_pdf()).unwrap();

    let options = BatchOptions::new(input.path(), output.path())
        .sequential()
        .with_format(JsonFormat::Compact)
        .with_parse_options(ParseOptions::new().strict());
    let summary = process_directory(&options).unwrap();

    assert_eq!(summary.succeeded(), 1);
    let json = fs::read_to_string(output.path().join("a.json")).unwrap();
    assert!(!json.contains('\n'));
    assert!(json.starts_with(r#"{"title":"Annual Report Summary","outline":["#));
}

#[test]
fn test_batch_progress_callback() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    for name in ["one.pdf", "two.pdf", "three.pdf"] {
        fs::write(input.path().join(name), report_pdf()).unwrap();
    }

    let calls = AtomicUsize::new(0);
    let options = BatchOptions::new(input.path(), output.path());
    let summary = process_directory_with_progress(&options, |_| {
        calls.fetch_add(1, Ordering::SeqCst);
    })
    .unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 3);
    assert_eq!(summary.succeeded(), 3);
}

#[test]
fn test_batch_creates_missing_directories() {
    let root = TempDir::new().unwrap();
    let input = root.path().join("app/input");
    let output = root.path().join("app/output");

    let summary = process_directory(&BatchOptions::new(&input, &output)).unwrap();

    assert!(summary.is_empty());
    assert!(input.is_dir());
    assert!(output.is_dir());
    assert!(list_pdfs(&input).unwrap().is_empty());
}
