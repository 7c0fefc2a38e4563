//! Integration test for create and verify mode against real directory trees

use dirparser_core::{
    load_listing, CountCheck, ExtraScan, Finding, ParsedListing, Reconciler, ReportStatus,
};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const LISTING: &str = "\
File Categories:  f
2025-01-17 13:29:18.927  <DIR>  D---- ---A  f   Folder A\\
2025-01-17 13:29:18.927  <DIR>  D---- ---A  f   Folder A\\Sub\\
2025-01-17 13:29:19.004  120    ----- ---A  f   Folder A\\Sub\\doc.txt
Total directories: 2
Total files: 1
";

fn write_listing(dir: &Path, text: &str) -> ParsedListing {
    let path = dir.join("listing.txt");
    fs::write(&path, text).unwrap();
    load_listing(&path).unwrap()
}

#[test]
fn test_end_to_end_create_then_verify() {
    let work = TempDir::new().unwrap();
    let target = TempDir::new().unwrap();
    let listing = write_listing(work.path(), LISTING);

    let reconciler = Reconciler::new(target.path());

    let created = reconciler.create_directories(&listing).unwrap();
    assert_eq!(created.created, 2);
    assert_eq!(created.skipped, 0);
    assert_eq!(created.count_check, CountCheck::Verified { processed: 2 });
    assert_eq!(created.status(), ReportStatus::Success);

    let doc = target.path().join("Folder A").join("Sub").join("doc.txt");
    fs::write(&doc, vec![b'x'; 120]).unwrap();

    let report = reconciler.verify(&listing);
    assert_eq!(report.directories_ok, 2);
    assert_eq!(report.files_ok, 1);
    assert_eq!(report.directories_missing, 0);
    assert_eq!(report.files_missing, 0);
    assert_eq!(report.size_mismatches, 0);
    assert_eq!(report.extra_items(), 0);
    assert!(report.findings.is_empty());
    assert!(report.count_discrepancies.is_empty());
    assert_eq!(
        report.extra_scan,
        ExtraScan::Completed {
            roots: vec![target.path().join("Folder A")]
        }
    );
    assert_eq!(report.status(), ReportStatus::Success);
}

#[test]
fn test_create_is_idempotent() {
    let work = TempDir::new().unwrap();
    let target = TempDir::new().unwrap();
    let listing = write_listing(
        work.path(),
        "\
2025-01-17 13:29:18.927  <DIR>  D---- ---A  A\\
2025-01-17 13:29:18.927  <DIR>  D---- ---A  A\\B\\
2025-01-17 13:29:18.927  <DIR>  D---- ---A  A\\B\\C\\
2025-01-17 13:29:18.927  <DIR>  D---- ---A  D\\
",
    );
    let reconciler = Reconciler::new(target.path());

    let first = reconciler.create_directories(&listing).unwrap();
    assert_eq!((first.created, first.skipped), (4, 0));
    assert_eq!(first.count_check, CountCheck::Unavailable { processed: 4 });

    let second = reconciler.create_directories(&listing).unwrap();
    assert_eq!((second.created, second.skipped), (0, 4));
}

#[test]
fn test_verify_size_mismatch_is_error() {
    let work = TempDir::new().unwrap();
    let target = TempDir::new().unwrap();
    let listing = write_listing(work.path(), LISTING);
    let reconciler = Reconciler::new(target.path());
    reconciler.create_directories(&listing).unwrap();

    let doc = target.path().join("Folder A").join("Sub").join("doc.txt");
    fs::write(&doc, vec![b'x'; 121]).unwrap();

    let report = reconciler.verify(&listing);
    assert_eq!(report.size_mismatches, 1);
    assert_eq!(
        report.findings,
        vec![Finding::SizeMismatch {
            path: doc,
            expected: 120,
            actual: 121,
        }]
    );
    assert!(report.status().is_failure());
}

#[test]
fn test_extra_items_scoped_to_inferred_roots() {
    let work = TempDir::new().unwrap();
    let target = TempDir::new().unwrap();
    let listing = write_listing(work.path(), LISTING);
    let reconciler = Reconciler::new(target.path());
    reconciler.create_directories(&listing).unwrap();

    fs::write(
        target.path().join("Folder A").join("Sub").join("doc.txt"),
        vec![b'x'; 120],
    )
    .unwrap();
    // Outside every root: ignored
    fs::write(target.path().join("notes.txt"), b"unrelated").unwrap();
    fs::create_dir(target.path().join("Other")).unwrap();
    // Inside a root: reported
    let stray = target.path().join("Folder A").join("stray.bin");
    fs::write(&stray, b"?").unwrap();

    let report = reconciler.verify(&listing);
    assert_eq!(report.findings, vec![Finding::ExtraFile(stray)]);
    assert_eq!(report.extra_files, 1);
    assert_eq!(report.extra_directories, 0);
    assert_eq!(report.status(), ReportStatus::Warning);
    assert!(!report.status().is_failure());
}

#[test]
fn test_declared_count_mismatch_only_warns() {
    let work = TempDir::new().unwrap();
    let target = TempDir::new().unwrap();
    let listing = write_listing(work.path(), &LISTING.replace("Total files: 1", "Total files: 7"));
    let reconciler = Reconciler::new(target.path());
    reconciler.create_directories(&listing).unwrap();
    fs::write(
        target.path().join("Folder A").join("Sub").join("doc.txt"),
        vec![b'x'; 120],
    )
    .unwrap();

    let report = reconciler.verify(&listing);
    assert_eq!(report.count_discrepancies.len(), 1);
    assert_eq!(report.count_discrepancies[0].declared, 7);
    assert_eq!(report.count_discrepancies[0].parsed, 1);
    assert_eq!(report.status(), ReportStatus::Success);
}

#[test]
fn test_verify_empty_target_reports_missing() {
    let work = TempDir::new().unwrap();
    let target = TempDir::new().unwrap();
    let listing = write_listing(work.path(), LISTING);

    let report = Reconciler::new(target.path()).verify(&listing);
    assert_eq!(report.directories_missing, 2);
    assert_eq!(report.files_missing, 1);
    assert_eq!(report.extra_items(), 0);
    assert_eq!(report.status(), ReportStatus::Error);
}
