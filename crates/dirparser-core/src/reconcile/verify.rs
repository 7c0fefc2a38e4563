//! Verify mode: compare the listing with the live target tree
//!
//! Three passes, merged into one report:
//! 1. every listed directory exists and is a directory
//! 2. every listed file exists, is a file, and has the recorded size
//! 3. nothing unlisted lives under the inferred root directories

use std::collections::HashSet;
use std::fs;
use std::path::PathBuf;

use walkdir::WalkDir;

use super::paths::{infer_root_directories, path_key};
use super::{ExtraScan, Finding, ReconcileEvent, Reconciler, VerifyPhase, VerifyReport};
use crate::listing::{FileSize, ParsedListing};

impl Reconciler {
    /// Run all verify passes against the target root
    ///
    /// Discrepancies are accumulated, never returned as errors.
    pub fn verify(&self, listing: &ParsedListing) -> VerifyReport {
        tracing::info!(
            "Verifying {} directories and {} files under {}",
            listing.directories.len(),
            listing.files.len(),
            self.target_root.display()
        );

        let mut report = VerifyReport::new(listing.directories.len(), listing.files.len());

        self.check_directories(listing, &mut report);
        self.check_files(listing, &mut report);
        self.scan_extra_entries(listing, &mut report);
        report.count_discrepancies = listing.count_discrepancies();

        tracing::info!("Verify complete with status {}", report.status());
        report
    }

    fn record(&self, report: &mut VerifyReport, finding: Finding) {
        self.emit(ReconcileEvent::Finding(finding.clone()));
        report.record(finding);
    }

    fn check_directories(&self, listing: &ParsedListing, report: &mut VerifyReport) {
        self.emit(ReconcileEvent::PhaseStarted(VerifyPhase::Directories));

        for directory in &listing.directories {
            let path = self.resolve(&directory.path);
            match fs::metadata(&path) {
                Err(_) => self.record(report, Finding::MissingDirectory(path)),
                Ok(metadata) if !metadata.is_dir() => {
                    self.record(report, Finding::NotADirectory(path))
                }
                Ok(_) => report.directories_ok += 1,
            }
        }
    }

    fn check_files(&self, listing: &ParsedListing, report: &mut VerifyReport) {
        self.emit(ReconcileEvent::PhaseStarted(VerifyPhase::Files));

        for file in &listing.files {
            let path = self.resolve(&file.path);
            let metadata = match fs::metadata(&path) {
                Ok(metadata) => metadata,
                Err(_) => {
                    self.record(report, Finding::MissingFile(path));
                    continue;
                }
            };

            if metadata.is_dir() {
                self.record(report, Finding::NotAFile(path));
                continue;
            }

            match file.size {
                FileSize::Bytes(expected) if metadata.len() != expected => self.record(
                    report,
                    Finding::SizeMismatch {
                        path,
                        expected,
                        actual: metadata.len(),
                    },
                ),
                _ => report.files_ok += 1,
            }
        }
    }

    fn expected_keys(&self, listing: &ParsedListing) -> HashSet<String> {
        let case_insensitive = self.config.case_insensitive;
        listing
            .directories
            .iter()
            .map(|d| d.path.as_str())
            .chain(listing.files.iter().map(|f| f.path.as_str()))
            .map(|listed| path_key(&self.resolve(listed), case_insensitive))
            .collect()
    }

    fn scan_extra_entries(&self, listing: &ParsedListing, report: &mut VerifyReport) {
        self.emit(ReconcileEvent::PhaseStarted(VerifyPhase::ExtraEntries));

        let case_insensitive = self.config.case_insensitive;
        let roots: Vec<PathBuf> = infer_root_directories(&listing.directories, case_insensitive)
            .into_iter()
            .map(|listed| self.resolve(listed))
            .collect();

        if roots.is_empty() {
            tracing::info!("No root directories in listing, skipping extra entry scan");
            self.emit(ReconcileEvent::ExtraScanSkipped);
            report.extra_scan = ExtraScan::Skipped;
            return;
        }
        self.emit(ReconcileEvent::ScanningRoots(roots.clone()));

        let expected = self.expected_keys(listing);
        for root in &roots {
            let walker = WalkDir::new(root)
                .min_depth(1)
                .follow_links(self.config.follow_links);

            for entry in walker {
                let entry = match entry {
                    Ok(entry) => entry,
                    Err(err) if err.depth() == 0 => {
                        // Missing roots are already reported by the directory pass
                        tracing::debug!("Cannot walk {}: {}", root.display(), err);
                        continue;
                    }
                    Err(err) => {
                        tracing::warn!("Skipping unreadable entry: {}", err);
                        continue;
                    }
                };

                if expected.contains(&path_key(entry.path(), self.config.case_insensitive)) {
                    continue;
                }
                let path = entry.path().to_path_buf();
                if entry.file_type().is_dir() {
                    self.record(report, Finding::ExtraDirectory(path));
                } else {
                    self.record(report, Finding::ExtraFile(path));
                }
            }
        }

        report.extra_scan = ExtraScan::Completed { roots };
    }
}
