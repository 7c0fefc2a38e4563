//! Reconciliation reports
//!
//! Built incrementally during a single pass, then finalized and handed to
//! the caller for rendering.

use std::path::PathBuf;

use crate::listing::CountDiscrepancy;

/// Terminal status of a run, ordered by severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ReportStatus {
    Success,
    Warning,
    Error,
}

impl ReportStatus {
    /// Raise to `other` if it is more severe
    pub fn escalate(&mut self, other: ReportStatus) {
        if other > *self {
            *self = other;
        }
    }

    /// Whether the process should exit with a failure status
    pub fn is_failure(&self) -> bool {
        *self == ReportStatus::Error
    }
}

impl std::fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportStatus::Success => write!(f, "success"),
            ReportStatus::Warning => write!(f, "warning"),
            ReportStatus::Error => write!(f, "error"),
        }
    }
}

/// Outcome of comparing processed directories with the declared count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountCheck {
    Verified { processed: usize },
    Mismatch { processed: usize, expected: usize },
    /// The listing declares no directory count
    Unavailable { processed: usize },
}

/// Result of create mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateReport {
    pub created: usize,
    pub skipped: usize,
    pub count_check: CountCheck,
}

impl CreateReport {
    pub fn processed(&self) -> usize {
        self.created + self.skipped
    }

    pub fn status(&self) -> ReportStatus {
        match self.count_check {
            CountCheck::Verified { .. } => ReportStatus::Success,
            CountCheck::Unavailable { .. } => ReportStatus::Warning,
            CountCheck::Mismatch { .. } => ReportStatus::Error,
        }
    }
}

/// A discrepancy between the listing and the target tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Finding {
    MissingDirectory(PathBuf),
    /// Listed as a directory, exists as a file
    NotADirectory(PathBuf),
    MissingFile(PathBuf),
    /// Listed as a file, exists as a directory
    NotAFile(PathBuf),
    SizeMismatch {
        path: PathBuf,
        expected: u64,
        actual: u64,
    },
    ExtraFile(PathBuf),
    ExtraDirectory(PathBuf),
}

impl Finding {
    pub fn severity(&self) -> ReportStatus {
        match self {
            Finding::ExtraFile(_) | Finding::ExtraDirectory(_) => ReportStatus::Warning,
            _ => ReportStatus::Error,
        }
    }

    pub fn path(&self) -> &PathBuf {
        match self {
            Finding::MissingDirectory(path)
            | Finding::NotADirectory(path)
            | Finding::MissingFile(path)
            | Finding::NotAFile(path)
            | Finding::ExtraFile(path)
            | Finding::ExtraDirectory(path) => path,
            Finding::SizeMismatch { path, .. } => path,
        }
    }
}

/// Whether the extra-entry scan ran
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtraScan {
    /// No root directories could be inferred
    Skipped,
    Completed { roots: Vec<PathBuf> },
}

/// Result of verify mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyReport {
    pub listed_directories: usize,
    pub listed_files: usize,
    pub directories_ok: usize,
    pub directories_missing: usize,
    pub files_ok: usize,
    pub files_missing: usize,
    pub size_mismatches: usize,
    pub extra_files: usize,
    pub extra_directories: usize,
    pub extra_scan: ExtraScan,
    /// Declared-vs-parsed count disagreements, warnings only
    pub count_discrepancies: Vec<CountDiscrepancy>,
    /// Findings in discovery order
    pub findings: Vec<Finding>,
}

impl VerifyReport {
    pub(crate) fn new(listed_directories: usize, listed_files: usize) -> Self {
        Self {
            listed_directories,
            listed_files,
            directories_ok: 0,
            directories_missing: 0,
            files_ok: 0,
            files_missing: 0,
            size_mismatches: 0,
            extra_files: 0,
            extra_directories: 0,
            extra_scan: ExtraScan::Skipped,
            count_discrepancies: Vec::new(),
            findings: Vec::new(),
        }
    }

    pub(crate) fn record(&mut self, finding: Finding) {
        match &finding {
            Finding::MissingDirectory(_) | Finding::NotADirectory(_) => {
                self.directories_missing += 1
            }
            Finding::MissingFile(_) | Finding::NotAFile(_) => self.files_missing += 1,
            Finding::SizeMismatch { .. } => self.size_mismatches += 1,
            Finding::ExtraFile(_) => self.extra_files += 1,
            Finding::ExtraDirectory(_) => self.extra_directories += 1,
        }
        self.findings.push(finding);
    }

    pub fn extra_items(&self) -> usize {
        self.extra_files + self.extra_directories
    }

    /// Errors for missing or mismatched entries, warning for extras only
    ///
    /// Count discrepancies never change the status.
    pub fn status(&self) -> ReportStatus {
        self.findings
            .iter()
            .fold(ReportStatus::Success, |mut status, finding| {
                status.escalate(finding.severity());
                status
            })
    }
}
