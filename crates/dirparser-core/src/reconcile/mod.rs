//! Reconciliation of a parsed listing against a target directory
//!
//! Create mode materializes the listed directories. Verify mode compares the
//! listing with the live tree and scans the inferred roots for entries the
//! listing does not mention.

pub mod create;
pub mod paths;
pub mod report;
pub mod verify;

use std::path::{Path, PathBuf};

pub use paths::{infer_root_directories, is_strict_ancestor, resolve_entry_path};
pub use report::{CountCheck, CreateReport, ExtraScan, Finding, ReportStatus, VerifyReport};

/// Verify mode configuration
#[derive(Debug, Clone)]
pub struct VerifyConfig {
    /// Compare paths ignoring case
    pub case_insensitive: bool,
    /// Follow symlinks during the extra-entry walk
    pub follow_links: bool,
}

impl Default for VerifyConfig {
    fn default() -> Self {
        Self {
            case_insensitive: true,
            follow_links: false,
        }
    }
}

/// Verify mode passes, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyPhase {
    Directories,
    Files,
    ExtraEntries,
}

/// Progress notifications emitted while a pass runs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileEvent {
    DirectoryCreated(PathBuf),
    DirectoryExists(PathBuf),
    PhaseStarted(VerifyPhase),
    Finding(Finding),
    ScanningRoots(Vec<PathBuf>),
    ExtraScanSkipped,
}

/// Create/verify engine for one target root
pub struct Reconciler {
    target_root: PathBuf,
    config: VerifyConfig,
    progress_callback: Option<Box<dyn Fn(&ReconcileEvent) + Send + Sync>>,
}

impl Reconciler {
    pub fn new(target_root: impl AsRef<Path>) -> Self {
        Self::with_config(target_root, VerifyConfig::default())
    }

    pub fn with_config(target_root: impl AsRef<Path>, config: VerifyConfig) -> Self {
        Self {
            target_root: target_root.as_ref().to_path_buf(),
            config,
            progress_callback: None,
        }
    }

    pub fn set_progress_callback<F>(&mut self, callback: F)
    where
        F: Fn(&ReconcileEvent) + Send + Sync + 'static,
    {
        self.progress_callback = Some(Box::new(callback));
    }

    pub fn target_root(&self) -> &Path {
        &self.target_root
    }

    pub fn config(&self) -> &VerifyConfig {
        &self.config
    }

    fn resolve(&self, listed: &str) -> PathBuf {
        resolve_entry_path(&self.target_root, listed)
    }

    fn emit(&self, event: ReconcileEvent) {
        if let Some(callback) = &self.progress_callback {
            callback(&event);
        }
    }
}
