//! Fatal error types for the listing loader and the reconciliation engine
//!
//! Only failures that abort a run live here. Unparsable listing lines, walk
//! errors and tree discrepancies are never errors: they are skipped or
//! accumulated into a report.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failure to obtain the listing text
#[derive(Debug, Error)]
pub enum ListingError {
    /// The listing file could not be opened or read
    #[error("failed to read listing '{}'", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Failure while materializing or auditing the target tree
#[derive(Debug, Error)]
pub enum ReconcileError {
    /// A directory could not be created in create mode
    #[error("failed to create directory '{}'", path.display())]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
