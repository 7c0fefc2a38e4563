use std::path::Path;

pub mod error;
pub mod listing;
pub mod reconcile;

pub use error::{ListingError, ReconcileError};

// Re-export key listing types
pub use listing::{
    CategoryTable, CountDiscrepancy, CountKind, DirectoryEntry, FileEntry, FileSize, ListingFormat,
    ParsedListing, TextEncoding,
};

// Re-export key reconciliation types
pub use reconcile::{
    CountCheck, CreateReport, ExtraScan, Finding, ReconcileEvent, Reconciler, ReportStatus,
    VerifyConfig, VerifyPhase, VerifyReport,
};

/// Read, decode and parse a listing file with the default export format
pub fn load_listing(path: &Path) -> Result<ParsedListing, ListingError> {
    load_listing_with_format(path, &ListingFormat::default())
}

/// Read, decode and parse a listing file
///
/// Only an unreadable file is an error; malformed lines are skipped.
pub fn load_listing_with_format(
    path: &Path,
    format: &ListingFormat,
) -> Result<ParsedListing, ListingError> {
    tracing::info!("Loading listing {}", path.display());

    let data = std::fs::read(path).map_err(|source| ListingError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let listing = ParsedListing::from_bytes(&data, format);

    tracing::info!("Listing encoding: {}", listing.encoding);
    Ok(listing)
}
