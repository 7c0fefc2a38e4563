//! Create mode: materialize listed directories under the target root

use std::fs;

use super::{CountCheck, CreateReport, ReconcileEvent, Reconciler};
use crate::error::ReconcileError;
use crate::listing::ParsedListing;

impl Reconciler {
    /// Create every listed directory, in listing order
    ///
    /// Existing directories are counted as skipped. The first creation
    /// failure aborts the pass; directories created before it are kept.
    pub fn create_directories(
        &self,
        listing: &ParsedListing,
    ) -> Result<CreateReport, ReconcileError> {
        tracing::info!(
            "Creating {} directories under {}",
            listing.directories.len(),
            self.target_root.display()
        );

        let mut created = 0;
        let mut skipped = 0;

        for directory in &listing.directories {
            let path = self.resolve(&directory.path);

            if path.is_dir() {
                skipped += 1;
                self.emit(ReconcileEvent::DirectoryExists(path));
                continue;
            }

            fs::create_dir_all(&path).map_err(|source| ReconcileError::CreateDirectory {
                path: path.clone(),
                source,
            })?;
            created += 1;
            self.emit(ReconcileEvent::DirectoryCreated(path));
        }

        let processed = created + skipped;
        let count_check = match listing.declared_directory_count() {
            Some(expected) if expected == processed => CountCheck::Verified { processed },
            Some(expected) => CountCheck::Mismatch { processed, expected },
            None => CountCheck::Unavailable { processed },
        };

        tracing::info!("Create complete: {} created, {} already existed", created, skipped);

        Ok(CreateReport {
            created,
            skipped,
            count_check,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::{parse_listing, ListingFormat};
    use crate::ReportStatus;
    use tempfile::TempDir;

    fn listing(text: &str) -> ParsedListing {
        parse_listing(text, &ListingFormat::default())
    }

    const TWO_DIRS: &str = "\
2025-01-17 13:29:18.927  <DIR>  D---- ---A  Folder A\\
2025-01-17 13:29:18.927  <DIR>  D---- ---A  Folder A\\Sub\\
Total directories: 2
";

    #[test]
    fn test_create_then_rerun() {
        let temp_dir = TempDir::new().unwrap();
        let reconciler = Reconciler::new(temp_dir.path());
        let parsed = listing(TWO_DIRS);

        let first = reconciler.create_directories(&parsed).unwrap();
        assert_eq!((first.created, first.skipped), (2, 0));
        assert_eq!(first.count_check, CountCheck::Verified { processed: 2 });
        assert!(temp_dir.path().join("Folder A").join("Sub").is_dir());

        let second = reconciler.create_directories(&parsed).unwrap();
        assert_eq!((second.created, second.skipped), (0, 2));
        assert_eq!(second.status(), ReportStatus::Success);
    }

    #[test]
    fn test_count_mismatch_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let text = TWO_DIRS.replace("Total directories: 2", "Total directories: 3");

        let report = Reconciler::new(temp_dir.path())
            .create_directories(&listing(&text))
            .unwrap();
        assert_eq!(
            report.count_check,
            CountCheck::Mismatch { processed: 2, expected: 3 }
        );
        assert_eq!(report.status(), ReportStatus::Error);
    }

    #[test]
    fn test_missing_count_is_warning() {
        let temp_dir = TempDir::new().unwrap();
        let text = TWO_DIRS.replace("Total directories: 2\n", "");

        let report = Reconciler::new(temp_dir.path())
            .create_directories(&listing(&text))
            .unwrap();
        assert_eq!(report.count_check, CountCheck::Unavailable { processed: 2 });
        assert_eq!(report.status(), ReportStatus::Warning);
    }

    #[test]
    fn test_file_in_the_way_aborts() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::create_dir(temp_dir.path().join("Folder A")).unwrap();
        std::fs::write(temp_dir.path().join("Folder A").join("Sub"), b"x").unwrap();

        let err = Reconciler::new(temp_dir.path())
            .create_directories(&listing(TWO_DIRS))
            .unwrap_err();
        let ReconcileError::CreateDirectory { path, .. } = err;
        assert_eq!(path, temp_dir.path().join("Folder A").join("Sub"));
    }
}
