//! Recovery-tool listing model, decoding and parsing

pub mod category;
pub mod decode;
pub mod parser;
pub mod shapes;

pub use category::CategoryTable;
pub use decode::{decode_listing, detect_encoding, DecodedText, TextEncoding};
pub use parser::{classify_line, discover_categories, parse_listing, LineKind};

/// Labels and markers of the recovery tool's export format
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingFormat {
    /// Token marking a directory record
    pub dir_marker: String,
    /// Label of the category declaration line
    pub category_label: String,
    /// Label of the declared directory count
    pub total_dirs_label: String,
    /// Label of the declared file count
    pub total_files_label: String,
}

impl Default for ListingFormat {
    fn default() -> Self {
        Self {
            dir_marker: "<DIR>".to_string(),
            category_label: "File Categories:".to_string(),
            total_dirs_label: "Total directories:".to_string(),
            total_files_label: "Total files:".to_string(),
        }
    }
}

/// Listed directory, relative to the listing root, without trailing separator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    pub path: String,
}

/// Recorded size of a listed file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileSize {
    Bytes(u64),
    /// Size not recorded or not representable, never checked
    Unknown,
}

impl FileSize {
    pub fn bytes(&self) -> Option<u64> {
        match self {
            FileSize::Bytes(n) => Some(*n),
            FileSize::Unknown => None,
        }
    }
}

impl std::fmt::Display for FileSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileSize::Bytes(n) => write!(f, "{} bytes", n),
            FileSize::Unknown => write!(f, "unknown size"),
        }
    }
}

/// Listed file, relative to the listing root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub path: String,
    pub size: FileSize,
}

/// Which declared count disagrees with the parsed entries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountKind {
    Directories,
    Files,
}

impl std::fmt::Display for CountKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CountKind::Directories => write!(f, "directories"),
            CountKind::Files => write!(f, "files"),
        }
    }
}

/// Declared-vs-parsed disagreement; informational only
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountDiscrepancy {
    pub kind: CountKind,
    pub parsed: usize,
    pub declared: usize,
}

/// Structured content of a listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedListing {
    pub directories: Vec<DirectoryEntry>,
    pub files: Vec<FileEntry>,
    pub expected_directory_count: Option<usize>,
    pub expected_file_count: Option<usize>,
    pub categories: CategoryTable,
    pub encoding: TextEncoding,
    /// Record-like lines that failed their shape
    pub skipped_lines: usize,
}

impl ParsedListing {
    /// Decode and parse raw listing bytes
    pub fn from_bytes(data: &[u8], format: &ListingFormat) -> Self {
        let decoded = decode_listing(data);
        let mut listing = parse_listing(&decoded.text, format);
        listing.encoding = decoded.encoding;
        listing
    }

    /// Declared directory count, ignoring a declared zero
    pub fn declared_directory_count(&self) -> Option<usize> {
        self.expected_directory_count.filter(|&n| n > 0)
    }

    /// Declared file count, ignoring a declared zero
    pub fn declared_file_count(&self) -> Option<usize> {
        self.expected_file_count.filter(|&n| n > 0)
    }

    /// Declared counts that disagree with what was parsed
    pub fn count_discrepancies(&self) -> Vec<CountDiscrepancy> {
        let mut discrepancies = Vec::new();
        if let Some(declared) = self.declared_directory_count() {
            if declared != self.directories.len() {
                discrepancies.push(CountDiscrepancy {
                    kind: CountKind::Directories,
                    parsed: self.directories.len(),
                    declared,
                });
            }
        }
        if let Some(declared) = self.declared_file_count() {
            if declared != self.files.len() {
                discrepancies.push(CountDiscrepancy {
                    kind: CountKind::Files,
                    parsed: self.files.len(),
                    declared,
                });
            }
        }
        discrepancies
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing(
        dirs: usize,
        files: usize,
        declared: (Option<usize>, Option<usize>),
    ) -> ParsedListing {
        ParsedListing {
            directories: (0..dirs)
                .map(|i| DirectoryEntry { path: format!("d{i}") })
                .collect(),
            files: (0..files)
                .map(|i| FileEntry {
                    path: format!("f{i}"),
                    size: FileSize::Bytes(1),
                })
                .collect(),
            expected_directory_count: declared.0,
            expected_file_count: declared.1,
            categories: CategoryTable::default(),
            encoding: TextEncoding::Utf8,
            skipped_lines: 0,
        }
    }

    #[test]
    fn test_matching_counts_have_no_discrepancy() {
        assert!(listing(2, 1, (Some(2), Some(1))).count_discrepancies().is_empty());
        assert!(listing(2, 1, (None, None)).count_discrepancies().is_empty());
    }

    #[test]
    fn test_declared_zero_is_ignored() {
        let parsed = listing(3, 0, (Some(0), Some(0)));
        assert_eq!(parsed.declared_directory_count(), None);
        assert!(parsed.count_discrepancies().is_empty());
    }

    #[test]
    fn test_discrepancies_are_reported_per_kind() {
        let discrepancies = listing(2, 5, (Some(3), Some(4))).count_discrepancies();
        assert_eq!(
            discrepancies,
            vec![
                CountDiscrepancy { kind: CountKind::Directories, parsed: 2, declared: 3 },
                CountDiscrepancy { kind: CountKind::Files, parsed: 5, declared: 4 },
            ]
        );
    }
}
