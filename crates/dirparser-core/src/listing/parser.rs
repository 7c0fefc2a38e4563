//! Listing parser
//!
//! Two passes over the decoded text. The first finds the category
//! declaration; the second classifies every line with that table passed in
//! explicitly, so parsing stays a pure function of the text and format.

use super::shapes::{counted_label, directory_record, file_record, find_at_marker};
use super::{
    CategoryTable, DirectoryEntry, FileEntry, FileSize, ListingFormat, ParsedListing, TextEncoding,
};

/// Classification of one listing line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    Directory(DirectoryEntry),
    File(FileEntry),
    DirectoryCount(usize),
    FileCount(usize),
    /// Looked like a record but failed its shape
    Malformed,
    Ignored,
}

/// Collect the category table from the first declaration line
pub fn discover_categories(text: &str, format: &ListingFormat) -> CategoryTable {
    text.lines()
        .find_map(|line| {
            let offset = line.find(format.category_label.as_str())?;
            Some(CategoryTable::from_declaration(
                &line[offset + format.category_label.len()..],
            ))
        })
        .unwrap_or_default()
}

fn trim_separator(path: &str) -> &str {
    path.trim_end_matches(['\\', '/'].as_slice())
}

fn classify_directory(line: &str, categories: &CategoryTable, format: &ListingFormat) -> LineKind {
    let marker = format.dir_marker.as_str();
    let Some(raw) = find_at_marker(line, marker, |input| directory_record(input, marker)) else {
        return LineKind::Malformed;
    };

    let path = trim_separator(categories.strip(raw));
    if path.is_empty() {
        return LineKind::Malformed;
    }
    LineKind::Directory(DirectoryEntry {
        path: path.to_string(),
    })
}

fn classify_file(line: &str, categories: &CategoryTable) -> LineKind {
    let Ok((_, record)) = file_record(line) else {
        return LineKind::Malformed;
    };

    let path = categories.strip(record.path);
    if path.is_empty() {
        return LineKind::Malformed;
    }
    let size = record
        .size
        .parse::<u64>()
        .map(FileSize::Bytes)
        .unwrap_or(FileSize::Unknown);
    LineKind::File(FileEntry {
        path: path.to_string(),
        size,
    })
}

fn classify_count(line: &str, label: &str) -> Option<usize> {
    find_at_marker(line, label, |input| counted_label(input, label))
        .and_then(|digits| digits.parse().ok())
}

/// Classify a single line
pub fn classify_line(line: &str, categories: &CategoryTable, format: &ListingFormat) -> LineKind {
    let line = line.trim_end_matches(|c: char| c.is_ascii_whitespace());

    if line.contains(format.dir_marker.as_str()) {
        return classify_directory(line, categories, format);
    }

    if line.starts_with(|c: char| c.is_ascii_digit()) {
        return classify_file(line, categories);
    }

    if let Some(count) = classify_count(line, &format.total_dirs_label) {
        return LineKind::DirectoryCount(count);
    }
    if let Some(count) = classify_count(line, &format.total_files_label) {
        return LineKind::FileCount(count);
    }

    LineKind::Ignored
}

/// Parse decoded listing text
///
/// Never fails: unparsable lines are skipped and counted.
pub fn parse_listing(text: &str, format: &ListingFormat) -> ParsedListing {
    let categories = discover_categories(text, format);
    if !categories.is_empty() {
        tracing::debug!(
            "Declared categories: {}",
            categories.tokens().collect::<Vec<_>>().join(" ")
        );
    }

    let mut listing = ParsedListing {
        directories: Vec::new(),
        files: Vec::new(),
        expected_directory_count: None,
        expected_file_count: None,
        categories: CategoryTable::default(),
        encoding: TextEncoding::Utf8,
        skipped_lines: 0,
    };

    for (index, line) in text.lines().enumerate() {
        match classify_line(line, &categories, format) {
            LineKind::Directory(entry) => listing.directories.push(entry),
            LineKind::File(entry) => listing.files.push(entry),
            LineKind::DirectoryCount(count) => listing.expected_directory_count = Some(count),
            LineKind::FileCount(count) => listing.expected_file_count = Some(count),
            LineKind::Malformed => {
                tracing::debug!("Skipping malformed line {}: {:?}", index + 1, line);
                listing.skipped_lines += 1;
            }
            LineKind::Ignored => {}
        }
    }

    tracing::info!(
        "Parsed {} directories and {} files ({} lines skipped)",
        listing.directories.len(),
        listing.files.len(),
        listing.skipped_lines
    );
    for discrepancy in listing.count_discrepancies() {
        tracing::warn!(
            "Parsed {} {} but the listing declares {}",
            discrepancy.parsed,
            discrepancy.kind,
            discrepancy.declared
        );
    }

    listing.categories = categories;
    listing
}
