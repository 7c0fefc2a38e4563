//! Path resolution, comparison keys and root inference
//!
//! Listed paths use `\` (sometimes `/`) regardless of the host. They are
//! resolved component by component under the target root, so a leading
//! separator or a `..` component can never escape it.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::listing::DirectoryEntry;

fn is_separator(c: char) -> bool {
    c == '\\' || c == '/'
}

/// Non-empty components of a listed path
pub fn listed_components(listed: &str) -> impl Iterator<Item = &str> {
    listed
        .split(is_separator)
        .filter(|c| !c.is_empty() && *c != "." && *c != "..")
}

/// Join a listed path onto the target root using host separators
pub fn resolve_entry_path(root: &Path, listed: &str) -> PathBuf {
    let mut path = root.to_path_buf();
    for component in listed_components(listed) {
        path.push(component);
    }
    path
}

fn fold_case(key: String, case_insensitive: bool) -> String {
    if case_insensitive {
        key.to_lowercase()
    } else {
        key
    }
}

/// Comparison key for a filesystem path: components joined by `/`
pub fn path_key(path: &Path, case_insensitive: bool) -> String {
    let key = path
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");
    fold_case(key, case_insensitive)
}

/// Comparison key for a listed relative path
pub fn listed_key(listed: &str, case_insensitive: bool) -> String {
    let key = listed_components(listed).collect::<Vec<_>>().join("/");
    fold_case(key, case_insensitive)
}

/// Proper ancestors of a `/`-joined key, nearest first
pub fn strict_ancestors(key: &str) -> impl Iterator<Item = &str> {
    key.rmatch_indices('/').map(move |(offset, _)| &key[..offset])
}

/// `ancestor` names a directory strictly above `descendant`
pub fn is_strict_ancestor(ancestor: &str, descendant: &str) -> bool {
    descendant.len() > ancestor.len()
        && descendant.starts_with(ancestor)
        && descendant[ancestor.len()..].starts_with('/')
}

/// Listed directories that have no other listed directory above them
///
/// Deduplicated by key; the first spelling in listing order is kept so the
/// walk can use it on case-sensitive filesystems. Listings whose directories
/// alias each other in other ways are handled best-effort.
pub fn infer_root_directories(directories: &[DirectoryEntry], case_insensitive: bool) -> Vec<&str> {
    let keys: Vec<String> = directories
        .iter()
        .map(|d| listed_key(&d.path, case_insensitive))
        .collect();
    let listed: HashSet<&str> = keys.iter().map(String::as_str).collect();

    let mut seen = HashSet::new();
    let mut roots = Vec::new();
    for (entry, key) in directories.iter().zip(&keys) {
        if key.is_empty() || strict_ancestors(key).any(|a| listed.contains(a)) {
            continue;
        }
        if seen.insert(key.as_str()) {
            roots.push(entry.path.as_str());
        }
    }
    roots
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dirs(paths: &[&str]) -> Vec<DirectoryEntry> {
        paths
            .iter()
            .map(|p| DirectoryEntry { path: p.to_string() })
            .collect()
    }

    #[test]
    fn test_resolve_mixed_separators() {
        let root = Path::new("/target");
        assert_eq!(
            resolve_entry_path(root, "Folder A\\Sub/doc.txt"),
            Path::new("/target").join("Folder A").join("Sub").join("doc.txt")
        );
        assert_eq!(
            resolve_entry_path(root, "\\..\\escape\\"),
            Path::new("/target").join("escape")
        );
    }

    #[test]
    fn test_keys_fold_case_and_separators() {
        assert_eq!(listed_key("Folder A\\Sub\\", true), "folder a/sub");
        assert_eq!(listed_key("Folder A\\Sub\\", false), "Folder A/Sub");

        let root = Path::new("base");
        assert_eq!(
            path_key(&resolve_entry_path(root, "A\\B"), true),
            path_key(&root.join("a").join("b"), true)
        );
    }

    #[test]
    fn test_strict_ancestor() {
        assert!(is_strict_ancestor("a", "a/b"));
        assert!(is_strict_ancestor("a", "a/b/c"));
        assert!(!is_strict_ancestor("a", "a"));
        assert!(!is_strict_ancestor("a", "ab/c"));
        assert!(!is_strict_ancestor("a/b", "a"));

        let ancestors: Vec<_> = strict_ancestors("a/b/c").collect();
        assert_eq!(ancestors, vec!["a/b", "a"]);
        assert!(ancestors.iter().all(|a| is_strict_ancestor(a, "a/b/c")));
    }

    #[test]
    fn test_infer_roots() {
        let listed = dirs(&["A", "A\\B", "A\\B\\C", "D"]);
        assert_eq!(infer_root_directories(&listed, true), vec!["A", "D"]);

        assert_eq!(infer_root_directories(&dirs(&["A"]), true), vec!["A"]);
        assert!(infer_root_directories(&[], true).is_empty());
    }

    #[test]
    fn test_infer_roots_ignores_sibling_prefixes() {
        let listed = dirs(&["Photos", "Photos 2019", "Photos\\2019"]);
        assert_eq!(infer_root_directories(&listed, true), vec!["Photos", "Photos 2019"]);
    }

    #[test]
    fn test_infer_roots_dedupes_case_insensitively() {
        let listed = dirs(&["Docs", "DOCS", "docs\\x"]);
        assert_eq!(infer_root_directories(&listed, true), vec!["Docs"]);
        assert_eq!(infer_root_directories(&listed, false), vec!["Docs", "DOCS", "docs\\x"]);
    }

    #[test]
    fn test_orphan_subtree_is_its_own_root() {
        // No "A" listed, so "A\B" has nothing above it
        let listed = dirs(&["A\\B", "A\\B\\C"]);
        assert_eq!(infer_root_directories(&listed, true), vec!["A\\B"]);
    }
}
