//! File category table
//!
//! Listings may tag each entry with a short category token placed between the
//! flag columns and the path. The set of tokens is declared once on the
//! category summary line; only declared tokens are ever stripped so that a
//! folder whose name looks like a tag is left alone.

const BLANK: &[char] = &[' ', '\t'];

/// Category tokens declared by a listing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryTable {
    /// Sorted by descending length so a longer token wins over its prefix
    tokens: Vec<String>,
}

impl CategoryTable {
    /// Build a table from the tokens following the category label
    ///
    /// Bare commas separate categories and are not categories themselves.
    pub fn from_declaration(declaration: &str) -> Self {
        let mut tokens: Vec<String> = Vec::new();
        for token in declaration.split_ascii_whitespace() {
            if token == "," || tokens.iter().any(|t| t == token) {
                continue;
            }
            tokens.push(token.to_string());
        }
        tokens.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        Self { tokens }
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn contains(&self, token: &str) -> bool {
        self.tokens.iter().any(|t| t == token)
    }

    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().map(String::as_str)
    }

    /// Remove one leading category token from a captured path
    ///
    /// Leading whitespace is always trimmed. A token is only stripped when it
    /// is followed by a space, so `fonts\` survives a declared `f` category.
    pub fn strip<'a>(&self, raw_path: &'a str) -> &'a str {
        let trimmed = raw_path.trim_start_matches(BLANK);

        for token in &self.tokens {
            if let Some(rest) = trimmed.strip_prefix(token.as_str()) {
                if rest.starts_with(' ') {
                    return rest.trim_start_matches(BLANK);
                }
            }
        }

        trimmed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declaration_skips_commas() {
        let table = CategoryTable::from_declaration(" . , xf  f d ");
        assert_eq!(table.len(), 4);
        assert!(table.contains("."));
        assert!(table.contains("xf"));
        assert!(!table.contains(","));
    }

    #[test]
    fn test_strip_declared_token() {
        let table = CategoryTable::from_declaration("f d");
        assert_eq!(table.strip("  f   Some_dir 1\\"), "Some_dir 1\\");
        assert_eq!(table.strip("d Photos\\cat.jpg"), "Photos\\cat.jpg");
    }

    #[test]
    fn test_strip_requires_trailing_space() {
        let table = CategoryTable::from_declaration("f");
        assert_eq!(table.strip("fonts\\"), "fonts\\");
        assert_eq!(table.strip("f\\sub\\"), "f\\sub\\");
    }

    #[test]
    fn test_empty_table_only_trims() {
        let table = CategoryTable::default();
        assert!(table.is_empty());
        assert_eq!(table.strip(" \t f Docs\\"), "f Docs\\");
    }

    #[test]
    fn test_longest_token_wins() {
        let table = CategoryTable::from_declaration("x xf");
        assert_eq!(table.tokens().next(), Some("xf"));
        assert_eq!(table.strip("xf Music\\"), "Music\\");
        assert_eq!(table.strip("x Music\\"), "Music\\");
    }

    #[test]
    fn test_strip_is_idempotent() {
        let table = CategoryTable::from_declaration("f d");
        for raw in ["Docs\\", "  f Docs\\report.txt", "d fonts\\", "fd\\x"] {
            let once = table.strip(raw);
            assert_eq!(table.strip(once), once, "raw {raw:?}");
        }
        // Paths without a declared token come back unchanged
        assert_eq!(table.strip("Docs\\report.txt"), "Docs\\report.txt");
    }
}
