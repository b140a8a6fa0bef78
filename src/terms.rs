//! Extraction of search terms from titles

use std::collections::BTreeSet;

/// Lowercase ASCII alphanumeric search term
pub type Term = Box<str>;

/// Distinct terms of a title, in sorted order
pub type TermSet = BTreeSet<Term>;

/// Split a title into its set of search terms
///
/// Any run of characters other than ASCII letters and digits separates terms,
/// and terms are case-insensitive.
pub fn extract_terms(title: &str) -> TermSet {
    title
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|term| !term.is_empty())
        .map(|term| term.to_ascii_lowercase().into())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn terms(title: &str) -> Vec<String> {
        extract_terms(title).into_iter().map(String::from).collect()
    }

    #[test]
    fn punctuation_separates_terms() {
        assert_eq!(terms("3-D_Movie!!"), ["3", "d", "movie"]);
        assert_eq!(
            terms("Rust_(programming_language)"),
            ["language", "programming", "rust"]
        );
    }

    #[test]
    fn case_insensitive_dedup() {
        assert_eq!(terms("Dog_eat_DOG_dog"), ["dog", "eat"]);
    }

    #[test]
    fn non_ascii_separates_terms() {
        assert_eq!(terms("Café_Zürich"), ["caf", "rich", "z"]);
        assert_eq!(terms("東京"), Vec::<&str>::new());
    }

    #[test]
    fn no_terms() {
        assert!(extract_terms("___").is_empty());
        assert!(extract_terms("").is_empty());
        assert!(extract_terms("!?").is_empty());
    }
}
