//! Text normalization shared by search matching and title ordering.
//!
//! Content is authored in a mix of French and English, so comparisons must
//! not care about case or accents: a visitor typing `cafe` expects to find
//! "Café", and "Élan" should sort next to "Elan" rather than after "Zèbre".
//!
//! Normalization is NFD decomposition followed by dropping combining marks,
//! then lowercasing. It is computed on demand and never stored.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Fold a string for comparison: strip diacritics and lowercase.
///
/// ```text
/// "Présent"  → "present"
/// "ÉCOLE"    → "ecole"
/// "naïve"    → "naive"
/// ```
pub fn fold(input: &str) -> String {
    input
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

/// Case- and diacritics-insensitive substring test.
///
/// An empty needle matches every haystack.
pub fn contains_folded(haystack: &str, needle: &str) -> bool {
    fold(haystack).contains(&fold(needle))
}

/// Like [`contains_folded`], but with a needle that was already folded.
///
/// The query engine folds the search term once per query and calls this per
/// record field.
pub fn contains_prefolded(haystack: &str, folded_needle: &str) -> bool {
    folded_needle.is_empty() || fold(haystack).contains(folded_needle)
}
