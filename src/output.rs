//! CLI output formatting for every command.
//!
//! # Information-First Display
//!
//! Output is **information-centric**: each record leads with its positional
//! index and title, and its category, period and tags follow as indented
//! context lines. This keeps query results readable as a content inventory.
//!
//! # Output Format
//!
//! ## Query
//!
//! ```text
//! Projects (2 of 5) sort: date, category: Mobile App
//! 001 EAT FAST
//!     Category: Mobile App
//!     Period: Avril 2025 - Présent
//!     Tags: React Native, Firebase
//! 002 Budget
//!     Category: Mobile App
//!     Period: Sept. 2023 - Déc. 2023
//!     Tags: Flutter
//! ```
//!
//! ## Categories
//!
//! ```text
//! Projects
//!     all (5)
//!     Mobile App (3)
//!     Web (2)
//! ```
//!
//! ## Validate
//!
//! ```text
//! Form is invalid
//!     email: Invalid email address (invalidEmail)
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format functions
//! are pure: no I/O, no side effects.

use crate::prefs::Language;
use crate::query::{CategoryFilter, Query, SortKey};
use crate::store::{CategoryCount, Collection, RecordStore};
use crate::submit::Outcome;
use crate::types::Record;
use crate::validate::ValidationResult;

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate_desc(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max).collect();
        format!("{}...", cut)
    }
}

fn collection_label(collection: Collection) -> &'static str {
    match collection {
        Collection::Projects => "Projects",
        Collection::Blog => "Blog",
        Collection::Gallery => "Gallery",
    }
}

/// Header summarizing a query: matched/total and active options.
fn query_header(collection: Collection, q: &Query, matched: usize, total: usize) -> String {
    let mut parts = Vec::new();
    if q.sort_key != SortKey::Original {
        parts.push(format!("sort: {}", q.sort_key));
    }
    if let CategoryFilter::Only(c) = &q.category_filter {
        parts.push(format!("category: {c}"));
    }
    let term = q.search_term.trim();
    if !term.is_empty() {
        parts.push(format!("search: \"{term}\""));
    }
    let head = format!("{} ({} of {})", collection_label(collection), matched, total);
    if parts.is_empty() {
        head
    } else {
        format!("{} {}", head, parts.join(", "))
    }
}

/// Lines for one record: index + title, then context.
fn record_lines<R: Record>(index: usize, record: &R) -> Vec<String> {
    let ctx = indent(1);
    let mut lines = vec![format!("{} {}", format_index(index), record.title())];
    lines.push(format!("{ctx}Category: {}", record.category()));
    if let Some(period) = record.period() {
        lines.push(format!("{ctx}Period: {period}"));
    }
    if !record.tags().is_empty() {
        lines.push(format!("{ctx}Tags: {}", record.tags().join(", ")));
    }
    let desc = truncate_desc(record.description().trim(), 60);
    if !desc.is_empty() {
        lines.push(format!("{ctx}{desc}"));
    }
    lines
}

// ============================================================================
// Query
// ============================================================================

pub fn format_query_output<R: Record>(
    collection: Collection,
    q: &Query,
    view: &[R],
    total: usize,
) -> Vec<String> {
    let mut lines = vec![query_header(collection, q, view.len(), total)];
    if view.is_empty() {
        lines.push(format!("{}(no matching records)", indent(1)));
    }
    for (i, record) in view.iter().enumerate() {
        lines.extend(record_lines(i + 1, record));
    }
    lines
}

pub fn print_query_output<R: Record>(collection: Collection, q: &Query, view: &[R], total: usize) {
    for line in format_query_output(collection, q, view, total) {
        println!("{}", line);
    }
}

// ============================================================================
// Categories
// ============================================================================

pub fn format_categories(collection: Collection, cats: &[CategoryCount]) -> Vec<String> {
    let total: usize = cats.iter().map(|c| c.count).sum();
    let mut lines = vec![collection_label(collection).to_string()];
    lines.push(format!("{}all ({})", indent(1), total));
    for cat in cats {
        lines.push(format!("{}{} ({})", indent(1), cat.name, cat.count));
    }
    lines
}

pub fn print_categories(collection: Collection, cats: &[CategoryCount]) {
    for line in format_categories(collection, cats) {
        println!("{}", line);
    }
}

// ============================================================================
// Validation and submission
// ============================================================================

pub fn format_validation(result: &ValidationResult, language: Language) -> Vec<String> {
    if result.is_valid() {
        return vec!["Form is valid".to_string()];
    }
    let mut lines = vec!["Form is invalid".to_string()];
    for (field, err) in &result.field_errors {
        lines.push(format!(
            "{}{}: {} ({})",
            indent(1),
            field,
            err.message(language),
            err.code()
        ));
    }
    lines
}

pub fn print_validation(result: &ValidationResult, language: Language) {
    for line in format_validation(result, language) {
        println!("{}", line);
    }
}

pub fn format_outcome(outcome: &Outcome, language: Language) -> Vec<String> {
    match outcome {
        Outcome::Delivered => vec!["Message delivered".to_string()],
        Outcome::Rejected(result) => format_validation(result, language),
        Outcome::Fallback { mailto, reason } => vec![
            format!("Delivery failed: {reason}"),
            format!("{}Send it from your mail client instead:", indent(1)),
            format!("{}{mailto}", indent(1)),
        ],
    }
}

pub fn print_outcome(outcome: &Outcome, language: Language) {
    for line in format_outcome(outcome, language) {
        println!("{}", line);
    }
}

// ============================================================================
// Check
// ============================================================================

/// Inventory of a loaded store: record and category counts per collection.
pub fn format_check_output(store: &RecordStore) -> Vec<String> {
    let mut lines = vec!["Collections".to_string()];
    for collection in Collection::ALL {
        let cats = match collection {
            Collection::Projects => crate::store::categories(store.projects()),
            Collection::Blog => crate::store::categories(store.posts()),
            Collection::Gallery => crate::store::categories(store.gallery()),
        };
        lines.push(format!(
            "{}{} ({} records, {} categories)",
            indent(1),
            collection_label(collection),
            store.len(collection),
            cats.len()
        ));
    }
    lines
}

pub fn print_check_output(store: &RecordStore) {
    for line in format_check_output(store) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::query;
    use crate::test_helpers::*;
    use crate::validate::{ContactForm, validate};

    // =========================================================================
    // Helper tests
    // =========================================================================

    #[test]
    fn truncate_desc_short() {
        assert_eq!(truncate_desc("hello", 10), "hello");
    }

    #[test]
    fn truncate_desc_long() {
        assert_eq!(truncate_desc("hello world", 5), "hello...");
    }

    #[test]
    fn truncate_desc_multibyte() {
        assert_eq!(truncate_desc("Présentation", 3), "Pré...");
    }

    #[test]
    fn format_index_pads() {
        assert_eq!(format_index(1), "001");
        assert_eq!(format_index(42), "042");
        assert_eq!(format_index(123), "123");
    }

    #[test]
    fn indent_levels() {
        assert_eq!(indent(0), "");
        assert_eq!(indent(2), "        ");
    }

    // =========================================================================
    // Query output
    // =========================================================================

    #[test]
    fn query_output_header_and_records() {
        let records = sample_projects();
        let q = Query::new().category("Mobile App").sort(SortKey::Date);
        let view = query(&records, &q);
        let lines = format_query_output(Collection::Projects, &q, &view, records.len());
        assert_eq!(lines[0], "Projects (3 of 5) sort: date, category: Mobile App");
        assert_eq!(lines[1], "001 EAT FAST");
        assert_eq!(lines[2], "    Category: Mobile App");
        assert_eq!(lines[3], "    Period: Avril 2025 - Présent");
        assert_eq!(lines[4], "    Tags: React Native, Firebase");
        assert!(lines.contains(&"002 Budget".to_string()));
    }

    #[test]
    fn query_output_plain_header() {
        let records = sample_projects();
        let q = Query::new();
        let view = query(&records, &q);
        let lines = format_query_output(Collection::Projects, &q, &view, records.len());
        assert_eq!(lines[0], "Projects (5 of 5)");
    }

    #[test]
    fn query_output_empty_view() {
        let records = sample_projects();
        let q = Query::new().search("  zzz ");
        let view = query(&records, &q);
        let lines = format_query_output(Collection::Projects, &q, &view, records.len());
        assert_eq!(
            lines,
            vec![
                "Projects (0 of 5) search: \"zzz\"".to_string(),
                "    (no matching records)".to_string()
            ]
        );
    }

    // =========================================================================
    // Categories, validation, outcome
    // =========================================================================

    #[test]
    fn categories_output_has_all_row() {
        let cats = crate::store::categories(&sample_projects());
        let lines = format_categories(Collection::Projects, &cats);
        assert_eq!(
            lines,
            vec!["Projects", "    all (5)", "    Mobile App (3)", "    Web (2)"]
        );
    }

    #[test]
    fn validation_output_lists_errors() {
        let form = ContactForm {
            email: "nope".into(),
            ..valid_form()
        };
        let lines = format_validation(&validate(&form), Language::En);
        assert_eq!(
            lines,
            vec!["Form is invalid", "    email: Invalid email address (invalidEmail)"]
        );
    }

    #[test]
    fn validation_output_valid() {
        let lines = format_validation(&validate(&valid_form()), Language::Fr);
        assert_eq!(lines, vec!["Form is valid"]);
    }

    #[test]
    fn outcome_fallback_shows_link() {
        let outcome = Outcome::Fallback {
            mailto: "mailto:me@example.org".into(),
            reason: "offline".into(),
        };
        let lines = format_outcome(&outcome, Language::En);
        assert_eq!(lines[0], "Delivery failed: offline");
        assert_eq!(lines[2], "    mailto:me@example.org");
    }

    #[test]
    fn check_output_counts_collections() {
        let store = RecordStore::new(sample_projects(), vec![], vec![]).unwrap();
        let lines = format_check_output(&store);
        assert_eq!(lines[1], "    Projects (5 records, 2 categories)");
        assert_eq!(lines[2], "    Blog (0 records, 0 categories)");
    }
}
