//! Collection query engine.
//!
//! A query is a category filter, a free-text search term and a sort key. It is
//! applied to a slice of records in two steps:
//!
//! ```text
//! records ──► Predicate (category ∧ search) ──► stable sort (SortKey) ──► Vec<&R>
//! ```
//!
//! The engine is pure: it borrows the input slice, never reorders or mutates it,
//! and returns a freshly allocated view of references. Several panels can hold
//! the same base collection under different queries at the same time.
//!
//! ## Degradation instead of errors
//!
//! Nothing in a query can fail. An unknown sort key keeps the input order, a
//! category that does not exist in the data yields an empty view, and a
//! whitespace-only search term matches everything.

use crate::period::{self, PeriodStart};
use crate::text;
use crate::types::{Metric, Record};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Sentinel value selecting every category.
pub const ALL_CATEGORIES: &str = "all";

/// Restricts a query to one category, or admits all of them.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CategoryFilter {
    #[default]
    All,
    Only(String),
}

impl CategoryFilter {
    /// `"all"` (any case) and the empty string select every category; any
    /// other value is matched exactly.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(ALL_CATEGORIES) {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(trimmed.to_string())
        }
    }

    pub fn admits(&self, category: &str) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => wanted == category,
        }
    }
}

impl From<String> for CategoryFilter {
    fn from(raw: String) -> Self {
        CategoryFilter::parse(&raw)
    }
}

impl From<CategoryFilter> for String {
    fn from(filter: CategoryFilter) -> Self {
        match filter {
            CategoryFilter::All => ALL_CATEGORIES.to_string(),
            CategoryFilter::Only(c) => c,
        }
    }
}

/// Named sort strategies.
///
/// Parsing never fails: unrecognized names become [`SortKey::Original`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SortKey {
    /// Keep the input order.
    #[default]
    Original,
    /// Most recent period start first; unparsable periods last.
    Date,
    /// Ascending, ignoring case and accents.
    Title,
    /// Ascending by category string.
    Category,
    /// Descending by a numeric metric; records without it last.
    Metric(Metric),
}

impl SortKey {
    /// Strict lookup: `None` for names that are not sort keys.
    pub fn lookup(raw: &str) -> Option<Self> {
        let key = match raw.trim().to_ascii_lowercase().as_str() {
            "date" => SortKey::Date,
            "title" => SortKey::Title,
            "category" => SortKey::Category,
            "views" | "popularity" => SortKey::Metric(Metric::Views),
            "likes" => SortKey::Metric(Metric::Likes),
            "comments" => SortKey::Metric(Metric::Comments),
            "status" => SortKey::Metric(Metric::Status),
            "" | "original" | "none" => SortKey::Original,
            _ => return None,
        };
        Some(key)
    }

    pub fn parse(raw: &str) -> Self {
        Self::lookup(raw).unwrap_or_else(|| {
            tracing::debug!(sort_key = raw, "unknown sort key, keeping input order");
            SortKey::Original
        })
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::Original => "original",
            SortKey::Date => "date",
            SortKey::Title => "title",
            SortKey::Category => "category",
            SortKey::Metric(Metric::Views) => "views",
            SortKey::Metric(Metric::Likes) => "likes",
            SortKey::Metric(Metric::Comments) => "comments",
            SortKey::Metric(Metric::Status) => "status",
        }
    }
}

impl FromStr for SortKey {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(SortKey::parse(s))
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for SortKey {
    fn from(raw: String) -> Self {
        SortKey::parse(&raw)
    }
}

impl From<SortKey> for String {
    fn from(key: SortKey) -> Self {
        key.as_str().to_string()
    }
}

/// A full query: filter, search and ordering.
///
/// Deserializes from the camelCase shape UI controls send:
///
/// ```json
/// { "categoryFilter": "Mobile App", "searchTerm": "react", "sortKey": "date" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Query {
    pub category_filter: CategoryFilter,
    pub search_term: String,
    pub sort_key: SortKey,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(mut self, category: &str) -> Self {
        self.category_filter = CategoryFilter::parse(category);
        self
    }

    pub fn search(mut self, term: &str) -> Self {
        self.search_term = term.to_string();
        self
    }

    pub fn sort(mut self, key: SortKey) -> Self {
        self.sort_key = key;
        self
    }
}

// =============================================================================
// Predicate builder
// =============================================================================

/// Inclusion test built once per query and applied per record.
#[derive(Debug, Clone)]
pub struct Predicate {
    category: CategoryFilter,
    /// Trimmed, folded search term. Empty matches everything.
    needle: String,
}

impl Predicate {
    pub fn from_query(query: &Query) -> Self {
        Self {
            category: query.category_filter.clone(),
            needle: text::fold(query.search_term.trim()),
        }
    }

    pub fn matches<R: Record>(&self, record: &R) -> bool {
        self.category.admits(record.category()) && self.matches_search(record)
    }

    fn matches_search<R: Record>(&self, record: &R) -> bool {
        if self.needle.is_empty() {
            return true;
        }
        text::contains_prefolded(record.title(), &self.needle)
            || text::contains_prefolded(record.description(), &self.needle)
            || record
                .tags()
                .iter()
                .any(|tag| text::contains_prefolded(tag, &self.needle))
    }
}

// =============================================================================
// Comparator builder
// =============================================================================

/// Precomputed per-record sort value. Only values produced for the same
/// [`SortKey`] are ever compared with each other.
#[derive(Debug, Clone, PartialEq, Eq)]
enum SortValue {
    Date(PeriodStart),
    Text(String),
    Metric(Option<u64>),
}

impl SortValue {
    fn of<R: Record>(key: SortKey, record: &R) -> Option<Self> {
        match key {
            SortKey::Original => None,
            SortKey::Date => Some(SortValue::Date(
                record
                    .period()
                    .map(period::parse_start)
                    .unwrap_or(PeriodStart::Unparsable),
            )),
            SortKey::Title => Some(SortValue::Text(text::fold(record.title()))),
            SortKey::Category => Some(SortValue::Text(record.category().to_string())),
            SortKey::Metric(metric) => Some(SortValue::Metric(record.metric(metric))),
        }
    }

    fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortValue::Date(a), SortValue::Date(b)) => a.cmp_descending(b),
            (SortValue::Text(a), SortValue::Text(b)) => a.cmp(b),
            (SortValue::Metric(a), SortValue::Metric(b)) => match (a, b) {
                (Some(a), Some(b)) => b.cmp(a),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            },
            _ => Ordering::Equal,
        }
    }
}

/// Build an ordering function for a sort key.
///
/// Returns `None` for [`SortKey::Original`], meaning "do not sort".
pub fn comparator<R: Record>(key: SortKey) -> Option<impl Fn(&R, &R) -> Ordering> {
    if key == SortKey::Original {
        return None;
    }
    Some(move |a: &R, b: &R| match (SortValue::of(key, a), SortValue::of(key, b)) {
        (Some(a), Some(b)) => a.compare(&b),
        _ => Ordering::Equal,
    })
}

/// Stable sort of a view by `key`, computing each record's sort value once.
pub fn sort_view<'a, R: Record>(view: &mut Vec<&'a R>, key: SortKey) {
    if key == SortKey::Original {
        return;
    }
    let mut keyed: Vec<(Option<SortValue>, &'a R)> = view
        .drain(..)
        .map(|record| (SortValue::of(key, record), record))
        .collect();
    keyed.sort_by(|(a, _), (b, _)| match (a, b) {
        (Some(a), Some(b)) => a.compare(b),
        _ => Ordering::Equal,
    });
    view.extend(keyed.into_iter().map(|(_, record)| record));
}

// =============================================================================
// Query engine
// =============================================================================

/// Apply a query to a collection.
///
/// Filters with the query's [`Predicate`], then stable-sorts by its
/// [`SortKey`]. Records with equal sort values keep their input order.
pub fn query<'a, R: Record>(records: &'a [R], q: &Query) -> Vec<&'a R> {
    let predicate = Predicate::from_query(q);
    let mut view: Vec<&'a R> = records.iter().filter(|r| predicate.matches(*r)).collect();
    sort_view(&mut view, q.sort_key);
    tracing::trace!(
        total = records.len(),
        matched = view.len(),
        sort = %q.sort_key,
        "query applied"
    );
    view
}
