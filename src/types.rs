//! Record types shared by the store, the query engine and the CLI output.
//!
//! Every displayed collection (projects, blog posts, gallery items) is a list of
//! records that expose the same small surface through the [`Record`] trait. The
//! query engine is generic over that trait and never needs to know which
//! collection it is working on.
//!
//! Records are authored by hand in the content directory and are read-only once
//! loaded.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier assigned when the data is authored: an integer or a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Int(u64),
    Str(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Int(n) => write!(f, "{n}"),
            RecordId::Str(s) => f.write_str(s),
        }
    }
}

impl From<u64> for RecordId {
    fn from(n: u64) -> Self {
        RecordId::Int(n)
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        RecordId::Str(s.to_string())
    }
}

/// Numeric fields usable for descending "popularity" style ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Views,
    Likes,
    Comments,
    /// Project status rank, see [`ProjectStatus::rank`].
    Status,
}

/// Common surface of every displayed record.
///
/// `searchable_text` is derived on demand from title, description and tags;
/// it is never stored.
pub trait Record {
    fn id(&self) -> &RecordId;
    fn title(&self) -> &str;
    fn description(&self) -> &str;
    fn category(&self) -> &str;
    /// Tags or technologies, in authored order.
    fn tags(&self) -> &[String];
    /// Free-text period (`"Avril 2025 - Présent"`), if the record has one.
    fn period(&self) -> Option<&str>;
    /// Value of a numeric metric, `None` when the record does not carry it.
    fn metric(&self, metric: Metric) -> Option<u64>;

    fn searchable_text(&self) -> String {
        let mut text = format!("{} {}", self.title(), self.description());
        for tag in self.tags() {
            text.push(' ');
            text.push_str(tag);
        }
        text
    }
}

impl<R: Record + ?Sized> Record for &R {
    fn id(&self) -> &RecordId {
        (**self).id()
    }
    fn title(&self) -> &str {
        (**self).title()
    }
    fn description(&self) -> &str {
        (**self).description()
    }
    fn category(&self) -> &str {
        (**self).category()
    }
    fn tags(&self) -> &[String] {
        (**self).tags()
    }
    fn period(&self) -> Option<&str> {
        (**self).period()
    }
    fn metric(&self, metric: Metric) -> Option<u64> {
        (**self).metric(metric)
    }
}

/// Lifecycle state of a project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectStatus {
    #[default]
    Completed,
    InProgress,
    Planned,
}

impl ProjectStatus {
    /// Rank for status ordering: completed work first.
    pub fn rank(self) -> u64 {
        match self {
            ProjectStatus::Completed => 3,
            ProjectStatus::InProgress => 2,
            ProjectStatus::Planned => 1,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ProjectStatus::Completed => "completed",
            ProjectStatus::InProgress => "in-progress",
            ProjectStatus::Planned => "planned",
        }
    }
}

/// A portfolio project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Project {
    pub id: RecordId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub category: String,
    /// Technologies used, e.g. `["React Native", "Django"]`.
    #[serde(default)]
    pub tech: Vec<String>,
    /// Free-text period, e.g. `"Avril 2025 - Présent"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<String>,
    #[serde(default)]
    pub status: ProjectStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub views: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub likes: Option<u64>,
}

impl Record for Project {
    fn id(&self) -> &RecordId {
        &self.id
    }
    fn title(&self) -> &str {
        &self.title
    }
    fn description(&self) -> &str {
        &self.description
    }
    fn category(&self) -> &str {
        &self.category
    }
    fn tags(&self) -> &[String] {
        &self.tech
    }
    fn period(&self) -> Option<&str> {
        self.period.as_deref()
    }
    fn metric(&self, metric: Metric) -> Option<u64> {
        match metric {
            Metric::Views => self.views,
            Metric::Likes => self.likes,
            Metric::Comments => None,
            Metric::Status => Some(self.status.rank()),
        }
    }
}

/// A blog post, published as a PDF.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BlogPost {
    pub id: RecordId,
    pub title: String,
    /// Short excerpt shown on the card.
    #[serde(default)]
    pub description: String,
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Publication date as free text, e.g. `"Mars 2024"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pdf: Option<String>,
    #[serde(default)]
    pub views: u64,
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub comments: u64,
}

impl Record for BlogPost {
    fn id(&self) -> &RecordId {
        &self.id
    }
    fn title(&self) -> &str {
        &self.title
    }
    fn description(&self) -> &str {
        &self.description
    }
    fn category(&self) -> &str {
        &self.category
    }
    fn tags(&self) -> &[String] {
        &self.tags
    }
    fn period(&self) -> Option<&str> {
        self.date.as_deref()
    }
    fn metric(&self, metric: Metric) -> Option<u64> {
        match metric {
            Metric::Views => Some(self.views),
            Metric::Likes => Some(self.likes),
            Metric::Comments => Some(self.comments),
            Metric::Status => None,
        }
    }
}

/// A photo or project screenshot in the gallery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GalleryItem {
    pub id: RecordId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// Image path relative to the content directory.
    pub image: String,
    #[serde(default)]
    pub views: u64,
    #[serde(default)]
    pub likes: u64,
}

impl Record for GalleryItem {
    fn id(&self) -> &RecordId {
        &self.id
    }
    fn title(&self) -> &str {
        &self.title
    }
    fn description(&self) -> &str {
        &self.description
    }
    fn category(&self) -> &str {
        &self.category
    }
    fn tags(&self) -> &[String] {
        &self.tags
    }
    fn period(&self) -> Option<&str> {
        self.date.as_deref()
    }
    fn metric(&self, metric: Metric) -> Option<u64> {
        match metric {
            Metric::Views => Some(self.views),
            Metric::Likes => Some(self.likes),
            Metric::Comments | Metric::Status => None,
        }
    }
}
