//! Record store: the collections displayed by the site.
//!
//! Records are authored by hand as data files in the content directory and
//! loaded once. After loading they are never modified; queries borrow them.
//!
//! ## Data Files
//!
//! ```text
//! content/
//! ├── config.toml
//! ├── projects.toml    # [[projects]] tables
//! ├── blog.json        # {"posts": [...]} or a bare array
//! └── gallery.toml     # [[items]] tables
//! ```
//!
//! Each collection may be written in TOML or JSON. When both exist the TOML
//! file wins. A missing file is an empty collection.
//!
//! ## Validation
//!
//! The loader enforces these rules per collection:
//! - Ids are unique
//! - Titles are not blank
//! - A TOML file has no top-level key other than the collection key

use crate::types::{BlogPost, GalleryItem, Project, Record, RecordId};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error in {path}: {source}")]
    Toml {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("JSON parse error in {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Unexpected key '{key}' in {path} (expected '{expected}')")]
    UnexpectedKey {
        path: PathBuf,
        key: String,
        expected: &'static str,
    },
    #[error("Duplicate id {id} in {collection}")]
    DuplicateId { collection: Collection, id: RecordId },
    #[error("Record {id} in {collection} has an empty title")]
    EmptyTitle { collection: Collection, id: RecordId },
}

/// The three displayed collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    Projects,
    Blog,
    Gallery,
}

impl Collection {
    pub const ALL: [Collection; 3] = [Collection::Projects, Collection::Blog, Collection::Gallery];

    /// File stem of the data file.
    pub fn file_stem(self) -> &'static str {
        match self {
            Collection::Projects => "projects",
            Collection::Blog => "blog",
            Collection::Gallery => "gallery",
        }
    }

    /// Key holding the record array inside the data file.
    pub fn key(self) -> &'static str {
        match self {
            Collection::Projects => "projects",
            Collection::Blog => "posts",
            Collection::Gallery => "items",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_stem())
    }
}

impl FromStr for Collection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "projects" | "project" => Ok(Collection::Projects),
            "blog" | "posts" | "post" => Ok(Collection::Blog),
            "gallery" | "items" => Ok(Collection::Gallery),
            other => Err(format!("unknown collection: {other}")),
        }
    }
}

/// All collections, loaded once.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RecordStore {
    projects: Vec<Project>,
    posts: Vec<BlogPost>,
    gallery: Vec<GalleryItem>,
}

impl RecordStore {
    /// Build a store from in-memory collections, applying the same checks as
    /// [`RecordStore::load`].
    pub fn new(
        projects: Vec<Project>,
        posts: Vec<BlogPost>,
        gallery: Vec<GalleryItem>,
    ) -> Result<Self, StoreError> {
        check_records(Collection::Projects, &projects)?;
        check_records(Collection::Blog, &posts)?;
        check_records(Collection::Gallery, &gallery)?;
        Ok(Self {
            projects,
            posts,
            gallery,
        })
    }

    /// Load every collection from the content directory.
    pub fn load(root: &Path) -> Result<Self, StoreError> {
        let store = Self::new(
            load_collection(root, Collection::Projects)?,
            load_collection(root, Collection::Blog)?,
            load_collection(root, Collection::Gallery)?,
        )?;
        tracing::info!(
            projects = store.projects.len(),
            posts = store.posts.len(),
            gallery = store.gallery.len(),
            "record store loaded"
        );
        Ok(store)
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn posts(&self) -> &[BlogPost] {
        &self.posts
    }

    pub fn gallery(&self) -> &[GalleryItem] {
        &self.gallery
    }

    pub fn len(&self, collection: Collection) -> usize {
        match collection {
            Collection::Projects => self.projects.len(),
            Collection::Blog => self.posts.len(),
            Collection::Gallery => self.gallery.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        Collection::ALL.into_iter().all(|c| self.len(c) == 0)
    }
}

/// Locate the data file for a collection: TOML first, then JSON.
pub fn data_file(root: &Path, collection: Collection) -> Option<PathBuf> {
    ["toml", "json"]
        .into_iter()
        .map(|ext| root.join(format!("{}.{ext}", collection.file_stem())))
        .find(|p| p.is_file())
}

/// Load one collection. A missing data file yields an empty collection.
pub fn load_collection<R>(root: &Path, collection: Collection) -> Result<Vec<R>, StoreError>
where
    R: DeserializeOwned,
{
    let Some(path) = data_file(root, collection) else {
        tracing::debug!(%collection, "no data file, collection is empty");
        return Ok(Vec::new());
    };
    let content = fs::read_to_string(&path)?;
    let is_toml = path.extension().is_some_and(|e| e == "toml");
    if is_toml {
        parse_toml(&path, &content, collection.key())
    } else {
        parse_json(&path, &content, collection.key())
    }
}

fn parse_toml<R: DeserializeOwned>(
    path: &Path,
    content: &str,
    key: &'static str,
) -> Result<Vec<R>, StoreError> {
    let toml_err = |source| StoreError::Toml {
        path: path.to_path_buf(),
        source,
    };
    let mut table: toml::Table = toml::from_str(content).map_err(toml_err)?;
    if let Some(other) = table.keys().find(|k| k.as_str() != key) {
        return Err(StoreError::UnexpectedKey {
            path: path.to_path_buf(),
            key: other.clone(),
            expected: key,
        });
    }
    match table.remove(key) {
        Some(value) => value.try_into().map_err(toml_err),
        None => Ok(Vec::new()),
    }
}

fn parse_json<R: DeserializeOwned>(
    path: &Path,
    content: &str,
    key: &'static str,
) -> Result<Vec<R>, StoreError> {
    let json_err = |source| StoreError::Json {
        path: path.to_path_buf(),
        source,
    };
    let value: serde_json::Value = serde_json::from_str(content).map_err(json_err)?;
    let records = match value {
        serde_json::Value::Object(mut map) => {
            if let Some(other) = map.keys().find(|k| k.as_str() != key) {
                return Err(StoreError::UnexpectedKey {
                    path: path.to_path_buf(),
                    key: other.clone(),
                    expected: key,
                });
            }
            map.remove(key).unwrap_or(serde_json::Value::Array(Vec::new()))
        }
        other => other,
    };
    serde_json::from_value(records).map_err(json_err)
}

fn check_records<R: Record>(collection: Collection, records: &[R]) -> Result<(), StoreError> {
    let mut seen = HashSet::new();
    for record in records {
        if !seen.insert(record.id()) {
            return Err(StoreError::DuplicateId {
                collection,
                id: record.id().clone(),
            });
        }
        if record.title().trim().is_empty() {
            return Err(StoreError::EmptyTitle {
                collection,
                id: record.id().clone(),
            });
        }
    }
    Ok(())
}

/// A category and how many records carry it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub name: String,
    pub count: usize,
}

/// Distinct categories in first-seen order, with record counts.
pub fn categories<R: Record>(records: &[R]) -> Vec<CategoryCount> {
    let mut out: Vec<CategoryCount> = Vec::new();
    for record in records {
        match out.iter_mut().find(|c| c.name == record.category()) {
            Some(entry) => entry.count += 1,
            None => out.push(CategoryCount {
                name: record.category().to_string(),
                count: 1,
            }),
        }
    }
    out
}
