//! Shared test utilities for the folio test suite.
//!
//! Provides record builders, a canned project collection, content-directory
//! fixtures and lookup helpers.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let records = sample_projects();
//! let view = query(&records, &Query::new().category("Web"));
//! assert_eq!(ids(&view), vec![RecordId::Int(2), RecordId::Int(3)]);
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::types::{Project, ProjectStatus, Record, RecordId};
use crate::validate::ContactForm;

// =========================================================================
// Record builders
// =========================================================================

/// Minimal project with the given id, title, category and tech list.
pub fn project(id: u64, title: &str, category: &str, tech: &[&str]) -> Project {
    Project {
        id: RecordId::Int(id),
        title: title.to_string(),
        description: String::new(),
        category: category.to_string(),
        tech: tech.iter().map(|t| t.to_string()).collect(),
        period: None,
        status: ProjectStatus::Completed,
        link: None,
        views: None,
        likes: None,
    }
}

/// Five projects covering every sort key:
///
/// | id | title | category | period | views | status |
/// |----|-------|----------|--------|-------|--------|
/// | 1 | EAT FAST | Mobile App | Avril 2025 - Présent | 120 | completed |
/// | 2 | Portfolio | Web | 2022 | - | completed |
/// | 3 | Dashboard | Web | Janvier 2024 - Mars 2024 | 300 | in-progress |
/// | 4 | Budget | Mobile App | Sept. 2023 - Déc. 2023 | 120 | completed |
/// | 5 | Écolo | Mobile App | Bientôt | - | planned |
pub fn sample_projects() -> Vec<Project> {
    let mut eat_fast = project(1, "EAT FAST", "Mobile App", &["React Native", "Firebase"]);
    eat_fast.description = "Application de commande de repas".into();
    eat_fast.period = Some("Avril 2025 - Présent".into());
    eat_fast.views = Some(120);

    let mut portfolio = project(2, "Portfolio", "Web", &["Django"]);
    portfolio.description = "Site personnel".into();
    portfolio.period = Some("2022".into());

    let mut dashboard = project(3, "Dashboard", "Web", &["React", "D3"]);
    dashboard.description = "Tableau de bord analytique".into();
    dashboard.period = Some("Janvier 2024 - Mars 2024".into());
    dashboard.views = Some(300);
    dashboard.status = ProjectStatus::InProgress;

    let mut budget = project(4, "Budget", "Mobile App", &["Flutter"]);
    budget.description = "Gestion des dépenses".into();
    budget.period = Some("Sept. 2023 - Déc. 2023".into());
    budget.views = Some(120);

    let mut ecolo = project(5, "Écolo", "Mobile App", &["Kotlin"]);
    ecolo.description = "Suivi carbone".into();
    ecolo.period = Some("Bientôt".into());
    ecolo.status = ProjectStatus::Planned;

    vec![eat_fast, portfolio, dashboard, budget, ecolo]
}

/// A contact form that passes every rule.
pub fn valid_form() -> ContactForm {
    ContactForm {
        name: "A".into(),
        email: "a@b.com".into(),
        subject: "x".into(),
        message: "0123456789".into(),
        phone: None,
    }
}

// =========================================================================
// Extractors
// =========================================================================

/// Ids of a view, in order.
pub fn ids<R: Record>(view: &[R]) -> Vec<RecordId> {
    view.iter().map(|r| r.id().clone()).collect()
}

/// Titles of a view, in order.
pub fn titles<R: Record>(view: &[R]) -> Vec<String> {
    view.iter().map(|r| r.title().to_string()).collect()
}

// =========================================================================
// Content directory fixtures
// =========================================================================

/// Write `files` (relative path, contents) into a fresh temp directory.
pub fn content_dir(files: &[(&str, &str)]) -> TempDir {
    let tmp = TempDir::new().unwrap();
    for (rel, contents) in files {
        write_file(tmp.path(), rel, contents);
    }
    tmp
}

pub fn write_file(root: &Path, rel: &str, contents: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, contents).unwrap();
}

pub const PROJECTS_TOML: &str = r#"
[[projects]]
id = 1
title = "EAT FAST"
category = "Mobile App"
tech = ["React"]
period = "Avril 2025 - Présent"

[[projects]]
id = 2
title = "Portfolio"
category = "Web"
tech = ["Django"]
status = "in-progress"
"#;

pub const BLOG_JSON: &str = r#"{
  "posts": [
    { "id": "rust-intro", "title": "Découvrir Rust", "category": "Tech",
      "tags": ["rust"], "date": "Mars 2024", "pdf": "blog/rust.pdf", "views": 40 },
    { "id": "design", "title": "Design systems", "category": "Design",
      "date": "Janvier 2024", "views": 90 }
  ]
}"#;
