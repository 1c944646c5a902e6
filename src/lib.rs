//! # Folio
//!
//! The content engine behind a personal portfolio site. The site shows a few
//! collections (projects, blog posts, gallery items) that visitors filter,
//! search and sort, plus a contact form. This crate owns everything below the
//! rendering layer: the records, the queries over them, and form validation.
//!
//! # Architecture: Load Once, Query Many
//!
//! ```text
//! content/*.toml|json ──► RecordStore (immutable) ──► query(records, Query) ──► Vec<&R>
//!
//! ContactForm ──► validate() ──► ValidationResult ──► submit(Transport) ──► Outcome
//! ```
//!
//! Records are loaded once and never mutated. Every query borrows the store
//! and returns a new view, so any number of panels can show the same
//! collection under different queries. Queries and validation results are
//! created per interaction and thrown away after rendering.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`types`] | The [`types::Record`] trait and the concrete project, post and gallery records |
//! | [`store`] | Loads collections from the content directory; category listing |
//! | [`query`] | Predicate and comparator builders, the [`query::query`] engine |
//! | [`text`] | Case- and accent-insensitive matching |
//! | [`period`] | French/English period strings → start dates |
//! | [`validate`] | Contact form rules and per-field errors |
//! | [`submit`] | Delivery through an injected transport, with a mailto fallback |
//! | [`prefs`] | Theme and language preferences with update-and-persist |
//! | [`config`] | `config.toml` loading, merging and validation |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Nothing Fails at Query Time
//!
//! The data is authored by the site owner and is small, so a query has no
//! error path. Unknown sort keys keep the input order, unknown categories give
//! an empty view, and blank search terms match everything. Data problems
//! (duplicate ids, blank titles, typos in keys) are caught once, when the
//! store loads.
//!
//! ## Accent-Insensitive Text
//!
//! Content mixes French and English. Search and title ordering fold both case
//! and diacritics, so `ecole` finds "École" and "Élan" sorts with the E's.
//!
//! ## Typed Forms
//!
//! The contact form is a struct, not a string map. Each field has its own
//! rule, and errors are an enum with stable codes (`required`, `invalidEmail`,
//! `tooShort`, `invalidPhone`) plus localized messages.
//!
//! ## Explicit Preferences
//!
//! Theme and language are an ordinary value passed to whoever needs them.
//! Changes go through [`prefs::Preferences::update_and_persist`], which writes
//! the file before updating the value.

pub mod config;
pub mod output;
pub mod period;
pub mod prefs;
pub mod query;
pub mod store;
pub mod submit;
pub mod text;
pub mod types;
pub mod validate;

#[cfg(test)]
pub(crate) mod test_helpers;
