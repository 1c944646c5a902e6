//! Site configuration module.
//!
//! Handles loading, validating, and merging the `config.toml` found in the
//! content root. Stock defaults are serialized to a TOML table, the user file
//! is merged on top of it key by key, and the merged table is deserialized and
//! validated.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! prefs_file = ".folio/prefs.toml"  # Where visitor preferences are persisted
//!
//! [site]
//! owner = ""                # Portfolio owner, shown in CLI headers
//! title = "Portfolio"
//!
//! [contact]
//! fallback_email = ""       # Recipient of the mailto fallback link
//! # endpoint = "https://script.example.com/exec"
//!
//! [query]
//! default_sort = "date"     # date | title | category | views | likes | comments | status | original
//!
//! [i18n]
//! default_language = "fr"   # fr | en
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::prefs::Language;
use crate::query::SortKey;
use crate::validate;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
///
/// All fields have defaults. User config files need only specify the values
/// they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Preferences file, relative to the content root.
    pub prefs_file: String,
    pub site: SiteInfo,
    pub contact: ContactConfig,
    pub query: QueryConfig,
    pub i18n: I18nConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            prefs_file: ".folio/prefs.toml".to_string(),
            site: SiteInfo::default(),
            contact: ContactConfig::default(),
            query: QueryConfig::default(),
            i18n: I18nConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let email = &self.contact.fallback_email;
        if !email.is_empty() && !validate::is_valid_email(email) {
            return Err(ConfigError::Validation(format!(
                "contact.fallback_email is not an email address: {email}"
            )));
        }
        if let Some(endpoint) = &self.contact.endpoint {
            if !(endpoint.starts_with("https://") || endpoint.starts_with("http://")) {
                return Err(ConfigError::Validation(
                    "contact.endpoint must be an http(s) URL".into(),
                ));
            }
        }
        if SortKey::lookup(&self.query.default_sort).is_none() {
            return Err(ConfigError::Validation(format!(
                "query.default_sort is not a sort key: {}",
                self.query.default_sort
            )));
        }
        if self.prefs_file.trim().is_empty() {
            return Err(ConfigError::Validation(
                "prefs_file must not be empty".into(),
            ));
        }
        Ok(())
    }

    /// The configured default sort key.
    pub fn default_sort(&self) -> SortKey {
        SortKey::parse(&self.query.default_sort)
    }
}

/// Who the portfolio belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteInfo {
    pub owner: String,
    pub title: String,
}

impl Default for SiteInfo {
    fn default() -> Self {
        Self {
            owner: String::new(),
            title: "Portfolio".to_string(),
        }
    }
}

/// Contact form delivery settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ContactConfig {
    /// Recipient of the pre-filled `mailto:` link used when delivery fails.
    pub fallback_email: String,
    /// Form submission endpoint (HTTP POST of JSON).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
}

/// Query defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct QueryConfig {
    /// Sort key applied when a query does not name one.
    pub default_sort: String,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            default_sort: "date".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct I18nConfig {
    /// Language used until a visitor picks one.
    pub default_language: Language,
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the canonical representation of all default values, used as the
/// base layer for merging user overrides on top.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(SiteConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if no `config.toml` exists in the directory.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = path.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(root)?;
    if overlay.is_none() {
        tracing::debug!(root = %root.display(), "no config.toml, using stock defaults");
    }
    let config = resolve_config(base, overlay)?;
    if config.contact.fallback_email.is_empty() {
        tracing::warn!("contact.fallback_email is empty; mailto fallback will have no recipient");
    }
    Ok(config)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Folio Configuration
# ===================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# Where visitor preferences (theme, language) are persisted,
# relative to the content directory.
prefs_file = ".folio/prefs.toml"

# ---------------------------------------------------------------------------
# Site
# ---------------------------------------------------------------------------
[site]
# Portfolio owner, shown in CLI headers.
owner = ""
title = "Portfolio"

# ---------------------------------------------------------------------------
# Contact form
# ---------------------------------------------------------------------------
[contact]
# Recipient of the pre-filled mailto: link offered when delivery fails.
fallback_email = ""

# Submission endpoint receiving the form as a JSON POST and answering
# {"success": true} or {"success": false, "error": "..."}.
# endpoint = "https://script.example.com/exec"

# ---------------------------------------------------------------------------
# Queries
# ---------------------------------------------------------------------------
[query]
# Sort applied when none is requested:
# date | title | category | views | likes | comments | status | original
default_sort = "date"

# ---------------------------------------------------------------------------
# Languages
# ---------------------------------------------------------------------------
[i18n]
# Language used until a visitor picks one: fr | en
default_language = "fr"
"##
}
