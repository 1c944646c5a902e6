//! Visitor preferences: color theme and display language.
//!
//! Preferences are a plain value loaded once at startup and handed to whatever
//! renders the site. Changing a preference goes through
//! [`Preferences::update_and_persist`], which applies the change and writes the
//! whole file back, so the stored copy never drifts from the in-memory one.
//!
//! ```toml
//! theme = "dark"      # light | dark | system
//! language = "en"     # fr | en
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PrefsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Unknown {kind}: {value}")]
    Unknown { kind: &'static str, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
            Theme::System => "system",
        }
    }

    /// Light ↔ dark. `System` toggles to dark.
    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light | Theme::System => Theme::Dark,
        }
    }
}

impl FromStr for Theme {
    type Err = PrefsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            "system" => Ok(Theme::System),
            other => Err(PrefsError::Unknown {
                kind: "theme",
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display language. Content is authored in French first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Fr,
    En,
}

impl Language {
    pub fn as_str(self) -> &'static str {
        match self {
            Language::Fr => "fr",
            Language::En => "en",
        }
    }
}

impl FromStr for Language {
    type Err = PrefsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fr" | "french" | "français" => Ok(Language::Fr),
            "en" | "english" => Ok(Language::En),
            other => Err(PrefsError::Unknown {
                kind: "language",
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Preferences {
    pub theme: Theme,
    pub language: Language,
}

impl Preferences {
    /// Load preferences from `path`.
    ///
    /// A missing file yields defaults; a malformed one is an error.
    pub fn load(path: &Path) -> Result<Self, PrefsError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no preferences file, using defaults");
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load preferences, falling back to `language` when no file exists yet.
    pub fn load_or(path: &Path, language: Language) -> Result<Self, PrefsError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self {
                language,
                ..Self::default()
            })
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), PrefsError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml::to_string(self)?)?;
        Ok(())
    }

    /// Apply `change` and persist the result to `path`.
    ///
    /// The in-memory value is only updated once the write succeeded.
    pub fn update_and_persist<F>(&mut self, path: &Path, change: F) -> Result<(), PrefsError>
    where
        F: FnOnce(&mut Preferences),
    {
        let mut next = *self;
        change(&mut next);
        next.save(path)?;
        tracing::info!(theme = %next.theme, language = %next.language, "preferences saved");
        *self = next;
        Ok(())
    }
}
