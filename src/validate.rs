//! Contact form validation.
//!
//! The contact form has four required fields and one optional field. Each
//! field is checked independently; the result maps every invalid field to an
//! error code and omits valid fields.
//!
//! | Field | Rule | Errors |
//! |-------|------|--------|
//! | `name` | non-blank | `required` |
//! | `email` | non-blank, `local@domain.tld`, no whitespace | `required`, `invalidEmail` |
//! | `subject` | non-blank | `required` |
//! | `message` | non-blank, at least 10 characters after trimming | `required`, `tooShort` |
//! | `phone` | optional; `+` then 2–15 digits, separators ignored | `invalidPhone` |
//!
//! Validation is total: every input, including an entirely empty form, yields
//! a [`ValidationResult`]. Running it twice on the same form yields the same
//! result, and no field's outcome depends on any other field.

use crate::prefs::Language;
use regex::Regex;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

/// Minimum message length, in characters, after trimming.
pub const MIN_MESSAGE_CHARS: usize = 10;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern must compile")
});

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9]{2,15}$").expect("phone pattern must compile"));

/// Submitted contact form values.
///
/// Missing fields deserialize as empty strings, so a partially filled form
/// still validates (and reports the missing fields as `required`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl ContactForm {
    /// Build a form from loose `field name → value` pairs, as collected from
    /// form inputs. Unknown names are ignored.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut form = ContactForm::default();
        for (key, value) in pairs {
            match Field::from_name(key.as_ref()) {
                Some(field) => form.set(field, value.into()),
                None => tracing::debug!(field = key.as_ref(), "ignoring unknown form field"),
            }
        }
        form
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        match field {
            Field::Name => Some(&self.name),
            Field::Email => Some(&self.email),
            Field::Subject => Some(&self.subject),
            Field::Message => Some(&self.message),
            Field::Phone => self.phone.as_deref(),
        }
    }

    /// Copy with surrounding whitespace removed from every field. A blank
    /// phone becomes `None`.
    pub fn trimmed(&self) -> Self {
        let mut out = ContactForm::default();
        for field in Field::ALL {
            let Some(value) = self.get(field).map(str::trim) else {
                continue;
            };
            if field == Field::Phone && value.is_empty() {
                continue;
            }
            out.set(field, value.to_string());
        }
        out
    }

    pub fn set(&mut self, field: Field, value: String) {
        match field {
            Field::Name => self.name = value,
            Field::Email => self.email = value,
            Field::Subject => self.subject = value,
            Field::Message => self.message = value,
            Field::Phone => self.phone = Some(value),
        }
    }
}

/// Names of the contact form fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Name,
    Email,
    Subject,
    Message,
    Phone,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::Name,
        Field::Email,
        Field::Subject,
        Field::Message,
        Field::Phone,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Email => "email",
            Field::Subject => "subject",
            Field::Message => "message",
            Field::Phone => "phone",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Field::ALL.into_iter().find(|f| f.as_str() == name)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a field is invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldError {
    Required,
    InvalidEmail,
    TooShort,
    InvalidPhone,
}

impl FieldError {
    /// Stable code, as shown in the `fieldErrors` map.
    pub fn code(self) -> &'static str {
        match self {
            FieldError::Required => "required",
            FieldError::InvalidEmail => "invalidEmail",
            FieldError::TooShort => "tooShort",
            FieldError::InvalidPhone => "invalidPhone",
        }
    }

    /// Human-readable message for inline display.
    pub fn message(self, language: Language) -> &'static str {
        match (self, language) {
            (FieldError::Required, Language::Fr) => "Ce champ est requis",
            (FieldError::Required, Language::En) => "This field is required",
            (FieldError::InvalidEmail, Language::Fr) => "Adresse e-mail invalide",
            (FieldError::InvalidEmail, Language::En) => "Invalid email address",
            (FieldError::TooShort, Language::Fr) => {
                "Le message doit contenir au moins 10 caractères"
            }
            (FieldError::TooShort, Language::En) => "Message must be at least 10 characters",
            (FieldError::InvalidPhone, Language::Fr) => "Numéro de téléphone invalide",
            (FieldError::InvalidPhone, Language::En) => "Invalid phone number",
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Outcome of validating a form: one entry per invalid field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    pub field_errors: BTreeMap<Field, FieldError>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.field_errors.is_empty()
    }

    pub fn error(&self, field: Field) -> Option<FieldError> {
        self.field_errors.get(&field).copied()
    }

    /// Field → localized message, for rendering inline errors.
    pub fn messages(&self, language: Language) -> BTreeMap<Field, &'static str> {
        self.field_errors
            .iter()
            .map(|(field, err)| (*field, err.message(language)))
            .collect()
    }
}

impl Serialize for ValidationResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ValidationResult", 2)?;
        state.serialize_field("fieldErrors", &self.field_errors)?;
        state.serialize_field("isValid", &self.is_valid())?;
        state.end()
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn check_required(value: &str) -> Option<FieldError> {
    is_blank(value).then_some(FieldError::Required)
}

/// `local@domain.tld` shape check, ignoring surrounding whitespace.
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value.trim())
}

fn check_email(value: &str) -> Option<FieldError> {
    if is_blank(value) {
        Some(FieldError::Required)
    } else if !is_valid_email(value) {
        Some(FieldError::InvalidEmail)
    } else {
        None
    }
}

fn check_message(value: &str) -> Option<FieldError> {
    let len = value.trim().chars().count();
    if len == 0 {
        Some(FieldError::Required)
    } else if len < MIN_MESSAGE_CHARS {
        Some(FieldError::TooShort)
    } else {
        None
    }
}

/// Digits and an optional leading `+`, with spaces, dashes, dots and
/// parentheses removed.
fn compact_phone(value: &str) -> String {
    value
        .trim()
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '.' | '(' | ')'))
        .collect()
}

fn check_phone(value: Option<&str>) -> Option<FieldError> {
    match value {
        None => None,
        Some(v) if is_blank(v) => None,
        Some(v) => (!PHONE_RE.is_match(&compact_phone(v))).then_some(FieldError::InvalidPhone),
    }
}

/// Validate a single field of the form.
///
/// Used when one input changes and only its error needs refreshing.
pub fn validate_field(field: Field, form: &ContactForm) -> Option<FieldError> {
    match field {
        Field::Name => check_required(&form.name),
        Field::Email => check_email(&form.email),
        Field::Subject => check_required(&form.subject),
        Field::Message => check_message(&form.message),
        Field::Phone => check_phone(form.phone.as_deref()),
    }
}

/// Validate every field of the form.
pub fn validate(form: &ContactForm) -> ValidationResult {
    let field_errors = Field::ALL
        .into_iter()
        .filter_map(|field| validate_field(field, form).map(|err| (field, err)))
        .collect();
    ValidationResult { field_errors }
}
