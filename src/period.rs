//! Period strings and their start dates.
//!
//! Projects and posts carry a free-text period such as `"Avril 2025 - Présent"`
//! or `"Sept. 2023 - Jan 2024"`. Sorting by date only needs the start of the
//! period: the text before the first range separator, read as a month and a
//! year.
//!
//! ## Accepted start tokens
//!
//! | Input | Parsed |
//! |-------|--------|
//! | `Avril 2025`, `avr. 2025`, `April 2025` | 2025-04-01 |
//! | `février 2024`, `Fevrier 2024`, `Feb 2024` | 2024-02-01 |
//! | `03/2022`, `2022-03` | 2022-03-01 |
//! | `2021`, `2019-2021` | 2021-01-01, 2019-01-01 |
//! | `Présent`, `bientôt`, `` | unparsable |
//!
//! Unparsable starts are not an error. They sort after every dated record.

use crate::text::fold;
use chrono::NaiveDate;
use std::cmp::Ordering;

/// Start of a period, as used for date ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeriodStart {
    Date(NaiveDate),
    Unparsable,
}

impl PeriodStart {
    /// Most recent first; unparsable starts always last.
    pub fn cmp_descending(&self, other: &Self) -> Ordering {
        match (self, other) {
            (PeriodStart::Date(a), PeriodStart::Date(b)) => b.cmp(a),
            (PeriodStart::Date(_), PeriodStart::Unparsable) => Ordering::Less,
            (PeriodStart::Unparsable, PeriodStart::Date(_)) => Ordering::Greater,
            (PeriodStart::Unparsable, PeriodStart::Unparsable) => Ordering::Equal,
        }
    }

    pub fn date(&self) -> Option<NaiveDate> {
        match self {
            PeriodStart::Date(d) => Some(*d),
            PeriodStart::Unparsable => None,
        }
    }
}

/// Range separators, tried in order. The ASCII form requires surrounding
/// spaces so that `2022-03` is not split.
const SEPARATORS: &[&str] = &[" - ", " – ", " — ", "–", "—"];

/// Month names in folded form (lowercase, no accents), French and English,
/// full and abbreviated.
const MONTHS: &[(&str, u32)] = &[
    ("janvier", 1),
    ("janv", 1),
    ("january", 1),
    ("jan", 1),
    ("fevrier", 2),
    ("fevr", 2),
    ("fev", 2),
    ("february", 2),
    ("feb", 2),
    ("mars", 3),
    ("march", 3),
    ("mar", 3),
    ("avril", 4),
    ("avr", 4),
    ("april", 4),
    ("apr", 4),
    ("mai", 5),
    ("may", 5),
    ("juin", 6),
    ("june", 6),
    ("jun", 6),
    ("juillet", 7),
    ("juil", 7),
    ("july", 7),
    ("jul", 7),
    ("aout", 8),
    ("august", 8),
    ("aug", 8),
    ("septembre", 9),
    ("september", 9),
    ("sept", 9),
    ("sep", 9),
    ("octobre", 10),
    ("october", 10),
    ("oct", 10),
    ("novembre", 11),
    ("november", 11),
    ("nov", 11),
    ("decembre", 12),
    ("december", 12),
    ("dec", 12),
];

/// Extract the start portion of a period range.
///
/// `"Avril 2025 - Présent"` → `"Avril 2025"`. Strings without a separator are
/// returned trimmed.
pub fn start_token(period: &str) -> &str {
    SEPARATORS
        .iter()
        .filter_map(|sep| period.find(sep))
        .min()
        .map(|pos| &period[..pos])
        .unwrap_or(period)
        .trim()
}

/// Look up a month name (any case, accents optional, trailing dot allowed).
pub fn month_number(word: &str) -> Option<u32> {
    let folded = fold(word.trim_end_matches('.'));
    MONTHS
        .iter()
        .find(|(name, _)| *name == folded)
        .map(|(_, n)| *n)
}

fn parse_year(word: &str) -> Option<i32> {
    if word.len() == 4 && word.chars().all(|c| c.is_ascii_digit()) {
        word.parse().ok()
    } else {
        None
    }
}

fn first_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, 1)
}

/// Numeric forms: `MM/YYYY`, `YYYY-MM` and the year range `YYYY-YYYY`.
fn parse_numeric(token: &str) -> Option<NaiveDate> {
    if let Some((m, y)) = token.split_once('/') {
        let month: u32 = m.parse().ok()?;
        return first_of_month(parse_year(y)?, month);
    }
    if let Some((y, rest)) = token.split_once('-') {
        let year = parse_year(y)?;
        // `2019-2021` is a year range, not year and month.
        if parse_year(rest).is_some() {
            return first_of_month(year, 1);
        }
        if rest.is_empty() || rest.len() > 2 {
            return None;
        }
        let month: u32 = rest.parse().ok()?;
        return first_of_month(year, month);
    }
    None
}

/// Year at the start of a word, ignoring a hyphenated tail (`2025-Présent`).
fn leading_year(word: &str) -> Option<i32> {
    parse_year(word.split('-').next().unwrap_or(word))
}

/// Parse the start of a period string.
pub fn parse_start(period: &str) -> PeriodStart {
    let token = start_token(period);
    let words: Vec<&str> = token
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|w| !w.is_empty())
        .collect();

    // Month name followed by a year, anywhere in the token ("Début avril 2025").
    for pair in words.windows(2) {
        if let (Some(month), Some(year)) = (month_number(pair[0]), leading_year(pair[1])) {
            if let Some(date) = first_of_month(year, month) {
                return PeriodStart::Date(date);
            }
        }
    }

    for word in &words {
        if let Some(date) = parse_numeric(word) {
            return PeriodStart::Date(date);
        }
    }

    if let [only] = words.as_slice() {
        if let Some(date) = leading_year(only).and_then(|y| first_of_month(y, 1)) {
            return PeriodStart::Date(date);
        }
    }

    PeriodStart::Unparsable
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32) -> PeriodStart {
        PeriodStart::Date(NaiveDate::from_ymd_opt(y, m, 1).unwrap())
    }

    // =========================================================================
    // start_token()
    // =========================================================================

    #[test]
    fn start_token_splits_on_spaced_dash() {
        assert_eq!(start_token("Avril 2025 - Présent"), "Avril 2025");
    }

    #[test]
    fn start_token_splits_on_en_dash() {
        assert_eq!(start_token("Sept 2023 – Jan 2024"), "Sept 2023");
        assert_eq!(start_token("2019–2021"), "2019");
    }

    #[test]
    fn start_token_keeps_iso_month() {
        assert_eq!(start_token("2022-03"), "2022-03");
    }

    #[test]
    fn start_token_without_separator() {
        assert_eq!(start_token("  Mars 2024  "), "Mars 2024");
    }

    // =========================================================================
    // month_number()
    // =========================================================================

    #[test]
    fn month_french_full_names() {
        assert_eq!(month_number("Avril"), Some(4));
        assert_eq!(month_number("février"), Some(2));
        assert_eq!(month_number("Août"), Some(8));
        assert_eq!(month_number("DÉCEMBRE"), Some(12));
    }

    #[test]
    fn month_english_and_abbreviations() {
        assert_eq!(month_number("April"), Some(4));
        assert_eq!(month_number("Sept."), Some(9));
        assert_eq!(month_number("janv."), Some(1));
        assert_eq!(month_number("Oct"), Some(10));
    }

    #[test]
    fn month_unknown_word() {
        assert_eq!(month_number("Présent"), None);
        assert_eq!(month_number("2025"), None);
    }

    // =========================================================================
    // parse_start()
    // =========================================================================

    #[test]
    fn parses_french_range() {
        assert_eq!(parse_start("Avril 2025 - Présent"), ymd(2025, 4));
    }

    #[test]
    fn parses_english_month_year() {
        assert_eq!(parse_start("March 2024"), ymd(2024, 3));
    }

    #[test]
    fn parses_unaccented_french() {
        assert_eq!(parse_start("fevrier 2023 - mai 2023"), ymd(2023, 2));
    }

    #[test]
    fn parses_numeric_forms() {
        assert_eq!(parse_start("03/2022"), ymd(2022, 3));
        assert_eq!(parse_start("2022-11"), ymd(2022, 11));
    }

    #[test]
    fn parses_bare_year_as_january() {
        assert_eq!(parse_start("2021 - 2022"), ymd(2021, 1));
    }

    #[test]
    fn parses_year_range_without_spaces() {
        assert_eq!(parse_start("2019-2021"), ymd(2019, 1));
    }

    #[test]
    fn parses_month_year_with_hyphenated_tail() {
        assert_eq!(parse_start("Avril 2025-Présent"), ymd(2025, 4));
        assert_eq!(parse_start("2024-Présent"), ymd(2024, 1));
    }

    #[test]
    fn date_accessor() {
        assert_eq!(
            parse_start("Mars 2024").date(),
            NaiveDate::from_ymd_opt(2024, 3, 1)
        );
        assert_eq!(parse_start("Bientôt").date(), None);
    }

    #[test]
    fn parses_month_with_leading_word() {
        assert_eq!(parse_start("Depuis juin 2020"), ymd(2020, 6));
    }

    #[test]
    fn unparsable_inputs() {
        assert_eq!(parse_start(""), PeriodStart::Unparsable);
        assert_eq!(parse_start("Présent"), PeriodStart::Unparsable);
        assert_eq!(parse_start("Avril"), PeriodStart::Unparsable);
        assert_eq!(parse_start("13/2022"), PeriodStart::Unparsable);
        assert_eq!(parse_start("Avril 25"), PeriodStart::Unparsable);
    }

    // =========================================================================
    // cmp_descending()
    // =========================================================================

    #[test]
    fn descending_puts_recent_first() {
        assert_eq!(ymd(2025, 4).cmp_descending(&ymd(2023, 1)), Ordering::Less);
        assert_eq!(ymd(2023, 1).cmp_descending(&ymd(2025, 4)), Ordering::Greater);
    }

    #[test]
    fn descending_puts_unparsable_last() {
        assert_eq!(
            ymd(1999, 1).cmp_descending(&PeriodStart::Unparsable),
            Ordering::Less
        );
        assert_eq!(
            PeriodStart::Unparsable.cmp_descending(&ymd(1999, 1)),
            Ordering::Greater
        );
        assert_eq!(
            PeriodStart::Unparsable.cmp_descending(&PeriodStart::Unparsable),
            Ordering::Equal
        );
    }
}
