//! Publication date normalization
//!
//! Listing pages print dates as free text in the site's locale, often with
//! separators or entity remnants around them ("Rabu | 5 Januari 2024&nbsp;").
//! This module turns such text into a [`NaiveDate`] that can be used as a
//! sort key. Anything that cannot be read reliably yields `None`.

mod months;

pub use months::INDONESIAN;

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

/// Tokens removed before matching
const NOISE_TOKENS: &[&str] = &["|", "&nbsp;"];

/// Format applied to the extracted `day month year` triple
const DATE_FORMAT: &str = "%d %B %Y";

static DATE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d{1,2})\s([A-Za-z]+)\s(\d{4})").expect("valid date pattern"));

/// Converts locale-specific date text into comparable dates
///
/// The month table is plain data, so supporting another locale means passing
/// another table to [`DateNormalizer::with_months`].
#[derive(Debug, Clone, Copy)]
pub struct DateNormalizer {
    months: &'static [(&'static str, &'static str)],
}

impl Default for DateNormalizer {
    fn default() -> Self {
        Self::indonesian()
    }
}

impl DateNormalizer {
    /// Normalizer for Indonesian month names
    pub fn indonesian() -> Self {
        Self::with_months(INDONESIAN)
    }

    /// Normalizer using a custom `(locale name, English name)` month table
    pub fn with_months(months: &'static [(&'static str, &'static str)]) -> Self {
        Self { months }
    }

    /// Parses raw date text
    ///
    /// # Algorithm
    ///
    /// 1. Trim surrounding whitespace
    /// 2. Replace locale month names with English ones (exact, case-sensitive)
    /// 3. Strip noise tokens (`|`, `&nbsp;`)
    /// 4. Look for `day month year` anywhere in the text
    /// 5. Give up unless there is exactly one such match
    /// 6. Parse the triple as `%d %B %Y`
    ///
    /// # Returns
    ///
    /// * `Some(NaiveDate)` - The publication date
    /// * `None` - The text holds no single readable date
    pub fn normalize(&self, text: &str) -> Option<NaiveDate> {
        let mut cleaned = text.trim().to_string();

        for (local, english) in self.months {
            if cleaned.contains(local) {
                cleaned = cleaned.replace(local, english);
            }
        }

        for token in NOISE_TOKENS {
            cleaned = cleaned.replace(token, "");
        }

        let mut matches = DATE_PATTERN.captures_iter(&cleaned);
        let captures = matches.next()?;
        if matches.next().is_some() {
            tracing::trace!("Ambiguous date text, more than one date in {:?}", text);
            return None;
        }

        let triple = format!("{} {} {}", &captures[1], &captures[2], &captures[3]);
        NaiveDate::parse_from_str(&triple, DATE_FORMAT).ok()
    }
}

/// Normalizes date text with the default (Indonesian) month table
///
/// # Example
///
/// ```
/// use berita_harvester::date::normalize_date;
/// use chrono::NaiveDate;
///
/// assert_eq!(
///     normalize_date("10 Februari 2024"),
///     NaiveDate::from_ymd_opt(2024, 2, 10)
/// );
/// assert_eq!(normalize_date("N/A"), None);
/// ```
pub fn normalize_date(text: &str) -> Option<NaiveDate> {
    DateNormalizer::indonesian().normalize(text)
}
