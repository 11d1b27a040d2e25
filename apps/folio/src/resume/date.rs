//! Locale-aware date ranges for work, education and project periods.
//!
//! Only two behaviours exist: French, and everything else in English.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Formatting locale for resume dates. Any code other than `fr` is English.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Fr,
    En,
}

impl Locale {
    pub fn from_code(code: &str) -> Self {
        if code == "fr" {
            Locale::Fr
        } else {
            Locale::En
        }
    }

    fn present(self) -> &'static str {
        match self {
            Locale::Fr => "Présent",
            Locale::En => "Present",
        }
    }

    fn month_abbrev(self, month0: u32) -> &'static str {
        let table = match self {
            Locale::Fr => &FR_MONTHS,
            Locale::En => &EN_MONTHS,
        };
        table[month0 as usize % 12]
    }
}

// Matches `toLocaleDateString(..., { month: "short" })` output.
const FR_MONTHS: [&str; 12] = [
    "janv.", "févr.", "mars", "avr.", "mai", "juin", "juil.", "août", "sept.", "oct.", "nov.",
    "déc.",
];

const EN_MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Formats `"{start} - {end}"`. An empty side reads as "Present"/"Présent".
pub fn format_date_range(start: &str, end: &str, locale: Locale) -> String {
    format!("{} - {}", format_date(start, locale), format_date(end, locale))
}

/// Abbreviated month and four-digit year, e.g. `janv. 2023` or `Jan 2023`.
/// Input that is not a recognised date is returned unchanged.
pub fn format_date(raw: &str, locale: Locale) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return locale.present().to_string();
    }
    match parse_loose_date(raw) {
        Some(date) => format!("{} {:04}", locale.month_abbrev(date.month0()), date.year()),
        None => {
            debug!("Unrecognised date '{raw}', rendering verbatim");
            raw.to_string()
        }
    }
}

const LOCAL_DATE_TIME_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Accepts `YYYY-MM-DD`, `YYYY-MM`, `YYYY` and ISO 8601 date-times, with or
/// without seconds or an offset.
pub(crate) fn parse_loose_date(raw: &str) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    // calendar date as written, not shifted to local time
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    for format in LOCAL_DATE_TIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(dt.date());
        }
    }
    // Remaining date-time shapes (`T10:00Z`, `T10:00+02:00`) keep their date part.
    if let Some((date, time)) = raw.split_once(|c: char| c == 'T' || c == ' ') {
        if time.starts_with(|c: char| c.is_ascii_digit()) {
            return NaiveDate::parse_from_str(date, "%Y-%m-%d").ok();
        }
    }
    if let Some((year, month)) = raw.split_once('-') {
        let year: i32 = year.parse().ok()?;
        let month: u32 = month.parse().ok()?;
        return NaiveDate::from_ymd_opt(year, month, 1);
    }
    if raw.len() == 4 {
        return NaiveDate::from_ymd_opt(raw.parse().ok()?, 1, 1);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ongoing_period_french() {
        assert_eq!(
            format_date_range("2023-01-15", "", Locale::Fr),
            "janv. 2023 - Présent"
        );
    }

    #[test]
    fn test_ongoing_period_english() {
        assert_eq!(
            format_date_range("2023-01-15", "", Locale::En),
            "Jan 2023 - Present"
        );
    }

    #[test]
    fn test_closed_period_english() {
        assert_eq!(
            format_date_range("2020-06-01", "2021-09-01", Locale::En),
            "Jun 2020 - Sep 2021"
        );
    }

    #[test]
    fn test_closed_period_french_accents() {
        assert_eq!(
            format_date_range("2019-02-01", "2019-08-31", Locale::Fr),
            "févr. 2019 - août 2019"
        );
    }

    #[test]
    fn test_default_locale_is_french() {
        assert_eq!(Locale::default(), Locale::Fr);
    }

    #[test]
    fn test_locale_binary_fallback() {
        assert_eq!(Locale::from_code("fr"), Locale::Fr);
        assert_eq!(Locale::from_code("en"), Locale::En);
        assert_eq!(Locale::from_code("de"), Locale::En);
        assert_eq!(Locale::from_code("fr-FR"), Locale::En);
    }

    #[test]
    fn test_empty_start_is_present_too() {
        assert_eq!(format_date_range("", "", Locale::En), "Present - Present");
    }

    #[test]
    fn test_partial_dates() {
        assert_eq!(format_date("2022-11", Locale::Fr), "nov. 2022");
        assert_eq!(format_date("2018", Locale::En), "Jan 2018");
    }

    #[test]
    fn test_rfc3339_keeps_written_date() {
        assert_eq!(format_date("2021-12-31T23:30:00-05:00", Locale::En), "Dec 2021");
    }

    #[test]
    fn test_date_times_without_offset_or_seconds() {
        assert_eq!(
            format_date_range("2023-01-15T10:00:00", "", Locale::En),
            "Jan 2023 - Present"
        );
        assert_eq!(format_date("2023-01-15T10:00Z", Locale::Fr), "janv. 2023");
        assert_eq!(format_date("2023-03-02T08:15", Locale::En), "Mar 2023");
        assert_eq!(format_date("2023-04-30 23:59:59", Locale::En), "Apr 2023");
        assert_eq!(format_date("2023-05-01T09:00:00.250", Locale::En), "May 2023");
        assert_eq!(format_date("2023-06-10T09:00+02:00", Locale::Fr), "juin 2023");
    }

    #[test]
    fn test_garbage_is_echoed() {
        assert_eq!(format_date("sometime", Locale::En), "sometime");
        assert_eq!(format_date("2021-13", Locale::En), "2021-13");
        assert_eq!(format_date("2023/02/01", Locale::En), "2023/02/01");
        assert_eq!(format_date("2023-01-15Tnoon", Locale::En), "2023-01-15Tnoon");
    }
}
