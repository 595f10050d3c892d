//! Value normalization for raw field captures.
//!
//! Each captured span is converted into a canonical typed value according
//! to its field kind. Normalization never fails loudly: a span that cannot
//! be converted yields `None` and the field is dropped from the record.

use chrono::NaiveDate;
use lazy_static::lazy_static;
use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::models::record::{FieldValue, PaymentStatus};

/// Normalization kind attached to each extraction rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Free text, trimmed only.
    Text,
    /// Alphanumeric identifier, trimmed only.
    Identifier,
    /// Calendar date, fuzzy-parsed to ISO year-month-day.
    Date,
    /// Decimal amount; thousands separators stripped, decimal point kept.
    Amount,
    /// Percentage kept as a decimal token, no unit conversion.
    Percent,
    /// PAID / UNPAID status enum.
    Status,
}

/// Convert a raw captured span into its canonical typed value.
///
/// Returns `None` when the span cannot be normalized; the caller omits the
/// field rather than defaulting it.
pub fn normalize(kind: FieldKind, raw: &str) -> Option<FieldValue> {
    match kind {
        FieldKind::Text | FieldKind::Identifier => {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(FieldValue::Text(trimmed.to_string()))
            }
        }
        FieldKind::Date => fuzzy_date(raw).map(FieldValue::Date),
        FieldKind::Amount => parse_amount(raw).map(FieldValue::Number),
        FieldKind::Percent => parse_percent(raw).map(FieldValue::Number),
        FieldKind::Status => parse_status(raw).map(FieldValue::Status),
    }
}

lazy_static! {
    // "March 3, 2024" / "Mar 3 2024"
    static ref DATE_MDY_NAMED: Regex = Regex::new(
        r"(?i)\b(jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\.?\s+(\d{1,2})(?:st|nd|rd|th)?(?:\s*,\s*|\s+)(\d{2,4})\b"
    ).unwrap();

    // "3 March 2024" / "3rd Mar 2024"
    static ref DATE_DMY_NAMED: Regex = Regex::new(
        r"(?i)\b(\d{1,2})(?:st|nd|rd|th)?\s+(jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\.?(?:\s*,\s*|\s+)(\d{2,4})\b"
    ).unwrap();

    // 2024-03-03 or 2024/03/03
    static ref DATE_YMD: Regex = Regex::new(
        r"\b(\d{4})[./\-](\d{1,2})[./\-](\d{1,2})\b"
    ).unwrap();

    // 03.03.2024, 3/3/24 and similar
    static ref DATE_DMY: Regex = Regex::new(
        r"\b(\d{1,2})[./\-](\d{1,2})[./\-](\d{4}|\d{2})\b"
    ).unwrap();
}

/// Fuzzy, locale-tolerant date parsing.
///
/// Accepts surrounding noise ("Date issued March 3, 2024 thanks") and the
/// numeric and month-name formats seen in the scanned layouts. Day-first is
/// assumed for ambiguous numeric dates; the components are swapped when the
/// day-first reading is not a valid calendar date.
pub fn fuzzy_date(raw: &str) -> Option<NaiveDate> {
    if let Some(caps) = DATE_MDY_NAMED.captures(raw) {
        let month = month_to_number(&caps[1]);
        let day: u32 = caps[2].parse().ok()?;
        let year = parse_year(&caps[3]);
        if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
            return Some(date);
        }
    }

    if let Some(caps) = DATE_DMY_NAMED.captures(raw) {
        let day: u32 = caps[1].parse().ok()?;
        let month = month_to_number(&caps[2]);
        let year = parse_year(&caps[3]);
        if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
            return Some(date);
        }
    }

    if let Some(caps) = DATE_YMD.captures(raw) {
        let year: i32 = caps[1].parse().unwrap_or(0);
        let month: u32 = caps[2].parse().unwrap_or(0);
        let day: u32 = caps[3].parse().unwrap_or(0);
        if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
            return Some(date);
        }
    }

    if let Some(caps) = DATE_DMY.captures(raw) {
        let a: u32 = caps[1].parse().unwrap_or(0);
        let b: u32 = caps[2].parse().unwrap_or(0);
        let year = parse_year(&caps[3]);
        // Day-first, falling back to month-first when out of range
        if let Some(date) = NaiveDate::from_ymd_opt(year, b, a) {
            return Some(date);
        }
        if let Some(date) = NaiveDate::from_ymd_opt(year, a, b) {
            return Some(date);
        }
    }

    None
}

fn parse_amount(raw: &str) -> Option<Decimal> {
    let stripped: String = raw
        .trim()
        .chars()
        .filter(|c| *c != ',' && !c.is_whitespace())
        .collect();

    if stripped.is_empty() || !stripped.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return None;
    }

    Decimal::from_str(&stripped).ok()
}

fn parse_percent(raw: &str) -> Option<Decimal> {
    parse_amount(raw.trim().trim_end_matches('%'))
}

fn parse_status(raw: &str) -> Option<PaymentStatus> {
    match raw.trim().to_uppercase().as_str() {
        "UNPAID" => Some(PaymentStatus::Unpaid),
        "PAID" => Some(PaymentStatus::Paid),
        _ => None,
    }
}

fn parse_year(s: &str) -> i32 {
    let year: i32 = s.parse().unwrap_or(0);
    if year < 100 {
        // Two-digit year: assume 2000s for 00-68, 1900s for 69-99
        if year <= 68 {
            2000 + year
        } else {
            1900 + year
        }
    } else {
        year
    }
}

fn month_to_number(month: &str) -> u32 {
    match month.to_lowercase().as_str() {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        "dec" => 12,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_fuzzy_date_month_first() {
        assert_eq!(
            fuzzy_date("March 3, 2024"),
            NaiveDate::from_ymd_opt(2024, 3, 3)
        );
        assert_eq!(
            fuzzy_date("Jan 15 2024"),
            NaiveDate::from_ymd_opt(2024, 1, 15)
        );
    }

    #[test]
    fn test_fuzzy_date_day_first() {
        assert_eq!(
            fuzzy_date("3 March 2024"),
            NaiveDate::from_ymd_opt(2024, 3, 3)
        );
        assert_eq!(
            fuzzy_date("21st August 2023"),
            NaiveDate::from_ymd_opt(2023, 8, 21)
        );
    }

    #[test]
    fn test_fuzzy_date_numeric() {
        assert_eq!(
            fuzzy_date("2024-03-03"),
            NaiveDate::from_ymd_opt(2024, 3, 3)
        );
        assert_eq!(
            fuzzy_date("15/01/2024"),
            NaiveDate::from_ymd_opt(2024, 1, 15)
        );
        // Out-of-range day-first reading falls back to month-first
        assert_eq!(
            fuzzy_date("03/15/2024"),
            NaiveDate::from_ymd_opt(2024, 3, 15)
        );
    }

    #[test]
    fn test_fuzzy_date_tolerates_noise() {
        assert_eq!(
            fuzzy_date("issued on March 3, 2024 in Cape Town"),
            NaiveDate::from_ymd_opt(2024, 3, 3)
        );
    }

    #[test]
    fn test_fuzzy_date_rejects_garbage() {
        assert_eq!(fuzzy_date("not a date"), None);
        assert_eq!(fuzzy_date(""), None);
    }

    #[test]
    fn test_amount_strips_thousands_separators() {
        let value = normalize(FieldKind::Amount, "1,234.56").unwrap();
        assert_eq!(value.to_display(), "1234.56");
    }

    #[test]
    fn test_amount_rejects_non_numeric() {
        assert_eq!(normalize(FieldKind::Amount, "abc"), None);
        assert_eq!(normalize(FieldKind::Amount, ""), None);
        assert_eq!(normalize(FieldKind::Amount, "12.34.56"), None);
    }

    #[test]
    fn test_percent_kept_as_decimal_token() {
        let value = normalize(FieldKind::Percent, "15.00%").unwrap();
        assert_eq!(value.to_display(), "15.00");
    }

    #[test]
    fn test_status_enum() {
        assert_eq!(
            parse_status("unpaid"),
            Some(PaymentStatus::Unpaid)
        );
        assert_eq!(parse_status(" PAID "), Some(PaymentStatus::Paid));
        assert_eq!(parse_status("overdue"), None);
    }

    #[test]
    fn test_text_trimmed_and_empty_dropped() {
        let value = normalize(FieldKind::Text, "  Acme Corp  ").unwrap();
        assert_eq!(value.to_display(), "Acme Corp");
        assert_eq!(normalize(FieldKind::Text, "   "), None);
    }

    #[test]
    fn test_date_round_trips_through_iso() {
        let value = normalize(FieldKind::Date, "Due Date March 3, 2024").unwrap();
        let iso = value.to_display();
        let reparsed = NaiveDate::parse_from_str(&iso, "%Y-%m-%d").unwrap();
        assert_eq!(reparsed, NaiveDate::from_ymd_opt(2024, 3, 3).unwrap());
    }
}
