//! Type checking and formatting of provided values against declared types.

use std::fmt::Write;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};

use super::types::VariableType;
use super::value::VariableValue;

/// Default date format: the en-US short form (`1/15/2024`).
pub const DEFAULT_DATE_FORMAT: &str = "%-m/%-d/%Y";

/// Check whether a provided value is acceptable for a declared type.
///
/// There is no coercion across categories: `"30"` is not a number and
/// `"true"` is not a boolean. Dates accept either a date value or a string
/// that [`parse_date`] understands.
pub fn validate_type(value: &VariableValue, var_type: VariableType) -> bool {
    match var_type {
        VariableType::String => true,
        VariableType::Number => matches!(value, VariableValue::Number(n) if !n.is_nan()),
        VariableType::Boolean => matches!(value, VariableValue::Boolean(_)),
        VariableType::Date => match value {
            VariableValue::Date(_) => true,
            VariableValue::String(s) => parse_date(s).is_some(),
            _ => false,
        },
    }
}

/// Format an accepted value for substitution.
///
/// Dates are rendered with `date_format` (strftime syntax) on the value's own
/// calendar date; everything else uses the plain string conversion.
pub fn format_value(value: &VariableValue, var_type: VariableType, date_format: &str) -> String {
    match (var_type, value) {
        (VariableType::Date, VariableValue::Date(dt)) => format_date(dt, date_format),
        (VariableType::Date, VariableValue::String(s)) => match parse_date(s) {
            Some(dt) => format_date(&dt, date_format),
            None => s.clone(),
        },
        _ => value.to_plain_string(),
    }
}

/// Parse a date string in one of the accepted layouts.
///
/// Timestamps with an explicit offset keep it; naive timestamps and bare
/// dates are taken as UTC.
pub fn parse_date(s: &str) -> Option<DateTime<FixedOffset>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt);
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(s) {
        return Some(dt);
    }

    const DATETIME_FORMATS: &[&str] =
        &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M"];
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.and_utc().fixed_offset());
        }
    }

    const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];
    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return Some(date.and_time(NaiveTime::default()).and_utc().fixed_offset());
        }
    }

    None
}

fn format_date(dt: &DateTime<FixedOffset>, date_format: &str) -> String {
    let mut out = String::new();
    // An invalid format string surfaces as a fmt::Error rather than a panic
    if write!(out, "{}", dt.format(date_format)).is_err() {
        return dt.to_rfc3339();
    }
    out
}
