//! Field parsing utilities for bulletin values
//!
//! Every helper here is total: a value that cannot be read resolves to
//! `None` instead of an error, so extraction always continues.

use chrono::{DateTime, FixedOffset, NaiveDateTime};

/// Layouts accepted for timestamps carrying an explicit offset
const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%d %H:%M%:z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
];

/// Layouts accepted for timestamps without a timezone marker
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parse an optional float, treating empty, unparsable and non-finite values as absent
pub fn parse_float(value: Option<&str>) -> Option<f64> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

/// Parse an optional text value, treating empty strings as absent
pub fn parse_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Parse a bureau timestamp into a timezone-aware instant
///
/// Strings ending in `Z` are UTC, strings with an explicit offset keep it,
/// and strings without any timezone marker are taken as UTC. Anything that
/// does not parse is `None`; there is no fallback to "now" or the epoch.
pub fn parse_timestamp(value: Option<&str>) -> Option<DateTime<FixedOffset>> {
    let value = value?.trim();
    if value.is_empty() {
        return None;
    }

    if let Some(naive) = value
        .strip_suffix('Z')
        .or_else(|| value.strip_suffix('z'))
    {
        return parse_naive(naive).map(|dt| dt.and_utc().fixed_offset());
    }

    OFFSET_FORMATS
        .iter()
        .find_map(|format| DateTime::parse_from_str(value, format).ok())
        .or_else(|| parse_naive(value).map(|dt| dt.and_utc().fixed_offset()))
}

fn parse_naive(value: &str) -> Option<NaiveDateTime> {
    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
}
