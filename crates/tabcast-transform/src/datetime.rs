//! Date/time disambiguation and ISO 8601 canonicalization.
//!
//! Two traps drive this module's shape. First, time-of-day strings like
//! `"10:00"` must never classify a column as dates, so a time-only check runs
//! before any date parsing. Second, naive timestamps carry no zone; they are
//! assumed UTC by convention (a documented caveat, not a general-purpose
//! timezone resolver). Every successfully parsed value canonicalizes to
//! `YYYY-MM-DDTHH:MM:SS[.ffffff]+00:00` with trailing zero fraction digits
//! trimmed.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Utc};

/// Datetime formats tried after RFC 3339, naive values assumed UTC.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%d %b %Y %H:%M:%S",
    "%d %B %Y %H:%M:%S",
];

/// Date-only formats; midnight UTC is assumed.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%d %b %Y",
    "%d %B %Y",
    "%d/%m/%Y",
    "%d-%m-%Y",
    "%Y/%m/%d",
];

/// True when the trimmed value matches the time-only pattern
/// `H:MM[:SS[.ffffff]]` with a 1-2 digit hour.
#[must_use]
pub fn is_time_only(value: &str) -> bool {
    let bytes = value.trim().as_bytes();

    let mut i = 0;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    if i == 0 || i > 2 {
        return false;
    }

    // :MM
    if bytes.len() < i + 3 || bytes[i] != b':' {
        return false;
    }
    if !bytes[i + 1].is_ascii_digit() || !bytes[i + 2].is_ascii_digit() {
        return false;
    }
    let mut j = i + 3;
    if j == bytes.len() {
        return true;
    }

    // :SS
    if bytes[j] != b':' || bytes.len() < j + 3 {
        return false;
    }
    if !bytes[j + 1].is_ascii_digit() || !bytes[j + 2].is_ascii_digit() {
        return false;
    }
    j += 3;
    if j == bytes.len() {
        return true;
    }

    // .ffffff
    if bytes[j] != b'.' || j + 1 == bytes.len() {
        return false;
    }
    bytes[j + 1..].iter().all(u8::is_ascii_digit)
}

/// Parse one raw value as a UTC datetime.
///
/// Tries RFC 3339 first (explicit offsets and `Z` suffixes), then naive
/// datetime formats, then date-only formats at midnight. Naive values are
/// taken as UTC. Returns `None` for anything unparseable, including purely
/// numeric tokens and time-only strings.
#[must_use]
pub fn parse_datetime_utc(value: &str) -> Option<DateTime<Utc>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(dt.and_utc());
        }
    }

    for format in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(trimmed, format) {
            return Some(d.and_time(NaiveTime::MIN).and_utc());
        }
    }

    None
}

/// Canonical ISO 8601 UTC rendering: `YYYY-MM-DDTHH:MM:SS[.ffffff]+00:00`.
///
/// Sub-microsecond precision is truncated; trailing zeros in the fractional
/// part are trimmed so `.123000` renders as `.123`.
#[must_use]
pub fn format_iso8601_utc(dt: &DateTime<Utc>) -> String {
    let base = dt.format("%Y-%m-%dT%H:%M:%S");
    let micros = (dt.nanosecond() % 1_000_000_000) / 1_000;
    if micros == 0 {
        return format!("{base}+00:00");
    }
    let frac = format!("{micros:06}");
    let frac = frac.trim_end_matches('0');
    format!("{base}.{frac}+00:00")
}

/// Result of coercing one column's cells as dates.
#[derive(Debug)]
pub(crate) struct DateTimeColumn {
    /// True when any parsed value has a non-zero hour, minute or second.
    pub has_time: bool,
    /// Canonical ISO strings aligned with the input cells; non-null values
    /// that failed to parse are null.
    pub values: Vec<Option<String>>,
    /// Non-null values that failed to parse and degraded to null.
    pub losses: usize,
}

/// Attempt date coercion of a column.
///
/// Rejects the column outright when at least `time_only_threshold` of the
/// non-null values look time-only, otherwise classifies it as dates when at
/// least `date_threshold` of the non-null values parse. Individual failures
/// within a date-classified column become null; that is a deliberate
/// lossy-on-the-margins policy, counted in `losses`, not a classification
/// failure.
pub(crate) fn coerce_datetime(
    cells: &[Option<String>],
    time_only_threshold: f64,
    date_threshold: f64,
) -> Option<DateTimeColumn> {
    let non_null = cells.iter().flatten().count();
    if non_null == 0 {
        return None;
    }

    let time_only = cells
        .iter()
        .flatten()
        .filter(|v| is_time_only(v))
        .count();
    if time_only as f64 / non_null as f64 >= time_only_threshold {
        tracing::debug!(time_only, non_null, "time-only column, rejecting date classification");
        return None;
    }

    let parsed: Vec<Option<DateTime<Utc>>> = cells
        .iter()
        .map(|cell| cell.as_deref().and_then(parse_datetime_utc))
        .collect();
    let successes = parsed.iter().flatten().count();
    if (successes as f64 / non_null as f64) < date_threshold {
        return None;
    }

    let has_time = parsed
        .iter()
        .flatten()
        .any(|dt| dt.hour() != 0 || dt.minute() != 0 || dt.second() != 0);
    let values = parsed
        .iter()
        .map(|p| p.as_ref().map(format_iso8601_utc))
        .collect();

    Some(DateTimeColumn {
        has_time,
        values,
        losses: non_null - successes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(values: &[&str]) -> Vec<Option<String>> {
        values.iter().map(|v| Some((*v).to_string())).collect()
    }

    #[test]
    fn test_time_only_patterns() {
        assert!(is_time_only("10:00"));
        assert!(is_time_only("9:15"));
        assert!(is_time_only("23:59:59"));
        assert!(is_time_only("07:30:15.5"));
        assert!(is_time_only(" 11:30 "));
        assert!(!is_time_only("2023-01-01T10:00"));
        assert!(!is_time_only("100:00"));
        assert!(!is_time_only("10:0"));
        assert!(!is_time_only("10:00:"));
        assert!(!is_time_only("10:00:00."));
        assert!(!is_time_only("1000"));
    }

    #[test]
    fn test_parse_human_readable_dates() {
        let dt = parse_datetime_utc("1 Mar 2023").unwrap();
        assert_eq!(format_iso8601_utc(&dt), "2023-03-01T00:00:00+00:00");

        let dt = parse_datetime_utc("01 March 2023").unwrap();
        assert_eq!(format_iso8601_utc(&dt), "2023-03-01T00:00:00+00:00");

        let dt = parse_datetime_utc("15/06/2021").unwrap();
        assert_eq!(format_iso8601_utc(&dt), "2021-06-15T00:00:00+00:00");
    }

    #[test]
    fn test_parse_iso_variants() {
        let dt = parse_datetime_utc("2025-01-27 10:26:06").unwrap();
        assert_eq!(format_iso8601_utc(&dt), "2025-01-27T10:26:06+00:00");

        // Z suffix resolves to the same instant
        let dt = parse_datetime_utc("2025-01-27T10:26:06Z").unwrap();
        assert_eq!(format_iso8601_utc(&dt), "2025-01-27T10:26:06+00:00");

        // explicit offset is converted to UTC
        let dt = parse_datetime_utc("2025-01-27T10:26:06+02:00").unwrap();
        assert_eq!(format_iso8601_utc(&dt), "2025-01-27T08:26:06+00:00");
    }

    #[test]
    fn test_fraction_trimmed() {
        let dt = parse_datetime_utc("2023-01-01T00:00:00.123000Z").unwrap();
        assert_eq!(format_iso8601_utc(&dt), "2023-01-01T00:00:00.123+00:00");

        let dt = parse_datetime_utc("2023-01-01T00:00:00.000001").unwrap();
        assert_eq!(format_iso8601_utc(&dt), "2023-01-01T00:00:00.000001+00:00");
    }

    #[test]
    fn test_parse_rejects_numbers_and_text() {
        assert!(parse_datetime_utc("1").is_none());
        assert!(parse_datetime_utc("166012276").is_none());
        assert!(parse_datetime_utc("3.14").is_none());
        assert!(parse_datetime_utc("hello").is_none());
        assert!(parse_datetime_utc("10:00").is_none());
        assert!(parse_datetime_utc("").is_none());
    }

    #[test]
    fn test_coerce_rejects_time_only_column() {
        let result = coerce_datetime(&cells(&["10:00", "11:30", "09:15"]), 0.5, 0.5);
        assert!(result.is_none());
    }

    #[test]
    fn test_coerce_date_column() {
        let result = coerce_datetime(&cells(&["1 Mar 2023", "2 Mar 2023"]), 0.5, 0.5).unwrap();
        assert!(!result.has_time);
        assert_eq!(result.losses, 0);
        assert_eq!(
            result.values[0].as_deref(),
            Some("2023-03-01T00:00:00+00:00")
        );
    }

    #[test]
    fn test_coerce_has_time_flag() {
        let result =
            coerce_datetime(&cells(&["2023-03-01T12:30:00", "2023-03-02"]), 0.5, 0.5).unwrap();
        assert!(result.has_time);
    }

    #[test]
    fn test_coerce_lossy_on_the_margins() {
        // 2/3 parse: classified, the stray value nulls out and is counted
        let result =
            coerce_datetime(&cells(&["2023-01-01", "2023-01-02", "not a date"]), 0.5, 0.5)
                .unwrap();
        assert_eq!(result.losses, 1);
        assert_eq!(result.values[2], None);
    }

    #[test]
    fn test_coerce_below_threshold() {
        let result = coerce_datetime(
            &cells(&["2023-01-01", "red", "green", "blue"]),
            0.5,
            0.5,
        );
        assert!(result.is_none());
    }

    #[test]
    fn test_coerce_all_null() {
        assert!(coerce_datetime(&[None, None], 0.5, 0.5).is_none());
    }
}
