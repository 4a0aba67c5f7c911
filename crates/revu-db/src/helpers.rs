//! Row-to-entity parsing helpers.
//!
//! Every repo converts `libsql::Row` (column-indexed) into typed entity
//! structs. Timestamps are written with [`format_timestamp`] so that lexical
//! order in SQL equals chronological order.

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};

use crate::error::DatabaseError;

/// Fixed-width RFC 3339 with microseconds and a `Z` suffix.
#[must_use]
pub fn format_timestamp(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Current time at the precision timestamps are stored with.
///
/// Entities built from this value compare equal to their re-read rows.
#[must_use]
pub fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// Truncate a caller-supplied timestamp to stored precision.
#[must_use]
pub fn to_stored_precision(dt: DateTime<Utc>) -> DateTime<Utc> {
    dt.trunc_subsecs(6)
}

/// Parse a required TEXT column as `DateTime<Utc>`.
///
/// Handles both RFC 3339 and `SQLite`'s `datetime('now')` format.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the string cannot be parsed as either format.
pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>, DatabaseError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .map(|naive| naive.and_utc())
        .map_err(|e| DatabaseError::Query(format!("Failed to parse datetime '{s}': {e}")))
}

/// Parse an optional TEXT column as `Option<DateTime<Utc>>`.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if a non-empty string cannot be parsed.
pub fn parse_optional_datetime(s: Option<&str>) -> Result<Option<DateTime<Utc>>, DatabaseError> {
    match s {
        Some(s) if !s.is_empty() => Ok(Some(parse_datetime(s)?)),
        _ => Ok(None),
    }
}

/// Parse a TEXT column into a serde-deserializable enum.
///
/// Works with all revu-core enums that use `#[serde(rename_all = "snake_case")]`.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the string does not match any enum variant.
pub fn parse_enum<T: serde::de::DeserializeOwned>(s: &str) -> Result<T, DatabaseError> {
    serde_json::from_value(serde_json::Value::String(s.to_string()))
        .map_err(|e| DatabaseError::Query(format!("Failed to parse enum from '{s}': {e}")))
}

/// Parse an optional TEXT column into an enum.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if a present value does not match any variant.
pub fn parse_optional_enum<T: serde::de::DeserializeOwned>(
    s: Option<&str>,
) -> Result<Option<T>, DatabaseError> {
    s.map(parse_enum::<T>).transpose()
}

/// Read a nullable TEXT column. Returns `None` for both SQL NULL and empty string.
///
/// `row.get::<String>(idx)` on a NULL column returns an error, not `""`.
///
/// # Errors
///
/// Returns `DatabaseError` if the column read fails.
pub fn get_opt_string(row: &libsql::Row, idx: i32) -> Result<Option<String>, DatabaseError> {
    match row.get::<Option<String>>(idx)? {
        Some(s) if s.is_empty() => Ok(None),
        other => Ok(other),
    }
}

/// Read an INTEGER column holding a `0`/`1` flag.
///
/// # Errors
///
/// Returns `DatabaseError` if the column read fails.
pub fn get_flag(row: &libsql::Row, idx: i32) -> Result<bool, DatabaseError> {
    Ok(row.get::<i64>(idx)? != 0)
}

/// Extract an optional JSON value from a TEXT column.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if a non-empty string contains invalid JSON.
pub fn parse_optional_json(s: Option<&str>) -> Result<Option<serde_json::Value>, DatabaseError> {
    match s {
        Some(s) if !s.is_empty() => {
            let val = serde_json::from_str(s)
                .map_err(|e| DatabaseError::Query(format!("Invalid JSON in column: {e}")))?;
            Ok(Some(val))
        }
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use revu_core::enums::ItemStatus;

    #[test]
    fn timestamps_are_fixed_width_and_roundtrip() {
        let whole = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
        let frac = whole + chrono::Duration::microseconds(120);
        let a = format_timestamp(&whole);
        let b = format_timestamp(&frac);
        assert_eq!(a.len(), b.len());
        assert!(a < b);
        assert_eq!(parse_datetime(&b).unwrap(), frac);
    }

    #[test]
    fn now_survives_a_format_parse_cycle() {
        let stamp = now();
        assert_eq!(parse_datetime(&format_timestamp(&stamp)).unwrap(), stamp);

        let nanos = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap()
            + chrono::Duration::nanoseconds(850_116_721);
        let stored = to_stored_precision(nanos);
        assert_eq!(parse_datetime(&format_timestamp(&stored)).unwrap(), stored);
        assert_eq!(stored.timestamp_subsec_nanos(), 850_116_000);
    }

    #[test]
    fn parses_sqlite_default_format() {
        let dt = parse_datetime("2026-02-09 14:30:00").unwrap();
        assert_eq!(dt, Utc.with_ymd_and_hms(2026, 2, 9, 14, 30, 0).unwrap());
    }

    #[test]
    fn enum_parsing() {
        let status: ItemStatus = parse_enum("pending_review").unwrap();
        assert_eq!(status, ItemStatus::PendingReview);
        assert!(parse_enum::<ItemStatus>("approved").is_err());
        assert_eq!(parse_optional_enum::<ItemStatus>(None).unwrap(), None);
    }

    #[test]
    fn optional_json() {
        assert_eq!(parse_optional_json(Some("")).unwrap(), None);
        assert_eq!(
            parse_optional_json(Some("{\"a\":1}")).unwrap(),
            Some(serde_json::json!({"a": 1}))
        );
        assert!(parse_optional_json(Some("{")).is_err());
    }
}
