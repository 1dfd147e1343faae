//! UTC timestamp helpers shared by the API payloads and the mock generator.

use chrono::{DateTime, SecondsFormat, Utc};

/// Formats a timestamp the way browsers' `toISOString` does:
/// millisecond precision and a literal `Z`.
pub fn to_iso_millis(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Normalizes a timestamp for the booking payload: UTC, whole seconds, `Z` suffix.
///
/// `2025-05-05T10:00:00.000Z` becomes `2025-05-05T10:00:00Z`. Offsets are
/// converted to UTC and fractional seconds dropped. Input that is not
/// RFC 3339 only has a trailing `.000Z` collapsed and is otherwise passed on
/// unchanged, leaving the API to reject it.
pub fn canonical_utc(iso: &str) -> String {
    match DateTime::parse_from_rfc3339(iso.trim()) {
        Ok(parsed) => parsed
            .with_timezone(&Utc)
            .to_rfc3339_opts(SecondsFormat::Secs, true),
        Err(_) => match iso.strip_suffix(".000Z") {
            Some(head) => format!("{head}Z"),
            None => iso.to_string(),
        },
    }
}
