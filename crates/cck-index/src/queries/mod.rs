pub mod file_change;
pub mod operation;

use chrono::{DateTime, Local, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use rusqlite::types::Type;

const NAIVE_ISO_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Fixed-width UTC encoding so `ORDER BY timestamp` sorts chronologically.
pub(crate) fn encode_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// RFC 3339 as written by [`encode_timestamp`], or a naive ISO 8601 string
/// (no offset) read as local time. Older history files hold the latter.
pub(crate) fn decode_timestamp(column: usize, raw: String) -> rusqlite::Result<DateTime<Utc>> {
    let rfc3339_err = match DateTime::parse_from_rfc3339(&raw) {
        Ok(ts) => return Ok(ts.with_timezone(&Utc)),
        Err(e) => e,
    };

    NaiveDateTime::parse_from_str(&raw, NAIVE_ISO_FORMAT)
        .ok()
        .and_then(|naive| Local.from_local_datetime(&naive).earliest())
        .map(|ts| ts.with_timezone(&Utc))
        .ok_or_else(|| {
            rusqlite::Error::FromSqlConversionFailure(column, Type::Text, Box::new(rfc3339_err))
        })
}

/// SQLite LIMIT takes a signed integer; clamp instead of wrapping.
pub(crate) fn sql_limit(limit: usize) -> i64 {
    i64::try_from(limit).unwrap_or(i64::MAX)
}
