//! Column codecs shared by the repositories.
//!
//! Ids are stored as hyphenated UUID text and timestamps as RFC 3339 text
//! with a fixed microsecond precision, so `ORDER BY` on a timestamp column
//! sorts chronologically.

use std::error::Error;
use std::str::FromStr;

use careops_domain::time::Timestamp;
use chrono::SecondsFormat;

pub(crate) fn decode_error<E>(err: E) -> sqlx::Error
where
    E: Error + Send + Sync + 'static,
{
    sqlx::Error::Decode(Box::new(err))
}

/// Parse a TEXT column into an id or a status enum.
pub(crate) fn parse<T>(value: &str) -> Result<T, sqlx::Error>
where
    T: FromStr,
    T::Err: Error + Send + Sync + 'static,
{
    T::from_str(value).map_err(decode_error)
}

pub(crate) fn timestamp(ts: Timestamp) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub(crate) fn optional_timestamp(ts: Option<Timestamp>) -> Option<String> {
    ts.map(timestamp)
}

pub(crate) fn parse_timestamp(value: &str) -> Result<Timestamp, sqlx::Error> {
    chrono::DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.to_utc())
        .map_err(decode_error)
}

pub(crate) fn parse_optional_timestamp(
    value: Option<String>,
) -> Result<Option<Timestamp>, sqlx::Error> {
    value.as_deref().map(parse_timestamp).transpose()
}
