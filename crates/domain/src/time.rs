//! Time and timestamp helpers.

use chrono::{DateTime, Utc};

/// UTC timestamp used for `created_at`, `last_executed_at`, booking slots, etc.
pub type Timestamp = DateTime<Utc>;

/// Return the current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}

/// Calendar date as shown to customers, e.g. `2026-03-14`.
#[must_use]
pub fn date_label(ts: Timestamp) -> String {
    ts.format("%Y-%m-%d").to_string()
}

/// Wall-clock time as shown to customers, e.g. `09:30`.
#[must_use]
pub fn time_label(ts: Timestamp) -> String {
    ts.format("%H:%M").to_string()
}
