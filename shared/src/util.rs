//! Small shared utilities

use chrono::{SecondsFormat, Utc};

/// Current instant as an RFC 3339 / ISO-8601 string (millisecond precision,
/// UTC). Used for `created_at` / `updated_at` audit fields.
pub fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
