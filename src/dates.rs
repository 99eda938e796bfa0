//! Best-effort date normalization.
//!
//! Sources print dates in whatever format their templates use. The
//! normalizer tries a fixed list of formats and otherwise answers with the
//! current time, so callers always get a usable timestamp.

use chrono::{DateTime, NaiveDate, Utc};
use tracing::{debug, warn};

/// Formats tried in priority order: `YYYY-MM-DD`, `DD/MM/YYYY`, `MM/DD/YYYY`.
///
/// Ambiguous inputs such as `03/04/2025` resolve to the day-first reading.
pub const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%d/%m/%Y", "%m/%d/%Y"];

/// Parse `text` into a UTC timestamp at midnight of the matched date.
///
/// Never fails: unmatched or malformed input yields `Utc::now()`.
pub fn parse_date(text: &str) -> DateTime<Utc> {
    let text = text.trim();
    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(text, fmt) {
            if let Some(dt) = date.and_hms_opt(0, 0, 0) {
                debug!(%text, fmt, "Parsed date");
                return dt.and_utc();
            }
        }
    }
    warn!(%text, "Failed to parse date; using current time");
    Utc::now()
}
