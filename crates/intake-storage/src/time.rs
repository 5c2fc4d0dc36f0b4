//! Timestamp columns.
//!
//! Stored as RFC 3339 UTC text with a fixed six fractional digits, so that
//! comparing the text orders rows by time.

use jiff::Timestamp;

pub fn to_column(ts: Timestamp) -> String {
    format!("{ts:.6}")
}

pub fn from_column(text: &str) -> Result<Timestamp, jiff::Error> {
    text.parse()
}
