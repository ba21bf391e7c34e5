//! Timestamp encoding for the log's `timestamp` column.
//!
//! Written as RFC 3339 UTC with microseconds. Older logs carry naive
//! ISO-8601 timestamps without an offset; those are read as UTC.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};

/// Renders a timestamp the way the log stores it.
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Parses an RFC 3339 timestamp, or a naive ISO-8601 one taken as UTC.
///
/// # Examples
///
/// ```
/// use chargewatch_core::parse_timestamp;
///
/// let with_offset = parse_timestamp("2025-03-01T10:15:00.250000Z").unwrap();
/// let naive = parse_timestamp("2025-03-01T10:15:00.250000").unwrap();
/// assert_eq!(with_offset, naive);
/// ```
pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, String> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Ok(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
        .map(|naive| naive.and_utc())
        .map_err(|e| format!("invalid timestamp '{}': {}", raw, e))
}

pub(crate) mod serde_timestamp {
    use super::{format_timestamp, parse_timestamp};
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(timestamp: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format_timestamp(timestamp))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse_timestamp(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn format_is_rfc3339_micros_utc() {
        let ts = Utc.with_ymd_and_hms(2025, 6, 30, 8, 5, 9).unwrap();
        assert_eq!(format_timestamp(&ts), "2025-06-30T08:05:09.000000Z");
    }

    #[test]
    fn accepts_space_separated_naive_timestamps() {
        let ts = parse_timestamp("2025-06-30 08:05:09").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2025, 6, 30, 8, 5, 9).unwrap());
    }

    #[test]
    fn rejects_garbage() {
        assert!(parse_timestamp("yesterday").is_err());
    }
}
