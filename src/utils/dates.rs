use chrono::{DateTime, Locale, NaiveDate, NaiveDateTime, Utc};

const OFFSET_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f%z";
const LOCAL_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

/// Parses an ISO-8601 CMS date field: a plain `YYYY-MM-DD` day, an RFC 3339
/// timestamp, a timestamp with a colon-less offset (`+0000`), or a timestamp
/// without any offset. Days and offset-less timestamps are taken as UTC.
pub fn parse_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(day) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(day.and_hms_opt(0, 0, 0)?.and_utc());
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Some(timestamp.with_timezone(&Utc));
    }
    if let Ok(timestamp) = DateTime::parse_from_str(value, OFFSET_FORMAT) {
        return Some(timestamp.with_timezone(&Utc));
    }
    LOCAL_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .map(|timestamp| timestamp.and_utc())
}

pub fn timestamp_millis(value: &str) -> Option<i64> {
    parse_date(value).map(|date| date.timestamp_millis())
}

/// Short French display date, e.g. `05 mai 2025`.
pub fn long_format_date(value: &str) -> Option<String> {
    parse_date(value).map(|date| date.format_localized("%d %b %Y", Locale::fr_FR).to_string())
}
