use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};

#[cfg(test)]
pub mod test;

pub const NOT_AVAILABLE: &str = "N/A";

/// Parses the timestamp formats the service has been seen to send.
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc))
    }
    // timestamps without an offset are UTC
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Some(Utc.from_utc_datetime(&dt))
        }
    }
    if let Ok(d) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return d.and_hms_opt(0, 0, 0).map(|dt| Utc.from_utc_datetime(&dt))
    }
    None
}

/// Formats a submission time like "Mar 1, 2024, 10:00 AM" in the given zone.
pub fn pretty_date_in<Tz>(value: Option<&str>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    match value.and_then(parse_timestamp) {
        Some(dt) => dt.with_timezone(tz).format("%b %-d, %Y, %I:%M %p").to_string(),
        None => String::from(NOT_AVAILABLE),
    }
}

pub fn pretty_date(value: Option<&str>) -> String {
    pretty_date_in(value, &Local)
}
