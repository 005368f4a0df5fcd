use chrono::{FixedOffset, Utc};

use super::{parse_timestamp, pretty_date_in, NOT_AVAILABLE};

#[test]
fn test_parse_timestamp() {
    assert!(parse_timestamp("2024-03-01T10:00:00.000Z").is_some());
    assert!(parse_timestamp("2024-03-01T10:00:00+01:00").is_some());
    assert!(parse_timestamp("2024-03-01T10:00:00").is_some());
    assert!(parse_timestamp("2024-03-01").is_some());
    assert!(parse_timestamp("yesterday").is_none());
    assert!(parse_timestamp("").is_none());
}

#[test]
fn test_pretty_date() {
    assert_eq!("Mar 1, 2024, 10:05 AM", pretty_date_in(Some("2024-03-01T10:05:00.000Z"), &Utc));
    assert_eq!("Dec 24, 2023, 08:30 PM", pretty_date_in(Some("2023-12-24T20:30:59Z"), &Utc));
    // offsets are honoured
    let lagos = FixedOffset::east_opt(3600).unwrap();
    assert_eq!("Mar 1, 2024, 11:05 AM", pretty_date_in(Some("2024-03-01T10:05:00Z"), &lagos));
    assert_eq!("Jan 5, 2024, 12:00 AM", pretty_date_in(Some("2024-01-05"), &Utc));
}

#[test]
fn test_pretty_date_not_available() {
    assert_eq!(NOT_AVAILABLE, pretty_date_in(None, &Utc));
    assert_eq!(NOT_AVAILABLE, pretty_date_in(Some("not a date"), &Utc));
}
