use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Number of decimal places coordinates are rounded to before lookup.
/// Four places is roughly 11 m at the equator.
pub const COORDINATE_PRECISION: i32 = 4;

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y%m%d", "%Y/%m/%d"];
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// Rounds a coordinate to [`COORDINATE_PRECISION`] decimal places.
pub fn round_coordinate(value: f64) -> f64 {
    let factor = 10f64.powi(COORDINATE_PRECISION);
    (value * factor).round() / factor
}

/// Parses a check-in date in any of the shapes tabular exports commonly use.
///
/// Plain dates (`2023-06-01`, `20230601`, `2023/06/01`), naive timestamps and
/// RFC 3339 timestamps are accepted. Timestamps keep only their calendar date.
/// A naive timestamp followed by a space and a time zone name
/// (`2023-06-01 08:00:00 UTC`) is also accepted, which is the text Polars
/// produces when casting zoned datetime columns. Anything else is rejected.
pub fn parse_checkin_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(raw, format) {
            return Some(date);
        }
    }
    if let Some(date) = parse_naive_timestamp(raw) {
        return Some(date);
    }
    if let Ok(datetime) = DateTime::parse_from_rfc3339(raw) {
        return Some(datetime.date_naive());
    }
    if let Ok(datetime) = DateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f %z") {
        return Some(datetime.date_naive());
    }

    let (timestamp, zone) = raw.rsplit_once(' ')?;
    if is_zone_name(zone) {
        parse_naive_timestamp(timestamp.trim_end())
    } else {
        None
    }
}

fn parse_naive_timestamp(raw: &str) -> Option<NaiveDate> {
    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|datetime| datetime.date())
}

/// IANA style names such as `UTC` or `Europe/Amsterdam`.
fn is_zone_name(zone: &str) -> bool {
    zone.starts_with(|c: char| c.is_ascii_alphabetic())
        && zone
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '/' | '_' | '+' | '-'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_round_coordinate() {
        assert_eq!(round_coordinate(40.712_84), 40.7128);
        assert_eq!(round_coordinate(-74.006_04), -74.006);
        assert_eq!(round_coordinate(12.345_67), 12.3457);
        assert_eq!(round_coordinate(0.0), 0.0);
    }

    #[test]
    fn test_round_coordinate_coalesces_nearby_points() {
        assert_eq!(round_coordinate(51.507_401), round_coordinate(51.507_399));
    }

    #[test]
    fn test_parse_plain_dates() {
        assert_eq!(parse_checkin_date("2023-06-01"), Some(date(2023, 6, 1)));
        assert_eq!(parse_checkin_date("20230601"), Some(date(2023, 6, 1)));
        assert_eq!(parse_checkin_date("2023/06/01"), Some(date(2023, 6, 1)));
        assert_eq!(parse_checkin_date("  2023-06-01 "), Some(date(2023, 6, 1)));
    }

    #[test]
    fn test_parse_timestamps_keeps_calendar_date() {
        assert_eq!(
            parse_checkin_date("2023-06-01 23:15:00"),
            Some(date(2023, 6, 1))
        );
        assert_eq!(
            parse_checkin_date("2023-06-01T08:00:00.250"),
            Some(date(2023, 6, 1))
        );
        assert_eq!(
            parse_checkin_date("2023-06-01T08:00:00+02:00"),
            Some(date(2023, 6, 1))
        );
        assert_eq!(
            parse_checkin_date("2023-06-01 00:00:00.000000000 UTC"),
            Some(date(2023, 6, 1))
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_checkin_date(""), None);
        assert_eq!(parse_checkin_date("not a date"), None);
        assert_eq!(parse_checkin_date("2023-13-01"), None);
        assert_eq!(parse_checkin_date("2023-02-30"), None);
    }

    #[test]
    fn test_parse_accepts_zoned_polars_text() {
        assert_eq!(
            parse_checkin_date("2023-06-01 08:00:00 Europe/Amsterdam"),
            Some(date(2023, 6, 1))
        );
        assert_eq!(
            parse_checkin_date("2023-06-01 08:00:00.123 +0200"),
            Some(date(2023, 6, 1))
        );
    }

    #[test]
    fn test_parse_rejects_trailing_text_after_valid_date() {
        assert_eq!(parse_checkin_date("2023-06-01xyz"), None);
        assert_eq!(parse_checkin_date("2023-06-01 is when we went"), None);
        assert_eq!(parse_checkin_date("2023-06-01 25:99:00"), None);
        assert_eq!(parse_checkin_date("2023-06-01 UTC"), None);
    }
}
