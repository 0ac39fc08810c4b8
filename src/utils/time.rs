use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// Parse a client-supplied timestamp. Accepts full RFC 3339 (trailing `Z`
/// or numeric offset), the naive date-times produced by datetime-local
/// inputs, and bare dates. Naive values are taken as UTC.
pub fn parse_client_datetime(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        let naive = date.and_hms_opt(0, 0, 0)?;
        return Some(Utc.from_utc_datetime(&naive));
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_parses_rfc3339_with_z_suffix() {
        let t = parse_client_datetime("2025-08-01T18:00:00Z").unwrap();
        assert_eq!(t.hour(), 18);
        assert_eq!(t.timezone(), Utc);
    }

    #[test]
    fn test_parses_numeric_offset_into_utc() {
        let t = parse_client_datetime("2025-08-01T18:00:00+02:00").unwrap();
        assert_eq!(t.hour(), 16);
    }

    #[test]
    fn test_naive_datetime_is_taken_as_utc() {
        let t = parse_client_datetime("2025-08-01T18:30").unwrap();
        assert_eq!(t.hour(), 18);
        assert_eq!(t.minute(), 30);
        assert!(parse_client_datetime("2025-08-01T18:30:15").is_some());
    }

    #[test]
    fn test_bare_date_is_start_of_day() {
        let t = parse_client_datetime("2025-08-01").unwrap();
        assert_eq!(t.hour(), 0);
        assert_eq!(t.minute(), 0);
    }

    #[test]
    fn test_garbage_is_none() {
        assert!(parse_client_datetime("tomorrow").is_none());
        assert!(parse_client_datetime("").is_none());
        assert!(parse_client_datetime("2025-13-45T99:00").is_none());
    }
}
