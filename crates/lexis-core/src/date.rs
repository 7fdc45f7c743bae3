use chrono::{DateTime, NaiveDateTime, Utc};

const RFC_1123: &str = "%a, %d %b %Y %H:%M:%S GMT";
const RFC_850: &str = "%A, %d-%b-%y %H:%M:%S GMT";
const ASCTIME: &str = "%a %b %e %H:%M:%S %Y";

/// Format as an HTTP date, e.g. `Wed, 21 Oct 2015 07:28:00 GMT`
pub fn format_http_date(date: &DateTime<Utc>) -> String {
    date.format(RFC_1123).to_string()
}

/// Parse any of the three HTTP date formats
pub fn parse_http_date(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(date) = DateTime::parse_from_rfc2822(value) {
        return Some(date.with_timezone(&Utc));
    }

    [RFC_1123, RFC_850, ASCTIME]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn sample() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2015, 10, 21, 7, 28, 0).unwrap()
    }

    #[test]
    fn formats_rfc_1123() {
        assert_eq!(format_http_date(&sample()), "Wed, 21 Oct 2015 07:28:00 GMT");
    }

    #[test]
    fn parses_all_http_formats() {
        assert_eq!(parse_http_date("Wed, 21 Oct 2015 07:28:00 GMT"), Some(sample()));
        assert_eq!(parse_http_date("Wednesday, 21-Oct-15 07:28:00 GMT"), Some(sample()));
        assert_eq!(parse_http_date("Wed Oct 21 07:28:00 2015"), Some(sample()));
    }

    #[test]
    fn garbage_is_none() {
        assert_eq!(parse_http_date("yesterday"), None);
    }
}
