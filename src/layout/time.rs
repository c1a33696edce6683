//! Time formatting for layout columns
//!
//! AWS reports times either as RFC 3339 strings (EC2, CloudFormation, ...) or
//! as epoch milliseconds (CloudWatch Logs). Both are accepted everywhere.

use chrono::{DateTime, Local, NaiveDateTime, Utc};
use serde_json::Value;

/// Widest relative time the formatter produces in practice
pub const RELATIVE_TIME_REFERENCE: &str = "59 minutes ago";

/// Reference rendering of [`date`]
pub const DATE_REFERENCE: &str = "2022/03/17 17:37";

/// Reference rendering of [`timestamp`]
pub const TIMESTAMP_REFERENCE: &str = "2022/03/17 17:37:05.123";

/// Interpret a JSON value as a point in time
#[must_use]
pub fn parse_time(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => DateTime::parse_from_rfc3339(s)
            .map(|t| t.with_timezone(&Utc))
            .ok()
            .or_else(|| {
                NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
                    .ok()
                    .map(|t| t.and_utc())
            }),
        Value::Number(n) => {
            #[allow(clippy::cast_possible_truncation)]
            let millis = n.as_i64().or_else(|| n.as_f64().map(|f| f as i64))?;
            DateTime::from_timestamp_millis(millis)
        }
        _ => None,
    }
}

/// "5 minutes ago" style rendering relative to `now`
///
/// Values that are not times are rendered as text unchanged.
#[must_use]
pub fn relative(value: &Value, now: DateTime<Utc>) -> String {
    let Some(time) = parse_time(value) else {
        return super::column::value_text(value);
    };

    let elapsed = now.signed_duration_since(time).to_std().unwrap_or_default();
    timeago::Formatter::new().convert(elapsed)
}

/// Local `YYYY/MM/DD HH:MM`
#[must_use]
pub fn date(value: &Value) -> String {
    parse_time(value).map_or_else(
        || super::column::value_text(value),
        |time| time.with_timezone(&Local).format("%Y/%m/%d %H:%M").to_string(),
    )
}

/// Local `YYYY/MM/DD HH:MM:SS.mmm`
#[must_use]
pub fn timestamp(value: &Value) -> String {
    parse_time(value).map_or_else(
        || super::column::value_text(value),
        |time| {
            time.with_timezone(&Local)
                .format("%Y/%m/%d %H:%M:%S%.3f")
                .to_string()
        },
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use serde_json::json;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_parse_rfc3339_and_millis_agree() {
        let from_string = parse_time(&json!("2024-06-01T11:55:00+00:00")).unwrap();
        let from_millis = parse_time(&json!(from_string.timestamp_millis())).unwrap();
        assert_eq!(from_string, from_millis);
    }

    #[test]
    fn test_parse_fractional_zulu() {
        assert!(parse_time(&json!("2024-06-01T11:55:00.000Z")).is_some());
    }

    #[test]
    fn test_relative_minutes() {
        let five_minutes_ago = (now() - Duration::minutes(5)).to_rfc3339();
        assert_eq!(relative(&json!(five_minutes_ago), now()), "5 minutes ago");
    }

    #[test]
    fn test_relative_hours_from_millis() {
        let millis = (now() - Duration::hours(2)).timestamp_millis();
        assert_eq!(relative(&json!(millis), now()), "2 hours ago");
    }

    #[test]
    fn test_relative_passes_through_non_times() {
        assert_eq!(relative(&json!("soon"), now()), "soon");
    }

    #[test]
    fn test_date_uses_local_time() {
        let millis = now().timestamp_millis();
        let expected = Local
            .timestamp_millis_opt(millis)
            .unwrap()
            .format("%Y/%m/%d %H:%M")
            .to_string();
        assert_eq!(date(&json!(millis)), expected);
        assert_eq!(expected.len(), DATE_REFERENCE.len());
    }

    #[test]
    fn test_timestamp_has_millis() {
        let rendered = timestamp(&json!(now().timestamp_millis() + 42));
        assert!(rendered.ends_with(".042"));
        assert_eq!(rendered.len(), TIMESTAMP_REFERENCE.len());
    }
}
