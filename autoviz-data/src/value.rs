use std::borrow::Cow;
use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

const MILLIS_PER_DAY: f64 = 86_400_000.0;

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%m/%d/%Y",
    "%d %b %Y",
    "%d %B %Y",
    "%b %d %Y",
    "%b %d, %Y",
    "%B %d, %Y",
];

/// A single non-null cell of a field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "kebab-case")]
pub enum Value {
    Number(f64),
    Text(String),
    Date(NaiveDateTime),
    Range { low: f64, high: f64 },
}

impl Value {
    /// Numeric interpretation of the value. Dates are expressed in days since the epoch.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(v) => Some(*v),
            Value::Text(s) => parse_number(s),
            Value::Date(d) => Some(days_since_epoch(d)),
            Value::Range { .. } => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDateTime> {
        match self {
            Value::Date(d) => Some(*d),
            Value::Text(s) => parse_date(s),
            Value::Number(_) | Value::Range { .. } => None,
        }
    }

    pub fn is_date(&self) -> bool {
        matches!(self, Value::Date(_))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(v) => write!(f, "{v}"),
            Value::Text(s) => f.write_str(s),
            Value::Date(d) => write!(f, "{}", d.format("%Y-%m-%dT%H:%M:%S")),
            Value::Range { low, high } => write!(f, "{low}…{high}"),
        }
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(value: NaiveDateTime) -> Self {
        Value::Date(value)
    }
}

/// Parse text as a finite number, ignoring surrounding whitespace and thousands separators
pub fn parse_number(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    let cleaned: Cow<str> = if trimmed.contains(',') {
        Cow::Owned(trimmed.replace(',', ""))
    } else {
        Cow::Borrowed(trimmed)
    };
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse text as a date or date-time literal
pub fn parse_date(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.naive_utc());
    }
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, format) {
            return Some(dt);
        }
    }
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Fractional days since 1970-01-01T00:00:00
pub fn days_since_epoch(date: &NaiveDateTime) -> f64 {
    date.and_utc().timestamp_millis() as f64 / MILLIS_PER_DAY
}

pub fn date_from_days(days: f64) -> Option<NaiveDateTime> {
    if !days.is_finite() {
        return None;
    }
    DateTime::from_timestamp_millis((days * MILLIS_PER_DAY).round() as i64).map(|d| d.naive_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::assert_approx_eq;
    use rstest::rstest;

    #[rstest]
    #[case("42", Some(42.0))]
    #[case(" 3.5 ", Some(3.5))]
    #[case("1,234.5", Some(1234.5))]
    #[case("-1e3", Some(-1000.0))]
    #[case("NaN", None)]
    #[case("inf", None)]
    #[case("", None)]
    #[case("apple", None)]
    fn test_parse_number(#[case] text: &str, #[case] expected: Option<f64>) {
        assert_eq!(parse_number(text), expected);
    }

    #[rstest]
    #[case("2021-03-04", (2021, 3, 4))]
    #[case("2021-03-04T10:30:00", (2021, 3, 4))]
    #[case("2021-03-04 10:30", (2021, 3, 4))]
    #[case("2021-03-04T10:30:00Z", (2021, 3, 4))]
    #[case("03/04/2021", (2021, 3, 4))]
    #[case("4 Mar 2021", (2021, 3, 4))]
    #[case("March 4, 2021", (2021, 3, 4))]
    fn test_parse_date(#[case] text: &str, #[case] ymd: (i32, u32, u32)) {
        let expected = NaiveDate::from_ymd_opt(ymd.0, ymd.1, ymd.2).unwrap();
        assert_eq!(parse_date(text).unwrap().date(), expected);
    }

    #[test]
    fn test_parse_date_rejects_plain_numbers() {
        assert_eq!(parse_date("2021"), None);
        assert_eq!(parse_date("12.5"), None);
        assert_eq!(parse_date("red"), None);
    }

    #[test]
    fn test_days_since_epoch() {
        let epoch = NaiveDate::from_ymd_opt(1970, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert_approx_eq!(f64, days_since_epoch(&epoch), 0.0);

        let noon = NaiveDate::from_ymd_opt(1970, 1, 11)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        assert_approx_eq!(f64, days_since_epoch(&noon), 10.5);
        assert_eq!(date_from_days(10.5), Some(noon));
    }

    #[test]
    fn test_value_coercions() {
        assert_eq!(Value::from("12").as_number(), Some(12.0));
        assert_eq!(Value::Number(2.0).as_date(), None);
        assert!(Value::from("2020-01-01").as_date().is_some());
        assert_eq!(Value::Range { low: 0.0, high: 1.0 }.as_number(), None);
    }
}
