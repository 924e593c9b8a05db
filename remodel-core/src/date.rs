//! A calendar instant that decodes its own documents.
//!
//! `Date` is registered with the constructor strategy out of the box: the raw
//! document is handed to [`Date::from_document`] untouched. Unparsable input
//! never fails, it produces [`Date::invalid`], which displays as
//! `Invalid Date`.

use core::fmt;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde_json::Value;

use crate::{
    BuildError, Built, FieldType, FromBuilt, FromDocument, Instance, Model, Strategy, TypeDesc,
    TypeKey, TypeVTable, construct_instance,
};

/// Largest distance from the epoch, in milliseconds, a valid date may have.
pub const MAX_TIMESTAMP_MILLIS: i64 = 8_640_000_000_000_000;

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

const NAIVE_DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%a %b %d %Y", "%b %d %Y", "%B %d, %Y"];

/// A UTC instant with millisecond precision, or the invalid sentinel.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Date(Option<DateTime<Utc>>);

impl Date {
    /// The invalid sentinel.
    pub const fn invalid() -> Self {
        Date(None)
    }

    /// Wraps a chrono instant, truncated to milliseconds.
    pub fn from_datetime(datetime: DateTime<Utc>) -> Self {
        Self::from_timestamp_millis(datetime.timestamp_millis())
    }

    /// A date `millis` milliseconds away from the Unix epoch.
    pub fn from_timestamp_millis(millis: i64) -> Self {
        if millis.unsigned_abs() > MAX_TIMESTAMP_MILLIS.unsigned_abs() {
            return Self::invalid();
        }
        Date(DateTime::from_timestamp_millis(millis))
    }

    /// Parses a date string.
    ///
    /// Accepts RFC 3339, RFC 2822, `YYYY-MM-DDTHH:MM[:SS[.fff]]` (read as
    /// UTC), `YYYY-MM-DD`, `YYYY-MM` and `YYYY`. Anything else is invalid.
    pub fn parse(input: &str) -> Self {
        let input = input.trim();
        if input.is_empty() {
            return Self::invalid();
        }

        if let Ok(datetime) = DateTime::parse_from_rfc3339(input) {
            return Self::from_datetime(datetime.with_timezone(&Utc));
        }
        if let Ok(datetime) = DateTime::parse_from_rfc2822(input) {
            return Self::from_datetime(datetime.with_timezone(&Utc));
        }
        for format in NAIVE_DATETIME_FORMATS {
            if let Ok(naive) = NaiveDateTime::parse_from_str(input, format) {
                return Self::from_datetime(naive.and_utc());
            }
        }
        for format in NAIVE_DATE_FORMATS {
            if let Ok(date) = NaiveDate::parse_from_str(input, format) {
                return Self::from_naive_date(date);
            }
        }

        parse_partial_date(input)
            .map(Self::from_naive_date)
            .unwrap_or_else(Self::invalid)
    }

    fn from_naive_date(date: NaiveDate) -> Self {
        date.and_hms_opt(0, 0, 0)
            .map(|naive| Self::from_datetime(naive.and_utc()))
            .unwrap_or_else(Self::invalid)
    }

    /// Returns false for the invalid sentinel.
    pub fn is_valid(&self) -> bool {
        self.0.is_some()
    }

    /// The underlying instant.
    pub fn as_datetime(&self) -> Option<&DateTime<Utc>> {
        self.0.as_ref()
    }

    /// The calendar year, in UTC.
    pub fn year(&self) -> Option<i32> {
        self.0.map(|dt| dt.year())
    }

    /// The month, 1-based, in UTC.
    pub fn month(&self) -> Option<u32> {
        self.0.map(|dt| dt.month())
    }

    /// The day of the month, 1-based, in UTC.
    pub fn day(&self) -> Option<u32> {
        self.0.map(|dt| dt.day())
    }

    /// Milliseconds since the Unix epoch.
    pub fn timestamp_millis(&self) -> Option<i64> {
        self.0.map(|dt| dt.timestamp_millis())
    }
}

/// `YYYY-MM` or `YYYY`, as the first day of that month or year.
fn parse_partial_date(input: &str) -> Option<NaiveDate> {
    let (year, month) = match input.split_once('-') {
        Some((year, month)) => (year, Some(month)),
        None => (input, None),
    };
    if year.len() != 4 || !year.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let month = match month {
        Some(month) if month.len() == 2 && month.bytes().all(|b| b.is_ascii_digit()) => {
            month.parse().ok()?
        }
        Some(_) => return None,
        None => 1,
    };
    NaiveDate::from_ymd_opt(year.parse().ok()?, month, 1)
}

impl FromDocument for Date {
    /// Strings are parsed, numbers are milliseconds since the epoch, booleans
    /// count as 0 or 1 ms. Mappings and sequences give the invalid date.
    fn from_document(document: &Value) -> Result<Self, BuildError> {
        Ok(match document {
            Value::String(s) => Date::parse(s),
            Value::Number(n) => match n.as_i64() {
                Some(millis) => Date::from_timestamp_millis(millis),
                None => match n.as_f64() {
                    #[allow(clippy::cast_possible_truncation)]
                    Some(millis)
                        if millis.is_finite() && millis.abs() <= MAX_TIMESTAMP_MILLIS as f64 =>
                    {
                        Date::from_timestamp_millis(millis.trunc() as i64)
                    }
                    _ => Date::invalid(),
                },
            },
            Value::Bool(b) => Date::from_timestamp_millis(i64::from(*b)),
            Value::Null => Date::from_timestamp_millis(0),
            Value::Array(_) | Value::Object(_) => Date::invalid(),
        })
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(dt) => f.write_str(&dt.to_rfc3339_opts(SecondsFormat::Millis, true)),
            None => f.write_str("Invalid Date"),
        }
    }
}

impl fmt::Debug for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Date({self})")
    }
}

impl Instance for Date {
    fn desc(&self) -> &'static TypeDesc {
        Self::DESC
    }

    fn set_field(&mut self, _name: &str, _value: Built) -> Result<bool, BuildError> {
        Ok(false)
    }
}

impl Model for Date {
    const DESC: &'static TypeDesc = &const {
        TypeDesc {
            builder: Some(Strategy::Constructor),
            vtable: TypeVTable {
                default: None,
                from_document: Some(construct_instance::<Date>),
            },
            ..TypeDesc::opaque(TypeKey::of::<Date>(), "Date")
        }
    };
}

impl FieldType for Date {
    fn element() -> Option<&'static TypeDesc> {
        Some(Self::DESC)
    }
}

impl FromBuilt for Date {
    fn from_built(built: Built) -> Result<Self, BuildError> {
        built.into_model()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn parses_iso_strings() {
        let date = Date::parse("2015-01-02T12:12:12.123Z");
        assert_eq!(date.year(), Some(2015));
        assert_eq!(date.month(), Some(1));
        assert_eq!(date.day(), Some(2));
        insta::assert_snapshot!(date, @"2015-01-02T12:12:12.123Z");
    }

    #[test]
    fn date_only_strings_are_utc_midnight() {
        let date = Date::parse("2015-12-12");
        insta::assert_snapshot!(date, @"2015-12-12T00:00:00.000Z");
    }

    #[test]
    fn date_strings_with_month_names() {
        assert_eq!(Date::parse("Tue Apr 28 2015"), Date::parse("2015-04-28"));
        assert_eq!(Date::parse("April 28, 2015"), Date::parse("2015-04-28"));
        assert!(!Date::parse("Wed Apr 28 2015").is_valid());
    }

    #[test]
    fn partial_dates() {
        assert_eq!(Date::parse("2015-04"), Date::parse("2015-04-01"));
        assert_eq!(Date::parse("2015"), Date::parse("2015-01-01"));
        assert!(!Date::parse("2015-4").is_valid());
        assert!(!Date::parse("2015-13").is_valid());
    }

    #[test]
    fn other_formats() {
        assert_eq!(
            Date::parse("Fri, 02 Jan 2015 12:12:12 +0000"),
            Date::parse("2015-01-02T12:12:12Z")
        );
        assert_eq!(
            Date::parse("2015-01-02T12:12"),
            Date::parse("2015-01-02T12:12:00Z")
        );
        assert_eq!(
            Date::parse("2015-01-02T14:12:12+02:00"),
            Date::parse("2015-01-02T12:12:12Z")
        );
    }

    #[test]
    fn unparsable_input_is_invalid_not_an_error() {
        for input in ["", "   ", "gibberish", "2015-02-30"] {
            let date = Date::parse(input);
            assert!(!date.is_valid(), "{input:?} should be invalid");
            assert_eq!(date.to_string(), "Invalid Date");
            assert_eq!(date.year(), None);
        }
    }

    #[test]
    fn numbers_are_epoch_millis() {
        let date = Date::from_document(&json!(1_420_200_732_123_i64)).unwrap();
        assert_eq!(date, Date::parse("2015-01-02T12:12:12.123Z"));

        let date = Date::from_document(&json!(1.5)).unwrap();
        assert_eq!(date.timestamp_millis(), Some(1));

        let date = Date::from_document(&json!(1e300)).unwrap();
        assert!(!date.is_valid());
    }

    #[test]
    fn structured_documents_are_invalid() {
        assert!(!Date::from_document(&json!({ "y": 2015 })).unwrap().is_valid());
        assert!(!Date::from_document(&json!(["2015"])).unwrap().is_valid());
    }

    #[test]
    fn debug_shows_the_instant() {
        insta::assert_debug_snapshot!(Date::invalid(), @"Date(Invalid Date)");
    }
}
