//! Value enum for field data

use std::str::FromStr;

use chrono::NaiveDate;
use chrono::NaiveDateTime;
use chrono::NaiveTime;
use rust_decimal::Decimal;
use serde::Serialize;
use url::Url;

use super::DateFormats;
use super::FieldType;
use super::types::ContainerRef;

/// A field value from a record.
///
/// Values are typed according to the field's declared [`FieldType`] when
/// the response is parsed. Text that does not fit the declared type (for
/// example `"n/a"` in a number field) is kept as [`Value::Text`] instead of
/// failing the whole response.
///
/// # Type Mapping
///
/// | Field type | Rust Variant |
/// |------------|--------------|
/// | empty data | `Null` |
/// | text | `Text` |
/// | number | `Number` |
/// | date | `Date` |
/// | time | `Time` |
/// | timestamp | `Timestamp` |
/// | container | `Container` |
/// | repeating field | `Repeating` |
///
/// # Example
///
/// ```
/// use filemaker_lib::model::Value;
///
/// let name = Value::from("Contoso");
/// let empty = Value::Null;
/// assert_eq!(name.type_name(), "text");
/// assert!(empty.is_null());
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// Empty field.
    #[default]
    Null,
    /// Text value.
    Text(String),
    /// Arbitrary precision number.
    Number(Decimal),
    /// Calendar date.
    Date(NaiveDate),
    /// Time of day.
    Time(NaiveTime),
    /// Date and time without timezone.
    Timestamp(NaiveDateTime),
    /// Reference to container data.
    Container(ContainerRef),
    /// All repetitions of a repeating field, in order.
    Repeating(Vec<Value>),
}

impl Value {
    /// Returns `true` if this is a null value.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the type name of this value.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Text(_) => "text",
            Value::Number(_) => "number",
            Value::Date(_) => "date",
            Value::Time(_) => "time",
            Value::Timestamp(_) => "timestamp",
            Value::Container(_) => "container",
            Value::Repeating(_) => "repeating",
        }
    }

    /// Interprets one `<data>` string as a value of `field_type`.
    ///
    /// Surrounding whitespace is ignored for every type except text.
    pub(crate) fn coerce(
        raw: &str,
        field_type: FieldType,
        formats: &DateFormats,
        container_base: Option<&Url>,
    ) -> Value {
        if raw.is_empty() {
            return Value::Null;
        }

        let trimmed = raw.trim();
        let parsed = match field_type {
            FieldType::Text => None,
            FieldType::Number => Decimal::from_str(trimmed).ok().map(Value::Number),
            FieldType::Date => NaiveDate::parse_from_str(trimmed, &formats.date)
                .ok()
                .map(Value::Date),
            FieldType::Time => NaiveTime::parse_from_str(trimmed, &formats.time)
                .ok()
                .map(Value::Time),
            FieldType::Timestamp => NaiveDateTime::parse_from_str(trimmed, &formats.timestamp)
                .ok()
                .map(Value::Timestamp),
            FieldType::Container if !trimmed.is_empty() => Some(Value::Container(
                ContainerRef::resolve(trimmed, container_base),
            )),
            FieldType::Container => None,
        };

        parsed.unwrap_or_else(|| {
            if field_type != FieldType::Text {
                log::debug!("keeping {:?} as text: not a valid {}", raw, field_type);
            }
            Value::Text(raw.to_string())
        })
    }
}

// =============================================================================
// From implementations
// =============================================================================

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<Decimal> for Value {
    fn from(v: Decimal) -> Self {
        Value::Number(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Number(Decimal::from(v))
    }
}

impl From<NaiveDate> for Value {
    fn from(v: NaiveDate) -> Self {
        Value::Date(v)
    }
}

impl From<NaiveTime> for Value {
    fn from(v: NaiveTime) -> Self {
        Value::Time(v)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(v: NaiveDateTime) -> Self {
        Value::Timestamp(v)
    }
}

impl From<ContainerRef> for Value {
    fn from(v: ContainerRef) -> Self {
        Value::Container(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::Repeating(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(inner) => inner.into(),
            None => Value::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn formats() -> DateFormats {
        DateFormats::from_server("MM/dd/yyyy", "HH:mm:ss", "MM/dd/yyyy HH:mm:ss")
    }

    #[test]
    fn test_coerce_by_type() {
        let f = formats();

        assert_eq!(
            Value::coerce("Bill", FieldType::Text, &f, None),
            Value::Text("Bill".into())
        );
        assert_eq!(
            Value::coerce("19.99", FieldType::Number, &f, None),
            Value::Number(Decimal::new(1999, 2))
        );
        assert_eq!(
            Value::coerce("10/17/2026", FieldType::Date, &f, None),
            Value::Date(NaiveDate::from_ymd_opt(2026, 10, 17).unwrap())
        );
        assert_eq!(
            Value::coerce("14:05:09", FieldType::Time, &f, None),
            Value::Time(NaiveTime::from_hms_opt(14, 5, 9).unwrap())
        );
        assert_eq!(
            Value::coerce("10/17/2026 14:05:09", FieldType::Timestamp, &f, None),
            Value::Timestamp(
                NaiveDate::from_ymd_opt(2026, 10, 17)
                    .unwrap()
                    .and_hms_opt(14, 5, 9)
                    .unwrap()
            )
        );
        assert_eq!(
            Value::coerce("/fmi/xml/cnt/a.png", FieldType::Container, &f, None),
            Value::Container(ContainerRef::new("/fmi/xml/cnt/a.png"))
        );
    }

    #[test]
    fn test_typed_values_ignore_padding() {
        let f = formats();

        assert_eq!(
            Value::coerce(" 03/14/1981 ", FieldType::Date, &f, None),
            Value::Date(NaiveDate::from_ymd_opt(1981, 3, 14).unwrap())
        );
        assert_eq!(
            Value::coerce("\n08:30:00\t", FieldType::Time, &f, None),
            Value::Time(NaiveTime::from_hms_opt(8, 30, 0).unwrap())
        );
        assert_eq!(
            Value::coerce(" 01/02/2020 13:45:00 ", FieldType::Timestamp, &f, None),
            Value::Timestamp(
                NaiveDate::from_ymd_opt(2020, 1, 2)
                    .unwrap()
                    .and_hms_opt(13, 45, 0)
                    .unwrap()
            )
        );
        assert_eq!(
            Value::coerce(" 7 ", FieldType::Number, &f, None),
            Value::Number(Decimal::from(7))
        );
        assert_eq!(
            Value::coerce(" Bill ", FieldType::Text, &f, None),
            Value::Text(" Bill ".into())
        );
    }

    #[test]
    fn test_empty_is_null() {
        let f = formats();
        for field_type in [FieldType::Text, FieldType::Number, FieldType::Date] {
            assert_eq!(Value::coerce("", field_type, &f, None), Value::Null);
        }
    }

    #[test]
    fn test_unparsable_stays_text() {
        let f = formats();
        assert_eq!(
            Value::coerce("n/a", FieldType::Number, &f, None),
            Value::Text("n/a".into())
        );
        assert_eq!(
            Value::coerce("2026-10-17", FieldType::Date, &f, None),
            Value::Text("2026-10-17".into())
        );
    }

    #[test]
    fn test_type_names() {
        assert_eq!(Value::Null.type_name(), "null");
        assert_eq!(Value::from(5i64).type_name(), "number");
        assert_eq!(Value::from(vec![Value::Null]).type_name(), "repeating");
        assert_eq!(Value::from(None::<String>), Value::Null);
    }
}
