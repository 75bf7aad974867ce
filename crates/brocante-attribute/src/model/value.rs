//! Typed attribute values
//!
//! The original store accepted untyped payloads; here every stored value
//! goes through the `TypedValue` tagged union, constructed only by the
//! validator. The canonical text encoding written to the database is the
//! same encoding the search layer compares against.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Attribute value types configurable by administrators
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    String,
    Number,
    Boolean,
    Select,
    Date,
}

impl ValueType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueType::String => "string",
            ValueType::Number => "number",
            ValueType::Boolean => "boolean",
            ValueType::Select => "select",
            ValueType::Date => "date",
        }
    }
}

impl Display for ValueType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ValueType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "string" => Ok(ValueType::String),
            "number" => Ok(ValueType::Number),
            "boolean" => Ok(ValueType::Boolean),
            "select" => Ok(ValueType::Select),
            "date" => Ok(ValueType::Date),
            _ => Err(format!("Invalid value type: {}", s)),
        }
    }
}

/// Granularity of a date attribute
#[derive(Clone, Copy, Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DateGranularity {
    #[default]
    Date,
    DateTime,
    Month,
    Year,
}

impl DateGranularity {
    pub fn as_str(&self) -> &'static str {
        match self {
            DateGranularity::Date => "date",
            DateGranularity::DateTime => "datetime",
            DateGranularity::Month => "month",
            DateGranularity::Year => "year",
        }
    }
}

impl FromStr for DateGranularity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "date" => Ok(DateGranularity::Date),
            "datetime" => Ok(DateGranularity::DateTime),
            "month" => Ok(DateGranularity::Month),
            "year" => Ok(DateGranularity::Year),
            _ => Err(format!("Invalid date granularity: {}", s)),
        }
    }
}

/// A well-typed attribute value
///
/// Construction goes through [`crate::validate::validate`]; the store layer
/// persists only the canonical encoding produced by [`TypedValue::to_stored`].
#[derive(Clone, Debug, PartialEq)]
pub enum TypedValue {
    Text(String),
    Number(f64),
    Flag(bool),
    Day(NaiveDate),
}

impl TypedValue {
    /// Discriminator persisted next to the canonical encoding
    pub fn kind(&self) -> &'static str {
        match self {
            TypedValue::Text(_) => "string",
            TypedValue::Number(_) => "number",
            TypedValue::Flag(_) => "boolean",
            TypedValue::Day(_) => "date",
        }
    }

    /// Canonical text encoding written to the store and compared by search
    pub fn to_stored(&self) -> String {
        match self {
            TypedValue::Text(s) => s.clone(),
            TypedValue::Number(n) => n.to_string(),
            TypedValue::Flag(b) => b.to_string(),
            TypedValue::Day(d) => d.format("%Y-%m-%d").to_string(),
        }
    }

    /// Decode a stored row back into a typed value
    ///
    /// Returns `None` for rows whose kind/value no longer decode (e.g. the
    /// definition's type was changed after the value was written).
    pub fn from_stored(kind: &str, value: &str) -> Option<TypedValue> {
        match kind {
            "string" => Some(TypedValue::Text(value.to_string())),
            "number" => value.parse::<f64>().ok().map(TypedValue::Number),
            "boolean" => value.parse::<bool>().ok().map(TypedValue::Flag),
            "date" => NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .map(TypedValue::Day),
            _ => None,
        }
    }
}

/// Per-field validation failures, reported without aborting sibling fields
#[derive(thiserror::Error, Clone, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("value is required")]
    MissingRequired,

    #[error("not a number")]
    NotANumber,

    #[error("not a boolean")]
    NotABoolean,

    #[error("not one of the configured options")]
    InvalidOption,

    #[error("not a valid date")]
    InvalidDate,

    #[error("date is before the allowed minimum")]
    DateTooEarly,

    #[error("date is after the allowed maximum")]
    DateTooLate,

    #[error("unsupported value type '{0}'")]
    UnsupportedType(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_type_round_trip() {
        assert_eq!("select".parse::<ValueType>().unwrap(), ValueType::Select);
        assert_eq!(ValueType::Date.as_str(), "date");
        assert!("json".parse::<ValueType>().is_err());
    }

    #[test]
    fn test_typed_value_canonical_encoding() {
        assert_eq!(TypedValue::Number(85.0).to_stored(), "85");
        assert_eq!(TypedValue::Number(3.5).to_stored(), "3.5");
        assert_eq!(TypedValue::Flag(true).to_stored(), "true");
        assert_eq!(
            TypedValue::Day(NaiveDate::from_ymd_opt(2024, 7, 14).unwrap()).to_stored(),
            "2024-07-14"
        );
    }

    #[test]
    fn test_from_stored_round_trip() {
        let v = TypedValue::Number(129000.0);
        assert_eq!(TypedValue::from_stored(v.kind(), &v.to_stored()), Some(v));

        let v = TypedValue::Day(NaiveDate::from_ymd_opt(2019, 1, 31).unwrap());
        assert_eq!(TypedValue::from_stored(v.kind(), &v.to_stored()), Some(v));

        assert_eq!(TypedValue::from_stored("number", "abc"), None);
        assert_eq!(TypedValue::from_stored("mixed", "x"), None);
    }
}
