//! Type-directed validation of raw attribute submissions
//!
//! Each raw value is checked against its definition's value type and
//! constraints. Failures are per-field and never abort sibling fields;
//! batching is handled by the value service.

use chrono::NaiveDate;
use serde_json::Value;

use brocante_persistence::entity::attribute_definition;

use crate::model::definition::decode_options;
use crate::model::{DateGranularity, TypedValue, ValidationError, ValueType};

/// Validate a raw JSON value against a definition
///
/// Returns `Ok(None)` when an optional field was submitted empty (nothing
/// is stored), `Ok(Some(_))` with the well-typed value otherwise.
pub fn validate(
    def: &attribute_definition::Model,
    raw: &Value,
) -> Result<Option<TypedValue>, ValidationError> {
    validate_text(def, raw_to_text(raw).as_deref())
}

/// Validate a raw textual value against a definition
///
/// This is the core contract; [`validate`] merely projects JSON scalars to
/// text first. Form submissions and the backfill jobs both arrive here as
/// text.
pub fn validate_text(
    def: &attribute_definition::Model,
    raw: Option<&str>,
) -> Result<Option<TypedValue>, ValidationError> {
    let text = raw.map(str::trim).filter(|s| !s.is_empty());

    let Some(text) = text else {
        return if def.required {
            Err(ValidationError::MissingRequired)
        } else {
            Ok(None)
        };
    };

    let value_type = def
        .value_type
        .parse::<ValueType>()
        .map_err(|_| ValidationError::UnsupportedType(def.value_type.clone()))?;

    let typed = match value_type {
        ValueType::String => TypedValue::Text(text.to_string()),
        ValueType::Number => {
            let n = text
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite())
                .ok_or(ValidationError::NotANumber)?;
            TypedValue::Number(n)
        }
        ValueType::Boolean => match text {
            "true" => TypedValue::Flag(true),
            "false" => TypedValue::Flag(false),
            _ => return Err(ValidationError::NotABoolean),
        },
        ValueType::Select => {
            let options = decode_options(def.options.as_deref());
            if !options.iter().any(|opt| opt == text) {
                return Err(ValidationError::InvalidOption);
            }
            TypedValue::Text(text.to_string())
        }
        ValueType::Date => {
            let day = parse_date(text, granularity(def)).ok_or(ValidationError::InvalidDate)?;
            if let Some(min) = def.min_date
                && day < min
            {
                return Err(ValidationError::DateTooEarly);
            }
            if let Some(max) = def.max_date
                && day > max
            {
                return Err(ValidationError::DateTooLate);
            }
            TypedValue::Day(day)
        }
    };

    Ok(Some(typed))
}

/// Granularity configured on a date definition; unknown strings fall back
/// to plain dates rather than rejecting the whole row.
pub(crate) fn granularity(def: &attribute_definition::Model) -> DateGranularity {
    def.date_format
        .as_deref()
        .and_then(|s| s.parse().ok())
        .unwrap_or_default()
}

/// Project a JSON scalar to the text the form layer would have sent.
/// Composite values degrade to their compact JSON text and fail the
/// per-type parse downstream.
fn raw_to_text(raw: &Value) -> Option<String> {
    match raw {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        other => Some(other.to_string()),
    }
}

fn parse_date(text: &str, granularity: DateGranularity) -> Option<NaiveDate> {
    match granularity {
        DateGranularity::Date => NaiveDate::parse_from_str(text, "%Y-%m-%d").ok(),
        DateGranularity::DateTime => chrono::DateTime::parse_from_rfc3339(text)
            .map(|dt| dt.date_naive())
            .ok()
            .or_else(|| {
                chrono::NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S")
                    .map(|dt| dt.date())
                    .ok()
            })
            .or_else(|| NaiveDate::parse_from_str(text, "%Y-%m-%d").ok()),
        DateGranularity::Month => {
            NaiveDate::parse_from_str(&format!("{}-01", text), "%Y-%m-%d").ok()
        }
        DateGranularity::Year => text
            .parse::<i32>()
            .ok()
            .and_then(|y| NaiveDate::from_ymd_opt(y, 1, 1)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn def(value_type: &str) -> attribute_definition::Model {
        attribute_definition::Model {
            id: 1,
            category_id: 1,
            name: "Surface".to_string(),
            value_type: value_type.to_string(),
            options: None,
            required: false,
            sort_order: 0,
            placeholder: None,
            description: None,
            is_active: true,
            date_format: None,
            min_date: None,
            max_date: None,
            created_at: chrono::NaiveDateTime::default(),
            updated_at: chrono::NaiveDateTime::default(),
        }
    }

    fn select_def(options: &[&str]) -> attribute_definition::Model {
        let mut d = def("select");
        d.options = crate::model::definition::encode_options(
            &options.iter().map(|s| s.to_string()).collect::<Vec<_>>(),
        );
        d
    }

    #[test]
    fn test_optional_empty_is_accepted() {
        let d = def("number");
        assert_eq!(validate_text(&d, None), Ok(None));
        assert_eq!(validate_text(&d, Some("")), Ok(None));
        assert_eq!(validate_text(&d, Some("   ")), Ok(None));
        assert_eq!(validate(&d, &Value::Null), Ok(None));
    }

    #[test]
    fn test_required_empty_is_rejected() {
        let mut d = def("string");
        d.required = true;
        assert_eq!(
            validate_text(&d, Some("")),
            Err(ValidationError::MissingRequired)
        );
    }

    #[test]
    fn test_number_parsing() {
        let d = def("number");
        assert_eq!(
            validate_text(&d, Some("42")),
            Ok(Some(TypedValue::Number(42.0)))
        );
        assert_eq!(
            validate_text(&d, Some("3.5")),
            Ok(Some(TypedValue::Number(3.5)))
        );
        assert_eq!(validate_text(&d, Some("abc")), Err(ValidationError::NotANumber));
        assert_eq!(validate_text(&d, Some("inf")), Err(ValidationError::NotANumber));
    }

    #[test]
    fn test_boolean_literals_only() {
        let d = def("boolean");
        assert_eq!(
            validate_text(&d, Some("true")),
            Ok(Some(TypedValue::Flag(true)))
        );
        assert_eq!(
            validate(&d, &Value::Bool(false)),
            Ok(Some(TypedValue::Flag(false)))
        );
        assert_eq!(validate_text(&d, Some("oui")), Err(ValidationError::NotABoolean));
        assert_eq!(validate_text(&d, Some("1")), Err(ValidationError::NotABoolean));
    }

    #[test]
    fn test_select_is_case_sensitive() {
        let d = select_def(&["Option A", "Option B"]);
        assert_eq!(
            validate_text(&d, Some("Option A")),
            Ok(Some(TypedValue::Text("Option A".to_string())))
        );
        assert_eq!(
            validate_text(&d, Some("option a")),
            Err(ValidationError::InvalidOption)
        );
        assert_eq!(
            validate_text(&d, Some("Option C")),
            Err(ValidationError::InvalidOption)
        );
    }

    #[test]
    fn test_date_bounds() {
        let mut d = def("date");
        d.min_date = NaiveDate::from_ymd_opt(2000, 1, 1);
        d.max_date = NaiveDate::from_ymd_opt(2030, 12, 31);
        assert_eq!(
            validate_text(&d, Some("2024-07-14")),
            Ok(Some(TypedValue::Day(
                NaiveDate::from_ymd_opt(2024, 7, 14).unwrap()
            )))
        );
        assert_eq!(
            validate_text(&d, Some("1999-12-31")),
            Err(ValidationError::DateTooEarly)
        );
        assert_eq!(
            validate_text(&d, Some("2031-01-01")),
            Err(ValidationError::DateTooLate)
        );
        assert_eq!(
            validate_text(&d, Some("not-a-date")),
            Err(ValidationError::InvalidDate)
        );
    }

    #[test]
    fn test_date_granularities() {
        let mut d = def("date");
        d.date_format = Some("month".to_string());
        assert_eq!(
            validate_text(&d, Some("2024-07")),
            Ok(Some(TypedValue::Day(
                NaiveDate::from_ymd_opt(2024, 7, 1).unwrap()
            )))
        );

        d.date_format = Some("year".to_string());
        assert_eq!(
            validate_text(&d, Some("2019")),
            Ok(Some(TypedValue::Day(
                NaiveDate::from_ymd_opt(2019, 1, 1).unwrap()
            )))
        );

        d.date_format = Some("datetime".to_string());
        assert_eq!(
            validate_text(&d, Some("2024-07-14T09:30:00")),
            Ok(Some(TypedValue::Day(
                NaiveDate::from_ymd_opt(2024, 7, 14).unwrap()
            )))
        );
    }

    #[test]
    fn test_unknown_value_type() {
        let d = def("mixed");
        assert_eq!(
            validate_text(&d, Some("x")),
            Err(ValidationError::UnsupportedType("mixed".to_string()))
        );
    }

    proptest! {
        #[test]
        fn prop_number_accepts_all_finite_floats(n in proptest::num::f64::NORMAL) {
            let d = def("number");
            let parsed = validate_text(&d, Some(&n.to_string())).unwrap().unwrap();
            prop_assert_eq!(parsed, TypedValue::Number(n));
        }

        #[test]
        fn prop_string_accepts_anything(s in "\\PC{1,40}") {
            let d = def("string");
            // Whitespace-only inputs count as empty and store nothing
            let expected = s.trim();
            match validate_text(&d, Some(&s)).unwrap() {
                Some(TypedValue::Text(stored)) => prop_assert_eq!(stored, expected.to_string()),
                None => prop_assert!(expected.is_empty()),
                other => prop_assert!(false, "unexpected {:?}", other),
            }
        }

        #[test]
        fn prop_select_rejects_non_members(s in "[a-z]{1,10}") {
            let d = select_def(&["CDI", "CDD"]);
            prop_assert_eq!(
                validate_text(&d, Some(&s)),
                Err(ValidationError::InvalidOption)
            );
        }
    }
}
