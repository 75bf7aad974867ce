//! Display rendering of stored attribute values
//!
//! Rendering is total: anything that fails to decode is returned as-is,
//! never an error. The output locale is French, matching the web client.

use chrono::NaiveDate;

use brocante_persistence::entity::attribute_definition;

use crate::model::{DateGranularity, ValueType};
use crate::validate::granularity;

/// Thousands separator (no-break space, French grouping)
const GROUP_SEPARATOR: char = '\u{00A0}';

/// Placeholder shown for missing values
pub const EMPTY_DISPLAY: &str = "-";

/// Render a stored value for display according to its definition
pub fn format(def: &attribute_definition::Model, stored: &str) -> String {
    let text = stored.trim();
    if text.is_empty() {
        return EMPTY_DISPLAY.to_string();
    }

    let Ok(value_type) = def.value_type.parse::<ValueType>() else {
        return text.to_string();
    };

    match value_type {
        ValueType::Boolean => match text {
            "true" => "Oui".to_string(),
            "false" => "Non".to_string(),
            _ => text.to_string(),
        },
        ValueType::Number => match text.parse::<f64>() {
            Ok(n) if n.is_finite() => group_number(n),
            _ => text.to_string(),
        },
        ValueType::Date => match NaiveDate::parse_from_str(text, "%Y-%m-%d") {
            Ok(day) => format_date(day, granularity(def)),
            Err(_) => text.to_string(),
        },
        ValueType::String | ValueType::Select => text.to_string(),
    }
}

fn format_date(day: NaiveDate, granularity: DateGranularity) -> String {
    match granularity {
        DateGranularity::Date | DateGranularity::DateTime => day.format("%d/%m/%Y").to_string(),
        DateGranularity::Month => day.format("%m/%Y").to_string(),
        DateGranularity::Year => day.format("%Y").to_string(),
    }
}

/// Group a number French-style: no-break-space thousands, comma decimals
fn group_number(n: f64) -> String {
    let canonical = n.to_string();
    // Exponent renderings of extreme magnitudes are left alone
    if canonical.contains('e') {
        return canonical;
    }
    let (sign, rest) = match canonical.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", canonical.as_str()),
    };
    let (int_part, frac_part) = match rest.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (rest, None),
    };

    let digits: Vec<char> = int_part.chars().collect();
    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(GROUP_SEPARATOR);
        }
        grouped.push(*c);
    }

    match frac_part {
        Some(frac) => format!("{}{},{}", sign, grouped, frac),
        None => format!("{}{}", sign, grouped),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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

    #[test]
    fn test_empty_renders_dash() {
        assert_eq!(format(&def("string"), ""), "-");
        assert_eq!(format(&def("number"), "   "), "-");
    }

    #[test]
    fn test_boolean_renders_french() {
        let d = def("boolean");
        assert_eq!(format(&d, "true"), "Oui");
        assert_eq!(format(&d, "false"), "Non");
        assert_eq!(format(&d, "peut-être"), "peut-être");
    }

    #[test]
    fn test_number_grouping() {
        let d = def("number");
        assert_eq!(format(&d, "42"), "42");
        assert_eq!(format(&d, "85"), "85");
        assert_eq!(format(&d, "12500"), "12\u{00A0}500");
        assert_eq!(format(&d, "1234567"), "1\u{00A0}234\u{00A0}567");
        assert_eq!(format(&d, "-12500.75"), "-12\u{00A0}500,75");
        assert_eq!(format(&d, "1e300"), "1e300");
        assert_eq!(format(&d, "abc"), "abc");
    }

    #[test]
    fn test_number_grouping_digits_preserved() {
        let d = def("number");
        let display = format(&d, "42");
        let digits: String = display.chars().filter(|c| c.is_ascii_digit()).collect();
        assert_eq!(digits, "42");
    }

    #[test]
    fn test_date_rendering() {
        let mut d = def("date");
        assert_eq!(format(&d, "2024-07-14"), "14/07/2024");

        d.date_format = Some("month".to_string());
        assert_eq!(format(&d, "2024-07-01"), "07/2024");

        d.date_format = Some("year".to_string());
        assert_eq!(format(&d, "2019-01-01"), "2019");

        d.date_format = None;
        assert_eq!(format(&d, "pas-une-date"), "pas-une-date");
    }

    #[test]
    fn test_string_passthrough_is_idempotent() {
        let d = def("string");
        let once = format(&d, "Appartement T3");
        let twice = format(&d, &once);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_unknown_type_passthrough() {
        assert_eq!(format(&def("mixed"), "anything"), "anything");
    }
}
