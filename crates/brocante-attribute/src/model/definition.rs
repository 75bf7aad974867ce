//! Attribute definition data models
//!
//! This module defines the wire and service models around
//! `attribute_definition` rows.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use brocante_persistence::entity::attribute_definition;

/// Attribute definition as exposed to clients
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DefinitionView {
    pub id: i64,
    pub category_id: i64,
    pub name: String,
    pub value_type: String,
    pub options: Vec<String>,
    pub required: bool,
    pub sort_order: i32,
    pub placeholder: Option<String>,
    pub description: Option<String>,
    pub is_active: bool,
    pub date_format: Option<String>,
    pub min_date: Option<NaiveDate>,
    pub max_date: Option<NaiveDate>,
}

impl From<attribute_definition::Model> for DefinitionView {
    fn from(value: attribute_definition::Model) -> Self {
        let options = decode_options(value.options.as_deref());
        Self {
            id: value.id,
            category_id: value.category_id,
            name: value.name,
            value_type: value.value_type,
            options,
            required: value.required,
            sort_order: value.sort_order,
            placeholder: value.placeholder,
            description: value.description,
            is_active: value.is_active,
            date_format: value.date_format,
            min_date: value.min_date,
            max_date: value.max_date,
        }
    }
}

/// Payload for creating or updating an attribute definition
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DefinitionSpec {
    pub category_id: i64,
    pub name: String,
    pub value_type: String,
    pub options: Vec<String>,
    pub required: bool,
    pub sort_order: i32,
    pub placeholder: Option<String>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
    pub date_format: Option<String>,
    pub min_date: Option<NaiveDate>,
    pub max_date: Option<NaiveDate>,
}

/// A stored attribute value, decorated with its display rendering
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredValueView {
    pub attribute_id: i64,
    pub name: String,
    pub kind: String,
    pub value: String,
    pub display: String,
}

/// Outcome of a partial-success batch write
///
/// `saved` lists the attribute ids written; `errors` maps the submitted
/// field (definition name, or the raw id for unknown attributes) to the
/// reason it was skipped. The caller re-prompts only for the failed fields.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsertOutcome {
    pub saved: Vec<i64>,
    pub errors: BTreeMap<String, String>,
}

impl UpsertOutcome {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Decode the JSON-encoded option list stored on a definition row
///
/// Rows written through the definition service always hold a valid JSON
/// array; anything else decodes to an empty list rather than an error.
pub fn decode_options(options: Option<&str>) -> Vec<String> {
    options
        .and_then(|raw| serde_json::from_str::<Vec<String>>(raw).ok())
        .unwrap_or_default()
}

/// Encode an option list for storage; `None` when empty
pub fn encode_options(options: &[String]) -> Option<String> {
    if options.is_empty() {
        None
    } else {
        serde_json::to_string(options).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_round_trip() {
        let options = vec!["CDI".to_string(), "CDD".to_string(), "Stage".to_string()];
        let encoded = encode_options(&options).unwrap();
        assert_eq!(decode_options(Some(&encoded)), options);
    }

    #[test]
    fn test_decode_options_tolerates_garbage() {
        assert!(decode_options(None).is_empty());
        assert!(decode_options(Some("not json")).is_empty());
        assert!(decode_options(Some("{\"a\":1}")).is_empty());
    }

    #[test]
    fn test_encode_options_empty_is_none() {
        assert_eq!(encode_options(&[]), None);
    }
}
