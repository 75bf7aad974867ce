//! Attribute value store
//!
//! Values are written with a partial-success policy: each submitted field
//! is validated independently; valid fields are written-or-replaced, bad
//! fields are skipped and reported. The batch is not atomic across fields;
//! callers surface the per-field errors so the client can re-prompt.

use std::collections::{BTreeMap, HashMap};

use chrono::Local;
use sea_orm::*;
use serde_json::Value;

use brocante_persistence::entity::{attribute_definition, attribute_value};

use crate::format;
use crate::model::{StoredValueView, TypedValue, UpsertOutcome};
use crate::validate;

/// Stored values of a listing, keyed by attribute id
pub async fn find_for_listing(
    db: &DatabaseConnection,
    listing_id: i64,
) -> anyhow::Result<HashMap<i64, attribute_value::Model>> {
    let values = attribute_value::Entity::find()
        .filter(attribute_value::Column::ListingId.eq(listing_id))
        .all(db)
        .await?;

    Ok(values.into_iter().map(|v| (v.attribute_id, v)).collect())
}

/// Stored values of a listing joined with their definitions, rendered for
/// display and ordered like the category's attribute form
pub async fn views_for_listing(
    db: &DatabaseConnection,
    listing_id: i64,
) -> anyhow::Result<Vec<StoredValueView>> {
    let rows = attribute_value::Entity::find()
        .filter(attribute_value::Column::ListingId.eq(listing_id))
        .find_also_related(attribute_definition::Entity)
        .all(db)
        .await?;

    let mut views: Vec<(i32, String, StoredValueView)> = rows
        .into_iter()
        .filter_map(|(value, definition)| {
            let definition = definition?;
            let display = format::format(&definition, &value.value);
            Some((
                definition.sort_order,
                definition.name.clone(),
                StoredValueView {
                    attribute_id: value.attribute_id,
                    name: definition.name,
                    kind: value.kind,
                    value: value.value,
                    display,
                },
            ))
        })
        .collect();

    views.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(&b.1)));

    Ok(views.into_iter().map(|(_, _, view)| view).collect())
}

/// Validate and write a batch of raw values for one listing
///
/// Valid fields are upserted on the `(listing_id, attribute_id)` key;
/// empty optional fields clear any stored value; invalid fields are
/// skipped and reported in the outcome.
pub async fn upsert_for_listing(
    db: &DatabaseConnection,
    listing_id: i64,
    raw: &BTreeMap<i64, Value>,
) -> anyhow::Result<UpsertOutcome> {
    let definitions: HashMap<i64, attribute_definition::Model> = attribute_definition::Entity::find()
        .filter(attribute_definition::Column::Id.is_in(raw.keys().copied().collect::<Vec<_>>()))
        .all(db)
        .await?
        .into_iter()
        .map(|d| (d.id, d))
        .collect();

    let plan = plan_upsert(&definitions, raw);

    let existing = find_for_listing(db, listing_id).await?;

    let now = Local::now().naive_local();
    let mut outcome = UpsertOutcome {
        errors: plan.errors,
        ..Default::default()
    };

    for (attribute_id, typed) in &plan.writes {
        match existing.get(attribute_id) {
            Some(row) => {
                let mut value: attribute_value::ActiveModel = row.clone().into();
                value.kind = Set(typed.kind().to_string());
                value.value = Set(typed.to_stored());
                value.updated_at = Set(now);
                value.update(db).await?;
            }
            None => {
                let value = attribute_value::ActiveModel {
                    listing_id: Set(listing_id),
                    attribute_id: Set(*attribute_id),
                    kind: Set(typed.kind().to_string()),
                    value: Set(typed.to_stored()),
                    created_at: Set(now),
                    updated_at: Set(now),
                    ..Default::default()
                };
                attribute_value::Entity::insert(value).exec(db).await?;
            }
        }
        outcome.saved.push(*attribute_id);
    }

    for attribute_id in &plan.clears {
        if existing.contains_key(attribute_id) {
            attribute_value::Entity::delete_many()
                .filter(attribute_value::Column::ListingId.eq(listing_id))
                .filter(attribute_value::Column::AttributeId.eq(*attribute_id))
                .exec(db)
                .await?;
        }
    }

    if !outcome.errors.is_empty() {
        tracing::debug!(
            listing_id,
            rejected = outcome.errors.len(),
            saved = outcome.saved.len(),
            "Attribute batch partially rejected"
        );
    }

    Ok(outcome)
}

/// Delete every value of a listing (cross-aggregate cascade helper)
///
/// Called from the listing deletion transaction; accepts any connection
/// so it can run inside it.
pub async fn delete_for_listing<C: ConnectionTrait>(
    conn: &C,
    listing_id: i64,
) -> anyhow::Result<u64> {
    let removed = attribute_value::Entity::delete_many()
        .filter(attribute_value::Column::ListingId.eq(listing_id))
        .exec(conn)
        .await?;

    Ok(removed.rows_affected)
}

/// Validated write plan for one batch
#[derive(Debug, Default, PartialEq)]
struct UpsertPlan {
    /// Fields that validated; written-or-replaced
    writes: Vec<(i64, TypedValue)>,
    /// Optional fields submitted empty; stored values are removed
    clears: Vec<i64>,
    /// Field name (or raw id for unknown attributes) -> reason
    errors: BTreeMap<String, String>,
}

/// Pure validation pass over a raw batch
fn plan_upsert(
    definitions: &HashMap<i64, attribute_definition::Model>,
    raw: &BTreeMap<i64, Value>,
) -> UpsertPlan {
    let mut plan = UpsertPlan::default();

    for (attribute_id, raw_value) in raw {
        let Some(definition) = definitions.get(attribute_id) else {
            plan.errors
                .insert(attribute_id.to_string(), "unknown attribute".to_string());
            continue;
        };

        match validate::validate(definition, raw_value) {
            Ok(Some(typed)) => plan.writes.push((*attribute_id, typed)),
            Ok(None) => plan.clears.push(*attribute_id),
            Err(err) => {
                plan.errors.insert(definition.name.clone(), err.to_string());
            }
        }
    }

    plan
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn def(id: i64, name: &str, value_type: &str, required: bool) -> attribute_definition::Model {
        attribute_definition::Model {
            id,
            category_id: 1,
            name: name.to_string(),
            value_type: value_type.to_string(),
            options: None,
            required,
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

    fn defs(models: Vec<attribute_definition::Model>) -> HashMap<i64, attribute_definition::Model> {
        models.into_iter().map(|d| (d.id, d)).collect()
    }

    #[test]
    fn test_plan_real_estate_scenario() {
        // "Real Estate" carries Surface (number, required) and Furnished (boolean)
        let definitions = defs(vec![
            def(10, "Surface", "number", true),
            def(11, "Furnished", "boolean", false),
        ]);
        let raw = BTreeMap::from([(10, json!("85")), (11, json!("true"))]);

        let plan = plan_upsert(&definitions, &raw);
        assert_eq!(
            plan.writes,
            vec![
                (10, TypedValue::Number(85.0)),
                (11, TypedValue::Flag(true)),
            ]
        );
        assert!(plan.clears.is_empty());
        assert!(plan.errors.is_empty());
    }

    #[test]
    fn test_plan_invalid_number_is_skipped_not_fatal() {
        let definitions = defs(vec![
            def(10, "Surface", "number", true),
            def(11, "Furnished", "boolean", false),
        ]);
        let raw = BTreeMap::from([(10, json!("abc")), (11, json!(false))]);

        let plan = plan_upsert(&definitions, &raw);
        // The bad field is reported; the sibling still goes through
        assert_eq!(plan.writes, vec![(11, TypedValue::Flag(false))]);
        assert_eq!(plan.errors.get("Surface").unwrap(), "not a number");
    }

    #[test]
    fn test_plan_only_invalid_field_writes_nothing() {
        let definitions = defs(vec![def(10, "Surface", "number", true)]);
        let raw = BTreeMap::from([(10, json!("abc"))]);

        let plan = plan_upsert(&definitions, &raw);
        assert!(plan.writes.is_empty());
        assert_eq!(plan.errors.len(), 1);
        assert_eq!(plan.errors.get("Surface").unwrap(), "not a number");
    }

    #[test]
    fn test_plan_unknown_attribute_reported_by_id() {
        let definitions = defs(vec![]);
        let raw = BTreeMap::from([(99, json!("x"))]);

        let plan = plan_upsert(&definitions, &raw);
        assert_eq!(plan.errors.get("99").unwrap(), "unknown attribute");
    }

    #[test]
    fn test_plan_empty_optional_clears() {
        let definitions = defs(vec![def(11, "Furnished", "boolean", false)]);
        let raw = BTreeMap::from([(11, json!(""))]);

        let plan = plan_upsert(&definitions, &raw);
        assert!(plan.writes.is_empty());
        assert_eq!(plan.clears, vec![11]);
        assert!(plan.errors.is_empty());
    }

    #[test]
    fn test_plan_empty_required_is_reported() {
        let definitions = defs(vec![def(10, "Surface", "number", true)]);
        let raw = BTreeMap::from([(10, json!(null))]);

        let plan = plan_upsert(&definitions, &raw);
        assert!(plan.writes.is_empty());
        assert_eq!(plan.errors.get("Surface").unwrap(), "value is required");
    }
}
