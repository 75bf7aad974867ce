//! Attribute definition store
//!
//! Admin-only CRUD for per-category attribute definitions. Deleting a
//! definition cascades to every value referencing it, inside one
//! transaction.

use chrono::Local;
use sea_orm::*;

use brocante_common::error::BrocanteError;
use brocante_persistence::entity::{attribute_definition, attribute_value};

use crate::model::definition::encode_options;
use crate::model::{DefinitionSpec, ValueType};

/// Find the active definitions of a category, in display order
pub async fn find_by_category(
    db: &DatabaseConnection,
    category_id: i64,
) -> anyhow::Result<Vec<attribute_definition::Model>> {
    let definitions = attribute_definition::Entity::find()
        .filter(attribute_definition::Column::CategoryId.eq(category_id))
        .filter(attribute_definition::Column::IsActive.eq(true))
        .order_by_asc(attribute_definition::Column::SortOrder)
        .order_by_asc(attribute_definition::Column::Name)
        .all(db)
        .await?;

    Ok(definitions)
}

/// Find every definition of a category, inactive included (admin view)
pub async fn find_all_by_category(
    db: &DatabaseConnection,
    category_id: i64,
) -> anyhow::Result<Vec<attribute_definition::Model>> {
    let definitions = attribute_definition::Entity::find()
        .filter(attribute_definition::Column::CategoryId.eq(category_id))
        .order_by_asc(attribute_definition::Column::SortOrder)
        .order_by_asc(attribute_definition::Column::Name)
        .all(db)
        .await?;

    Ok(definitions)
}

/// Get a single definition by id
pub async fn get_by_id(
    db: &DatabaseConnection,
    id: i64,
) -> anyhow::Result<attribute_definition::Model> {
    attribute_definition::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| BrocanteError::AttributeNotExist(id).into())
}

/// Create a new definition
pub async fn create(
    db: &DatabaseConnection,
    spec: &DefinitionSpec,
) -> anyhow::Result<attribute_definition::Model> {
    check_spec(spec)?;

    let duplicate = attribute_definition::Entity::find()
        .filter(attribute_definition::Column::CategoryId.eq(spec.category_id))
        .filter(attribute_definition::Column::Name.eq(spec.name.trim()))
        .one(db)
        .await?;

    if duplicate.is_some() {
        return Err(BrocanteError::DuplicateAttribute {
            category_id: spec.category_id,
            name: spec.name.trim().to_string(),
        }
        .into());
    }

    let now = Local::now().naive_local();
    let entity = attribute_definition::ActiveModel {
        category_id: Set(spec.category_id),
        name: Set(spec.name.trim().to_string()),
        value_type: Set(spec.value_type.clone()),
        options: Set(encode_options(&spec.options)),
        required: Set(spec.required),
        sort_order: Set(spec.sort_order),
        placeholder: Set(spec.placeholder.clone()),
        description: Set(spec.description.clone()),
        is_active: Set(spec.is_active.unwrap_or(true)),
        date_format: Set(spec.date_format.clone()),
        min_date: Set(spec.min_date),
        max_date: Set(spec.max_date),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let model = attribute_definition::Entity::insert(entity)
        .exec_with_returning(db)
        .await?;

    Ok(model)
}

/// Update an existing definition
pub async fn update(
    db: &DatabaseConnection,
    id: i64,
    spec: &DefinitionSpec,
) -> anyhow::Result<attribute_definition::Model> {
    check_spec(spec)?;

    let Some(entity) = attribute_definition::Entity::find_by_id(id).one(db).await? else {
        return Err(BrocanteError::AttributeNotExist(id).into());
    };

    let duplicate = attribute_definition::Entity::find()
        .filter(attribute_definition::Column::CategoryId.eq(spec.category_id))
        .filter(attribute_definition::Column::Name.eq(spec.name.trim()))
        .filter(attribute_definition::Column::Id.ne(id))
        .one(db)
        .await?;

    if duplicate.is_some() {
        return Err(BrocanteError::DuplicateAttribute {
            category_id: spec.category_id,
            name: spec.name.trim().to_string(),
        }
        .into());
    }

    let mut definition: attribute_definition::ActiveModel = entity.into();
    definition.category_id = Set(spec.category_id);
    definition.name = Set(spec.name.trim().to_string());
    definition.value_type = Set(spec.value_type.clone());
    definition.options = Set(encode_options(&spec.options));
    definition.required = Set(spec.required);
    definition.sort_order = Set(spec.sort_order);
    definition.placeholder = Set(spec.placeholder.clone());
    definition.description = Set(spec.description.clone());
    if let Some(is_active) = spec.is_active {
        definition.is_active = Set(is_active);
    }
    definition.date_format = Set(spec.date_format.clone());
    definition.min_date = Set(spec.min_date);
    definition.max_date = Set(spec.max_date);
    definition.updated_at = Set(Local::now().naive_local());

    let model = definition.update(db).await?;

    Ok(model)
}

/// Delete a definition and cascade to its values
pub async fn delete(db: &DatabaseConnection, id: i64) -> anyhow::Result<bool> {
    let tx = db.begin().await?;

    let removed_values = attribute_value::Entity::delete_many()
        .filter(attribute_value::Column::AttributeId.eq(id))
        .exec(&tx)
        .await?;

    let removed = attribute_definition::Entity::delete_by_id(id)
        .exec(&tx)
        .await?;

    tx.commit().await?;

    if removed.rows_affected > 0 {
        tracing::info!(
            attribute_id = id,
            cascaded_values = removed_values.rows_affected,
            "Deleted attribute definition"
        );
    }

    Ok(removed.rows_affected > 0)
}

/// Reject malformed specs before touching the store
fn check_spec(spec: &DefinitionSpec) -> Result<(), BrocanteError> {
    if !brocante_common::is_valid_name(&spec.name) {
        return Err(BrocanteError::InvalidDefinition(format!(
            "name '{}' contains illegal char",
            spec.name
        )));
    }

    let value_type = spec
        .value_type
        .parse::<ValueType>()
        .map_err(|_| BrocanteError::InvalidDefinition(format!(
            "unknown value type '{}'",
            spec.value_type
        )))?;

    if value_type == ValueType::Select && spec.options.iter().all(|opt| opt.trim().is_empty()) {
        return Err(BrocanteError::InvalidDefinition(
            "select attribute needs at least one option".to_string(),
        ));
    }

    if let (Some(min), Some(max)) = (spec.min_date, spec.max_date)
        && min > max
    {
        return Err(BrocanteError::InvalidDefinition(
            "minDate is after maxDate".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(value_type: &str) -> DefinitionSpec {
        DefinitionSpec {
            category_id: 1,
            name: "Surface".to_string(),
            value_type: value_type.to_string(),
            options: vec![],
            ..Default::default()
        }
    }

    #[test]
    fn test_check_spec_rejects_unknown_type() {
        assert!(check_spec(&spec("number")).is_ok());
        assert!(check_spec(&spec("mixed")).is_err());
    }

    #[test]
    fn test_check_spec_select_needs_options() {
        let mut s = spec("select");
        assert!(check_spec(&s).is_err());
        s.options = vec!["  ".to_string()];
        assert!(check_spec(&s).is_err());
        s.options = vec!["CDI".to_string()];
        assert!(check_spec(&s).is_ok());
    }

    #[test]
    fn test_check_spec_rejects_inverted_date_bounds() {
        let mut s = spec("date");
        s.min_date = chrono::NaiveDate::from_ymd_opt(2030, 1, 1);
        s.max_date = chrono::NaiveDate::from_ymd_opt(2020, 1, 1);
        assert!(check_spec(&s).is_err());
    }

    #[test]
    fn test_check_spec_rejects_bad_name() {
        let mut s = spec("string");
        s.name = "a<script>".to_string();
        assert!(check_spec(&s).is_err());
    }
}
