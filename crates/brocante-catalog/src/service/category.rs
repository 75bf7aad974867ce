//! Category service layer
//!
//! This module provides database operations for category and sub-category
//! management. Writes are admin-only (enforced at the HTTP layer).

use std::collections::HashMap;

use chrono::Local;
use sea_orm::*;

use brocante_common::error::BrocanteError;
use brocante_persistence::entity::{
    attribute_definition, attribute_value, category, listing, sub_category,
};

use crate::model::{CategoryView, SubCategoryView};

/// Find all categories with their sub-categories
pub async fn find_all(db: &DatabaseConnection) -> Vec<CategoryView> {
    // Execute both queries concurrently to reduce latency
    let (category_result, sub_category_result) = tokio::join!(
        category::Entity::find()
            .order_by_asc(category::Column::Name)
            .all(db),
        sub_category::Entity::find()
            .order_by_asc(sub_category::Column::Name)
            .all(db)
    );

    let categories = match category_result {
        Ok(models) => models,
        Err(e) => {
            tracing::error!("Failed to fetch categories: {}", e);
            return vec![];
        }
    };

    let mut grouped: HashMap<i64, Vec<SubCategoryView>> = HashMap::new();
    match sub_category_result {
        Ok(models) => {
            for model in models {
                grouped
                    .entry(model.category_id)
                    .or_default()
                    .push(SubCategoryView::from(model));
            }
        }
        Err(e) => {
            tracing::error!("Failed to fetch sub-categories: {}", e);
        }
    }

    categories
        .into_iter()
        .map(|model| {
            let mut view = CategoryView::from(model);
            if let Some(subs) = grouped.remove(&view.id) {
                view.sub_categories = subs;
            }
            view
        })
        .collect()
}

/// Get one category by id, with sub-categories
pub async fn get_by_id(db: &DatabaseConnection, id: i64) -> anyhow::Result<CategoryView> {
    let Some(model) = category::Entity::find_by_id(id).one(db).await? else {
        return Err(BrocanteError::CategoryNotExist(id).into());
    };

    let subs = sub_category::Entity::find()
        .filter(sub_category::Column::CategoryId.eq(id))
        .order_by_asc(sub_category::Column::Name)
        .all(db)
        .await?;

    let mut view = CategoryView::from(model);
    view.sub_categories = subs.into_iter().map(SubCategoryView::from).collect();

    Ok(view)
}

/// Create a new category
pub async fn create(
    db: &DatabaseConnection,
    name: &str,
    icon: Option<&str>,
) -> anyhow::Result<category::Model> {
    let name = name.trim();
    if !brocante_common::is_valid_name(name) {
        return Err(BrocanteError::IllegalArgument(format!(
            "category name '{}' contains illegal char",
            name
        ))
        .into());
    }

    let duplicate = category::Entity::find()
        .filter(category::Column::Name.eq(name))
        .one(db)
        .await?;
    if duplicate.is_some() {
        return Err(BrocanteError::CategoryAlreadyExist(name.to_string()).into());
    }

    let entity = category::ActiveModel {
        name: Set(name.to_string()),
        icon: Set(icon.map(str::to_string)),
        created_at: Set(Local::now().naive_local()),
        ..Default::default()
    };

    let model = category::Entity::insert(entity).exec_with_returning(db).await?;

    Ok(model)
}

/// Update an existing category
pub async fn update(
    db: &DatabaseConnection,
    id: i64,
    name: &str,
    icon: Option<&str>,
) -> anyhow::Result<bool> {
    let name = name.trim();
    if !brocante_common::is_valid_name(name) {
        return Err(BrocanteError::IllegalArgument(format!(
            "category name '{}' contains illegal char",
            name
        ))
        .into());
    }

    if let Some(entity) = category::Entity::find_by_id(id).one(db).await? {
        let mut model: category::ActiveModel = entity.into();
        model.name = Set(name.to_string());
        model.icon = Set(icon.map(str::to_string));
        if model.is_changed() {
            model.update(db).await?;
        }
        return Ok(true);
    }

    Ok(false)
}

/// Delete a category, its sub-categories, and its attribute definitions
///
/// Refused while listings still reference the category; the cascade only
/// covers schema-side rows (definitions and their values).
pub async fn delete(db: &DatabaseConnection, id: i64) -> anyhow::Result<bool> {
    let in_use = listing::Entity::find()
        .filter(listing::Column::CategoryId.eq(id))
        .count(db)
        .await?;
    if in_use > 0 {
        return Err(BrocanteError::IllegalArgument(format!(
            "category '{}' still has {} listings",
            id, in_use
        ))
        .into());
    }

    let definition_ids: Vec<i64> = attribute_definition::Entity::find()
        .select_only()
        .column(attribute_definition::Column::Id)
        .filter(attribute_definition::Column::CategoryId.eq(id))
        .into_tuple::<i64>()
        .all(db)
        .await?;

    let tx = db.begin().await?;

    if !definition_ids.is_empty() {
        attribute_value::Entity::delete_many()
            .filter(attribute_value::Column::AttributeId.is_in(definition_ids.clone()))
            .exec(&tx)
            .await?;
        attribute_definition::Entity::delete_many()
            .filter(attribute_definition::Column::Id.is_in(definition_ids))
            .exec(&tx)
            .await?;
    }

    sub_category::Entity::delete_many()
        .filter(sub_category::Column::CategoryId.eq(id))
        .exec(&tx)
        .await?;

    let removed = category::Entity::delete_by_id(id).exec(&tx).await?;

    tx.commit().await?;

    Ok(removed.rows_affected > 0)
}

/// Create a sub-category under a category
pub async fn create_sub_category(
    db: &DatabaseConnection,
    category_id: i64,
    name: &str,
) -> anyhow::Result<sub_category::Model> {
    let name = name.trim();
    if !brocante_common::is_valid_name(name) {
        return Err(BrocanteError::IllegalArgument(format!(
            "sub-category name '{}' contains illegal char",
            name
        ))
        .into());
    }

    if category::Entity::find_by_id(category_id).one(db).await?.is_none() {
        return Err(BrocanteError::CategoryNotExist(category_id).into());
    }

    let duplicate = sub_category::Entity::find()
        .filter(sub_category::Column::CategoryId.eq(category_id))
        .filter(sub_category::Column::Name.eq(name))
        .one(db)
        .await?;
    if duplicate.is_some() {
        return Err(BrocanteError::CategoryAlreadyExist(name.to_string()).into());
    }

    let entity = sub_category::ActiveModel {
        category_id: Set(category_id),
        name: Set(name.to_string()),
        created_at: Set(Local::now().naive_local()),
        ..Default::default()
    };

    let model = sub_category::Entity::insert(entity)
        .exec_with_returning(db)
        .await?;

    Ok(model)
}

/// Delete a sub-category; listings referencing it fall back to the parent
/// category only
pub async fn delete_sub_category(db: &DatabaseConnection, id: i64) -> anyhow::Result<bool> {
    let tx = db.begin().await?;

    listing::Entity::update_many()
        .col_expr(
            listing::Column::SubCategoryId,
            sea_orm::sea_query::Expr::value(Option::<i64>::None),
        )
        .filter(listing::Column::SubCategoryId.eq(id))
        .exec(&tx)
        .await?;

    let removed = sub_category::Entity::delete_by_id(id).exec(&tx).await?;

    tx.commit().await?;

    Ok(removed.rows_affected > 0)
}
