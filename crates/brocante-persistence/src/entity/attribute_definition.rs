//! `SeaORM` Entity for attribute_definition table
//!
//! One row per admin-configured custom field, scoped to a category.
//! `(category_id, name)` is unique (enforced by the schema migration).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "attribute_definition")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub category_id: i64,
    pub name: String,
    /// Discriminator: string | number | boolean | select | date
    pub value_type: String,
    /// JSON-encoded ordered list of option labels, select only
    #[sea_orm(column_type = "Text", nullable)]
    pub options: Option<String>,
    pub required: bool,
    pub sort_order: i32,
    pub placeholder: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub is_active: bool,
    /// Granularity for date attributes: date | datetime | month | year
    pub date_format: Option<String>,
    pub min_date: Option<Date>,
    pub max_date: Option<Date>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::CategoryId",
        to = "super::category::Column::Id"
    )]
    Category,
    #[sea_orm(has_many = "super::attribute_value::Entity")]
    AttributeValue,
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl Related<super::attribute_value::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AttributeValue.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
