//! `SeaORM` Entity for listing table

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "listing")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Public reference shown in URLs and support requests
    #[sea_orm(unique)]
    pub reference: String,
    pub user_id: i64,
    pub category_id: i64,
    pub sub_category_id: Option<i64>,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub price: f64,
    pub city: String,
    pub brand: Option<String>,
    pub condition: Option<String>,
    pub views: i64,
    pub is_active: bool,
    pub published_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::CategoryId",
        to = "super::category::Column::Id"
    )]
    Category,
    #[sea_orm(
        belongs_to = "super::sub_category::Entity",
        from = "Column::SubCategoryId",
        to = "super::sub_category::Column::Id"
    )]
    SubCategory,
    #[sea_orm(has_many = "super::attribute_value::Entity")]
    AttributeValue,
    #[sea_orm(has_many = "super::wishlist_item::Entity")]
    WishlistItem,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl Related<super::sub_category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SubCategory.def()
    }
}

impl Related<super::attribute_value::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AttributeValue.def()
    }
}

impl Related<super::wishlist_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::WishlistItem.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
