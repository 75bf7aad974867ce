//! `SeaORM` Entity for user table

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub username: String,
    /// bcrypt hash, never the clear text
    #[serde(skip_serializing)]
    pub password: String,
    pub email: Option<String>,
    pub role: String,
    pub enabled: bool,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::listing::Entity")]
    Listing,
    #[sea_orm(has_many = "super::wishlist_item::Entity")]
    WishlistItem,
    #[sea_orm(has_many = "super::seller_request::Entity")]
    SellerRequest,
}

impl Related<super::listing::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Listing.def()
    }
}

impl Related<super::wishlist_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::WishlistItem.def()
    }
}

impl Related<super::seller_request::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SellerRequest.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
