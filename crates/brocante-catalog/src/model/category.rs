//! Category data models

use serde::{Deserialize, Serialize};

use brocante_persistence::entity::{category, sub_category};

/// Category with its sub-categories, as exposed to clients
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryView {
    pub id: i64,
    pub name: String,
    pub icon: Option<String>,
    pub sub_categories: Vec<SubCategoryView>,
}

impl From<category::Model> for CategoryView {
    fn from(value: category::Model) -> Self {
        Self {
            id: value.id,
            name: value.name,
            icon: value.icon,
            sub_categories: vec![],
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubCategoryView {
    pub id: i64,
    pub category_id: i64,
    pub name: String,
}

impl From<sub_category::Model> for SubCategoryView {
    fn from(value: sub_category::Model) -> Self {
        Self {
            id: value.id,
            category_id: value.category_id,
            name: value.name,
        }
    }
}
