//! Listing data models

use std::collections::BTreeMap;

use sea_orm::FromQueryResult;
use serde::{Deserialize, Serialize};

use brocante_api::SortOrder;

/// Optional, independently composable search filters
///
/// Absent filters impose no constraint; present ones are AND-conjoined.
#[derive(Clone, Debug, Default)]
pub struct SearchFilter {
    pub category_id: Option<i64>,
    pub sub_category_id: Option<i64>,
    pub city: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub free_text: Option<String>,
    pub condition: Option<String>,
    /// attribute id -> expected canonical value, AND-combined
    pub attribute_filters: BTreeMap<i64, String>,
    pub sort: SortOrder,
    /// Admin override to include deactivated listings
    pub include_inactive: bool,
}

/// Search result row: a listing joined with category/sub-category/seller
/// metadata
#[derive(Clone, Debug, FromQueryResult, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingCard {
    pub id: i64,
    pub reference: String,
    pub title: String,
    pub price: f64,
    pub city: String,
    pub brand: Option<String>,
    pub condition: Option<String>,
    pub views: i64,
    pub is_active: bool,
    pub category_id: i64,
    pub category_name: Option<String>,
    pub sub_category_id: Option<i64>,
    pub sub_category_name: Option<String>,
    pub seller_name: Option<String>,
    pub published_at: chrono::NaiveDateTime,
}

/// Payload for creating or updating a listing
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ListingForm {
    pub category_id: i64,
    pub sub_category_id: Option<i64>,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub city: String,
    pub brand: Option<String>,
    pub condition: Option<String>,
}
