//! Listing service layer
//!
//! This module provides listing CRUD and the search query builder: a flat
//! set of optional parameters composed into a single SELECT with
//! deterministic precedence. Every filter is independent; absent filters
//! impose no constraint.

use chrono::Local;
use sea_orm::sea_query::{Asterisk, Expr, Func, Query};
use sea_orm::*;

use brocante_api::model::MIN_FREE_TEXT_LEN;
use brocante_api::{Page, SortOrder};
use brocante_common::error::BrocanteError;
use brocante_persistence::entity::{
    attribute_value, category, listing, sub_category, user, wishlist_item,
};

use crate::model::{ListingCard, ListingForm, SearchFilter};

/// Build the search SELECT with joined category/sub-category/seller names
pub fn build_search(filter: &SearchFilter) -> Select<listing::Entity> {
    let select = listing::Entity::find()
        .join(JoinType::LeftJoin, listing::Relation::Category.def())
        .join(JoinType::LeftJoin, listing::Relation::SubCategory.def())
        .join(JoinType::LeftJoin, listing::Relation::User.def())
        .column_as(category::Column::Name, "category_name")
        .column_as(sub_category::Column::Name, "sub_category_name")
        .column_as(user::Column::Username, "seller_name");

    apply_sort(apply_filters(select, filter), filter.sort)
}

/// Build the matching COUNT SELECT (no joins; filters touch only the
/// listing table and subqueries)
pub fn build_count(filter: &SearchFilter) -> Select<listing::Entity> {
    apply_filters(listing::Entity::find(), filter)
}

/// Search listings, flat result
pub async fn search(
    db: &DatabaseConnection,
    filter: &SearchFilter,
) -> anyhow::Result<Vec<ListingCard>> {
    let cards = build_search(filter)
        .into_model::<ListingCard>()
        .all(db)
        .await?;

    Ok(cards)
}

/// Search listings with pagination
pub async fn search_page(
    db: &DatabaseConnection,
    filter: &SearchFilter,
    page_no: u64,
    page_size: u64,
) -> anyhow::Result<Page<ListingCard>> {
    let offset = page_no.saturating_sub(1) * page_size;

    // Execute count and data queries in parallel
    let (count_result, data_result) = tokio::join!(
        build_count(filter)
            .select_only()
            .column_as(Expr::col(Asterisk).count(), "count")
            .into_tuple::<i64>()
            .one(db),
        build_search(filter)
            .offset(offset)
            .limit(page_size)
            .into_model::<ListingCard>()
            .all(db)
    );

    let total_count = count_result?.unwrap_or_default() as u64;

    if total_count > 0 {
        return Ok(Page::new(total_count, page_no, page_size, data_result?));
    }

    let _ = data_result;

    Ok(Page::default())
}

fn apply_filters(
    mut select: Select<listing::Entity>,
    filter: &SearchFilter,
) -> Select<listing::Entity> {
    if !filter.include_inactive {
        select = select.filter(listing::Column::IsActive.eq(true));
    }

    if let Some(category_id) = filter.category_id {
        select = select.filter(listing::Column::CategoryId.eq(category_id));
    }
    if let Some(sub_category_id) = filter.sub_category_id {
        select = select.filter(listing::Column::SubCategoryId.eq(sub_category_id));
    }
    if let Some(city) = filter.city.as_deref().map(str::trim).filter(|c| !c.is_empty()) {
        select = select.filter(
            Expr::expr(Func::lower(Expr::col((listing::Entity, listing::Column::City))))
                .like(format!("%{}%", city.to_lowercase())),
        );
    }
    if let Some(condition) = filter.condition.as_deref().filter(|c| !c.is_empty()) {
        select = select.filter(listing::Column::Condition.eq(condition));
    }

    // An inverted price range is an empty result, not an error
    if let (Some(min), Some(max)) = (filter.min_price, filter.max_price)
        && min > max
    {
        return select.filter(Expr::value(false));
    }
    if let Some(min) = filter.min_price {
        select = select.filter(listing::Column::Price.gte(min));
    }
    if let Some(max) = filter.max_price {
        select = select.filter(listing::Column::Price.lte(max));
    }

    // Queries below the autocomplete threshold are treated as "no filter"
    if let Some(text) = filter.free_text.as_deref().map(str::trim)
        && text.chars().count() >= MIN_FREE_TEXT_LEN
    {
        let pattern = format!("%{}%", text.to_lowercase());
        select = select.filter(
            Condition::any()
                .add(
                    Expr::expr(Func::lower(Expr::col((
                        listing::Entity,
                        listing::Column::Title,
                    ))))
                    .like(pattern.as_str()),
                )
                .add(
                    Expr::expr(Func::lower(Expr::col((
                        listing::Entity,
                        listing::Column::Description,
                    ))))
                    .like(pattern.as_str()),
                ),
        );
    }

    // A listing matches only if every requested attribute has an equal
    // stored value
    for (attribute_id, expected) in &filter.attribute_filters {
        let sub_query = Query::select()
            .column(attribute_value::Column::ListingId)
            .from(attribute_value::Entity)
            .and_where(Expr::col(attribute_value::Column::AttributeId).eq(*attribute_id))
            .and_where(Expr::col(attribute_value::Column::Value).eq(normalize_expected(expected)))
            .to_owned();
        select = select.filter(listing::Column::Id.in_subquery(sub_query));
    }

    select
}

fn apply_sort(select: Select<listing::Entity>, sort: SortOrder) -> Select<listing::Entity> {
    match sort {
        SortOrder::Recent => select.order_by_desc(listing::Column::PublishedAt),
        SortOrder::Oldest => select.order_by_asc(listing::Column::PublishedAt),
        SortOrder::PriceAsc => select.order_by_asc(listing::Column::Price),
        SortOrder::PriceDesc => select.order_by_desc(listing::Column::Price),
        SortOrder::Popularity => select.order_by_desc(listing::Column::Views),
    }
}

/// Expected values are compared against the canonical encoding; boolean
/// literals are normalized to lowercase
fn normalize_expected(expected: &str) -> String {
    let trimmed = expected.trim();
    if trimmed.eq_ignore_ascii_case("true") || trimmed.eq_ignore_ascii_case("false") {
        trimmed.to_lowercase()
    } else {
        trimmed.to_string()
    }
}

/// Get one listing, optionally counting the view
pub async fn get_by_id(
    db: &DatabaseConnection,
    id: i64,
    bump_views: bool,
) -> anyhow::Result<listing::Model> {
    let Some(model) = listing::Entity::find_by_id(id).one(db).await? else {
        return Err(BrocanteError::ListingNotExist(id).into());
    };

    if bump_views {
        listing::Entity::update_many()
            .col_expr(
                listing::Column::Views,
                Expr::col(listing::Column::Views).add(1),
            )
            .filter(listing::Column::Id.eq(id))
            .exec(db)
            .await?;
    }

    Ok(model)
}

/// Create a new listing
pub async fn create(
    db: &DatabaseConnection,
    user_id: i64,
    form: &ListingForm,
) -> anyhow::Result<listing::Model> {
    let now = Local::now().naive_local();
    let entity = listing::ActiveModel {
        reference: Set(uuid::Uuid::new_v4().to_string()),
        user_id: Set(user_id),
        category_id: Set(form.category_id),
        sub_category_id: Set(form.sub_category_id),
        title: Set(form.title.trim().to_string()),
        description: Set(form.description.clone()),
        price: Set(form.price),
        city: Set(form.city.trim().to_string()),
        brand: Set(form.brand.clone()),
        condition: Set(form.condition.clone()),
        views: Set(0),
        is_active: Set(true),
        published_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };

    let model = listing::Entity::insert(entity).exec_with_returning(db).await?;

    Ok(model)
}

/// Update an existing listing; only the owner (or an admin caller) may edit
pub async fn update(
    db: &DatabaseConnection,
    id: i64,
    user_id: i64,
    is_admin: bool,
    form: &ListingForm,
) -> anyhow::Result<listing::Model> {
    let Some(entity) = listing::Entity::find_by_id(id).one(db).await? else {
        return Err(BrocanteError::ListingNotExist(id).into());
    };

    if entity.user_id != user_id && !is_admin {
        return Err(BrocanteError::AuthError("not the listing owner".to_string()).into());
    }

    let mut model: listing::ActiveModel = entity.into();
    model.category_id = Set(form.category_id);
    model.sub_category_id = Set(form.sub_category_id);
    model.title = Set(form.title.trim().to_string());
    model.description = Set(form.description.clone());
    model.price = Set(form.price);
    model.city = Set(form.city.trim().to_string());
    model.brand = Set(form.brand.clone());
    model.condition = Set(form.condition.clone());

    if model.is_changed() {
        model.updated_at = Set(Local::now().naive_local());
        let updated = model.update(db).await?;
        return Ok(updated);
    }

    Ok(model.try_into_model()?)
}

/// Deactivate a listing without removing it
pub async fn deactivate(db: &DatabaseConnection, id: i64) -> anyhow::Result<bool> {
    let res = listing::Entity::update_many()
        .col_expr(listing::Column::IsActive, Expr::value(false))
        .filter(listing::Column::Id.eq(id))
        .exec(db)
        .await?;

    Ok(res.rows_affected > 0)
}

/// Delete a listing and everything hanging off it
///
/// Attribute values and wishlist rows go in the same transaction; no
/// orphaned values are left behind.
pub async fn delete(
    db: &DatabaseConnection,
    id: i64,
    user_id: i64,
    is_admin: bool,
) -> anyhow::Result<bool> {
    let Some(entity) = listing::Entity::find_by_id(id).one(db).await? else {
        return Ok(false);
    };

    if entity.user_id != user_id && !is_admin {
        return Err(BrocanteError::AuthError("not the listing owner".to_string()).into());
    }

    let tx = db.begin().await?;

    let removed_values =
        brocante_attribute::service::value::delete_for_listing(&tx, id).await?;

    wishlist_item::Entity::delete_many()
        .filter(wishlist_item::Column::ListingId.eq(id))
        .exec(&tx)
        .await?;

    let removed = listing::Entity::delete_by_id(id).exec(&tx).await?;

    tx.commit().await?;

    tracing::info!(
        listing_id = id,
        cascaded_values = removed_values,
        "Deleted listing"
    );

    Ok(removed.rows_affected > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn sql(filter: &SearchFilter) -> String {
        build_search(filter).build(DbBackend::MySql).to_string()
    }

    #[test]
    fn test_no_filters_is_active_only_recent_first() {
        let query = sql(&SearchFilter::default());
        assert!(query.contains("`listing`.`is_active` = TRUE"));
        assert!(query.contains("ORDER BY `listing`.`published_at` DESC"));
        assert!(!query.contains("LIKE"));
        assert!(!query.contains("IN (SELECT"));
    }

    #[test]
    fn test_admin_override_drops_active_constraint() {
        let filter = SearchFilter {
            include_inactive: true,
            ..Default::default()
        };
        assert!(!sql(&filter).contains("`is_active` = TRUE"));
    }

    #[test]
    fn test_scalar_filters_compose() {
        let filter = SearchFilter {
            category_id: Some(3),
            sub_category_id: Some(7),
            city: Some("Lyon".to_string()),
            condition: Some("occasion".to_string()),
            min_price: Some(100.0),
            max_price: Some(500.0),
            ..Default::default()
        };
        let query = sql(&filter);
        assert!(query.contains("`listing`.`category_id` = 3"));
        assert!(query.contains("`listing`.`sub_category_id` = 7"));
        assert!(query.contains("LOWER(`listing`.`city`) LIKE '%lyon%'"));
        assert!(query.contains("`listing`.`condition` = 'occasion'"));
        assert!(query.contains("`listing`.`price` >= 100"));
        assert!(query.contains("`listing`.`price` <= 500"));
    }

    #[test]
    fn test_inverted_price_range_matches_nothing() {
        let filter = SearchFilter {
            min_price: Some(100.0),
            max_price: Some(50.0),
            ..Default::default()
        };
        let query = sql(&filter);
        assert!(query.contains("FALSE"));
        assert!(!query.contains("`price` >="));
    }

    #[test]
    fn test_free_text_searches_title_or_description() {
        let filter = SearchFilter {
            free_text: Some("vélo".to_string()),
            ..Default::default()
        };
        let query = sql(&filter);
        assert!(query.contains("LOWER(`listing`.`title`) LIKE '%vélo%'"));
        assert!(query.contains("OR"));
        assert!(query.contains("LOWER(`listing`.`description`) LIKE '%vélo%'"));
    }

    #[test]
    fn test_short_free_text_is_ignored() {
        let filter = SearchFilter {
            free_text: Some("v".to_string()),
            ..Default::default()
        };
        assert!(!sql(&filter).contains("LIKE"));

        let filter = SearchFilter {
            free_text: Some("  a  ".to_string()),
            ..Default::default()
        };
        assert!(!sql(&filter).contains("LIKE"));
    }

    #[test]
    fn test_attribute_filters_become_subqueries() {
        let filter = SearchFilter {
            attribute_filters: BTreeMap::from([
                (10, "85".to_string()),
                (11, "TRUE".to_string()),
            ]),
            ..Default::default()
        };
        let query = sql(&filter);
        assert!(query.contains(
            "`listing`.`id` IN (SELECT `listing_id` FROM `attribute_value` WHERE `attribute_id` = 10 AND `value` = '85')"
        ));
        // Boolean expectations are normalized to the canonical lowercase form
        assert!(query.contains("`attribute_id` = 11 AND `value` = 'true'"));
    }

    #[test]
    fn test_sort_orders() {
        let mut filter = SearchFilter {
            sort: SortOrder::Oldest,
            ..Default::default()
        };
        assert!(sql(&filter).contains("ORDER BY `listing`.`published_at` ASC"));

        filter.sort = SortOrder::PriceAsc;
        assert!(sql(&filter).contains("ORDER BY `listing`.`price` ASC"));

        filter.sort = SortOrder::PriceDesc;
        assert!(sql(&filter).contains("ORDER BY `listing`.`price` DESC"));

        filter.sort = SortOrder::Popularity;
        assert!(sql(&filter).contains("ORDER BY `listing`.`views` DESC"));
    }

    #[test]
    fn test_search_joins_metadata() {
        let query = sql(&SearchFilter::default());
        assert!(query.contains("LEFT JOIN `category`"));
        assert!(query.contains("LEFT JOIN `sub_category`"));
        assert!(query.contains("LEFT JOIN `user`"));
        assert!(query.contains("AS `category_name`"));
    }

    #[test]
    fn test_count_query_carries_same_filters_without_joins() {
        let filter = SearchFilter {
            category_id: Some(3),
            ..Default::default()
        };
        let query = build_count(&filter).build(DbBackend::MySql).to_string();
        assert!(query.contains("`listing`.`category_id` = 3"));
        assert!(!query.contains("LEFT JOIN"));
    }

    #[test]
    fn test_normalize_expected() {
        assert_eq!(normalize_expected(" True "), "true");
        assert_eq!(normalize_expected("FALSE"), "false");
        assert_eq!(normalize_expected("Option A"), "Option A");
    }
}
