//! Wishlist service layer

use chrono::Local;
use sea_orm::*;

use brocante_common::error::BrocanteError;
use brocante_persistence::entity::{listing, wishlist_item};

/// Add a listing to a user's wishlist; re-adding is a no-op
pub async fn add(db: &DatabaseConnection, user_id: i64, listing_id: i64) -> anyhow::Result<bool> {
    if listing::Entity::find_by_id(listing_id).one(db).await?.is_none() {
        return Err(BrocanteError::ListingNotExist(listing_id).into());
    }

    let existing = wishlist_item::Entity::find()
        .filter(wishlist_item::Column::UserId.eq(user_id))
        .filter(wishlist_item::Column::ListingId.eq(listing_id))
        .one(db)
        .await?;

    if existing.is_some() {
        return Ok(false);
    }

    let entity = wishlist_item::ActiveModel {
        user_id: Set(user_id),
        listing_id: Set(listing_id),
        created_at: Set(Local::now().naive_local()),
        ..Default::default()
    };

    wishlist_item::Entity::insert(entity).exec(db).await?;

    Ok(true)
}

/// Remove a listing from a user's wishlist
pub async fn remove(
    db: &DatabaseConnection,
    user_id: i64,
    listing_id: i64,
) -> anyhow::Result<bool> {
    let removed = wishlist_item::Entity::delete_many()
        .filter(wishlist_item::Column::UserId.eq(user_id))
        .filter(wishlist_item::Column::ListingId.eq(listing_id))
        .exec(db)
        .await?;

    Ok(removed.rows_affected > 0)
}

/// The user's saved listings, most recently saved first
pub async fn find_for_user(
    db: &DatabaseConnection,
    user_id: i64,
) -> anyhow::Result<Vec<listing::Model>> {
    let rows = wishlist_item::Entity::find()
        .filter(wishlist_item::Column::UserId.eq(user_id))
        .order_by_desc(wishlist_item::Column::CreatedAt)
        .find_also_related(listing::Entity)
        .all(db)
        .await?;

    Ok(rows.into_iter().filter_map(|(_, listing)| listing).collect())
}
