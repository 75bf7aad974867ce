//! Seller-request workflow
//!
//! Users apply to become sellers; an administrator approves or rejects.
//! Approval promotes the account role.

use chrono::Local;
use sea_orm::*;

use brocante_common::Role;
use brocante_common::error::BrocanteError;
use brocante_persistence::entity::{seller_request, user};

use crate::model::{SELLER_REQUEST_APPROVED, SELLER_REQUEST_PENDING, SELLER_REQUEST_REJECTED};

/// Submit a seller request; one pending request per user
pub async fn submit(
    db: &DatabaseConnection,
    user_id: i64,
    username: &str,
    shop_name: &str,
    message: Option<&str>,
) -> anyhow::Result<seller_request::Model> {
    let pending = seller_request::Entity::find()
        .filter(seller_request::Column::UserId.eq(user_id))
        .filter(seller_request::Column::Status.eq(SELLER_REQUEST_PENDING))
        .one(db)
        .await?;

    if pending.is_some() {
        return Err(BrocanteError::SellerRequestPending(username.to_string()).into());
    }

    let entity = seller_request::ActiveModel {
        user_id: Set(user_id),
        shop_name: Set(shop_name.trim().to_string()),
        message: Set(message.map(str::to_string)),
        status: Set(SELLER_REQUEST_PENDING.to_string()),
        created_at: Set(Local::now().naive_local()),
        decided_at: Set(None),
        ..Default::default()
    };

    let model = seller_request::Entity::insert(entity)
        .exec_with_returning(db)
        .await?;

    Ok(model)
}

/// Pending requests, oldest first (admin review queue)
pub async fn find_pending(
    db: &DatabaseConnection,
) -> anyhow::Result<Vec<seller_request::Model>> {
    let requests = seller_request::Entity::find()
        .filter(seller_request::Column::Status.eq(SELLER_REQUEST_PENDING))
        .order_by_asc(seller_request::Column::CreatedAt)
        .all(db)
        .await?;

    Ok(requests)
}

/// Approve or reject a pending request
///
/// Approval promotes the requesting user to the seller role in the same
/// transaction as the status flip.
pub async fn decide(
    db: &DatabaseConnection,
    id: i64,
    approve: bool,
) -> anyhow::Result<seller_request::Model> {
    let Some(entity) = seller_request::Entity::find_by_id(id).one(db).await? else {
        return Err(BrocanteError::SellerRequestNotExist(id).into());
    };

    if entity.status != SELLER_REQUEST_PENDING {
        return Err(BrocanteError::IllegalArgument(format!(
            "seller request '{}' already decided",
            id
        ))
        .into());
    }

    let tx = db.begin().await?;

    let user_id = entity.user_id;
    let mut request: seller_request::ActiveModel = entity.into();
    request.status = Set(if approve {
        SELLER_REQUEST_APPROVED.to_string()
    } else {
        SELLER_REQUEST_REJECTED.to_string()
    });
    request.decided_at = Set(Some(Local::now().naive_local()));
    let model = request.update(&tx).await?;

    if approve {
        user::Entity::update_many()
            .col_expr(
                user::Column::Role,
                sea_orm::sea_query::Expr::value(Role::Seller.as_str()),
            )
            .filter(user::Column::Id.eq(user_id))
            .exec(&tx)
            .await?;
    }

    tx.commit().await?;

    tracing::info!(request_id = id, approve, "Seller request decided");

    Ok(model)
}
