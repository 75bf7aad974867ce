//! Seller-request workflow endpoints

use actix_web::{HttpRequest, Responder, get, post, put, web};
use serde::Deserialize;

use brocante_catalog::service::seller_request;
use brocante_common::ActionTypes;
use brocante_persistence::entity::seller_request as seller_request_entity;

use crate::model::response::handle_service_error;
use crate::model::{AppState, Result};
use crate::{Secured, secured};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SellerRequestForm {
    shop_name: String,
    message: Option<String>,
}

/// POST /seller-requests
#[post("")]
async fn submit(
    req: HttpRequest,
    data: web::Data<AppState>,
    body: web::Json<SellerRequestForm>,
) -> impl Responder {
    let context = secured!(
        Secured::builder(&req, &data, "seller-requests")
            .action(ActionTypes::Write)
            .build()
    );

    match seller_request::submit(
        data.db(),
        context.user_id,
        &context.username,
        &body.shop_name,
        body.message.as_deref(),
    )
    .await
    {
        Ok(model) => Result::http_success(model),
        Err(err) => handle_service_error(err, req.path()),
    }
}

/// GET /seller-requests/pending (admin review queue)
#[get("/pending")]
async fn pending(req: HttpRequest, data: web::Data<AppState>) -> impl Responder {
    secured!(
        Secured::builder(&req, &data, "seller-requests")
            .admin_only()
            .build()
    );

    match seller_request::find_pending(data.db()).await {
        Ok(requests) => {
            Result::<Vec<seller_request_entity::Model>>::http_success(requests)
        }
        Err(err) => handle_service_error(err, req.path()),
    }
}

/// PUT /seller-requests/{id}/approve
#[put("/{id}/approve")]
async fn approve(
    req: HttpRequest,
    data: web::Data<AppState>,
    path: web::Path<i64>,
) -> impl Responder {
    secured!(
        Secured::builder(&req, &data, "seller-requests")
            .action(ActionTypes::Write)
            .admin_only()
            .build()
    );

    match seller_request::decide(data.db(), path.into_inner(), true).await {
        Ok(model) => Result::http_success(model),
        Err(err) => handle_service_error(err, req.path()),
    }
}

/// PUT /seller-requests/{id}/reject
#[put("/{id}/reject")]
async fn reject(
    req: HttpRequest,
    data: web::Data<AppState>,
    path: web::Path<i64>,
) -> impl Responder {
    secured!(
        Secured::builder(&req, &data, "seller-requests")
            .action(ActionTypes::Write)
            .admin_only()
            .build()
    );

    match seller_request::decide(data.db(), path.into_inner(), false).await {
        Ok(model) => Result::http_success(model),
        Err(err) => handle_service_error(err, req.path()),
    }
}

pub fn routes() -> actix_web::Scope {
    web::scope("/seller-requests")
        .service(submit)
        .service(pending)
        .service(approve)
        .service(reject)
}
