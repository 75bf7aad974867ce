//! Wishlist endpoints (authenticated)

use actix_web::{HttpRequest, Responder, delete, get, post, web};

use brocante_catalog::service::wishlist;
use brocante_common::ActionTypes;
use brocante_persistence::entity::listing;

use crate::model::response::handle_service_error;
use crate::model::{AppState, Result};
use crate::{Secured, secured};

/// GET /wishlist
#[get("")]
async fn my_wishlist(req: HttpRequest, data: web::Data<AppState>) -> impl Responder {
    let context = secured!(Secured::builder(&req, &data, "wishlist").build());

    match wishlist::find_for_user(data.db(), context.user_id).await {
        Ok(listings) => Result::<Vec<listing::Model>>::http_success(listings),
        Err(err) => handle_service_error(err, req.path()),
    }
}

/// POST /wishlist/{listingId}
#[post("/{listing_id}")]
async fn add_to_wishlist(
    req: HttpRequest,
    data: web::Data<AppState>,
    path: web::Path<i64>,
) -> impl Responder {
    let context = secured!(
        Secured::builder(&req, &data, "wishlist")
            .action(ActionTypes::Write)
            .build()
    );

    match wishlist::add(data.db(), context.user_id, path.into_inner()).await {
        Ok(added) => Result::<bool>::http_success(added),
        Err(err) => handle_service_error(err, req.path()),
    }
}

/// DELETE /wishlist/{listingId}
#[delete("/{listing_id}")]
async fn remove_from_wishlist(
    req: HttpRequest,
    data: web::Data<AppState>,
    path: web::Path<i64>,
) -> impl Responder {
    let context = secured!(
        Secured::builder(&req, &data, "wishlist")
            .action(ActionTypes::Write)
            .build()
    );

    match wishlist::remove(data.db(), context.user_id, path.into_inner()).await {
        Ok(removed) => Result::<bool>::http_success(removed),
        Err(err) => handle_service_error(err, req.path()),
    }
}

pub fn routes() -> actix_web::Scope {
    web::scope("/wishlist")
        .service(my_wishlist)
        .service(add_to_wishlist)
        .service(remove_from_wishlist)
}
