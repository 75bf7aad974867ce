//! Attribute endpoints: per-category definitions, per-listing values, and
//! the admin management surface

use std::collections::BTreeMap;

use actix_web::{HttpRequest, HttpResponse, Responder, delete, get, post, put, web};
use serde::Deserialize;
use serde_json::Value;

use brocante_attribute::model::{DefinitionSpec, DefinitionView, StoredValueView, UpsertOutcome};
use brocante_attribute::service::{definition, value};
use brocante_common::ActionTypes;

use crate::model::response::handle_service_error;
use crate::model::{AppState, Result};
use crate::{Secured, secured};

#[derive(Debug, Deserialize)]
struct ValuesBody {
    #[serde(default)]
    attributes: BTreeMap<String, Value>,
}

/// GET /attributes/by-category/{categoryId}
#[get("/by-category/{category_id}")]
async fn by_category(data: web::Data<AppState>, path: web::Path<i64>) -> impl Responder {
    let category_id = path.into_inner();

    match definition::find_by_category(data.db(), category_id).await {
        Ok(definitions) => Result::<Vec<DefinitionView>>::http_success(
            definitions
                .into_iter()
                .map(DefinitionView::from)
                .collect::<Vec<_>>(),
        ),
        Err(err) => {
            tracing::error!(category_id, "Failed to list attributes: {}", err);
            HttpResponse::InternalServerError().body(err.to_string())
        }
    }
}

/// GET /attributes/values/{listingId}
#[get("/values/{listing_id}")]
async fn values_of_listing(data: web::Data<AppState>, path: web::Path<i64>) -> impl Responder {
    let listing_id = path.into_inner();

    match value::views_for_listing(data.db(), listing_id).await {
        Ok(views) => {
            let map: BTreeMap<i64, StoredValueView> = views
                .into_iter()
                .map(|view| (view.attribute_id, view))
                .collect();
            Result::<BTreeMap<i64, StoredValueView>>::http_success(map)
        }
        Err(err) => {
            tracing::error!(listing_id, "Failed to load attribute values: {}", err);
            HttpResponse::InternalServerError().body(err.to_string())
        }
    }
}

/// POST /attributes/values/{listingId}
///
/// Partial-success write: the response lists saved attribute ids and the
/// per-field reasons for everything that was skipped.
#[post("/values/{listing_id}")]
async fn submit_values(
    req: HttpRequest,
    data: web::Data<AppState>,
    path: web::Path<i64>,
    body: web::Json<ValuesBody>,
) -> impl Responder {
    let context = secured!(
        Secured::builder(&req, &data, "attributes/values")
            .action(ActionTypes::Write)
            .build()
    );

    let listing_id = path.into_inner();

    // Only the listing owner (or an admin) may attach values
    let listing = match brocante_catalog::service::listing::get_by_id(data.db(), listing_id, false)
        .await
    {
        Ok(model) => model,
        Err(err) => return handle_service_error(err, req.path()),
    };
    if listing.user_id != context.user_id && !context.is_admin() {
        return handle_service_error(
            brocante_common::error::BrocanteError::AuthError("not the listing owner".to_string())
                .into(),
            req.path(),
        );
    }

    // Submitted keys that are not attribute ids are reported, not dropped
    let mut raw: BTreeMap<i64, Value> = BTreeMap::new();
    let mut bad_keys: BTreeMap<String, String> = BTreeMap::new();
    for (key, raw_value) in &body.attributes {
        match key.parse::<i64>() {
            Ok(attribute_id) => {
                raw.insert(attribute_id, raw_value.clone());
            }
            Err(_) => {
                bad_keys.insert(key.clone(), "invalid attribute id".to_string());
            }
        }
    }

    match value::upsert_for_listing(data.db(), listing_id, &raw).await {
        Ok(mut outcome) => {
            outcome.errors.extend(bad_keys);
            Result::<UpsertOutcome>::http_success(outcome)
        }
        Err(err) => handle_service_error(err, req.path()),
    }
}

/// GET /attributes/admin/by-category/{categoryId} (inactive included)
#[get("/admin/by-category/{category_id}")]
async fn admin_by_category(
    req: HttpRequest,
    data: web::Data<AppState>,
    path: web::Path<i64>,
) -> impl Responder {
    secured!(
        Secured::builder(&req, &data, "attributes/admin")
            .action(ActionTypes::Read)
            .admin_only()
            .build()
    );

    match definition::find_all_by_category(data.db(), path.into_inner()).await {
        Ok(definitions) => Result::<Vec<DefinitionView>>::http_success(
            definitions
                .into_iter()
                .map(DefinitionView::from)
                .collect::<Vec<_>>(),
        ),
        Err(err) => handle_service_error(err, req.path()),
    }
}

/// POST /attributes/admin
#[post("/admin")]
async fn admin_create(
    req: HttpRequest,
    data: web::Data<AppState>,
    body: web::Json<DefinitionSpec>,
) -> impl Responder {
    secured!(
        Secured::builder(&req, &data, "attributes/admin")
            .action(ActionTypes::Write)
            .admin_only()
            .build()
    );

    match definition::create(data.db(), &body).await {
        Ok(model) => Result::<DefinitionView>::http_success(DefinitionView::from(model)),
        Err(err) => handle_service_error(err, req.path()),
    }
}

/// PUT /attributes/admin/{id}
#[put("/admin/{id}")]
async fn admin_update(
    req: HttpRequest,
    data: web::Data<AppState>,
    path: web::Path<i64>,
    body: web::Json<DefinitionSpec>,
) -> impl Responder {
    secured!(
        Secured::builder(&req, &data, "attributes/admin")
            .action(ActionTypes::Write)
            .admin_only()
            .build()
    );

    match definition::update(data.db(), path.into_inner(), &body).await {
        Ok(model) => Result::<DefinitionView>::http_success(DefinitionView::from(model)),
        Err(err) => handle_service_error(err, req.path()),
    }
}

/// DELETE /attributes/admin/{id} (cascades to stored values)
#[delete("/admin/{id}")]
async fn admin_delete(
    req: HttpRequest,
    data: web::Data<AppState>,
    path: web::Path<i64>,
) -> impl Responder {
    secured!(
        Secured::builder(&req, &data, "attributes/admin")
            .action(ActionTypes::Write)
            .admin_only()
            .build()
    );

    match definition::delete(data.db(), path.into_inner()).await {
        Ok(removed) => Result::<bool>::http_success(removed),
        Err(err) => handle_service_error(err, req.path()),
    }
}

pub fn routes() -> actix_web::Scope {
    web::scope("/attributes")
        .service(by_category)
        .service(values_of_listing)
        .service(submit_values)
        .service(admin_by_category)
        .service(admin_create)
        .service(admin_update)
        .service(admin_delete)
}
