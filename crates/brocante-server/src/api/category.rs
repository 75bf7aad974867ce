//! Category endpoints

use actix_web::{HttpRequest, Responder, delete, get, post, put, web};
use serde::Deserialize;

use brocante_catalog::model::CategoryView;
use brocante_catalog::service::category;
use brocante_common::ActionTypes;

use crate::model::response::handle_service_error;
use crate::model::{AppState, Result};
use crate::{Secured, secured};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CategoryForm {
    name: String,
    icon: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SubCategoryForm {
    name: String,
}

/// GET /categories
#[get("")]
async fn list_categories(data: web::Data<AppState>) -> impl Responder {
    let categories: Vec<CategoryView> = category::find_all(data.db()).await;

    Result::<Vec<CategoryView>>::http_success(categories)
}

/// GET /categories/{id}
#[get("/{id}")]
async fn get_category(
    req: HttpRequest,
    data: web::Data<AppState>,
    path: web::Path<i64>,
) -> impl Responder {
    match category::get_by_id(data.db(), path.into_inner()).await {
        Ok(view) => Result::<CategoryView>::http_success(view),
        Err(err) => handle_service_error(err, req.path()),
    }
}

/// POST /categories
#[post("")]
async fn create_category(
    req: HttpRequest,
    data: web::Data<AppState>,
    body: web::Json<CategoryForm>,
) -> impl Responder {
    secured!(
        Secured::builder(&req, &data, "categories")
            .action(ActionTypes::Write)
            .admin_only()
            .build()
    );

    match category::create(data.db(), &body.name, body.icon.as_deref()).await {
        Ok(model) => Result::http_success(model),
        Err(err) => handle_service_error(err, req.path()),
    }
}

/// PUT /categories/{id}
#[put("/{id}")]
async fn update_category(
    req: HttpRequest,
    data: web::Data<AppState>,
    path: web::Path<i64>,
    body: web::Json<CategoryForm>,
) -> impl Responder {
    secured!(
        Secured::builder(&req, &data, "categories")
            .action(ActionTypes::Write)
            .admin_only()
            .build()
    );

    match category::update(data.db(), path.into_inner(), &body.name, body.icon.as_deref()).await {
        Ok(updated) => Result::<bool>::http_success(updated),
        Err(err) => handle_service_error(err, req.path()),
    }
}

/// DELETE /categories/{id}
#[delete("/{id}")]
async fn delete_category(
    req: HttpRequest,
    data: web::Data<AppState>,
    path: web::Path<i64>,
) -> impl Responder {
    secured!(
        Secured::builder(&req, &data, "categories")
            .action(ActionTypes::Write)
            .admin_only()
            .build()
    );

    match category::delete(data.db(), path.into_inner()).await {
        Ok(removed) => Result::<bool>::http_success(removed),
        Err(err) => handle_service_error(err, req.path()),
    }
}

/// POST /categories/{id}/sub-categories
#[post("/{id}/sub-categories")]
async fn create_sub_category(
    req: HttpRequest,
    data: web::Data<AppState>,
    path: web::Path<i64>,
    body: web::Json<SubCategoryForm>,
) -> impl Responder {
    secured!(
        Secured::builder(&req, &data, "categories")
            .action(ActionTypes::Write)
            .admin_only()
            .build()
    );

    match category::create_sub_category(data.db(), path.into_inner(), &body.name).await {
        Ok(model) => Result::http_success(model),
        Err(err) => handle_service_error(err, req.path()),
    }
}

/// DELETE /categories/sub-categories/{id}
#[delete("/sub-categories/{id}")]
async fn delete_sub_category(
    req: HttpRequest,
    data: web::Data<AppState>,
    path: web::Path<i64>,
) -> impl Responder {
    secured!(
        Secured::builder(&req, &data, "categories")
            .action(ActionTypes::Write)
            .admin_only()
            .build()
    );

    match category::delete_sub_category(data.db(), path.into_inner()).await {
        Ok(removed) => Result::<bool>::http_success(removed),
        Err(err) => handle_service_error(err, req.path()),
    }
}

pub fn routes() -> actix_web::Scope {
    web::scope("/categories")
        .service(list_categories)
        .service(create_category)
        .service(delete_sub_category)
        .service(create_sub_category)
        .service(get_category)
        .service(update_category)
        .service(delete_category)
}
