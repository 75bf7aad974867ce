//! Listing endpoints: search and CRUD
//!
//! Search keeps the web client's historical French query parameters
//! (`categoria`, `ville`, `min_prix`, ...); per-attribute filters arrive
//! as `attr.<id>=<value>` pairs.

use std::collections::{BTreeMap, HashMap};

use actix_web::{HttpRequest, HttpResponse, Responder, delete, get, post, put, web};

use brocante_api::model::{
    ATTRIBUTE_FILTER_PREFIX, DEFAULT_PAGE_NO, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE,
};
use brocante_api::{Page, validation};
use brocante_catalog::model::ListingForm;
use brocante_catalog::service::listing;
use brocante_catalog::{ListingCard, SearchFilter};
use brocante_common::error::BrocanteError;
use brocante_common::{ActionTypes, CATEGORY_ID, CITY, CONDITION, FREE_TEXT, MAX_PRICE,
    MIN_PRICE, PAGE_NO, PAGE_SIZE, SORT, SUB_CATEGORY_ID};

use crate::model::response::handle_service_error;
use crate::model::{AppState, Result};
use crate::{Secured, secured};

/// Decode the flat query-string map into a search filter and pagination
fn parse_search_params(
    params: &HashMap<String, String>,
    include_inactive: bool,
) -> (SearchFilter, u64, u64) {
    let mut filter = SearchFilter {
        category_id: params.get(CATEGORY_ID).and_then(|v| v.parse().ok()),
        sub_category_id: params.get(SUB_CATEGORY_ID).and_then(|v| v.parse().ok()),
        city: params.get(CITY).cloned(),
        min_price: params.get(MIN_PRICE).and_then(|v| v.parse().ok()),
        max_price: params.get(MAX_PRICE).and_then(|v| v.parse().ok()),
        free_text: params.get(FREE_TEXT).cloned(),
        condition: params.get(CONDITION).cloned(),
        sort: params
            .get(SORT)
            .and_then(|v| v.parse().ok())
            .unwrap_or_default(),
        include_inactive,
        ..Default::default()
    };

    let mut attribute_filters = BTreeMap::new();
    for (key, raw_value) in params {
        if let Some(id) = key.strip_prefix(ATTRIBUTE_FILTER_PREFIX)
            && let Ok(attribute_id) = id.parse::<i64>()
            && !raw_value.is_empty()
        {
            attribute_filters.insert(attribute_id, raw_value.clone());
        }
    }
    filter.attribute_filters = attribute_filters;

    let page_no = params
        .get(PAGE_NO)
        .and_then(|v| v.parse().ok())
        .filter(|n| *n >= 1)
        .unwrap_or(DEFAULT_PAGE_NO);
    let page_size = params
        .get(PAGE_SIZE)
        .and_then(|v| v.parse().ok())
        .filter(|n| *n >= 1)
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .min(MAX_PAGE_SIZE);

    (filter, page_no, page_size)
}

/// GET /listings
#[get("")]
async fn search(
    req: HttpRequest,
    data: web::Data<AppState>,
    params: web::Query<HashMap<String, String>>,
) -> impl Responder {
    // "Show inactive" is an admin-only override; for everyone else the
    // flag silently stays off
    let include_inactive = params.get("inactifs").is_some_and(|v| v == "true")
        && Secured::builder(&req, &data, "listings")
            .admin_only()
            .build()
            .check()
            .is_ok();

    let (filter, page_no, page_size) = parse_search_params(&params, include_inactive);

    match listing::search_page(data.db(), &filter, page_no, page_size).await {
        Ok(page) => Result::<Page<ListingCard>>::http_success(page),
        Err(err) => handle_service_error(err, req.path()),
    }
}

/// GET /listings/{id}
#[get("/{id}")]
async fn get_listing(
    req: HttpRequest,
    data: web::Data<AppState>,
    path: web::Path<i64>,
) -> impl Responder {
    match listing::get_by_id(data.db(), path.into_inner(), true).await {
        Ok(model) => Result::http_success(model),
        Err(err) => handle_service_error(err, req.path()),
    }
}

/// POST /listings
#[post("")]
async fn create_listing(
    req: HttpRequest,
    data: web::Data<AppState>,
    body: web::Json<ListingForm>,
) -> impl Responder {
    let context = secured!(
        Secured::builder(&req, &data, "listings")
            .action(ActionTypes::Write)
            .build()
    );

    if let Err(err) = check_form(&body) {
        return handle_service_error(err.into(), req.path());
    }

    match listing::create(data.db(), context.user_id, &body).await {
        Ok(model) => Result::http_success(model),
        Err(err) => handle_service_error(err, req.path()),
    }
}

/// PUT /listings/{id}
#[put("/{id}")]
async fn update_listing(
    req: HttpRequest,
    data: web::Data<AppState>,
    path: web::Path<i64>,
    body: web::Json<ListingForm>,
) -> impl Responder {
    let context = secured!(
        Secured::builder(&req, &data, "listings")
            .action(ActionTypes::Write)
            .build()
    );

    if let Err(err) = check_form(&body) {
        return handle_service_error(err.into(), req.path());
    }

    match listing::update(
        data.db(),
        path.into_inner(),
        context.user_id,
        context.is_admin(),
        &body,
    )
    .await
    {
        Ok(model) => Result::http_success(model),
        Err(err) => handle_service_error(err, req.path()),
    }
}

/// PUT /listings/{id}/deactivate (pause without deleting)
#[put("/{id}/deactivate")]
async fn deactivate_listing(
    req: HttpRequest,
    data: web::Data<AppState>,
    path: web::Path<i64>,
) -> impl Responder {
    let context = secured!(
        Secured::builder(&req, &data, "listings")
            .action(ActionTypes::Write)
            .build()
    );

    let id = path.into_inner();
    let model = match listing::get_by_id(data.db(), id, false).await {
        Ok(model) => model,
        Err(err) => return handle_service_error(err, req.path()),
    };
    if model.user_id != context.user_id && !context.is_admin() {
        return handle_service_error(
            BrocanteError::AuthError("not the listing owner".to_string()).into(),
            req.path(),
        );
    }

    match listing::deactivate(data.db(), id).await {
        Ok(done) => Result::<bool>::http_success(done),
        Err(err) => handle_service_error(err, req.path()),
    }
}

/// DELETE /listings/{id} (cascades to attribute values and wishlists)
#[delete("/{id}")]
async fn delete_listing(
    req: HttpRequest,
    data: web::Data<AppState>,
    path: web::Path<i64>,
) -> impl Responder {
    let context = secured!(
        Secured::builder(&req, &data, "listings")
            .action(ActionTypes::Write)
            .build()
    );

    match listing::delete(
        data.db(),
        path.into_inner(),
        context.user_id,
        context.is_admin(),
    )
    .await
    {
        Ok(removed) => Result::<bool>::http_success(removed),
        Err(err) => handle_service_error(err, req.path()),
    }
}

fn check_form(form: &ListingForm) -> std::result::Result<(), BrocanteError> {
    validation::validate_title(&form.title)
        .map_err(|e| BrocanteError::IllegalArgument(e.code.to_string()))?;
    validation::validate_price(form.price)
        .map_err(|e| BrocanteError::IllegalArgument(e.code.to_string()))?;
    validation::validate_city(&form.city)
        .map_err(|e| BrocanteError::IllegalArgument(e.code.to_string()))?;
    Ok(())
}

pub fn routes() -> actix_web::Scope {
    web::scope("/listings")
        .service(search)
        .service(create_listing)
        .service(deactivate_listing)
        .service(get_listing)
        .service(update_listing)
        .service(delete_listing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use brocante_api::SortOrder;

    #[test]
    fn test_parse_search_params() {
        let params = HashMap::from([
            ("categoria".to_string(), "3".to_string()),
            ("ville".to_string(), "Lyon".to_string()),
            ("min_prix".to_string(), "100".to_string()),
            ("max_prix".to_string(), "500".to_string()),
            ("recherche".to_string(), "vélo".to_string()),
            ("tri".to_string(), "price-asc".to_string()),
            ("attr.10".to_string(), "85".to_string()),
            ("attr.11".to_string(), "true".to_string()),
            ("attr.bogus".to_string(), "x".to_string()),
            ("page".to_string(), "2".to_string()),
            ("taille".to_string(), "50".to_string()),
        ]);

        let (filter, page_no, page_size) = parse_search_params(&params, false);
        assert_eq!(filter.category_id, Some(3));
        assert_eq!(filter.city.as_deref(), Some("Lyon"));
        assert_eq!(filter.min_price, Some(100.0));
        assert_eq!(filter.max_price, Some(500.0));
        assert_eq!(filter.free_text.as_deref(), Some("vélo"));
        assert_eq!(filter.sort, SortOrder::PriceAsc);
        assert_eq!(filter.attribute_filters.len(), 2);
        assert_eq!(filter.attribute_filters.get(&10).unwrap(), "85");
        assert_eq!(page_no, 2);
        assert_eq!(page_size, 50);
    }

    #[test]
    fn test_parse_search_params_defaults() {
        let (filter, page_no, page_size) = parse_search_params(&HashMap::new(), false);
        assert_eq!(filter.category_id, None);
        assert_eq!(filter.sort, SortOrder::Recent);
        assert!(!filter.include_inactive);
        assert_eq!(page_no, 1);
        assert_eq!(page_size, 20);
    }

    #[test]
    fn test_parse_search_params_caps_page_size() {
        let params = HashMap::from([("taille".to_string(), "5000".to_string())]);
        let (_, _, page_size) = parse_search_params(&params, false);
        assert_eq!(page_size, MAX_PAGE_SIZE);
    }

    #[test]
    fn test_check_form() {
        let form = ListingForm {
            category_id: 1,
            title: "Vélo de course".to_string(),
            price: 250.0,
            city: "Lyon".to_string(),
            ..Default::default()
        };
        assert!(check_form(&form).is_ok());

        let mut bad = form.clone();
        bad.price = -5.0;
        assert!(check_form(&bad).is_err());

        let mut bad = form;
        bad.title = "  ".to_string();
        assert!(check_form(&bad).is_err());
    }
}
