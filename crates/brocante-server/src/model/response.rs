//! HTTP response types for the Brocante server
//!
//! This module provides the common response envelope and the mapping from
//! service-layer errors to HTTP responses.

use actix_web::{HttpResponse, HttpResponseBuilder, http::StatusCode};
use serde::{Deserialize, Serialize};

use brocante_common::error::{self, BrocanteError};

/// Generic result wrapper for API responses
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Result<T> {
    pub code: i32,
    pub message: String,
    pub data: T,
}

impl<T: Serialize> Result<T> {
    pub fn new(code: i32, message: String, data: T) -> Self {
        Result::<T> {
            code,
            message,
            data,
        }
    }

    pub fn success(data: T) -> Result<T> {
        Result::<T> {
            code: 0,
            message: "success".to_string(),
            data,
        }
    }

    pub fn http_success(data: T) -> HttpResponse {
        HttpResponse::Ok().json(Result::success(data))
    }

    pub fn http_response(status: u16, code: i32, message: String, data: T) -> HttpResponse {
        HttpResponseBuilder::new(StatusCode::from_u16(status).unwrap_or_default())
            .json(Result::new(code, message, data))
    }
}

/// Error result for auth failures
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ErrorResult {
    pub timestamp: String,
    pub status: i32,
    pub error: String,
    pub message: String,
    pub path: String,
}

impl ErrorResult {
    pub fn forbidden(message: &str, path: &str) -> Self {
        ErrorResult {
            timestamp: chrono::Utc::now().to_rfc3339(),
            status: StatusCode::FORBIDDEN.as_u16() as i32,
            error: StatusCode::FORBIDDEN
                .canonical_reason()
                .unwrap_or_default()
                .to_string(),
            message: message.to_string(),
            path: path.to_string(),
        }
    }

    pub fn http_response_forbidden(code: i32, message: &str, path: &str) -> HttpResponse {
        HttpResponse::Forbidden().json(ErrorResult::forbidden(
            format!("Code: {}, Message: {}", code, message).as_str(),
            path,
        ))
    }
}

/// Map a service-layer error onto the HTTP surface
///
/// Domain errors are downcast and translated field-by-field; anything else
/// is a logged 500.
pub fn handle_service_error(err: anyhow::Error, path: &str) -> HttpResponse {
    let Some(domain) = err.downcast_ref::<BrocanteError>() else {
        tracing::error!(path, "Unhandled service error: {}", err);
        return Result::<String>::http_response(
            StatusCode::INTERNAL_SERVER_ERROR.as_u16(),
            error::SERVER_ERROR.code,
            error::SERVER_ERROR.message.to_string(),
            err.to_string(),
        );
    };

    let (status, code) = match domain {
        BrocanteError::CategoryNotExist(_) | BrocanteError::SubCategoryNotExist(_) => {
            (StatusCode::NOT_FOUND, error::CATEGORY_NOT_EXIST)
        }
        BrocanteError::ListingNotExist(_) => (StatusCode::NOT_FOUND, error::LISTING_NOT_EXIST),
        BrocanteError::AttributeNotExist(_) => {
            (StatusCode::NOT_FOUND, error::ATTRIBUTE_NOT_EXIST)
        }
        BrocanteError::SellerRequestNotExist(_) => {
            (StatusCode::NOT_FOUND, error::SELLER_REQUEST_NOT_EXIST)
        }
        BrocanteError::UserNotExist(_) => (StatusCode::NOT_FOUND, error::USER_NOT_EXIST),
        BrocanteError::CategoryAlreadyExist(_) => {
            (StatusCode::CONFLICT, error::CATEGORY_ALREADY_EXIST)
        }
        BrocanteError::DuplicateAttribute { .. } => {
            (StatusCode::CONFLICT, error::ATTRIBUTE_ALREADY_EXIST)
        }
        BrocanteError::UserAlreadyExist(_) => (StatusCode::CONFLICT, error::USER_ALREADY_EXIST),
        BrocanteError::SellerRequestPending(_) => {
            (StatusCode::CONFLICT, error::SELLER_REQUEST_ALREADY_PENDING)
        }
        BrocanteError::InvalidDefinition(_) => (
            StatusCode::BAD_REQUEST,
            error::ATTRIBUTE_DEFINITION_INVALID,
        ),
        BrocanteError::IllegalArgument(_) => {
            (StatusCode::BAD_REQUEST, error::PARAMETER_VALIDATE_ERROR)
        }
        BrocanteError::BadCredentials | BrocanteError::AuthError(_) => {
            (StatusCode::FORBIDDEN, error::ACCESS_DENIED)
        }
        BrocanteError::DatabaseError(_) => {
            (StatusCode::INTERNAL_SERVER_ERROR, error::DATA_ACCESS_ERROR)
        }
        BrocanteError::ConfigError(_) | BrocanteError::InternalError(_) => {
            (StatusCode::INTERNAL_SERVER_ERROR, error::SERVER_ERROR)
        }
    };

    if status.is_server_error() {
        tracing::error!(path, "Service error: {}", domain);
    }

    Result::<String>::http_response(
        status.as_u16(),
        code.code,
        code.message.to_string(),
        domain.to_string(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_envelope() {
        let result = Result::success(42);
        assert_eq!(result.code, 0);
        assert_eq!(result.message, "success");
        assert_eq!(result.data, 42);
    }

    #[test]
    fn test_handle_service_error_maps_domain_errors() {
        let resp = handle_service_error(BrocanteError::ListingNotExist(7).into(), "/api/listings");
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let resp = handle_service_error(
            BrocanteError::DuplicateAttribute {
                category_id: 1,
                name: "Surface".to_string(),
            }
            .into(),
            "/api/attributes/admin",
        );
        assert_eq!(resp.status(), StatusCode::CONFLICT);

        let resp = handle_service_error(anyhow::anyhow!("boom"), "/api/listings");
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
