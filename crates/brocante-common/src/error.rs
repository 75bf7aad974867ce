//! Error types and error codes for Brocante
//!
//! This module defines:
//! - `BrocanteError`: Application-specific error enum
//! - `ErrorCode`: Structured error codes for API responses

use serde::{Deserialize, Serialize};

/// Application-specific error types
#[derive(thiserror::Error, Debug)]
pub enum BrocanteError {
    #[error("caused: {0}")]
    IllegalArgument(String),

    #[error("user '{0}' not exist!")]
    UserNotExist(String),

    #[error("user '{0}' already exist")]
    UserAlreadyExist(String),

    #[error("bad credentials")]
    BadCredentials,

    #[error("category '{0}' not exist")]
    CategoryNotExist(i64),

    #[error("category '{0}' already exist")]
    CategoryAlreadyExist(String),

    #[error("sub-category '{0}' not exist")]
    SubCategoryNotExist(i64),

    #[error("listing '{0}' not exist")]
    ListingNotExist(i64),

    #[error("attribute '{0}' not exist")]
    AttributeNotExist(i64),

    #[error("attribute '{name}' already exist for category '{category_id}'")]
    DuplicateAttribute { category_id: i64, name: String },

    #[error("invalid attribute definition: {0}")]
    InvalidDefinition(String),

    #[error("seller request '{0}' not exist")]
    SellerRequestNotExist(i64),

    #[error("user '{0}' already has a pending seller request")]
    SellerRequestPending(String),

    #[error("database error: {0}")]
    DatabaseError(String),

    #[error("authentication error: {0}")]
    AuthError(String),

    #[error("configuration error: {0}")]
    ConfigError(String),

    #[error("internal error: {0}")]
    InternalError(String),
}

/// Error code structure for API responses
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ErrorCode<'a> {
    pub code: i32,
    pub message: &'a str,
}

// General success and error codes
pub const SUCCESS: ErrorCode<'static> = ErrorCode {
    code: 0,
    message: "success",
};

pub const PARAMETER_MISSING: ErrorCode<'static> = ErrorCode {
    code: 10000,
    message: "parameter missing",
};

pub const ACCESS_DENIED: ErrorCode<'static> = ErrorCode {
    code: 10001,
    message: "access denied",
};

pub const DATA_ACCESS_ERROR: ErrorCode<'static> = ErrorCode {
    code: 10002,
    message: "data access error",
};

pub const PARAMETER_VALIDATE_ERROR: ErrorCode<'static> = ErrorCode {
    code: 20002,
    message: "parameter validate error",
};

pub const RESOURCE_NOT_FOUND: ErrorCode<'static> = ErrorCode {
    code: 20004,
    message: "resource not found",
};

pub const RESOURCE_CONFLICT: ErrorCode<'static> = ErrorCode {
    code: 20005,
    message: "resource conflict",
};

// Category errors
pub const CATEGORY_NOT_EXIST: ErrorCode<'static> = ErrorCode {
    code: 22001,
    message: "category not exist",
};

pub const CATEGORY_ALREADY_EXIST: ErrorCode<'static> = ErrorCode {
    code: 22002,
    message: "category already exist",
};

// Listing errors
pub const LISTING_NOT_EXIST: ErrorCode<'static> = ErrorCode {
    code: 23001,
    message: "listing not exist",
};

pub const ILLEGAL_LISTING: ErrorCode<'static> = ErrorCode {
    code: 23002,
    message: "illegal listing",
};

// Attribute errors
pub const ATTRIBUTE_NOT_EXIST: ErrorCode<'static> = ErrorCode {
    code: 24001,
    message: "attribute not exist",
};

pub const ATTRIBUTE_ALREADY_EXIST: ErrorCode<'static> = ErrorCode {
    code: 24002,
    message: "attribute already exist",
};

pub const ATTRIBUTE_DEFINITION_INVALID: ErrorCode<'static> = ErrorCode {
    code: 24003,
    message: "attribute definition invalid",
};

pub const ATTRIBUTE_VALUE_INVALID: ErrorCode<'static> = ErrorCode {
    code: 24004,
    message: "attribute value invalid",
};

// Account / seller workflow errors
pub const USER_NOT_EXIST: ErrorCode<'static> = ErrorCode {
    code: 25001,
    message: "user not exist",
};

pub const USER_ALREADY_EXIST: ErrorCode<'static> = ErrorCode {
    code: 25002,
    message: "user already exist",
};

pub const SELLER_REQUEST_NOT_EXIST: ErrorCode<'static> = ErrorCode {
    code: 25003,
    message: "seller request not exist",
};

pub const SELLER_REQUEST_ALREADY_PENDING: ErrorCode<'static> = ErrorCode {
    code: 25004,
    message: "seller request already pending",
};

pub const SERVER_ERROR: ErrorCode<'static> = ErrorCode {
    code: 30000,
    message: "server error",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_brocante_error_display() {
        let err = BrocanteError::IllegalArgument("invalid param".to_string());
        assert_eq!(format!("{}", err), "caused: invalid param");

        let err = BrocanteError::UserNotExist("testuser".to_string());
        assert_eq!(format!("{}", err), "user 'testuser' not exist!");

        let err = BrocanteError::DuplicateAttribute {
            category_id: 3,
            name: "Surface".to_string(),
        };
        assert_eq!(
            format!("{}", err),
            "attribute 'Surface' already exist for category '3'"
        );
    }

    #[test]
    fn test_error_code_constants() {
        assert_eq!(SUCCESS.code, 0);
        assert_eq!(SUCCESS.message, "success");
        assert_eq!(PARAMETER_MISSING.code, 10000);
        assert_eq!(ATTRIBUTE_ALREADY_EXIST.code, 24002);
    }
}
