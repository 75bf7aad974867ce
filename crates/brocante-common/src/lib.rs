//! Brocante Common - Shared types and utilities
//!
//! This crate provides the foundational types used across all Brocante
//! components:
//! - Error types and error codes
//! - User roles and permission action types
//! - Utility functions

pub mod error;
pub mod utils;

// Re-exports for convenience
pub use error::{BrocanteError, ErrorCode};
pub use utils::is_valid_name;

/// Query parameter names shared between the HTTP layer and clients
pub const CATEGORY_ID: &str = "categoria";
pub const SUB_CATEGORY_ID: &str = "sous_categorie";
pub const CITY: &str = "ville";
pub const MIN_PRICE: &str = "min_prix";
pub const MAX_PRICE: &str = "max_prix";
pub const FREE_TEXT: &str = "recherche";
pub const CONDITION: &str = "etat";
pub const SORT: &str = "tri";
pub const PAGE_NO: &str = "page";
pub const PAGE_SIZE: &str = "taille";

/// Action types for permission control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActionTypes {
    #[default]
    Read,
    Write,
}

impl ActionTypes {
    pub fn as_str(self) -> &'static str {
        match self {
            ActionTypes::Read => "r",
            ActionTypes::Write => "w",
        }
    }
}

impl std::fmt::Display for ActionTypes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ActionTypes {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "r" => Ok(ActionTypes::Read),
            "w" => Ok(ActionTypes::Write),
            _ => Err(format!("Invalid action: {}", s)),
        }
    }
}

/// Account roles, stored on the user row and carried in JWT claims
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Seller,
    #[default]
    User,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Seller => "seller",
            Role::User => "user",
        }
    }

    pub fn is_admin(self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "seller" => Ok(Role::Seller),
            "user" => Ok(Role::User),
            _ => Err(format!("Invalid role: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_types() {
        assert_eq!(ActionTypes::default(), ActionTypes::Read);
        assert_eq!(ActionTypes::Read.as_str(), "r");
        assert_eq!(ActionTypes::Write.as_str(), "w");
        assert_eq!("w".parse::<ActionTypes>().unwrap(), ActionTypes::Write);
    }

    #[test]
    fn test_role_round_trip() {
        assert_eq!(Role::default(), Role::User);
        assert_eq!(Role::Admin.as_str(), "admin");
        assert_eq!("seller".parse::<Role>().unwrap(), Role::Seller);
        assert!("superuser".parse::<Role>().is_err());
        assert!(Role::Admin.is_admin());
        assert!(!Role::Seller.is_admin());
    }
}
