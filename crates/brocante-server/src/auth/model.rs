//! Authentication data models

use serde::{Deserialize, Serialize};

use brocante_common::Role;

pub const AUTHORIZATION_HEADER: &str = "Authorization";
pub const ACCESS_TOKEN_HEADER: &str = "accessToken";
pub const BEARER_PREFIX: &str = "Bearer ";
pub const USER_NOT_FOUND_MESSAGE: &str = "unknown user!";

/// JWT claims carried by every issued token
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct JwtPayload {
    /// Username
    pub sub: String,
    /// User id
    pub uid: i64,
    pub role: Role,
    pub exp: i64,
}

/// Per-request authentication context inserted by the middleware
#[derive(Clone, Debug, Default)]
pub struct AuthContext {
    pub token_provided: bool,
    pub user_id: i64,
    pub username: String,
    pub role: Option<Role>,
    pub jwt_error: Option<String>,
}

impl AuthContext {
    pub fn is_authenticated(&self) -> bool {
        self.role.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.role.is_some_and(Role::is_admin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_context_default_is_anonymous() {
        let ctx = AuthContext::default();
        assert!(!ctx.is_authenticated());
        assert!(!ctx.is_admin());
    }

    #[test]
    fn test_auth_context_admin() {
        let ctx = AuthContext {
            role: Some(Role::Admin),
            ..Default::default()
        };
        assert!(ctx.is_authenticated());
        assert!(ctx.is_admin());

        let ctx = AuthContext {
            role: Some(Role::Seller),
            ..Default::default()
        };
        assert!(ctx.is_authenticated());
        assert!(!ctx.is_admin());
    }
}
