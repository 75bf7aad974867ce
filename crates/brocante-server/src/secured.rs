//! Handler-level permission guard
//!
//! Handlers declare the resource they touch, the action, and whether the
//! admin role is required; the `secured!` macro resolves the request's
//! [`AuthContext`] or short-circuits with a 403.

use actix_web::{HttpMessage, HttpRequest, web};

use brocante_common::{ActionTypes, Role};

use crate::auth::model::AuthContext;
use crate::model::{AppState, ErrorResult};

pub struct Secured<'a> {
    pub req: &'a HttpRequest,
    pub data: &'a web::Data<AppState>,
    pub resource: &'a str,
    pub action: ActionTypes,
    pub admin_only: bool,
}

impl<'a> Secured<'a> {
    pub fn builder(
        req: &'a HttpRequest,
        data: &'a web::Data<AppState>,
        resource: &'a str,
    ) -> SecuredBuilder<'a> {
        SecuredBuilder::new(req, data, resource)
    }

    /// Resolve the request's auth context, or the 403 to return
    pub fn check(&self) -> Result<AuthContext, actix_web::HttpResponse> {
        if !self.data.configuration.auth_enabled() {
            // Auth disabled: every caller acts as an administrator
            return Ok(AuthContext {
                role: Some(Role::Admin),
                ..Default::default()
            });
        }

        let context = self
            .req
            .extensions()
            .get::<AuthContext>()
            .cloned()
            .unwrap_or_default();

        if !context.token_provided {
            return Err(self.deny(&context, "authorization required"));
        }

        if let Some(jwt_error) = &context.jwt_error {
            return Err(self.deny(&context, &format!("invalid token: {}", jwt_error)));
        }

        if !context.is_authenticated() {
            return Err(self.deny(&context, "authorization required"));
        }

        if self.admin_only && !context.is_admin() {
            return Err(self.deny(&context, "insufficient permission"));
        }

        Ok(context)
    }

    fn deny(&self, context: &AuthContext, reason: &str) -> actix_web::HttpResponse {
        tracing::warn!(
            resource = self.resource,
            action = %self.action,
            username = %context.username,
            "Access denied: {}",
            reason
        );
        ErrorResult::http_response_forbidden(
            brocante_common::error::ACCESS_DENIED.code,
            reason,
            self.req.path(),
        )
    }
}

pub struct SecuredBuilder<'a> {
    req: &'a HttpRequest,
    data: &'a web::Data<AppState>,
    resource: &'a str,
    action: ActionTypes,
    admin_only: bool,
}

impl<'a> SecuredBuilder<'a> {
    pub fn new(
        req: &'a HttpRequest,
        data: &'a web::Data<AppState>,
        resource: &'a str,
    ) -> Self {
        Self {
            req,
            data,
            resource,
            action: ActionTypes::Read,
            admin_only: false,
        }
    }

    pub fn action(mut self, action: ActionTypes) -> Self {
        self.action = action;
        self
    }

    pub fn admin_only(mut self) -> Self {
        self.admin_only = true;
        self
    }

    pub fn build(self) -> Secured<'a> {
        Secured {
            req: self.req,
            data: self.data,
            resource: self.resource,
            action: self.action,
            admin_only: self.admin_only,
        }
    }
}

/// Resolve the auth context or return the denial response from the handler
#[macro_export]
macro_rules! secured {
    ($secured:expr) => {
        match $secured.check() {
            Ok(context) => context,
            Err(response) => return response,
        }
    };
}
