// Request authentication for the marketplace API: resolves the caller's
// JWT into an AuthContext (user id, role) that the secured! guard consumes

use actix_service::forward_ready;
use actix_utils::future::{Ready, ok};
use actix_web::{
    Error, HttpMessage,
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http::Method,
    web::Data,
};

use futures::future::LocalBoxFuture;

use crate::{
    auth::{
        model::{ACCESS_TOKEN_HEADER, AUTHORIZATION_HEADER, AuthContext, BEARER_PREFIX},
        token,
    },
    model::AppState,
};

pub struct Authentication;

impl<S, B> Transform<S, ServiceRequest> for Authentication
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthenticationMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(AuthenticationMiddleware { service })
    }
}

pub struct AuthenticationMiddleware<S> {
    service: S,
}

/// Locate the caller's token. Sources in precedence order: the web client
/// sends an `accessToken` header, API callers use `Authorization: Bearer`,
/// and image/download links fall back to an `accessToken` query parameter.
/// A blank source falls through to the next one.
fn extract_token(req: &ServiceRequest) -> Option<String> {
    let header = |name: &str| {
        req.headers()
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
    };

    let direct = header(ACCESS_TOKEN_HEADER);
    let bearer = header(AUTHORIZATION_HEADER)
        .and_then(|value| value.strip_prefix(BEARER_PREFIX))
        .map(str::trim);
    let query = req.uri().query().and_then(|raw| {
        raw.split('&')
            .filter_map(|pair| pair.split_once('='))
            .find_map(|(key, value)| (key == ACCESS_TOKEN_HEADER).then_some(value))
    });

    let usable = |token: &&str| !token.is_empty();
    direct
        .filter(usable)
        .or(bearer.filter(usable))
        .or(query.filter(usable))
        .map(str::to_string)
}

impl<S, B> Service<ServiceRequest> for AuthenticationMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        if Method::OPTIONS != *req.method() {
            let mut auth_context = AuthContext::default();

            if let Some(raw_token) = extract_token(&req) {
                auth_context.token_provided = true;

                if let Some(app_state) = req.app_data::<Data<AppState>>() {
                    let secret_key = app_state.configuration.token_secret_key();
                    let decode_result = token::decode_jwt_token_cached(&raw_token, &secret_key);

                    match decode_result {
                        Ok(token_data) => {
                            auth_context.username = token_data.claims.sub;
                            auth_context.user_id = token_data.claims.uid;
                            auth_context.role = Some(token_data.claims.role);
                        }
                        Err(err) => {
                            auth_context.jwt_error = Some(err.to_string());
                        }
                    }
                } else {
                    tracing::error!("AppState not found in request app_data");
                }
            }

            // Inserted even for anonymous callers; handlers distinguish
            // no-token from bad-token through the context fields
            req.extensions_mut().insert(auth_context);
        }

        let res = self.service.call(req);

        Box::pin(async move { res.await.map(ServiceResponse::map_into_left_body) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_access_token_header_outranks_other_sources() {
        let req = TestRequest::default()
            .insert_header((ACCESS_TOKEN_HEADER, "header-token"))
            .insert_header((AUTHORIZATION_HEADER, "Bearer bearer-token"))
            .uri("/api/listings?accessToken=query-token")
            .to_srv_request();
        assert_eq!(extract_token(&req).as_deref(), Some("header-token"));
    }

    #[test]
    fn test_bearer_token_is_trimmed() {
        let req = TestRequest::default()
            .insert_header((AUTHORIZATION_HEADER, "Bearer   spaced-token  "))
            .to_srv_request();
        assert_eq!(extract_token(&req).as_deref(), Some("spaced-token"));
    }

    #[test]
    fn test_query_parameter_fallback() {
        let req = TestRequest::default()
            .uri("/api/listings?page=2&accessToken=query-token")
            .to_srv_request();
        assert_eq!(extract_token(&req).as_deref(), Some("query-token"));
    }

    #[test]
    fn test_blank_sources_fall_through() {
        let req = TestRequest::default()
            .insert_header((ACCESS_TOKEN_HEADER, "  "))
            .uri("/api/listings?accessToken=query-token")
            .to_srv_request();
        assert_eq!(extract_token(&req).as_deref(), Some("query-token"));

        let req = TestRequest::default().to_srv_request();
        assert_eq!(extract_token(&req), None);
    }
}
