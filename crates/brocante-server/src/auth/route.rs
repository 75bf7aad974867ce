//! Authentication endpoints

use actix_web::{HttpRequest, HttpResponse, Responder, post, web};
use serde::{Deserialize, Serialize};

use brocante_common::error::BrocanteError;

use crate::auth::model::USER_NOT_FOUND_MESSAGE;
use crate::auth::{token, user};
use crate::model::response::handle_service_error;
use crate::model::{AppState, Result};

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
struct LoginResult {
    access_token: String,
    token_ttl: i64,
    global_admin: bool,
    username: String,
}

#[derive(Debug, Deserialize)]
struct LoginData {
    username: String,
    password: String,
}

#[derive(Debug, Deserialize)]
struct RegisterData {
    username: String,
    password: String,
    email: Option<String>,
}

/// POST /auth/login
#[post("/login")]
async fn login(data: web::Data<AppState>, body: web::Json<LoginData>) -> impl Responder {
    if body.username.is_empty() || body.password.is_empty() {
        return HttpResponse::Forbidden().body(USER_NOT_FOUND_MESSAGE);
    }

    match user::login(data.db(), &body.username, &body.password).await {
        Ok(account) => {
            let role = user::role_of(&account);
            let ttl = data.configuration.token_expire_seconds();
            match token::encode_jwt_token(
                &account.username,
                account.id,
                role,
                &data.configuration.token_secret_key(),
                ttl,
            ) {
                Ok(access_token) => HttpResponse::Ok().json(LoginResult {
                    access_token,
                    token_ttl: ttl,
                    global_admin: role.is_admin(),
                    username: account.username,
                }),
                Err(err) => {
                    tracing::error!("Failed to encode token: {}", err);
                    HttpResponse::InternalServerError().body(err.to_string())
                }
            }
        }
        Err(err) => {
            // Do not leak whether the username or the password was wrong
            if err.downcast_ref::<BrocanteError>().is_some() {
                tracing::warn!(username = %body.username, "Login rejected");
                HttpResponse::Forbidden().body(USER_NOT_FOUND_MESSAGE)
            } else {
                tracing::error!("Login failed: {}", err);
                HttpResponse::InternalServerError().body(err.to_string())
            }
        }
    }
}

/// POST /auth/register
#[post("/register")]
async fn register(
    req: HttpRequest,
    data: web::Data<AppState>,
    body: web::Json<RegisterData>,
) -> impl Responder {
    match user::register(
        data.db(),
        body.username.trim(),
        &body.password,
        body.email.as_deref(),
    )
    .await
    {
        Ok(account) => Result::<String>::http_success(account.username),
        Err(err) => handle_service_error(err, req.path()),
    }
}

pub fn routes() -> actix_web::Scope {
    web::scope("/auth").service(login).service(register)
}
