//! HTTP server setup module.

use std::sync::Arc;

use actix_web::{App, HttpServer, dev::Server, middleware::Logger, web};

use crate::{
    api, auth, middleware::auth::Authentication, model::AppState,
    startup::shutdown::SHUTDOWN_GRACE_SECONDS,
};

/// Creates and binds the API HTTP server.
///
/// All routes are mounted under the configured context path; the
/// authentication middleware resolves a per-request [`AuthContext`] which
/// handlers consume through the `secured!` macro.
///
/// [`AuthContext`]: crate::auth::model::AuthContext
pub fn api_server(
    app_state: Arc<AppState>,
    context_path: String,
    address: String,
    port: u16,
) -> Result<Server, std::io::Error> {
    Ok(HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(Authentication)
            .app_data(web::Data::from(app_state.clone()))
            .service(
                web::scope(&context_path)
                    .service(auth::route::routes())
                    .service(api::attribute::routes())
                    .service(api::category::routes())
                    .service(api::listing::routes())
                    .service(api::wishlist::routes())
                    .service(api::seller::routes()),
            )
    })
    .bind((address, port))?
    // Signals are handled in main, which also drains the connection pool
    .disable_signals()
    .shutdown_timeout(SHUTDOWN_GRACE_SECONDS)
    .run())
}
