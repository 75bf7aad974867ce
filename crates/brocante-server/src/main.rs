//! Main entry point for the Brocante server.
//!
//! This file sets up configuration, logging, the database connection, and
//! the HTTP server with graceful shutdown.

use std::sync::Arc;

use brocante_migration::MigratorTrait;
use brocante_server::{
    model::{AppState, Configuration},
    startup,
};
use tracing::{error, info};

#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize configuration and logging
    let configuration = Configuration::new();

    let logging_config = configuration.logging_config();
    let _logging_guard = startup::init_logging(&logging_config)?;

    let server_address = configuration.server_address();
    let server_port = configuration.server_port();
    let context_path = configuration.server_context_path();

    // Connect to the database and apply pending migrations
    let database_connection = configuration.database_connection().await?;
    brocante_migration::Migrator::up(&database_connection, None).await?;
    info!("Database connected, schema is up to date");

    let app_state = Arc::new(AppState {
        configuration,
        database_connection: database_connection.clone(),
    });

    info!("Starting Brocante server on {}:{}", server_address, server_port);
    let server = startup::api_server(app_state, context_path, server_address, server_port)?;
    let server_handle = server.handle();
    let mut server_task = actix_web::rt::spawn(server);

    tokio::select! {
        result = &mut server_task => {
            if let Err(e) = result? {
                error!("Server error: {}", e);
            }
        }
        _ = startup::shutdown_requested() => {
            // The spawned server keeps running while drain stops its workers
            startup::drain(server_handle, database_connection).await;
            let _ = server_task.await;
        }
    }

    info!("Brocante server shutdown complete");
    Ok(())
}
