//! Process shutdown
//!
//! The server owns its signal handling instead of leaving it to the HTTP
//! runtime: on Ctrl+C or SIGTERM the actix workers are stopped gracefully,
//! bounded by [`SHUTDOWN_GRACE_SECONDS`], and the connection pool is
//! closed afterwards so no in-flight query outlives the process.

use actix_web::dev::ServerHandle;
use sea_orm::DatabaseConnection;
use tracing::{info, warn};

/// Grace period, in seconds, for in-flight requests once a stop is
/// requested. Applied through the server's shutdown timeout.
pub const SHUTDOWN_GRACE_SECONDS: u64 = 30;

/// Resolve once the process is asked to stop (Ctrl+C, or SIGTERM on unix)
pub async fn shutdown_requested() {
    let interrupt = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = interrupt => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}

/// Stop the HTTP workers, then release the database pool
///
/// `stop(true)` lets workers finish what they carry, bounded by the
/// server's shutdown timeout. The pool is closed last so handlers never
/// see a dead connection. The caller must keep driving the server future
/// while this runs.
pub async fn drain(server: ServerHandle, db: DatabaseConnection) {
    server.stop(true).await;
    info!("HTTP workers stopped");

    match db.close().await {
        Ok(()) => info!("Connection pool closed"),
        Err(e) => warn!("Failed to close the connection pool: {}", e),
    }
}
