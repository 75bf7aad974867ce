//! Shared application state

use sea_orm::DatabaseConnection;

use super::config::Configuration;

/// State shared by every handler
pub struct AppState {
    pub configuration: Configuration,
    pub database_connection: DatabaseConnection,
}

impl AppState {
    pub fn db(&self) -> &DatabaseConnection {
        &self.database_connection
    }
}
