//! Configuration management for the Brocante server
//!
//! This module handles loading and accessing application configuration:
//! `conf/application.yml`, `BROCANTE_*` environment overrides, and a few
//! command-line flags.

use std::time::Duration;

use clap::Parser;
use config::{Config, Environment};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

use brocante_common::error::BrocanteError;

use super::constants::{
    AUTH_ENABLED_PROPERTY, DB_LOG_PROPERTY, DB_MAX_CONNECTIONS_PROPERTY, DB_URL_PROPERTY,
    DEFAULT_CONTEXT_PATH, DEFAULT_DB_MAX_CONNECTIONS, DEFAULT_SERVER_ADDRESS, DEFAULT_SERVER_PORT,
    DEFAULT_TOKEN_EXPIRE_SECONDS, DEFAULT_TOKEN_SECRET_KEY, LOG_CONSOLE_PROPERTY,
    LOG_DIR_PROPERTY, LOG_FILE_PROPERTY, LOG_LEVEL_PROPERTY, SERVER_ADDRESS_PROPERTY,
    SERVER_CONTEXT_PATH_PROPERTY, SERVER_PORT_PROPERTY, TOKEN_EXPIRE_SECONDS_PROPERTY,
    TOKEN_SECRET_KEY_PROPERTY,
};
use crate::startup::logging::LoggingConfig;

/// Command line arguments for the server
#[derive(Debug, Parser)]
#[command()]
struct Cli {
    #[arg(short = 'p', long = "port")]
    port: Option<u16>,
    #[arg(long = "db-url", env = "DATABASE_URL")]
    database_url: Option<String>,
}

/// Application configuration loaded from config files and environment
#[derive(Clone, Debug, Default)]
pub struct Configuration {
    pub config: Config,
}

impl Configuration {
    pub fn new() -> Self {
        let args = Cli::parse();
        let mut config_builder = Config::builder()
            .add_source(
                Environment::with_prefix("brocante")
                    .separator(".")
                    .try_parsing(true),
            )
            .add_source(config::File::with_name("conf/application.yml").required(false));

        if let Some(v) = args.port {
            config_builder = config_builder
                .set_override(SERVER_PORT_PROPERTY, i64::from(v))
                .expect("Failed to set port override");
        }
        if let Some(v) = args.database_url {
            config_builder = config_builder
                .set_override(DB_URL_PROPERTY, v)
                .expect("Failed to set database URL override");
        }

        let app_config = config_builder
            .build()
            .expect("Failed to build configuration - check conf/application.yml");

        Configuration { config: app_config }
    }

    // ========================================================================
    // Server Configuration
    // ========================================================================

    pub fn server_address(&self) -> String {
        self.config
            .get_string(SERVER_ADDRESS_PROPERTY)
            .unwrap_or(DEFAULT_SERVER_ADDRESS.to_string())
    }

    pub fn server_port(&self) -> u16 {
        self.config
            .get_int(SERVER_PORT_PROPERTY)
            .unwrap_or(DEFAULT_SERVER_PORT.into()) as u16
    }

    pub fn server_context_path(&self) -> String {
        self.config
            .get_string(SERVER_CONTEXT_PATH_PROPERTY)
            .unwrap_or(DEFAULT_CONTEXT_PATH.to_string())
    }

    // ========================================================================
    // Database Configuration
    // ========================================================================

    pub fn database_url(&self) -> anyhow::Result<String> {
        self.config
            .get_string(DB_URL_PROPERTY)
            .map_err(|_| BrocanteError::ConfigError("db.url is not set".to_string()).into())
    }

    pub fn db_max_connections(&self) -> u32 {
        self.config
            .get_int(DB_MAX_CONNECTIONS_PROPERTY)
            .unwrap_or(DEFAULT_DB_MAX_CONNECTIONS.into()) as u32
    }

    pub async fn database_connection(&self) -> anyhow::Result<DatabaseConnection> {
        let mut options = ConnectOptions::new(self.database_url()?);
        options
            .max_connections(self.db_max_connections())
            .min_connections(1)
            .connect_timeout(Duration::from_secs(10))
            .sqlx_logging(self.config.get_bool(DB_LOG_PROPERTY).unwrap_or(false));

        Ok(Database::connect(options).await?)
    }

    // ========================================================================
    // Auth Configuration
    // ========================================================================

    pub fn auth_enabled(&self) -> bool {
        self.config.get_bool(AUTH_ENABLED_PROPERTY).unwrap_or(true)
    }

    pub fn token_secret_key(&self) -> String {
        self.config
            .get_string(TOKEN_SECRET_KEY_PROPERTY)
            .unwrap_or(DEFAULT_TOKEN_SECRET_KEY.to_string())
    }

    pub fn token_expire_seconds(&self) -> i64 {
        self.config
            .get_int(TOKEN_EXPIRE_SECONDS_PROPERTY)
            .unwrap_or(DEFAULT_TOKEN_EXPIRE_SECONDS)
    }

    // ========================================================================
    // Logging Configuration
    // ========================================================================

    pub fn logging_config(&self) -> LoggingConfig {
        LoggingConfig::from_config(
            self.config.get_string(LOG_DIR_PROPERTY).ok(),
            self.config.get_bool(LOG_CONSOLE_PROPERTY).unwrap_or(true),
            self.config.get_bool(LOG_FILE_PROPERTY).unwrap_or(true),
            self.config
                .get_string(LOG_LEVEL_PROPERTY)
                .unwrap_or("info".to_string()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_config_file() {
        let configuration = Configuration::default();
        assert_eq!(configuration.server_address(), "0.0.0.0");
        assert_eq!(configuration.server_port(), 8080);
        assert_eq!(configuration.server_context_path(), "/api");
        assert!(configuration.auth_enabled());
        assert_eq!(configuration.token_expire_seconds(), 18000);
        assert!(configuration.database_url().is_err());
    }
}
