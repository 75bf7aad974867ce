//! Server-wide configuration keys and defaults

// Server configuration keys
pub const SERVER_ADDRESS_PROPERTY: &str = "server.address";
pub const SERVER_PORT_PROPERTY: &str = "server.port";
pub const SERVER_CONTEXT_PATH_PROPERTY: &str = "server.contextPath";

// Database configuration keys
pub const DB_URL_PROPERTY: &str = "db.url";
pub const DB_MAX_CONNECTIONS_PROPERTY: &str = "db.maxConnections";
pub const DB_LOG_PROPERTY: &str = "db.log";

// Auth configuration keys
pub const AUTH_ENABLED_PROPERTY: &str = "auth.enabled";
pub const TOKEN_SECRET_KEY_PROPERTY: &str = "auth.token.secretKey";
pub const TOKEN_EXPIRE_SECONDS_PROPERTY: &str = "auth.token.expireSeconds";

// Logging configuration keys
pub const LOG_DIR_PROPERTY: &str = "logging.dir";
pub const LOG_CONSOLE_PROPERTY: &str = "logging.console";
pub const LOG_FILE_PROPERTY: &str = "logging.file";
pub const LOG_LEVEL_PROPERTY: &str = "logging.level";

// Defaults
pub const DEFAULT_SERVER_ADDRESS: &str = "0.0.0.0";
pub const DEFAULT_SERVER_PORT: u16 = 8080;
pub const DEFAULT_CONTEXT_PATH: &str = "/api";
pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;
pub const DEFAULT_TOKEN_EXPIRE_SECONDS: i64 = 18000;

/// Default HS256 secret (base64). Deployments override it in
/// conf/application.yml or via BROCANTE_AUTH_TOKEN_SECRETKEY.
pub const DEFAULT_TOKEN_SECRET_KEY: &str =
    "U2VjcmV0S2V5MDEyMzQ1Njc4OTAxMjM0NTY3ODkwMTIzNDU2Nzg5MDEyMzQ1Njc4OQ==";
