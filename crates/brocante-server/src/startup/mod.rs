//! Application startup utilities

pub mod http;
pub mod logging;
pub mod shutdown;

pub use http::api_server;
pub use logging::{LoggingConfig, LoggingGuard, init_logging};
pub use shutdown::{SHUTDOWN_GRACE_SECONDS, drain, shutdown_requested};
