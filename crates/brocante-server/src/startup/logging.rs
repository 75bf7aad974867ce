//! File-based logging module
//!
//! Multi-file logging where each component writes to its own file with
//! daily rotation:
//!
//! | Log File        | Component                  | Target Prefixes            |
//! |-----------------|----------------------------|----------------------------|
//! | brocante.log    | Root logger (everything)   | (all)                      |
//! | catalog.log     | Categories, listings, search | brocante_catalog         |
//! | attribute.log   | Dynamic attribute system   | brocante_attribute         |
//! | auth.log        | Authentication             | brocante_server::auth, ::middleware |
//! | persistence.log | Database layer             | brocante_persistence, sea_orm |
//! | backfill.log    | Keyword backfill jobs      | brocante_backfill          |
//!
//! Log files are stored in `~/brocante/logs` by default. Override with the
//! `BROCANTE_LOG_DIR` environment variable or `logging.dir` config.

use std::path::PathBuf;

use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry, fmt};

/// Internal definition for a component log file.
struct ComponentLogDef {
    /// Log file name (e.g. "catalog.log")
    file_name: &'static str,
    /// Target module prefixes routed to this file
    targets: &'static [&'static str],
}

/// Component log definitions.
///
/// Each entry produces a separate rolling log file. Events are routed based
/// on their `tracing` target (Rust module path). The root `brocante.log`
/// file always captures *all* events regardless of target.
const COMPONENT_LOGS: &[ComponentLogDef] = &[
    ComponentLogDef {
        file_name: "catalog.log",
        targets: &["brocante_catalog"],
    },
    ComponentLogDef {
        file_name: "attribute.log",
        targets: &["brocante_attribute"],
    },
    ComponentLogDef {
        file_name: "auth.log",
        targets: &["brocante_server::auth", "brocante_server::middleware"],
    },
    ComponentLogDef {
        file_name: "persistence.log",
        targets: &["brocante_persistence", "sea_orm", "sqlx"],
    },
    ComponentLogDef {
        file_name: "backfill.log",
        targets: &["brocante_backfill"],
    },
];

/// Log rotation policy
#[derive(Debug, Clone, Copy)]
pub enum LogRotation {
    /// Rotate daily (default)
    Daily,
    /// Rotate hourly
    Hourly,
    /// Never rotate (single file)
    Never,
}

impl From<LogRotation> for Rotation {
    fn from(rotation: LogRotation) -> Self {
        match rotation {
            LogRotation::Daily => Rotation::DAILY,
            LogRotation::Hourly => Rotation::HOURLY,
            LogRotation::Never => Rotation::NEVER,
        }
    }
}

/// Logging configuration for the entire application.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Base log directory (default: `~/brocante/logs`)
    pub log_dir: PathBuf,
    /// Enable console output
    pub console_output: bool,
    /// Console log level
    pub console_level: Level,
    /// Enable file logging
    pub file_logging: bool,
    /// Default log level for files
    pub file_level: Level,
    /// Log rotation policy
    pub rotation: LogRotation,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_dir: default_log_dir(),
            console_output: true,
            console_level: Level::INFO,
            file_logging: true,
            file_level: Level::INFO,
            rotation: LogRotation::Daily,
        }
    }
}

fn default_log_dir() -> PathBuf {
    std::env::var("BROCANTE_LOG_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(format!("{}/brocante/logs", home))
        })
}

impl LoggingConfig {
    /// Create from application configuration.
    pub fn from_config(
        log_dir: Option<String>,
        console_output: bool,
        file_logging: bool,
        level: String,
    ) -> Self {
        let log_dir = log_dir.map(PathBuf::from).unwrap_or_else(default_log_dir);
        let level = level.parse().unwrap_or(Level::INFO);

        Self {
            log_dir,
            console_output,
            console_level: level,
            file_logging,
            file_level: level,
            rotation: LogRotation::Daily,
        }
    }
}

/// Guard that keeps the logging system alive.
///
/// Holds the file appender worker guards. Must be kept alive for the
/// duration of the application; dropping it flushes buffered log output.
pub struct LoggingGuard {
    _file_guards: Vec<WorkerGuard>,
}

/// Initialize the logging system with multi-file output.
///
/// This sets up:
/// - Console output (optional, human-readable format with colors)
/// - Root log file `brocante.log` that captures **all** events
/// - Component-specific log files with target-based routing (see [`COMPONENT_LOGS`])
///
/// The `RUST_LOG` env var controls the **minimum** level for the console
/// and root layers. Component log files use per-layer [`Targets`] filters
/// to route events by their tracing target (module path).
///
/// # Returns
///
/// A [`LoggingGuard`] that must be kept alive for the duration of the
/// application.
pub fn init_logging(config: &LoggingConfig) -> Result<LoggingGuard, Box<dyn std::error::Error>> {
    // Create log directory if needed
    if config.file_logging {
        std::fs::create_dir_all(&config.log_dir)?;
    }

    let mut guards: Vec<WorkerGuard> = Vec::new();
    let mut layers: Vec<Box<dyn Layer<Registry> + Send + Sync>> = Vec::new();

    // --- Console layer (human-readable with ANSI colors, per-layer EnvFilter) ---
    if config.console_output {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(config.console_level.to_string()));
        let console_layer = fmt::layer()
            .with_target(true)
            .with_thread_names(true)
            .with_file(true)
            .with_line_number(true)
            .with_filter(filter);
        layers.push(Box::new(console_layer));
    }

    // --- File layers ---
    if config.file_logging {
        // Root log file: brocante.log (captures all events, per-layer EnvFilter)
        let root_appender =
            RollingFileAppender::new(config.rotation.into(), &config.log_dir, "brocante.log");
        let (root_nb, root_guard) = tracing_appender::non_blocking(root_appender);
        guards.push(root_guard);

        let root_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(config.file_level.to_string()));
        let root_layer = fmt::layer()
            .with_writer(root_nb)
            .with_target(true)
            .with_thread_names(true)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(false)
            .with_filter(root_filter);
        layers.push(Box::new(root_layer));

        // Component-specific log files with per-layer Targets filtering
        for component in COMPONENT_LOGS {
            let appender = RollingFileAppender::new(
                config.rotation.into(),
                &config.log_dir,
                component.file_name,
            );
            let (nb, guard) = tracing_appender::non_blocking(appender);
            guards.push(guard);

            // Component files capture everything from their targets; the
            // root file and console use EnvFilter/RUST_LOG for level control
            let mut targets = Targets::new();
            for target in component.targets {
                targets = targets.with_target(*target, LevelFilter::TRACE);
            }

            let layer = fmt::layer()
                .with_writer(nb)
                .with_target(true)
                .with_thread_names(true)
                .with_file(true)
                .with_line_number(true)
                .with_ansi(false)
                .with_filter(targets);
            layers.push(Box::new(layer));
        }
    }

    // --- Initialize the global tracing subscriber ---
    // All filtering is per-layer (no global EnvFilter), so each layer
    // independently decides which events to process.
    Registry::default()
        .with(layers)
        .try_init()
        .map_err(|e| format!("Failed to initialize logging: {}", e))?;

    if config.file_logging {
        tracing::info!(
            log_dir = %config.log_dir.display(),
            component_files = COMPONENT_LOGS.len(),
            "File logging initialized: brocante.log (root) + {} component log files",
            COMPONENT_LOGS.len()
        );
    }

    Ok(LoggingGuard {
        _file_guards: guards,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logging_config_default() {
        let config = LoggingConfig::default();
        assert!(config.console_output);
        assert!(config.file_logging);
        assert_eq!(config.console_level, Level::INFO);
        assert_eq!(config.file_level, Level::INFO);
    }

    #[test]
    fn test_logging_config_from_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = LoggingConfig::from_config(
            Some(dir.path().to_string_lossy().to_string()),
            false,
            true,
            "debug".to_string(),
        );
        assert_eq!(config.log_dir, dir.path());
        assert!(!config.console_output);
        assert!(config.file_logging);
        assert_eq!(config.file_level, Level::DEBUG);
    }

    #[test]
    fn test_logging_config_bad_level_falls_back() {
        let config = LoggingConfig::from_config(None, true, false, "chatty".to_string());
        assert_eq!(config.console_level, Level::INFO);
    }

    #[test]
    fn test_log_rotation_conversion() {
        assert_eq!(Rotation::from(LogRotation::Daily), Rotation::DAILY);
        assert_eq!(Rotation::from(LogRotation::Hourly), Rotation::HOURLY);
        assert_eq!(Rotation::from(LogRotation::Never), Rotation::NEVER);
    }

    #[test]
    fn test_component_log_definitions() {
        for component in COMPONENT_LOGS {
            assert!(
                component.file_name.ends_with(".log"),
                "Log file name should end with .log: {}",
                component.file_name
            );
            assert!(
                !component.targets.is_empty(),
                "Component {} should have at least one target",
                component.file_name
            );
        }
    }
}
