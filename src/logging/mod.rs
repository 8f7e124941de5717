//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Console output with configurable log levels
//! - JSON-formatted local log files with rotation
//!
//! # Example
//!
//! ```no_run
//! use autovtex::logging::init_logging;
//! use autovtex::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

// Re-export commonly used items
pub use structured::{init_logging, parse_log_level, LoggingGuard};

/// Log the start of an export
///
/// # Example
///
/// ```no_run
/// use autovtex::log_export_start;
///
/// log_export_start!("fire", 2, 32);
/// ```
#[macro_export]
macro_rules! log_export_start {
    ($material:expr, $sequences:expr, $frames:expr) => {
        tracing::info!(
            material = %$material,
            sequences = $sequences,
            frames = $frames,
            "Starting export"
        );
    };
}

/// Log the completion of an export
///
/// # Example
///
/// ```no_run
/// use autovtex::log_export_complete;
/// use std::time::Duration;
///
/// log_export_complete!("fire", 32, Duration::from_secs(4));
/// ```
#[macro_export]
macro_rules! log_export_complete {
    ($material:expr, $frames:expr, $duration:expr) => {
        tracing::info!(
            material = %$material,
            frames = $frames,
            duration_ms = $duration.as_millis() as u64,
            "Export finished"
        );
    };
}

/// Log an orchestrator phase transition
///
/// # Example
///
/// ```no_run
/// use autovtex::log_phase;
/// use autovtex::core::export::ExportPhase;
///
/// log_phase!(ExportPhase::Idle, ExportPhase::Validating);
/// ```
#[macro_export]
macro_rules! log_phase {
    ($from:expr, $to:expr) => {
        tracing::info!(from = %$from, to = %$to, "Export phase changed");
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use autovtex::log_error_with_context;
/// use autovtex::domain::AutoVtexError;
///
/// let error = AutoVtexError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = %$context,
            "Error occurred"
        );
    };
}
