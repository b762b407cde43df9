//! # Structured Logging Module
//!
//! Environment-aware `tracing` setup plus the default [`LogSink`] that routes
//! handler records into whatever subscriber the process installed.

use crate::config::{LogFormat, LoggingConfig};
use crate::constants::ENV_VAR_ENVIRONMENT;
use crate::sink::{LogLevel, LogRecord, LogSink};
use std::sync::OnceLock;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

static LOGGER_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Initialize the global subscriber once, pretty or JSON per configuration
pub fn init_structured_logging(config: &LoggingConfig) {
    LOGGER_INITIALIZED.get_or_init(|| {
        let environment = get_environment();
        let filter = config
            .filter
            .clone()
            .or_else(|| std::env::var("RUST_LOG").ok())
            .unwrap_or_else(|| get_log_level(&environment).to_string());

        let layer = match config.format {
            LogFormat::Pretty => fmt::layer()
                .with_target(true)
                .with_level(true)
                .with_ansi(config.ansi)
                .with_filter(EnvFilter::new(filter.clone()))
                .boxed(),
            LogFormat::Json => fmt::layer()
                .json()
                .with_target(true)
                .with_level(true)
                .with_filter(EnvFilter::new(filter.clone()))
                .boxed(),
        };

        // Another subscriber may already be installed by the host application
        if tracing_subscriber::registry().with(layer).try_init().is_err() {
            tracing::debug!("Global tracing subscriber already initialized - continuing with existing subscriber");
        }

        tracing::info!(
            environment = %environment,
            filter = %filter,
            format = ?config.format,
            "structured logging initialized"
        );
    });
}

/// Get current environment from environment variables
fn get_environment() -> String {
    std::env::var(ENV_VAR_ENVIRONMENT)
        .or_else(|_| std::env::var("APP_ENV"))
        .unwrap_or_else(|_| "development".to_string())
}

/// Get log level based on environment
fn get_log_level(environment: &str) -> &'static str {
    match environment {
        "production" => "info",
        _ => "debug",
    }
}

/// Forwards records to the `tracing` macros.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn record(&self, record: &LogRecord) {
        let action = record.action.as_str();
        let to = record.target.as_str();
        let caller = record.caller.as_deref();
        let message = record.message.as_str();

        match record.level {
            LogLevel::Debug => tracing::debug!(action, to, caller, "{message}"),
            LogLevel::Info => tracing::info!(action, to, caller, "{message}"),
            LogLevel::Warn => tracing::warn!(action, to, caller, "{message}"),
            LogLevel::Error => tracing::error!(action, to, caller, "{message}"),
            LogLevel::Fatal => tracing::error!(action, to, caller, fatal = true, "{message}"),
        }
    }
}
