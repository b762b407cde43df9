//! # Handler Configuration
//!
//! Settings for a [`ResultHandler`](crate::handler::ResultHandler) and the
//! process-wide logging setup. Values come from an optional file layered
//! under `EXEC_GUARD_*` environment variables.
//!
//! ```toml
//! on_error = "exit"
//! elasticity = false
//! log_level = "info"
//! report_caller = false
//!
//! [logging]
//! format = "json"
//! ```

use crate::constants::ENV_PREFIX;
use crate::error::Result;
use crate::handler::ErrorPolicy;
use crate::sink::LogLevel;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct HandlerConfig {
    pub on_error: ErrorPolicy,
    pub elasticity: bool,
    pub log_level: LogLevel,
    pub report_caller: bool,
    pub logging: LoggingConfig,
}

impl Default for HandlerConfig {
    fn default() -> Self {
        Self {
            on_error: ErrorPolicy::Exit,
            elasticity: false,
            log_level: LogLevel::Info,
            report_caller: false,
            logging: LoggingConfig::default(),
        }
    }
}

/// Global subscriber settings used by
/// [`init_structured_logging`](crate::logging::init_structured_logging).
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub format: LogFormat,
    /// `EnvFilter` directive; falls back to `RUST_LOG`, then the environment default
    pub filter: Option<String>,
    pub ansi: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::Json,
            filter: None,
            ansi: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Json,
    Pretty,
}

impl HandlerConfig {
    /// Load from an optional file plus `EXEC_GUARD_*` environment variables
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_prefix(path, ENV_PREFIX)
    }

    /// Environment-only configuration
    pub fn from_env() -> Result<Self> {
        Self::load(None)
    }

    /// Load with an explicit environment prefix.
    ///
    /// Nested keys use a double underscore: `PREFIX_LOGGING__FORMAT=pretty`.
    pub fn load_with_prefix(path: Option<&Path>, prefix: &str) -> Result<Self> {
        let mut builder = ::config::Config::builder();

        if let Some(path) = path {
            debug!(path = %path.display(), "Loading handler configuration file");
            builder = builder.add_source(::config::File::from(path));
        }

        let settings = builder
            .add_source(
                ::config::Environment::with_prefix(prefix)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: HandlerConfig = settings.try_deserialize()?;
        debug!(
            on_error = %config.on_error,
            elasticity = config.elasticity,
            log_level = %config.log_level,
            report_caller = config.report_caller,
            "Handler configuration loaded"
        );
        Ok(config)
    }
}
