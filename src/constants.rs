//! # System Constants
//!
//! Names and codes shared by the handler, its log records and the
//! configuration loader.

/// Process exit code used when a termination is honored
pub const EXIT_FAILURE: i32 = 1;

/// Prefix for configuration environment variables, e.g. `EXEC_GUARD_ELASTICITY`
pub const ENV_PREFIX: &str = "EXEC_GUARD";

/// Selects the logging defaults (`development`, `test`, `production`)
pub const ENV_VAR_ENVIRONMENT: &str = "EXEC_GUARD_ENV";

/// Target recorded when an action has no meaningful destination
pub const NO_TARGET: &str = "-";

/// Action names carried in the `action` field of every log record
pub mod actions {
    pub const SET_ERROR_INDEX: &str = "set_error_index";
    pub const SET_ELASTICITY: &str = "set_elasticity";
    pub const SET_LOG_LEVEL: &str = "set_log_level";
    pub const SET_CALLER_REPORTING: &str = "set_caller_reporting";
    pub const SET_ERROR_POLICY: &str = "set_error_policy";
    pub const REGISTER_CALLBACK: &str = "register_callback";
    pub const UNREGISTER_CALLBACK: &str = "unregister_callback";
    pub const DISPATCH: &str = "dispatch";
}
