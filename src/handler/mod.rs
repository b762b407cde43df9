//! # Result Handler
//!
//! Policy-holding controller that classifies a call's result set, builds the
//! [`Outcome`] and applies the configured error policy.
//!
//! ## Dispatch
//!
//! ```text
//! results ──▶ bounds check ──▶ classify ──▶ partition ──▶ Outcome
//!   (index override)  │                                    │
//!                     ▼                                    ▼ error?
//!          Termination::InvalidErrorIndex        Exit ──▶ log, Termination (unless elastic)
//!                                                Callback ──▶ invoke, store output
//! ```
//!
//! The index override is one-shot: every dispatch consumes it, whatever the
//! result. Handlers take `&mut self` for that reason; callers sharing one
//! handler serialize access themselves (e.g. `parking_lot::Mutex`).
//!
//! ## Usage
//!
//! ```rust
//! use exec_guard::{results, CallError, ErrorPolicy, ResultHandler, Value};
//!
//! let mut handler = ResultHandler::new();
//! handler
//!     .set_elasticity(true)
//!     .register_callback(|args| Value::from(args.to_vec()), ())
//!     .set_error_policy(ErrorPolicy::Callback);
//!
//! let outcome = handler
//!     .dispatch(results!["payload", CallError::msg("boom")])
//!     .unwrap();
//! assert_eq!(outcome.string(0).unwrap(), "payload");
//! assert!(outcome.callback_output().is_some());
//! ```

mod callback;
mod classify;
mod policy;

pub use callback::{Callback, CallbackBinding};
pub use classify::Classification;
pub use policy::ErrorPolicy;

use crate::config::HandlerConfig;
use crate::constants::{actions, NO_TARGET};
use crate::logging::TracingSink;
use crate::outcome::Outcome;
use crate::results::IntoResults;
use crate::sink::{LogLevel, LogRecord, LogSink};
use crate::termination::{DispatchResult, Termination};
use crate::value::Value;
use std::fmt;
use std::panic::Location;
use std::sync::Arc;

pub struct ResultHandler {
    sink: Arc<dyn LogSink>,
    policy: ErrorPolicy,
    elasticity: bool,
    log_level: LogLevel,
    report_caller: bool,
    callback: Option<Callback>,
    callback_args: Vec<Value>,
    error_index: Option<usize>,
}

impl Default for ResultHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ResultHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResultHandler")
            .field("policy", &self.policy)
            .field("elasticity", &self.elasticity)
            .field("log_level", &self.log_level)
            .field("report_caller", &self.report_caller)
            .field("callback_enabled", &self.callback_enabled())
            .field("callback_args", &self.callback_args)
            .field("error_index", &self.error_index)
            .finish()
    }
}

impl ResultHandler {
    /// Exit policy, not elastic, info level, logging through `tracing`
    pub fn new() -> Self {
        Self {
            sink: Arc::new(TracingSink),
            policy: ErrorPolicy::Exit,
            elasticity: false,
            log_level: LogLevel::Info,
            report_caller: false,
            callback: None,
            callback_args: Vec::new(),
            error_index: None,
        }
    }

    /// Build a handler from loaded configuration.
    ///
    /// Goes through the regular setters, so `on_error = "callback"` demotes
    /// to exit until a callback is registered.
    #[track_caller]
    pub fn from_config(config: &HandlerConfig) -> Self {
        let mut handler = Self::new();
        handler
            .set_log_level(config.log_level)
            .set_caller_reporting(config.report_caller)
            .set_elasticity(config.elasticity)
            .set_error_policy(config.on_error);
        handler
    }

    /// Replace the log sink.
    pub fn with_sink(mut self, sink: Arc<dyn LogSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn error_policy(&self) -> ErrorPolicy {
        self.policy
    }

    pub fn elasticity(&self) -> bool {
        self.elasticity
    }

    pub fn log_level(&self) -> LogLevel {
        self.log_level
    }

    pub fn caller_reporting(&self) -> bool {
        self.report_caller
    }

    pub fn callback_enabled(&self) -> bool {
        self.callback.is_some()
    }

    /// The index override waiting for the next dispatch
    pub fn pending_error_index(&self) -> Option<usize> {
        self.error_index
    }

    /// Treat position `index` of the next dispatch's results as the error.
    ///
    /// Bounds are checked when that dispatch runs.
    #[track_caller]
    pub fn set_error_index(&mut self, index: usize) -> &mut Self {
        self.error_index = Some(index);
        self.log_modified(actions::SET_ERROR_INDEX, &index.to_string(), Location::caller());
        self
    }

    #[track_caller]
    pub fn set_elasticity(&mut self, elasticity: bool) -> &mut Self {
        self.elasticity = elasticity;
        self.log_modified(
            actions::SET_ELASTICITY,
            &elasticity.to_string(),
            Location::caller(),
        );
        self
    }

    /// Records below `level` never reach the sink.
    #[track_caller]
    pub fn set_log_level(&mut self, level: LogLevel) -> &mut Self {
        self.log_level = level;
        self.log_modified(actions::SET_LOG_LEVEL, level.as_str(), Location::caller());
        self
    }

    /// Attach the `file:line` of the public call site to every record.
    #[track_caller]
    pub fn set_caller_reporting(&mut self, enabled: bool) -> &mut Self {
        self.report_caller = enabled;
        self.log_modified(
            actions::SET_CALLER_REPORTING,
            &enabled.to_string(),
            Location::caller(),
        );
        self
    }

    /// Register the callback run under [`ErrorPolicy::Callback`].
    ///
    /// `bound` replaces any previously bound arguments; on dispatch they are
    /// passed after the call's full result set.
    #[track_caller]
    pub fn register_callback<F>(&mut self, callback: F, bound: impl IntoResults) -> &mut Self
    where
        F: Fn(&[Value]) -> Value + Send + Sync + 'static,
    {
        self.callback = Some(Callback::new(callback));
        self.callback_args = bound.into_results();
        self.log_modified(
            actions::REGISTER_CALLBACK,
            &self.callback_args.len().to_string(),
            Location::caller(),
        );
        self
    }

    /// Drop the callback and its bound arguments. A handler left on the
    /// callback policy falls back to exit.
    #[track_caller]
    pub fn unregister_callback(&mut self) -> &mut Self {
        let caller = Location::caller();
        self.callback = None;
        self.callback_args.clear();
        self.log_modified(actions::UNREGISTER_CALLBACK, NO_TARGET, caller);

        if self.policy == ErrorPolicy::Callback {
            self.policy = ErrorPolicy::Exit;
            self.emit(
                LogLevel::Warn,
                actions::UNREGISTER_CALLBACK,
                ErrorPolicy::Exit.to_string(),
                "Callback removed while the error policy was callback; any error will now request exit",
                caller,
            );
        }
        self
    }

    /// Choose the reaction to domain errors.
    ///
    /// Asking for [`ErrorPolicy::Callback`] without a registered callback
    /// keeps the handler on exit and logs a warning instead of failing.
    #[track_caller]
    pub fn set_error_policy(&mut self, policy: ErrorPolicy) -> &mut Self {
        let caller = Location::caller();

        if policy.requires_callback() && !self.callback_enabled() {
            self.policy = ErrorPolicy::Exit;
            for message in [
                "Error policy has not been changed. Register a callback before selecting the callback policy",
                "Error policy is exit. Any error will request process termination",
            ] {
                self.emit(
                    LogLevel::Warn,
                    actions::SET_ERROR_POLICY,
                    NO_TARGET,
                    message,
                    caller,
                );
            }
            return self;
        }

        self.policy = policy;
        self.log_modified(actions::SET_ERROR_POLICY, &policy.to_string(), caller);
        self
    }

    /// Run the registered callback with its bound arguments only.
    pub fn invoke_callback(&self) -> Option<Value> {
        self.callback.as_ref().map(|cb| cb.call(&self.callback_args))
    }

    /// Classify one call's results and apply the error policy.
    ///
    /// Returns `Err` only when the process should terminate: an index
    /// override past the end of `results` (regardless of elasticity), or a
    /// domain error under a non-elastic exit policy.
    #[track_caller]
    pub fn dispatch(&mut self, results: impl IntoResults) -> DispatchResult {
        let caller = Location::caller();
        let results = results.into_results();
        let override_index = self.error_index.take();

        if results.is_empty() {
            return Ok(Outcome::empty());
        }

        if let Some(index) = override_index {
            if index >= results.len() {
                self.emit(
                    LogLevel::Fatal,
                    actions::DISPATCH,
                    index.to_string(),
                    "The error index points to a nonexistent result",
                    caller,
                );
                return Err(Termination::InvalidErrorIndex {
                    index,
                    len: results.len(),
                });
            }
        }

        let classification = Classification::locate(&results, override_index);
        let values = classification.partition(&results);

        let mut callback_args = results;
        callback_args.extend(self.callback_args.iter().cloned());
        let binding = CallbackBinding::new(self.callback.clone(), callback_args);

        let outcome = Outcome::new(
            values,
            classification.index,
            classification.error,
            binding,
        );

        if outcome.is_err() {
            self.apply_policy(outcome, caller)
        } else {
            Ok(outcome)
        }
    }

    fn apply_policy(&self, outcome: Outcome, caller: &'static Location<'static>) -> DispatchResult {
        let target = outcome
            .error_index()
            .map_or_else(|| NO_TARGET.to_string(), |i| i.to_string());

        match self.policy {
            ErrorPolicy::Exit => {
                let message = outcome.error().map(Value::to_string).unwrap_or_default();
                self.emit(LogLevel::Error, actions::DISPATCH, target, message, caller);

                if self.elasticity {
                    Ok(outcome)
                } else {
                    Err(Termination::DomainError {
                        outcome: Box::new(outcome),
                    })
                }
            }
            ErrorPolicy::Callback => {
                self.emit(
                    LogLevel::Debug,
                    actions::DISPATCH,
                    target,
                    "Error handed to callback",
                    caller,
                );
                Ok(outcome.invoke_callback())
            }
        }
    }

    fn log_modified(&self, action: &str, target: &str, caller: &'static Location<'static>) {
        self.emit(
            LogLevel::Debug,
            action,
            target,
            format!("{action} modified successfully"),
            caller,
        );
    }

    fn emit(
        &self,
        level: LogLevel,
        action: &str,
        target: impl Into<String>,
        message: impl Into<String>,
        caller: &'static Location<'static>,
    ) {
        if level < self.log_level {
            return;
        }

        let mut record = LogRecord::new(level, action, target, message);
        if self.report_caller {
            record = record.with_caller(format!("{}:{}", caller.file(), caller.line()));
        }
        self.sink.record(&record);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::results;
    use crate::sink::MemorySink;
    use crate::value::CallError;

    fn handler_with_sink() -> (ResultHandler, Arc<MemorySink>) {
        let sink = Arc::new(MemorySink::new());
        let handler = ResultHandler::new().with_sink(sink.clone());
        (handler, sink)
    }

    #[test]
    fn test_defaults() {
        let handler = ResultHandler::new();
        assert_eq!(handler.error_policy(), ErrorPolicy::Exit);
        assert!(!handler.elasticity());
        assert!(!handler.callback_enabled());
        assert_eq!(handler.pending_error_index(), None);
    }

    #[test]
    fn test_level_threshold_filters_records() {
        let (mut handler, sink) = handler_with_sink();
        handler.set_elasticity(true);
        assert!(sink.is_empty());

        handler.set_log_level(LogLevel::Debug).set_elasticity(false);
        let records = sink.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].action, actions::SET_ELASTICITY);
        assert_eq!(records[1].target, "false");
        assert_eq!(records[1].message, "set_elasticity modified successfully");
    }

    #[test]
    fn test_caller_reporting_points_at_call_site() {
        let (mut handler, sink) = handler_with_sink();
        handler
            .set_log_level(LogLevel::Debug)
            .set_caller_reporting(true);
        handler.set_elasticity(true);

        let caller = sink.records().last().unwrap().caller.clone().unwrap();
        assert!(caller.starts_with(file!()), "unexpected caller {caller}");
    }

    #[test]
    fn test_invalid_index_consumes_override() {
        let (mut handler, sink) = handler_with_sink();
        handler.set_elasticity(true).set_error_index(2);

        let result = handler.dispatch(results!["a", "b"]);
        assert!(matches!(
            result,
            Err(Termination::InvalidErrorIndex { index: 2, len: 2 })
        ));
        assert_eq!(handler.pending_error_index(), None);
        assert_eq!(sink.records_at(LogLevel::Fatal).len(), 1);
    }

    #[test]
    fn test_empty_results_skip_classification() {
        let (mut handler, sink) = handler_with_sink();
        handler.set_error_index(4);
        let outcome = handler.dispatch(()).unwrap();
        assert!(outcome.is_empty());
        assert!(!outcome.is_err());
        assert_eq!(handler.pending_error_index(), None);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_handler_invoke_callback_uses_bound_args_only() {
        let mut handler = ResultHandler::new();
        assert!(handler.invoke_callback().is_none());

        handler.register_callback(|args| Value::from(args.to_vec()), ("bound", 1i32));
        assert_eq!(
            handler.invoke_callback(),
            Some(Value::List(results!["bound", 1i32]))
        );
    }

    #[test]
    fn test_exit_policy_logs_error_index_as_target() {
        let (mut handler, sink) = handler_with_sink();
        handler.set_elasticity(true);
        handler
            .dispatch(results!["payload", CallError::msg("boom")])
            .unwrap();

        let errors = sink.records_at(LogLevel::Error);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].target, "1");
        assert_eq!(errors[0].message, "boom");
    }
}
