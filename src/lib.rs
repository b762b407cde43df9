#![allow(clippy::doc_markdown)] // Allow technical terms in docs
#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Exec Guard
//!
//! Call-result adapter that removes repetitive "check error, log, exit"
//! boilerplate from call sites.
//!
//! ## Overview
//!
//! A [`ResultHandler`] takes the full result set of some other call, finds the
//! value (if any) that represents an error, and returns an [`Outcome`] holding
//! the remaining values in order. When an error is present the handler applies
//! its policy: log and request termination, or hand the results to a
//! registered callback. Elastic handlers log without terminating.
//!
//! Termination is a value, not a side effect: [`ResultHandler::dispatch`]
//! returns [`Termination`] and the caller chooses to honor it, usually with
//! [`OrExit::or_exit`].
//!
//! ## Module Organization
//!
//! - [`handler`] - Classification, policy dispatch and configuration setters
//! - [`outcome`] - Per-call result record and typed accessors
//! - [`value`] - Dynamic value model for heterogeneous results
//! - [`results`] - Conversion of call output into result sets
//! - [`termination`] - Termination requests returned instead of exiting
//! - [`sink`] / [`logging`] - Structured log records and their destinations
//! - [`config`] - File and environment configuration
//! - [`error`] - Structured error handling
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use exec_guard::{OrExit, ResultHandler};
//!
//! let mut handler = ResultHandler::new();
//!
//! // Exits with status 1 after logging if the read fails
//! let outcome = handler.dispatch(std::fs::read_to_string("Cargo.toml")).or_exit();
//! println!("{}", outcome.string(0).unwrap());
//! ```

pub mod config;
pub mod constants;
pub mod error;
pub mod handler;
pub mod logging;
pub mod outcome;
pub mod results;
pub mod sink;
pub mod termination;
pub mod value;

pub use crate::config::{HandlerConfig, LogFormat, LoggingConfig};
pub use crate::error::{ExecGuardError, Result};
pub use crate::handler::{Callback, CallbackBinding, ErrorPolicy, ResultHandler};
pub use crate::logging::{init_structured_logging, TracingSink};
pub use crate::outcome::Outcome;
pub use crate::results::IntoResults;
pub use crate::sink::{JsonSink, LogLevel, LogRecord, LogSink, MemorySink};
pub use crate::termination::{DispatchResult, OrExit, Termination};
pub use crate::value::{CallError, Value};
