//! # Error Types
//!
//! Recoverable errors surfaced by the crate. Configuration misuse inside
//! `dispatch` is not an `ExecGuardError`: it becomes a
//! [`Termination`](crate::termination::Termination) instead.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExecGuardError {
    #[error("Type mismatch at index {index}: expected {expected}, found {found}")]
    TypeMismatch {
        index: usize,
        expected: &'static str,
        found: &'static str,
    },

    #[error("Index {index} is out of range for {len} values")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Configuration error: {0}")]
    Configuration(#[from] ::config::ConfigError),

    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: &'static str, value: String },
}

impl ExecGuardError {
    pub fn type_mismatch(index: usize, expected: &'static str, found: &'static str) -> Self {
        Self::TypeMismatch {
            index,
            expected,
            found,
        }
    }

    pub fn index_out_of_range(index: usize, len: usize) -> Self {
        Self::IndexOutOfRange { index, len }
    }

    pub fn invalid_value(field: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidValue {
            field,
            value: value.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ExecGuardError>;
