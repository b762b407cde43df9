//! # Termination Requests
//!
//! A dispatch never exits the process itself. When the configured policy (or
//! a misconfigured error index) calls for termination it returns a
//! [`Termination`], and the top-level caller decides whether to honor it.

use crate::constants::EXIT_FAILURE;
use crate::outcome::Outcome;
use crate::value::Value;
use thiserror::Error;

pub type DispatchResult = Result<Outcome, Termination>;

#[derive(Debug, Error)]
pub enum Termination {
    /// The one-shot error index pointed past the end of the result set
    #[error("error index {index} points to a nonexistent result (call returned {len})")]
    InvalidErrorIndex { index: usize, len: usize },

    /// A domain error under the non-elastic exit policy
    #[error("call returned an error: {}", error_message(.outcome))]
    DomainError { outcome: Box<Outcome> },
}

fn error_message(outcome: &Outcome) -> String {
    outcome.error().map_or_else(String::new, Value::to_string)
}

impl Termination {
    pub fn exit_code(&self) -> i32 {
        EXIT_FAILURE
    }

    /// The outcome that triggered termination, if classification completed.
    pub fn outcome(&self) -> Option<&Outcome> {
        match self {
            Self::DomainError { outcome } => Some(outcome),
            Self::InvalidErrorIndex { .. } => None,
        }
    }

    pub fn into_outcome(self) -> Option<Outcome> {
        match self {
            Self::DomainError { outcome } => Some(*outcome),
            Self::InvalidErrorIndex { .. } => None,
        }
    }

    pub fn is_misconfiguration(&self) -> bool {
        matches!(self, Self::InvalidErrorIndex { .. })
    }

    /// Honor the request: exit the process with [`Termination::exit_code`].
    pub fn exit(self) -> ! {
        std::process::exit(self.exit_code())
    }
}

/// Crash-fast call sites: unwrap the outcome or exit the process.
pub trait OrExit {
    fn or_exit(self) -> Outcome;
}

impl OrExit for DispatchResult {
    fn or_exit(self) -> Outcome {
        self.unwrap_or_else(|termination| termination.exit())
    }
}
