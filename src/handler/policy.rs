use crate::error::ExecGuardError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Reaction to a domain error found in a call's results.
///
/// `Exit` → `Callback` requires a registered callback; `Callback` → `Exit`
/// is always allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorPolicy {
    /// Log the error and request process termination (unless elastic)
    #[default]
    Exit,
    /// Hand the call's results to the registered callback
    Callback,
}

impl ErrorPolicy {
    pub fn requires_callback(&self) -> bool {
        matches!(self, Self::Callback)
    }
}

impl fmt::Display for ErrorPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exit => write!(f, "exit"),
            Self::Callback => write!(f, "callback"),
        }
    }
}

impl std::str::FromStr for ErrorPolicy {
    type Err = ExecGuardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "exit" => Ok(Self::Exit),
            "callback" => Ok(Self::Callback),
            _ => Err(ExecGuardError::invalid_value("on_error", s)),
        }
    }
}
