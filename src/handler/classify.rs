//! Locating the error inside a call's result set.

use crate::value::Value;

/// Where the error sits in a result set and what it is.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    /// Position removed from the outcome's values
    pub index: Option<usize>,
    /// `None` when nothing was found or the designated slot holds null
    pub error: Option<Value>,
}

impl Classification {
    pub fn none() -> Self {
        Self {
            index: None,
            error: None,
        }
    }

    /// Classify `results`.
    ///
    /// An in-bounds `override_index` wins regardless of the stored kind, so a
    /// non-error value there is still treated as the error. Otherwise the
    /// first `Value::Error` from the left is taken. Callers check bounds first.
    pub fn locate(results: &[Value], override_index: Option<usize>) -> Self {
        if let Some(index) = override_index {
            let error = results.get(index).filter(|v| !v.is_null()).cloned();
            return Self {
                index: Some(index),
                error,
            };
        }

        results
            .iter()
            .position(Value::is_error)
            .map(|index| Self {
                index: Some(index),
                error: Some(results[index].clone()),
            })
            .unwrap_or_else(Self::none)
    }

    /// Everything except the classified position, order preserved.
    pub fn partition(&self, results: &[Value]) -> Vec<Value> {
        results
            .iter()
            .enumerate()
            .filter(|(i, _)| Some(*i) != self.index)
            .map(|(_, v)| v.clone())
            .collect()
    }
}
