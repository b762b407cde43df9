//! # Result Sets
//!
//! Conversion of a call's output into the ordered list of [`Value`]s that the
//! handler classifies.

use crate::value::{CallError, Value};

/// Anything that can be flattened into a call's ordered result set.
pub trait IntoResults {
    fn into_results(self) -> Vec<Value>;
}

impl IntoResults for Vec<Value> {
    fn into_results(self) -> Vec<Value> {
        self
    }
}

impl IntoResults for () {
    fn into_results(self) -> Vec<Value> {
        Vec::new()
    }
}

/// Payload first, error second: `Ok(v)` becomes `[v, null]` and `Err(e)`
/// becomes `[null, e]`.
impl<T, E> IntoResults for Result<T, E>
where
    T: Into<Value>,
    E: Into<CallError>,
{
    fn into_results(self) -> Vec<Value> {
        match self {
            Ok(value) => vec![value.into(), Value::Null],
            Err(error) => vec![Value::Null, Value::Error(error.into())],
        }
    }
}

macro_rules! impl_tuple {
    ($($name:ident),+) => {
        impl<$($name: Into<Value>),+> IntoResults for ($($name,)+) {
            #[allow(non_snake_case)]
            fn into_results(self) -> Vec<Value> {
                let ($($name,)+) = self;
                vec![$($name.into()),+]
            }
        }
    };
}

impl_tuple!(A);
impl_tuple!(A, B);
impl_tuple!(A, B, C);
impl_tuple!(A, B, C, D);
impl_tuple!(A, B, C, D, E);
impl_tuple!(A, B, C, D, E, F);

/// Build a `Vec<Value>` from heterogeneous expressions.
///
/// ```
/// use exec_guard::{results, CallError, Value};
///
/// let set = results!["payload", 3i32, CallError::msg("boom")];
/// assert_eq!(set.len(), 3);
/// assert!(set[2].is_error());
/// ```
#[macro_export]
macro_rules! results {
    () => {
        ::std::vec::Vec::<$crate::Value>::new()
    };
    ($($value:expr),+ $(,)?) => {
        ::std::vec![$($crate::Value::from($value)),+]
    };
}
