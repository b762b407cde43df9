//! # Outcome
//!
//! Immutable record produced by one dispatch: the call's non-error values in
//! their original order, the classified error, the callback binding active at
//! dispatch time and whatever that callback returned.
//!
//! The typed accessors reinterpret one stored value as a concrete type and
//! fail with [`ExecGuardError::TypeMismatch`] when the stored kind differs.

use crate::error::{ExecGuardError, Result};
use crate::handler::{Callback, CallbackBinding};
use crate::results::IntoResults;
use crate::value::{CallError, Value};

#[derive(Debug, Clone, Default)]
pub struct Outcome {
    values: Vec<Value>,
    error_index: Option<usize>,
    error: Option<Value>,
    callback: CallbackBinding,
    callback_output: Option<Value>,
}

impl Outcome {
    pub(crate) fn new(
        values: Vec<Value>,
        error_index: Option<usize>,
        error: Option<Value>,
        callback: CallbackBinding,
    ) -> Self {
        Self {
            values,
            error_index,
            error,
            callback,
            callback_output: None,
        }
    }

    /// An outcome for a call that returned nothing
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn error(&self) -> Option<&Value> {
        self.error.as_ref()
    }

    /// The error as a [`CallError`], when the classified value is one.
    pub fn call_error(&self) -> Option<&CallError> {
        self.error.as_ref().and_then(Value::as_error)
    }

    pub fn is_err(&self) -> bool {
        self.error.is_some()
    }

    /// Position of the classified error in the raw result set
    pub fn error_index(&self) -> Option<usize> {
        self.error_index
    }

    pub fn callback_binding(&self) -> &CallbackBinding {
        &self.callback
    }

    pub fn callback_args(&self) -> &[Value] {
        self.callback.args()
    }

    pub fn callback_output(&self) -> Option<&Value> {
        self.callback_output.as_ref()
    }

    /// Bind a different callback to this outcome; `args` are appended to the
    /// arguments already captured.
    pub fn with_callback<F>(self, callback: F, args: impl IntoResults) -> Self
    where
        F: Fn(&[Value]) -> Value + Send + Sync + 'static,
    {
        Self {
            callback: self
                .callback
                .rebind(Callback::new(callback), args.into_results()),
            ..self
        }
    }

    /// Run the bound callback and keep its output. Without a binding the
    /// outcome is returned unchanged.
    pub fn invoke_callback(self) -> Self {
        match self.callback.invoke() {
            Some(output) => Self {
                callback_output: Some(output),
                ..self
            },
            None => self,
        }
    }

    /// Raw access to the value at position `n`.
    pub fn get(&self, n: usize) -> Result<&Value> {
        self.values
            .get(n)
            .ok_or_else(|| ExecGuardError::index_out_of_range(n, self.values.len()))
    }

    /// Read an error stored among the values, e.g. a second error when the
    /// call returned more than one.
    pub fn error_at(&self, n: usize) -> Result<&CallError> {
        match self.get(n)? {
            Value::Error(e) => Ok(e),
            other => Err(ExecGuardError::type_mismatch(n, "error", other.kind())),
        }
    }

    pub fn string(&self, n: usize) -> Result<&str> {
        match self.get(n)? {
            Value::Str(s) => Ok(s.as_str()),
            other => Err(ExecGuardError::type_mismatch(n, "string", other.kind())),
        }
    }

    pub fn list(&self, n: usize) -> Result<&[Value]> {
        match self.get(n)? {
            Value::List(items) => Ok(items.as_slice()),
            other => Err(ExecGuardError::type_mismatch(n, "list", other.kind())),
        }
    }
}

macro_rules! scalar_accessors {
    ($($name:ident => $variant:ident: $ty:ty),* $(,)?) => {
        impl Outcome {
            $(
                pub fn $name(&self, n: usize) -> Result<$ty> {
                    match self.get(n)? {
                        Value::$variant(v) => Ok(*v),
                        other => Err(ExecGuardError::type_mismatch(
                            n,
                            stringify!($name),
                            other.kind(),
                        )),
                    }
                }
            )*
        }
    };
}

macro_rules! slice_accessors {
    ($($name:ident => $variant:ident: $ty:ty),* $(,)?) => {
        impl Outcome {
            $(
                pub fn $name(&self, n: usize) -> Result<&[$ty]> {
                    match self.get(n)? {
                        Value::$variant(v) => Ok(v.as_slice()),
                        other => Err(ExecGuardError::type_mismatch(
                            n,
                            stringify!($name),
                            other.kind(),
                        )),
                    }
                }
            )*
        }
    };
}

scalar_accessors! {
    boolean => Bool: bool,
    byte => Byte: u8,
    int => Int: isize,
    int8 => Int8: i8,
    int16 => Int16: i16,
    int32 => Int32: i32,
    int64 => Int64: i64,
    float32 => Float32: f32,
    float64 => Float64: f64,
}

slice_accessors! {
    bytes => Bytes: u8,
    ints => Ints: isize,
    int8s => Int8s: i8,
    int16s => Int16s: i16,
    int32s => Int32s: i32,
    int64s => Int64s: i64,
    float32s => Float32s: f32,
    float64s => Float64s: f64,
    strings => Strings: String,
}
