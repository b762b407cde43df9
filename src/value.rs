//! # Result Values
//!
//! Dynamic representation of the values a call hands back. Every supported
//! scalar and homogeneous sequence kind has its own variant, so classification
//! and the typed accessors on [`Outcome`](crate::outcome::Outcome) work by
//! matching instead of casting.

use serde::{Serialize, Serializer};
use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

/// An error value returned by a call.
///
/// Wraps any standard error behind an `Arc` so outcomes and callback
/// arguments can be cloned freely. Equality compares rendered messages.
#[derive(Clone)]
pub struct CallError {
    inner: Arc<dyn StdError + Send + Sync + 'static>,
}

impl CallError {
    pub fn new<E>(error: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self {
            inner: Arc::new(error),
        }
    }

    /// Build an error from a plain message.
    pub fn msg(message: impl fmt::Display) -> Self {
        let boxed: Box<dyn StdError + Send + Sync> = message.to_string().into();
        Self {
            inner: Arc::from(boxed),
        }
    }

    /// Borrow the wrapped error.
    pub fn inner(&self) -> &(dyn StdError + Send + Sync + 'static) {
        self.inner.as_ref()
    }

    pub fn downcast_ref<E: StdError + 'static>(&self) -> Option<&E> {
        self.inner.downcast_ref::<E>()
    }
}

impl fmt::Debug for CallError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CallError").field(&self.to_string()).finish()
    }
}

impl fmt::Display for CallError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl StdError for CallError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.inner.source()
    }
}

impl PartialEq for CallError {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner) || self.to_string() == other.to_string()
    }
}

impl Serialize for CallError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl From<anyhow::Error> for CallError {
    fn from(error: anyhow::Error) -> Self {
        let boxed: Box<dyn StdError + Send + Sync + 'static> = error.into();
        Self {
            inner: Arc::from(boxed),
        }
    }
}

impl From<std::io::Error> for CallError {
    fn from(error: std::io::Error) -> Self {
        Self::new(error)
    }
}

impl From<String> for CallError {
    fn from(message: String) -> Self {
        Self::msg(message)
    }
}

impl From<&str> for CallError {
    fn from(message: &str) -> Self {
        Self::msg(message)
    }
}

/// One value out of a call's result set.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Byte(u8),
    Int(isize),
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Float32(f32),
    Float64(f64),
    Str(String),
    Bytes(Vec<u8>),
    Ints(Vec<isize>),
    Int8s(Vec<i8>),
    Int16s(Vec<i16>),
    Int32s(Vec<i32>),
    Int64s(Vec<i64>),
    Float32s(Vec<f32>),
    Float64s(Vec<f64>),
    Strings(Vec<String>),
    /// Heterogeneous sequence, e.g. the argument list echoed by a callback
    List(Vec<Value>),
    Error(CallError),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// The "is an error" predicate used by classification.
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    pub fn as_error(&self) -> Option<&CallError> {
        match self {
            Self::Error(e) => Some(e),
            _ => None,
        }
    }

    /// Name of the stored kind, matching the accessor that reads it.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Byte(_) => "byte",
            Self::Int(_) => "int",
            Self::Int8(_) => "int8",
            Self::Int16(_) => "int16",
            Self::Int32(_) => "int32",
            Self::Int64(_) => "int64",
            Self::Float32(_) => "float32",
            Self::Float64(_) => "float64",
            Self::Str(_) => "string",
            Self::Bytes(_) => "bytes",
            Self::Ints(_) => "ints",
            Self::Int8s(_) => "int8s",
            Self::Int16s(_) => "int16s",
            Self::Int32s(_) => "int32s",
            Self::Int64s(_) => "int64s",
            Self::Float32s(_) => "float32s",
            Self::Float64s(_) => "float64s",
            Self::Strings(_) => "strings",
            Self::List(_) => "list",
            Self::Error(_) => "error",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Byte(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::Int8(v) => write!(f, "{v}"),
            Self::Int16(v) => write!(f, "{v}"),
            Self::Int32(v) => write!(f, "{v}"),
            Self::Int64(v) => write!(f, "{v}"),
            Self::Float32(v) => write!(f, "{v}"),
            Self::Float64(v) => write!(f, "{v}"),
            Self::Str(s) => write!(f, "{s}"),
            Self::Error(e) => write!(f, "{e}"),
            // Sequences render as JSON
            other => match serde_json::to_string(other) {
                Ok(json) => write!(f, "{json}"),
                Err(_) => write!(f, "<{}>", other.kind()),
            },
        }
    }
}

macro_rules! impl_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Value::$variant(value)
                }
            }
        )*
    };
}

impl_from! {
    bool => Bool,
    u8 => Byte,
    isize => Int,
    i8 => Int8,
    i16 => Int16,
    i32 => Int32,
    i64 => Int64,
    f32 => Float32,
    f64 => Float64,
    String => Str,
    Vec<u8> => Bytes,
    Vec<isize> => Ints,
    Vec<i8> => Int8s,
    Vec<i16> => Int16s,
    Vec<i32> => Int32s,
    Vec<i64> => Int64s,
    Vec<f32> => Float32s,
    Vec<f64> => Float64s,
    Vec<String> => Strings,
    Vec<Value> => List,
    CallError => Error,
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<Vec<&str>> for Value {
    fn from(value: Vec<&str>) -> Self {
        Value::Strings(value.into_iter().map(str::to_string).collect())
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Null
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}
