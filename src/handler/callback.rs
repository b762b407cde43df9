use crate::value::Value;
use std::fmt;
use std::sync::Arc;

type CallbackFn = dyn Fn(&[Value]) -> Value + Send + Sync;

/// A function invoked with a variable-length argument list.
#[derive(Clone)]
pub struct Callback(Arc<CallbackFn>);

impl Callback {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&[Value]) -> Value + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    pub fn call(&self, args: &[Value]) -> Value {
        (self.0)(args)
    }

    /// True when both handles point at the same function.
    pub fn same_as(&self, other: &Callback) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Callback(..)")
    }
}

/// A callback together with the arguments it will be called with.
#[derive(Debug, Clone, Default)]
pub struct CallbackBinding {
    callback: Option<Callback>,
    args: Vec<Value>,
}

impl CallbackBinding {
    pub fn new(callback: Option<Callback>, args: Vec<Value>) -> Self {
        Self { callback, args }
    }

    pub fn callback(&self) -> Option<&Callback> {
        self.callback.as_ref()
    }

    pub fn args(&self) -> &[Value] {
        &self.args
    }

    pub fn is_bound(&self) -> bool {
        self.callback.is_some()
    }

    /// Run the callback; `None` when nothing is bound.
    pub fn invoke(&self) -> Option<Value> {
        self.callback.as_ref().map(|cb| cb.call(&self.args))
    }

    pub(crate) fn rebind(mut self, callback: Callback, extra_args: Vec<Value>) -> Self {
        self.callback = Some(callback);
        self.args.extend(extra_args);
        self
    }
}
