use exec_guard::{LogLevel, MemorySink, ResultHandler, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Handler logging at debug level into a sink the test can inspect
pub fn recording_handler() -> (ResultHandler, Arc<MemorySink>) {
    let sink = Arc::new(MemorySink::new());
    let mut handler = ResultHandler::new().with_sink(sink.clone());
    handler.set_log_level(LogLevel::Debug);
    sink.clear();
    (handler, sink)
}

/// Callback returning its arguments as a list
pub fn echo(args: &[Value]) -> Value {
    Value::List(args.to_vec())
}

/// Echo callback that also counts its invocations
pub fn counting_echo() -> (
    impl Fn(&[Value]) -> Value + Send + Sync + 'static,
    Arc<AtomicUsize>,
) {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();
    let callback = move |args: &[Value]| {
        counter.fetch_add(1, Ordering::SeqCst);
        echo(args)
    };
    (callback, calls)
}

/// Stand-in for a call returning a payload and an error slot
pub fn payload_and<V: Into<Value>, E: Into<Value>>(payload: V, error: E) -> (Value, Value) {
    (payload.into(), error.into())
}
