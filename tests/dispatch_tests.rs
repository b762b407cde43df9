//! Dispatch Tests
//!
//! Classification, value extraction and the one-shot error index.

mod common;

use common::*;
use exec_guard::{results, CallError, ErrorPolicy, LogLevel, Termination, Value};

#[test]
fn payload_with_null_error_is_clean() {
    let (mut handler, sink) = recording_handler();

    let outcome = handler.dispatch(payload_and("payload", Value::Null)).unwrap();

    assert_eq!(outcome.values(), results!["payload", Value::Null].as_slice());
    assert!(outcome.error().is_none());
    assert_eq!(outcome.error_index(), None);
    assert!(sink.records_at(LogLevel::Error).is_empty());
}

#[test]
fn payload_with_error_requests_termination_by_default() {
    let (mut handler, sink) = recording_handler();

    let termination = handler
        .dispatch(payload_and("payload", CallError::msg("someError")))
        .unwrap_err();

    assert_eq!(termination.exit_code(), 1);
    let outcome = termination.into_outcome().unwrap();
    assert_eq!(outcome.values(), results!["payload"].as_slice());
    assert_eq!(outcome.call_error(), Some(&CallError::msg("someError")));
    assert_eq!(sink.records_at(LogLevel::Error).len(), 1);
}

#[test]
fn non_error_values_are_kept_in_order() {
    let (mut handler, _sink) = recording_handler();
    handler.set_elasticity(true);

    let cases = vec![
        (results!["someString", Value::Null], None),
        (results!["someString", 1i32], None),
        (results![vec!["someString"], Value::Null], None),
        (results!["someString", CallError::msg("someError")], Some(1)),
        (results![CallError::msg("someError"), Value::Null], Some(0)),
    ];

    for (input, error_index) in cases {
        let outcome = handler.dispatch(input.clone()).unwrap();
        assert_eq!(outcome.error_index(), error_index, "input {input:?}");

        let mut expected = input.clone();
        if let Some(i) = error_index {
            expected.remove(i);
        }
        assert_eq!(outcome.values(), expected.as_slice(), "input {input:?}");
    }
}

#[test]
fn first_error_wins_and_later_errors_stay_readable() {
    let (mut handler, _sink) = recording_handler();
    handler.set_elasticity(true);

    let outcome = handler
        .dispatch(results![CallError::msg("first"), CallError::msg("second")])
        .unwrap();

    assert_eq!(outcome.call_error(), Some(&CallError::msg("first")));
    assert_eq!(outcome.error_at(0).unwrap(), &CallError::msg("second"));
}

#[test]
fn error_index_forces_position_regardless_of_kind() {
    let (mut handler, _sink) = recording_handler();
    handler.set_elasticity(true);

    let outcome = handler
        .set_error_index(1)
        .dispatch(results![CallError::msg("someError"), "not an error"])
        .unwrap();

    assert_eq!(outcome.error(), Some(&Value::from("not an error")));
    assert_eq!(outcome.error_at(0).unwrap(), &CallError::msg("someError"));
    assert_eq!(outcome.len(), 1);
}

#[test]
fn error_index_on_null_slot_means_no_error() {
    let (mut handler, sink) = recording_handler();

    let outcome = handler
        .set_error_index(1)
        .dispatch(results![CallError::msg("someError"), Value::Null])
        .unwrap();

    assert!(outcome.error().is_none());
    assert_eq!(outcome.error_index(), Some(1));
    assert_eq!(outcome.error_at(0).unwrap(), &CallError::msg("someError"));
    assert!(sink.records_at(LogLevel::Error).is_empty());
}

#[test]
fn error_index_applies_to_exactly_one_dispatch() {
    let (mut handler, _sink) = recording_handler();
    handler.set_elasticity(true).set_error_index(0);

    let first = handler.dispatch(results!["forced", "payload"]).unwrap();
    assert_eq!(first.error(), Some(&Value::from("forced")));
    assert_eq!(handler.pending_error_index(), None);

    let second = handler.dispatch(results!["forced", "payload"]).unwrap();
    assert!(second.error().is_none());
    assert_eq!(second.len(), 2);
}

#[test]
fn out_of_bounds_error_index_is_fatal_even_when_elastic() {
    let (mut handler, sink) = recording_handler();
    handler
        .register_callback(echo, ())
        .set_error_policy(ErrorPolicy::Callback)
        .set_elasticity(true)
        .set_error_index(2);

    let termination = handler.dispatch(results!["a", "b"]).unwrap_err();

    assert!(matches!(
        termination,
        Termination::InvalidErrorIndex { index: 2, len: 2 }
    ));
    assert!(termination.is_misconfiguration());
    let fatal = sink.records_at(LogLevel::Fatal);
    assert_eq!(fatal.len(), 1);
    assert_eq!(fatal[0].action, "dispatch");
    assert_eq!(fatal[0].target, "2");
}

#[test]
fn empty_call_returns_empty_outcome() {
    let (mut handler, _sink) = recording_handler();

    let outcome = handler.dispatch(()).unwrap();

    assert!(outcome.is_empty());
    assert!(outcome.error().is_none());
    assert!(outcome.callback_args().is_empty());
}

#[test]
fn std_results_follow_payload_then_error_convention() {
    let (mut handler, _sink) = recording_handler();
    handler.set_elasticity(true);

    let ok = handler.dispatch(Ok::<_, std::io::Error>(42i64)).unwrap();
    assert_eq!(ok.int64(0).unwrap(), 42);
    assert!(!ok.is_err());

    let err = handler
        .dispatch(Err::<i64, _>(anyhow::anyhow!("lookup failed")))
        .unwrap();
    assert_eq!(err.call_error().unwrap().to_string(), "lookup failed");
    assert_eq!(err.values(), [Value::Null].as_slice());
}

#[test]
fn accessors_read_back_typed_values() {
    let (mut handler, _sink) = recording_handler();

    let outcome = handler
        .dispatch(payload_and(vec!["someString"], Value::Null))
        .unwrap();
    assert_eq!(outcome.strings(0).unwrap(), ["someString".to_string()]);

    let outcome = handler.dispatch(payload_and(Vec::<u8>::new(), Value::Null)).unwrap();
    assert!(outcome.bytes(0).unwrap().is_empty());

    let outcome = handler.dispatch(payload_and(0u8, Value::Null)).unwrap();
    assert_eq!(outcome.byte(0).unwrap(), 0);

    let outcome = handler.dispatch(payload_and(vec![1isize], Value::Null)).unwrap();
    assert_eq!(outcome.ints(0).unwrap(), [1]);
    assert!(outcome.int8s(0).is_err());
}
