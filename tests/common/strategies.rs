use exec_guard::{CallError, Value};
use proptest::prelude::*;

/// Strategy for values that are never errors
pub fn plain_value_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        any::<u8>().prop_map(Value::from),
        any::<i32>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        "[a-z]{0,12}".prop_map(Value::from),
        prop::collection::vec(any::<i16>(), 0..4).prop_map(Value::from),
        prop::collection::vec("[a-z]{1,6}", 0..4).prop_map(Value::from),
    ]
}

/// Strategy for error values
pub fn error_value_strategy() -> impl Strategy<Value = Value> {
    "[a-z ]{1,24}".prop_map(|message| Value::Error(CallError::msg(message)))
}

/// Result sets without any error value
pub fn clean_results_strategy() -> impl Strategy<Value = Vec<Value>> {
    prop::collection::vec(plain_value_strategy(), 1..8)
}

/// Result sets with exactly one error, and that error's position
pub fn single_error_results_strategy() -> impl Strategy<Value = (Vec<Value>, usize)> {
    (clean_results_strategy(), error_value_strategy())
        .prop_flat_map(|(values, error)| {
            let len = values.len();
            (Just(values), Just(error), 0..=len)
        })
        .prop_map(|(mut values, error, index)| {
            values.insert(index, error);
            (values, index)
        })
}
