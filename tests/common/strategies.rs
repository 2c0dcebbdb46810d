use proptest::prelude::*;

/// Strategy for endpoint names drawn from a small pool so groups collide
pub fn endpoint_name_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("index".to_string()),
        Just("login".to_string()),
        Just("logout".to_string()),
        "[a-z_]{1,12}",
    ]
}

/// Strategy for finite, non-negative execution times in milliseconds
pub fn execution_time_strategy() -> impl Strategy<Value = f64> {
    0.0f64..10_000.0
}

/// Strategy for `(endpoint, execution time)` measurement rows
pub fn measurement_rows_strategy() -> impl Strategy<Value = Vec<(String, f64)>> {
    prop::collection::vec((endpoint_name_strategy(), execution_time_strategy()), 0..60)
}
