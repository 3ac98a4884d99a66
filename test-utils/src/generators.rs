//! Shared proptest generators.

use proptest::prelude::*;

/// Generate Vault space names such as `TeamSpace` or `payments-prod`.
pub fn space_name_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("TeamSpace".to_string()),
        Just("MyTeamVaultSpace".to_string()),
        "[A-Za-z][A-Za-z0-9_-]{2,30}",
    ]
}

/// Generate secret paths inside a space mount.
pub fn secret_path_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("mysecret-dev".to_string()),
        prop::collection::vec("[a-z][a-z0-9-]{2,12}", 1..4).prop_map(|segments| segments.join("/")),
    ]
}

/// Generate secret field names.
pub fn field_key_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,20}"
}

/// Generate secret values, including characters that need JSON escaping.
pub fn secret_value_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z0-9!@#$%^&*\"\\\\/ ]{8,64}"
}

/// Generate non-string JSON values.
pub fn non_string_value_strategy() -> impl Strategy<Value = serde_json::Value> {
    prop_oneof![
        Just(serde_json::Value::Null),
        any::<bool>().prop_map(serde_json::Value::Bool),
        any::<i64>().prop_map(serde_json::Value::from),
        prop::collection::vec("[a-z]{1,5}", 0..3).prop_map(serde_json::Value::from),
        "[a-z]{1,8}".prop_map(|v| serde_json::json!({ "nested": v })),
    ]
}
