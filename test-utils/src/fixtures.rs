//! Vault HTTP response fixtures.

use serde_json::{Map, Value, json};

/// Successful login response carrying `client_token`.
#[must_use]
pub fn auth_response(client_token: &str) -> Value {
    json!({
        "request_id": "4b8e1a2c-5f3d-4c1e-9a7b-2d6f8e0c1b3a",
        "lease_id": "",
        "renewable": false,
        "lease_duration": 0,
        "data": null,
        "auth": {
            "client_token": client_token,
            "accessor": "0e9e354a-520f-df04-6867-ee81cae3d42d",
            "policies": ["default", "team-read"],
            "token_policies": ["default", "team-read"],
            "lease_duration": 2764800,
            "renewable": true
        }
    })
}

/// KV v2 read response whose nested data payload is `data`.
#[must_use]
pub fn kv2_response(data: Value, version: u64) -> Value {
    json!({
        "request_id": "9c1b2d3e-6f4a-4b5c-8d7e-1f2a3b4c5d6e",
        "lease_id": "",
        "renewable": false,
        "lease_duration": 0,
        "data": {
            "data": data,
            "metadata": {
                "created_time": "2024-03-01T12:00:00.000000Z",
                "custom_metadata": null,
                "deletion_time": "",
                "destroyed": false,
                "version": version
            }
        }
    })
}

/// KV v2 read response holding string fields.
#[must_use]
pub fn kv2_string_fields(fields: &[(&str, &str)]) -> Value {
    let data: Map<String, Value> = fields
        .iter()
        .map(|(k, v)| ((*k).to_string(), Value::from(*v)))
        .collect();
    kv2_response(Value::Object(data), 1)
}

/// Vault error body.
#[must_use]
pub fn error_response(errors: &[&str]) -> Value {
    json!({ "errors": errors })
}
