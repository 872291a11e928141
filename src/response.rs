// JSON envelope shared by the CLI and the HTTP server
use crate::error::Error;
use serde::Serialize;
use serde_json::{Map, Value, json};

/// `{"success": true, ...payload}`. Non-object payloads are nested under `data`.
pub fn success<T: Serialize>(payload: &T) -> Value {
    let payload = match serde_json::to_value(payload) {
        Ok(value) => value,
        Err(e) => {
            return json!({
                "success": false,
                "error": format!("Failed to serialize response: {}", e),
                "kind": "decode",
            });
        }
    };

    let mut body = Map::new();
    body.insert("success".into(), Value::Bool(true));
    match payload {
        Value::Object(fields) => body.extend(fields),
        other => {
            body.insert("data".into(), other);
        }
    }
    Value::Object(body)
}

/// `{"success": false, "error", "kind", "status_code", "details"}`
pub fn failure(error: &Error) -> Value {
    let mut body = Map::new();
    body.insert("success".into(), Value::Bool(false));
    body.insert("error".into(), Value::String(error.to_string()));
    body.insert("kind".into(), Value::String(error.kind().into()));
    if let Some(status) = error.status_code() {
        body.insert("status_code".into(), json!(status));
    }
    if let Some(details) = error.details() {
        body.insert("details".into(), json!(details));
    }
    Value::Object(body)
}

/// Envelope for any operation result
pub fn envelope<T: Serialize>(result: &Result<T, Error>) -> Value {
    match result {
        Ok(payload) => success(payload),
        Err(e) => failure(e),
    }
}
