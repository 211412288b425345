//! HTTP handlers, one controller module per resource plus the system probe.

pub mod actors;
pub mod genres;
pub mod movies;
pub mod system;

use crate::error::AppError;
use crate::validation::{validate, FieldRule};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

fn object_body(value: Value) -> Result<Map<String, Value>, AppError> {
    match value {
        Value::Object(m) => Ok(m),
        _ => Err(AppError::BadRequest("body must be a JSON object".into())),
    }
}

/// Check the raw map against the rules first so every violation is collected,
/// then turn it into the typed resource. Validation always completes before
/// any write is attempted.
fn validated_body<T: DeserializeOwned>(body: Value, rules: &[FieldRule]) -> Result<T, AppError> {
    let map = object_body(body)?;
    let violations = validate(&map, rules);
    if !violations.is_empty() {
        return Err(AppError::Validation(violations));
    }
    serde_json::from_value(Value::Object(map))
        .map_err(|e| AppError::BadRequest(format!("malformed body: {e}")))
}

/// The path id is authoritative: force it onto the primary id and the
/// resource-specific id before validation, so a body-supplied id can never
/// rename a resource.
fn force_path_id(body: Value, id: &str, resource_id_field: &str) -> Result<Value, AppError> {
    let mut map = object_body(body)?;
    map.insert("id".to_string(), Value::String(id.to_string()));
    map.insert(
        resource_id_field.to_string(),
        Value::String(id.to_string()),
    );
    Ok(Value::Object(map))
}

fn to_document<T: serde::Serialize>(resource: &T) -> Result<Value, AppError> {
    serde_json::to_value(resource).map_err(|e| AppError::Upstream(e.to_string()))
}
