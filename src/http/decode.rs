//! Decoding strategies for node responses.
//!
//! Node responses are not uniformly shaped: some actions return a flat map of
//! strings, some nest that map under a named key, and list fields arrive either
//! as a JSON array or as `""` when empty. Each function here interprets a raw
//! response body under the shape contract the caller declares and fails when
//! the body does not match it. Nothing is inferred from the JSON itself.
//!
//! Every strategy starts from [`object`], which also surfaces a node-reported
//! `"error"` field as [`RpcError::Node`].

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use super::error::RpcError;
use super::types::{JsonMap, ListField, NestedStringMap, StringMap, SuccessConvention};

/// Parses the body as a top-level JSON object.
pub fn object(action: &str, raw: &[u8]) -> Result<JsonMap, RpcError> {
    let top: Map<String, Value> = serde_json::from_slice(raw).map_err(|source| shape(action, source))?;
    if let Some(Value::String(message)) = top.get("error") {
        return Err(RpcError::Node {
            action: action.to_string(),
            message: message.clone(),
        });
    }
    Ok(top)
}

/// Flat string map, either the whole object (empty `key`) or the object nested under `key`.
pub fn string_map(action: &str, raw: &[u8], key: &str) -> Result<StringMap, RpcError> {
    let top = object(action, raw)?;
    let inner = select(action, top, key)?;
    typed(action, inner)
}

/// As [`string_map`], with arbitrary JSON values.
pub fn json_map(action: &str, raw: &[u8], key: &str) -> Result<JsonMap, RpcError> {
    let top = object(action, raw)?;
    let inner = select(action, top, key)?;
    typed(action, inner)
}

/// Map of flat string maps, either the whole object (empty `key`) or nested under `key`.
pub fn nested_string_map(action: &str, raw: &[u8], key: &str) -> Result<NestedStringMap, RpcError> {
    let top = object(action, raw)?;
    let inner = select(action, top, key)?;
    typed(action, inner)
}

/// String field `key` of a flat string map.
pub fn string(action: &str, raw: &[u8], key: &str) -> Result<String, RpcError> {
    let mut map = string_map(action, raw, "")?;
    map.remove(key).ok_or_else(|| missing(action, key))
}

/// String field `key` of a flat string map, parsed as a base-10 integer.
pub fn int(action: &str, raw: &[u8], key: &str) -> Result<i64, RpcError> {
    let value = string(action, raw, key)?;
    value.parse::<i64>().map_err(|_| RpcError::Parse {
        action: action.to_string(),
        key: key.to_string(),
        value,
    })
}

/// Success flag of a flat string map under the given convention.
pub fn success(action: &str, raw: &[u8], convention: &SuccessConvention) -> Result<bool, RpcError> {
    let map = string_map(action, raw, "")?;
    Ok(convention.is_satisfied(&map))
}

/// Raw JSON of field `key`.
pub fn value(action: &str, raw: &[u8], key: &str) -> Result<Value, RpcError> {
    let mut map = json_map(action, raw, "")?;
    map.remove(key).ok_or_else(|| missing(action, key))
}

/// List of strings in field `key`, accepting every encoding a node uses for it.
pub fn string_list(action: &str, raw: &[u8], key: &str) -> Result<Vec<String>, RpcError> {
    let field = value(action, raw, key)?;
    ListField::classify(field)
        .into_strings()
        .map_err(|found| RpcError::Type {
            action: action.to_string(),
            key: key.to_string(),
            found,
        })
}

fn select(action: &str, mut top: JsonMap, key: &str) -> Result<Value, RpcError> {
    if key.is_empty() {
        return Ok(Value::Object(top));
    }
    top.remove(key).ok_or_else(|| missing(action, key))
}

fn typed<T: DeserializeOwned>(action: &str, value: Value) -> Result<T, RpcError> {
    serde_json::from_value(value).map_err(|source| shape(action, source))
}

fn shape(action: &str, source: serde_json::Error) -> RpcError {
    RpcError::Shape {
        action: action.to_string(),
        source,
    }
}

fn missing(action: &str, key: &str) -> RpcError {
    RpcError::MissingKey {
        action: action.to_string(),
        key: key.to_string(),
    }
}
