use std::collections::HashMap;
use std::fmt::Display;

use serde_json::{Map, Value};

use super::error::RpcError;

/// Flat string-to-string response object.
pub type StringMap = HashMap<String, String>;

/// Flat response object whose values are heterogeneously typed.
pub type JsonMap = Map<String, Value>;

/// Response object keyed by an identifier, each entry a flat string map.
pub type NestedStringMap = HashMap<String, StringMap>;

/// A single action call: the action name plus its parameter bag.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionRequest {
    action: String,
    params: Map<String, Value>,
}

impl ActionRequest {
    /// Builds a request from a JSON parameter value.
    ///
    /// `params` must be a JSON object or `null` (no parameters).
    pub fn new(action: &str, params: Value) -> Result<Self, RpcError> {
        let params = match params {
            Value::Object(map) => map,
            Value::Null => Map::new(),
            other => {
                return Err(RpcError::Serialize {
                    action: action.to_string(),
                    reason: format!("parameters must be a JSON object, got {}", json_kind(&other)),
                });
            },
        };

        Ok(Self {
            action: action.to_string(),
            params,
        })
    }

    pub fn action(&self) -> &str {
        &self.action
    }

    /// Returns the request body with the action injected.
    ///
    /// A caller-supplied `action` parameter is always overwritten.
    pub fn into_body(self) -> Value {
        let mut params = self.params;
        params.insert("action".to_string(), Value::String(self.action));
        Value::Object(params)
    }
}

/// How an action reports success.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuccessConvention {
    /// Success is the mere presence of a `"success"` field. Its value is ignored.
    Presence,
    /// Success is the named field being present with the string value `"1"`.
    FlagEqualsOne(String),
}

impl SuccessConvention {
    pub fn flag(key: &str) -> Self {
        SuccessConvention::FlagEqualsOne(key.to_string())
    }

    /// Maps the key-based form: an empty key selects [`SuccessConvention::Presence`].
    pub fn from_key(key: &str) -> Self {
        if key.is_empty() {
            SuccessConvention::Presence
        } else {
            SuccessConvention::flag(key)
        }
    }

    pub(crate) fn is_satisfied(&self, response: &StringMap) -> bool {
        match self {
            SuccessConvention::Presence => response.contains_key("success"),
            SuccessConvention::FlagEqualsOne(key) => response.get(key).is_some_and(|v| v == "1"),
        }
    }
}

/// The runtime encodings a list-typed response field arrives in.
///
/// Nodes send the same logical list as a JSON array, or as `""` when there is
/// nothing to return.
#[derive(Debug, Clone, PartialEq)]
pub enum ListField {
    /// An array whose elements are all strings.
    Strings(Vec<String>),
    /// An array with at least one element that is not a string.
    Untyped(Vec<Value>),
    /// A scalar string. Only `""` is interpretable, as the empty list.
    Scalar(String),
    /// Any other JSON value.
    Other(Value),
}

impl ListField {
    pub fn classify(value: Value) -> Self {
        match value {
            Value::Array(items) if items.iter().all(Value::is_string) => {
                ListField::Strings(items.into_iter().filter_map(into_string).collect())
            },
            Value::Array(items) => ListField::Untyped(items),
            Value::String(s) => ListField::Scalar(s),
            other => ListField::Other(other),
        }
    }

    /// Resolves the field to a list, or describes what was found instead.
    pub fn into_strings(self) -> Result<Vec<String>, String> {
        match self {
            ListField::Strings(items) => Ok(items),
            ListField::Untyped(items) => items
                .into_iter()
                .enumerate()
                .map(|(index, item)| match item {
                    Value::String(s) => Ok(s),
                    other => Err(format!("{} at index {}", json_kind(&other), index)),
                })
                .collect(),
            ListField::Scalar(s) if s.is_empty() => Ok(Vec::new()),
            ListField::Scalar(s) => Err(format!("the string {:?}", s)),
            ListField::Other(other) => Err(json_kind(&other).to_string()),
        }
    }
}

fn into_string(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        _ => None,
    }
}

/// Human readable name of a JSON value's type, used in error messages.
pub(crate) fn json_kind(value: &Value) -> JsonKind {
    match value {
        Value::Null => JsonKind("null"),
        Value::Bool(_) => JsonKind("a boolean"),
        Value::Number(_) => JsonKind("a number"),
        Value::String(_) => JsonKind("a string"),
        Value::Array(_) => JsonKind("an array"),
        Value::Object(_) => JsonKind("an object"),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct JsonKind(&'static str);

impl Display for JsonKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
