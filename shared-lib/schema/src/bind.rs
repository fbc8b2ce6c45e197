//! Field-level JSON binding helpers.
//!
//! Each message binds itself from a `serde_json::Value` through these
//! accessors. The rules are uniform across the contract:
//! - unknown keys are ignored (forward compatibility),
//! - a missing or `null` key leaves an `optional` field unset and gives
//!   an `implicit` field its zero value,
//! - a key of the wrong JSON type fails with `InvalidArgument` naming
//!   the field,
//! - repeated fields accept a bare JSON array or the wrapped
//!   `{"items": [...]}` form the generated contract uses.
//!
//! `at` is the field path prefix used in error messages, so list
//! binding can report `users[2].username`.

use error::{GatewayError, Result};
use serde_json::{Map, Value};

use crate::well_known::Timestamp;

/// Join a path prefix and a field name for error reporting.
pub fn path(at: &str, field: &str) -> String {
    if at.is_empty() {
        field.to_string()
    } else {
        format!("{at}.{field}")
    }
}

fn wrong_type(at: &str, field: &str, expected: &str) -> GatewayError {
    GatewayError::invalid_argument(format!("{}: expected {expected}", path(at, field)))
}

/// View a value as a JSON object, or fail naming the location.
pub fn as_object<'a>(value: &'a Value, at: &str) -> Result<&'a Map<String, Value>> {
    value.as_object().ok_or_else(|| {
        let what = if at.is_empty() { "request body" } else { at };
        GatewayError::invalid_argument(format!("{what}: expected a JSON object"))
    })
}

fn get<'a>(map: &'a Map<String, Value>, field: &str) -> Option<&'a Value> {
    match map.get(field) {
        None | Some(Value::Null) => None,
        Some(value) => Some(value),
    }
}

pub fn optional_i64(map: &Map<String, Value>, field: &str, at: &str) -> Result<Option<i64>> {
    match get(map, field) {
        None => Ok(None),
        Some(value) => value
            .as_i64()
            .map(Some)
            .ok_or_else(|| wrong_type(at, field, "an integer")),
    }
}

pub fn implicit_i64(map: &Map<String, Value>, field: &str, at: &str) -> Result<i64> {
    Ok(optional_i64(map, field, at)?.unwrap_or(0))
}

pub fn implicit_i32(map: &Map<String, Value>, field: &str, at: &str) -> Result<i32> {
    let value = implicit_i64(map, field, at)?;
    i32::try_from(value).map_err(|_| wrong_type(at, field, "a 32-bit integer"))
}

pub fn optional_string(map: &Map<String, Value>, field: &str, at: &str) -> Result<Option<String>> {
    match get(map, field) {
        None => Ok(None),
        Some(value) => value
            .as_str()
            .map(|s| Some(s.to_string()))
            .ok_or_else(|| wrong_type(at, field, "a string")),
    }
}

pub fn implicit_string(map: &Map<String, Value>, field: &str, at: &str) -> Result<String> {
    Ok(optional_string(map, field, at)?.unwrap_or_default())
}

pub fn implicit_bool(map: &Map<String, Value>, field: &str, at: &str) -> Result<bool> {
    match get(map, field) {
        None => Ok(false),
        Some(value) => value
            .as_bool()
            .ok_or_else(|| wrong_type(at, field, "a boolean")),
    }
}

pub fn optional_timestamp(
    map: &Map<String, Value>,
    field: &str,
    at: &str,
) -> Result<Option<Timestamp>> {
    match optional_string(map, field, at)? {
        None => Ok(None),
        Some(text) => Timestamp::parse(&text).map(Some).map_err(|_| {
            GatewayError::invalid_argument(format!(
                "{}: expected an RFC 3339 timestamp",
                path(at, field)
            ))
        }),
    }
}

/// View a value as a list of items, accepting both the bare array and
/// the wrapped `{"items": [...]}` representation of a repeated field.
pub fn as_items<'a>(value: &'a Value, at: &str) -> Result<&'a [Value]> {
    match value {
        Value::Array(items) => Ok(items),
        Value::Object(map) => match map.get("items") {
            Some(Value::Array(items)) => Ok(items),
            _ => Err(GatewayError::invalid_argument(format!("{at}: expected an array"))),
        },
        _ => Err(GatewayError::invalid_argument(format!("{at}: expected an array"))),
    }
}

/// Bind a repeated string field; missing yields the empty list.
pub fn string_list(map: &Map<String, Value>, field: &str, at: &str) -> Result<Vec<String>> {
    let Some(value) = get(map, field) else {
        return Ok(Vec::new());
    };
    let at = path(at, field);
    let items = as_items(value, &at)?;
    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            item.as_str()
                .map(|s| s.to_string())
                .ok_or_else(|| GatewayError::invalid_argument(format!("{at}[{i}]: expected a string")))
        })
        .collect()
}

/// Bind a repeated message field, reporting the index of the first
/// invalid element.
pub fn message_list<T>(
    value: &Value,
    at: &str,
    bind_one: impl Fn(&Value, &str) -> Result<T>,
) -> Result<Vec<T>> {
    let items = as_items(value, at)?;
    items
        .iter()
        .enumerate()
        .map(|(i, item)| bind_one(item, &format!("{at}[{i}]")))
        .collect()
}
