//! Conversions between [`Value`] and TOML.

use std::collections::HashMap;

use plugboard_protocols::Value;

pub(crate) fn to_toml(value: Value) -> toml::Value {
    match value {
        Value::Bool(b) => toml::Value::Boolean(b),
        Value::Int(i) => toml::Value::Integer(i),
        Value::Float(f) => toml::Value::Float(f),
        Value::String(s) => toml::Value::String(s),
        Value::List(items) => toml::Value::Array(items.into_iter().map(toml::Value::String).collect()),
    }
}

/// Tables are not values; every other TOML type maps onto one.
pub(crate) fn from_toml(value: &toml::Value) -> Option<Value> {
    match value {
        toml::Value::Boolean(b) => Some(Value::Bool(*b)),
        toml::Value::Integer(i) => Some(Value::Int(*i)),
        toml::Value::Float(f) => Some(Value::Float(*f)),
        toml::Value::String(s) => Some(Value::String(s.clone())),
        toml::Value::Datetime(dt) => Some(Value::String(dt.to_string())),
        toml::Value::Array(items) => Some(Value::List(items.iter().map(item_string).collect())),
        toml::Value::Table(_) => None,
    }
}

fn item_string(item: &toml::Value) -> String {
    match item {
        toml::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Flatten nested tables into `a/b/key` entries.
pub(crate) fn flatten(table: &toml::Table, prefix: &str, out: &mut HashMap<String, Value>) {
    for (key, value) in table {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}/{key}")
        };
        match value {
            toml::Value::Table(inner) => flatten(inner, &path, out),
            other => {
                if let Some(value) = from_toml(other) {
                    out.insert(path, value);
                }
            }
        }
    }
}
