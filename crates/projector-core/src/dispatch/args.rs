use serde_json::{Map, Value};

use super::MethodError;

/// Read-only view over a call's argument payload.
///
/// A `null` or absent payload behaves like an empty map. Explicit `null`
/// values for a key count as missing.
pub(super) struct Arguments<'a> {
    map: Option<&'a Map<String, Value>>,
}

impl<'a> Arguments<'a> {
    pub(super) fn parse(value: &'a Value) -> Result<Self, MethodError> {
        match value {
            Value::Null => Ok(Self { map: None }),
            Value::Object(map) => Ok(Self { map: Some(map) }),
            _ => Err(MethodError::invalid_arguments("Arguments must be a map")),
        }
    }

    fn get(&self, key: &str) -> Option<&'a Value> {
        self.map?.get(key).filter(|v| !v.is_null())
    }

    pub(super) fn required_index(&self, key: &str) -> Result<i64, MethodError> {
        let value = self
            .get(key)
            .ok_or_else(|| MethodError::missing_argument(format!("{key} is required")))?;
        as_i64(key, value)
    }

    pub(super) fn optional_index(&self, key: &str, default: i64) -> Result<i64, MethodError> {
        self.get(key).map_or(Ok(default), |v| as_i64(key, v))
    }

    pub(super) fn optional_i32(&self, key: &str, default: i32) -> Result<i32, MethodError> {
        let Some(value) = self.get(key) else {
            return Ok(default);
        };
        i32::try_from(as_i64(key, value)?)
            .map_err(|_| MethodError::invalid_arguments(format!("{key} is out of range")))
    }

    pub(super) fn optional_bool(&self, key: &str, default: bool) -> Result<bool, MethodError> {
        match self.get(key) {
            None => Ok(default),
            Some(Value::Bool(b)) => Ok(*b),
            Some(_) => Err(MethodError::invalid_arguments(format!(
                "{key} must be a boolean"
            ))),
        }
    }

    pub(super) fn optional_str(&self, key: &str) -> Result<&'a str, MethodError> {
        match self.get(key) {
            None => Ok(""),
            Some(Value::String(s)) => Ok(s),
            Some(_) => Err(MethodError::invalid_arguments(format!(
                "{key} must be a string"
            ))),
        }
    }
}

fn as_i64(key: &str, value: &Value) -> Result<i64, MethodError> {
    value
        .as_i64()
        .ok_or_else(|| MethodError::invalid_arguments(format!("{key} must be an integer")))
}
