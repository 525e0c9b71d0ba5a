//! Loose casts from raw JSON values to the scalar types entities carry

use crate::error::TransformError;
use serde_json::{Map, Value};

/// Field lookup on a raw record; JSON null counts as missing
pub(crate) struct Raw<'a> {
    entity: &'static str,
    fields: &'a Map<String, Value>,
}

impl<'a> Raw<'a> {
    pub fn new(entity: &'static str, value: &'a Value) -> Result<Self, TransformError> {
        match value {
            Value::Object(fields) => Ok(Self { entity, fields }),
            _ => Err(TransformError::NotAnObject { entity }),
        }
    }

    fn get(&self, field: &str) -> Option<&'a Value> {
        self.fields.get(field).filter(|v| !v.is_null())
    }

    pub fn string(&self, field: &'static str) -> Result<String, TransformError> {
        Ok(self.opt_string(field)?.unwrap_or_default())
    }

    pub fn opt_string(&self, field: &'static str) -> Result<Option<String>, TransformError> {
        match self.get(field) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(Value::Number(n)) => Ok(Some(n.to_string())),
            Some(_) => Err(TransformError::MalformedField {
                entity: self.entity,
                field,
                expected: "a string",
            }),
        }
    }

    pub fn bool_or(&self, field: &'static str, default: bool) -> bool {
        self.get(field).map(to_bool).unwrap_or(default)
    }

    pub fn int(&self, field: &'static str) -> Result<i64, TransformError> {
        match self.get(field) {
            None => Ok(0),
            Some(value @ (Value::Bool(_) | Value::Number(_) | Value::String(_))) => {
                Ok(to_int(value))
            }
            Some(_) => Err(TransformError::MalformedField {
                entity: self.entity,
                field,
                expected: "an integer",
            }),
        }
    }
}

/// Truthiness cast: empty, zero and "0" are false
pub fn to_bool(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !(s.is_empty() || s == "0"),
        Value::Array(items) => !items.is_empty(),
        Value::Object(_) => true,
    }
}

/// Integer cast: floats truncate, strings use their leading digits
pub fn to_int(value: &Value) -> i64 {
    match value {
        Value::Bool(b) => i64::from(*b),
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.trunc() as i64))
            .unwrap_or(0),
        Value::String(s) => leading_int(s),
        _ => 0,
    }
}

fn leading_int(s: &str) -> i64 {
    let s = s.trim_start();
    let (sign, digits) = match s.as_bytes().first() {
        Some(b'-') => (-1, &s[1..]),
        Some(b'+') => (1, &s[1..]),
        _ => (1, s),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());

    digits[..end]
        .parse::<i64>()
        .map(|n| sign * n)
        .unwrap_or(0)
}

/// Null, `{}` and `[]` carry no entity
pub fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}
