//! Record conformance
//!
//! Turns raw upstream record objects into schema-conformed rows. The
//! tolerance policy is coerce-or-null: declared fields absent upstream are
//! emitted as null, unknown upstream fields are dropped, and a value that
//! does not match its declared type is coerced when a lossless coercion
//! exists and nulled otherwise. Conformance never fails a record.

use serde::Serialize;
use serde_json::{Map, Number, Value};
use tracing::{debug, warn};

use crate::schema::{FieldList, FieldSchema, FieldType};

/// One emitted row: an ordered JSON object whose keys are exactly the
/// declared fields of the producing stream, in declaration order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Record {
    #[serde(flatten)]
    values: Map<String, Value>,
}

impl Record {
    /// Get a field value.
    ///
    /// Returns `None` only for undeclared names; declared-but-absent fields
    /// are present as `Value::Null`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Check if a declared field was emitted as null.
    #[must_use]
    pub fn is_null(&self, name: &str) -> bool {
        matches!(self.values.get(name), Some(Value::Null))
    }

    /// Get all field names in declaration order.
    #[must_use]
    pub fn field_names(&self) -> Vec<&str> {
        self.values.keys().map(String::as_str).collect()
    }

    /// Get the number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the record has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over fields in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.values.iter()
    }

    /// Convert into the underlying JSON object.
    #[must_use]
    pub fn into_value(self) -> Value {
        Value::Object(self.values)
    }
}

/// Conform one raw upstream record against a declared field list.
///
/// The output key set always equals the declared field set. A non-object
/// raw value produces an all-null record rather than an error; the envelope
/// shape is validated upstream by the stream descriptor.
#[must_use]
pub fn conform(schema: &FieldList, raw: &Value) -> Record {
    let empty = Map::new();
    let source = match raw.as_object() {
        Some(obj) => obj,
        None => {
            warn!(got = %json_type_name(raw), "record is not an object, emitting all-null row");
            &empty
        }
    };

    let mut values = Map::new();
    for field in schema.iter() {
        let value = match source.get(&field.name) {
            Some(v) => conform_value(field, v),
            None => Value::Null,
        };
        values.insert(field.name.clone(), value);
    }

    for name in source.keys() {
        if !schema.contains(name) {
            debug!(field = %name, "dropping undeclared upstream field");
        }
    }

    Record { values }
}

/// Conform a single value to its declared field type.
fn conform_value(field: &FieldSchema, value: &Value) -> Value {
    if value.is_null() {
        return Value::Null;
    }

    let coerced = match &field.field_type {
        FieldType::Integer => coerce_integer(value),
        FieldType::Number => coerce_number(value),
        FieldType::String => coerce_string(value),
        FieldType::Boolean => coerce_boolean(value),
        FieldType::DateTime => coerce_date_time(value),
        FieldType::Object(fields) => coerce_object(fields, value),
    };

    match coerced {
        Some(v) => v,
        None => {
            warn!(
                field = %field.name,
                declared = %field.field_type.json_type(),
                got = %json_type_name(value),
                "field value does not match declared type, emitting null"
            );
            Value::Null
        }
    }
}

fn coerce_integer(value: &Value) -> Option<Value> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                Some(Value::Number(Number::from(i)))
            } else {
                // Whole-valued floats are common in loosely typed payloads.
                n.as_f64()
                    .filter(|f| f.fract() == 0.0 && f.is_finite())
                    .map(|f| Value::Number(Number::from(f as i64)))
            }
        }
        Value::String(s) => s.trim().parse::<i64>().ok().map(Value::from),
        _ => None,
    }
}

fn coerce_number(value: &Value) -> Option<Value> {
    match value {
        Value::Number(_) => Some(value.clone()),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .ok()
            .and_then(Number::from_f64)
            .map(Value::Number),
        _ => None,
    }
}

fn coerce_string(value: &Value) -> Option<Value> {
    match value {
        Value::String(_) => Some(value.clone()),
        Value::Number(n) => Some(Value::String(n.to_string())),
        Value::Bool(b) => Some(Value::String(b.to_string())),
        _ => None,
    }
}

fn coerce_boolean(value: &Value) -> Option<Value> {
    match value {
        Value::Bool(_) => Some(value.clone()),
        Value::Number(n) => match n.as_i64() {
            Some(0) => Some(Value::Bool(false)),
            Some(1) => Some(Value::Bool(true)),
            _ => None,
        },
        Value::String(s) => match s.trim() {
            "true" => Some(Value::Bool(true)),
            "false" => Some(Value::Bool(false)),
            _ => None,
        },
        _ => None,
    }
}

fn coerce_date_time(value: &Value) -> Option<Value> {
    match value {
        Value::String(s) => chrono::DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|_| value.clone()),
        _ => None,
    }
}

fn coerce_object(fields: &FieldList, value: &Value) -> Option<Value> {
    value
        .as_object()
        .map(|_| conform(fields, value).into_value())
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
