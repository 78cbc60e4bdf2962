//! Field schema model
//!
//! Types for declaring the shape of records a stream emits: field names,
//! types, descriptions, and value enumerations. A schema is static
//! configuration, built once when a stream descriptor is constructed.

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// Data type of a declared field.
///
/// Every field has exactly one type; nested objects carry their own ordered
/// field list, one level per `Object` wrapper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Integer value.
    Integer,
    /// Floating-point value.
    Number,
    /// String/text value.
    String,
    /// Boolean value.
    Boolean,
    /// RFC 3339 date/time value, carried as a string on the wire.
    DateTime,
    /// Nested object with its own declared fields.
    Object(FieldList),
}

impl FieldType {
    /// Get the JSON-Schema type name for this field type.
    #[must_use]
    pub fn json_type(&self) -> &'static str {
        match self {
            FieldType::Integer => "integer",
            FieldType::Number => "number",
            FieldType::String | FieldType::DateTime => "string",
            FieldType::Boolean => "boolean",
            FieldType::Object(_) => "object",
        }
    }

    /// Check if this is a nested object type.
    #[must_use]
    pub fn is_object(&self) -> bool {
        matches!(self, FieldType::Object(_))
    }
}

/// A single declared field of a stream schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSchema {
    /// Field name as it appears in upstream records and emitted rows.
    pub name: String,

    /// Data type of this field.
    pub field_type: FieldType,

    /// Human-readable description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Possible values for enumerated string fields.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub allowed_values: Vec<String>,
}

impl FieldSchema {
    /// Create a new field with the given name and type.
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
            description: None,
            allowed_values: Vec::new(),
        }
    }

    /// Create an integer field.
    pub fn integer(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Integer)
    }

    /// Create a number field.
    pub fn number(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Number)
    }

    /// Create a string field.
    pub fn string(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::String)
    }

    /// Create a boolean field.
    pub fn boolean(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::Boolean)
    }

    /// Create a date/time field.
    pub fn date_time(name: impl Into<String>) -> Self {
        Self::new(name, FieldType::DateTime)
    }

    /// Create a nested object field with the given sub-fields.
    pub fn object(name: impl Into<String>, fields: FieldList) -> Self {
        Self::new(name, FieldType::Object(fields))
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set allowed values for enumerated fields.
    #[must_use]
    pub fn with_allowed_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_values = values.into_iter().map(Into::into).collect();
        self
    }

    /// Render this field as a JSON-Schema property definition.
    ///
    /// Every declared field is nullable: absent or mismatched upstream
    /// values are emitted as null rather than rejected, so the type is a
    /// `[<type>, "null"]` union.
    #[must_use]
    pub fn to_json_schema(&self) -> Value {
        let mut prop = Map::new();
        prop.insert(
            "type".to_string(),
            json!([self.field_type.json_type(), "null"]),
        );

        if let FieldType::DateTime = self.field_type {
            prop.insert("format".to_string(), json!("date-time"));
        }

        if let FieldType::Object(ref fields) = self.field_type {
            prop.insert("properties".to_string(), fields.properties_json());
        }

        if !self.allowed_values.is_empty() {
            prop.insert("enum".to_string(), json!(self.allowed_values));
        }

        if let Some(ref description) = self.description {
            prop.insert("description".to_string(), json!(description));
        }

        Value::Object(prop)
    }
}

/// An ordered list of declared fields.
///
/// Order is significant: emitted records and schema renderings list fields
/// in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldList {
    fields: Vec<FieldSchema>,
}

impl FieldList {
    /// Create a new empty field list.
    #[must_use]
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Append a field using builder pattern.
    #[must_use]
    pub fn with_field(mut self, field: FieldSchema) -> Self {
        self.fields.push(field);
        self
    }

    /// Append a field.
    pub fn push(&mut self, field: FieldSchema) {
        self.fields.push(field);
    }

    /// Find a field by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Check if a field is declared.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.fields.iter().any(|f| f.name == name)
    }

    /// Iterate over fields in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &FieldSchema> {
        self.fields.iter()
    }

    /// Get all field names in declaration order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    /// Get the number of declared fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Check if the list is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Render the declared fields as a JSON-Schema object definition.
    #[must_use]
    pub fn to_json_schema(&self) -> Value {
        let mut schema = Map::new();
        schema.insert("type".to_string(), json!("object"));
        schema.insert("properties".to_string(), self.properties_json());
        Value::Object(schema)
    }

    /// Render only the `properties` map, in declaration order.
    fn properties_json(&self) -> Value {
        let mut properties = Map::new();
        for field in &self.fields {
            properties.insert(field.name.clone(), field.to_json_schema());
        }
        Value::Object(properties)
    }
}

impl FromIterator<FieldSchema> for FieldList {
    fn from_iter<T: IntoIterator<Item = FieldSchema>>(iter: T) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}
