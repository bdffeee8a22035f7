//! Attribute schema type definitions.
//!
//! A [`ResourceSchema`] names every attribute of the external configuration
//! surface of one entity kind, together with its value type and whether the
//! caller declares it or the server computes it.

use serde::Serialize;
use serde_json::Value;

/// Attribute schema for one resource kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResourceSchema {
    /// Resource type name as known to the hosting runtime
    pub name: &'static str,
    /// Attribute definitions in declaration order
    pub attributes: &'static [AttributeSchema],
}

impl ResourceSchema {
    /// Look up an attribute by name.
    pub fn attribute(&self, name: &str) -> Option<&'static AttributeSchema> {
        self.attributes.iter().find(|attr| attr.name == name)
    }

    /// Attributes the caller must declare.
    pub fn required_attributes(&self) -> impl Iterator<Item = &'static AttributeSchema> {
        self.attributes
            .iter()
            .filter(|attr| attr.presence == Presence::Required)
    }

    /// Attributes the caller may declare (required or optional).
    pub fn declared_attributes(&self) -> impl Iterator<Item = &'static AttributeSchema> {
        self.attributes
            .iter()
            .filter(|attr| attr.presence != Presence::Computed)
    }

    /// Attributes populated by the reconciler from remote responses.
    pub fn computed_attributes(&self) -> impl Iterator<Item = &'static AttributeSchema> {
        self.attributes
            .iter()
            .filter(|attr| attr.presence == Presence::Computed)
    }
}

/// Definition of a single attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AttributeSchema {
    /// Attribute name
    pub name: &'static str,
    /// Value type
    #[serde(rename = "type")]
    pub data_type: AttributeType,
    /// Who supplies the value
    pub presence: Presence,
}

impl AttributeSchema {
    pub const fn required(name: &'static str, data_type: AttributeType) -> Self {
        Self {
            name,
            data_type,
            presence: Presence::Required,
        }
    }

    pub const fn optional(name: &'static str, data_type: AttributeType) -> Self {
        Self {
            name,
            data_type,
            presence: Presence::Optional,
        }
    }

    pub const fn computed(name: &'static str, data_type: AttributeType) -> Self {
        Self {
            name,
            data_type,
            presence: Presence::Computed,
        }
    }
}

/// Attribute value types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum AttributeType {
    String,
    Bool,
    Integer,
    /// Ordered list of strings
    StringList,
    /// Ordered list of nested objects
    ObjectList,
}

impl AttributeType {
    /// Whether `value` is acceptable for this type. `null` always is and means unset.
    pub fn accepts(&self, value: &Value) -> bool {
        match (self, value) {
            (_, Value::Null) => true,
            (AttributeType::String, Value::String(_)) => true,
            (AttributeType::Bool, Value::Bool(_)) => true,
            (AttributeType::Integer, Value::Number(n)) => n.is_i64(),
            (AttributeType::StringList, Value::Array(items)) => items.iter().all(Value::is_string),
            (AttributeType::ObjectList, Value::Array(items)) => items.iter().all(Value::is_object),
            _ => false,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AttributeType::String => "string",
            AttributeType::Bool => "bool",
            AttributeType::Integer => "integer",
            AttributeType::StringList => "list of strings",
            AttributeType::ObjectList => "list of objects",
        }
    }
}

/// Describe the JSON type of a value for error messages.
pub fn describe_value(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(n) if n.is_i64() => "integer",
        Value::Number(n) if n.is_u64() => "unsigned integer",
        Value::Number(_) => "decimal",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Who supplies an attribute value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Presence {
    /// Must be declared by the caller
    Required,
    /// May be declared by the caller
    Optional,
    /// Set by the reconciler from remote responses
    Computed,
}
