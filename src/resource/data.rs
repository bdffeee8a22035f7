//! External state record of a managed resource.
//!
//! [`ResourceData`] is what the hosting runtime persists between runs: the
//! external identity plus a flat attribute bag keyed by the names of the
//! resource schema. Declared configuration enters through
//! [`ResourceData::from_config`] or [`ResourceData::apply_config`], both of
//! which validate it against the schema; typed access goes through
//! [`ResourceData::decode`], so reconcilers never inspect untyped values.

use crate::error::{ReconcileResult, StateError};
use crate::schema::ResourceSchema;
use crate::schema::types::describe_value;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Attribute name mirroring the external identity, when the schema declares it.
const IDENTITY_ATTRIBUTE: &str = "id";

/// State record for one resource instance.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceData {
    schema: &'static ResourceSchema,
    id: Option<String>,
    attributes: Map<String, Value>,
}

impl ResourceData {
    /// Create an empty record with no identity.
    pub fn new(schema: &'static ResourceSchema) -> Self {
        Self {
            schema,
            id: None,
            attributes: Map::new(),
        }
    }

    /// Create a record for a resource that does not exist yet from declared configuration.
    pub fn from_config(schema: &'static ResourceSchema, config: Value) -> ReconcileResult<Self> {
        let mut data = Self::new(schema);
        data.apply_config(config)?;
        Ok(data)
    }

    /// Restore a previously persisted record.
    ///
    /// Computed attributes are accepted here since they were produced by an
    /// earlier run; every value is still checked against the schema. `null`
    /// stands for a record with no attributes.
    pub fn from_state(
        schema: &'static ResourceSchema,
        id: Option<String>,
        state: Value,
    ) -> ReconcileResult<Self> {
        let attributes = match state {
            Value::Object(attributes) => attributes,
            Value::Null => Map::new(),
            other => {
                return Err(StateError::NotAnObject {
                    resource: schema.name.to_string(),
                    actual: describe_value(&other).to_string(),
                }
                .into());
            }
        };

        let mut data = Self::new(schema);
        let mut persisted_id = None;
        for (name, value) in attributes {
            if name == IDENTITY_ATTRIBUTE {
                persisted_id = value.as_str().map(str::to_owned);
                continue;
            }
            data.set(&name, value)?;
        }
        if let Some(id) = id.or(persisted_id) {
            data.set_id(id);
        }
        Ok(data)
    }

    /// Replace every declared attribute with the given configuration.
    ///
    /// Declared attributes missing from `config` are cleared; computed
    /// attributes and the identity are kept.
    pub fn apply_config(&mut self, config: Value) -> ReconcileResult<()> {
        self.schema.validate_config(&config)?;
        let mut declared = match config {
            Value::Object(declared) => declared,
            _ => Map::new(),
        };
        for attr in self.schema.declared_attributes() {
            let value = declared.remove(attr.name).unwrap_or(Value::Null);
            self.attributes.insert(attr.name.to_string(), value);
        }
        Ok(())
    }

    pub fn schema(&self) -> &'static ResourceSchema {
        self.schema
    }

    /// The external identity, if the resource exists remotely.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// Set the external identity.
    pub fn set_id(&mut self, id: impl Into<String>) {
        let id = id.into();
        if self.schema.attribute(IDENTITY_ATTRIBUTE).is_some() {
            self.attributes
                .insert(IDENTITY_ATTRIBUTE.to_string(), Value::String(id.clone()));
        }
        self.id = Some(id);
    }

    /// Clear the external identity, marking the resource absent.
    pub fn clear_id(&mut self) {
        self.id = None;
        if self.schema.attribute(IDENTITY_ATTRIBUTE).is_some() {
            self.attributes
                .insert(IDENTITY_ATTRIBUTE.to_string(), Value::Null);
        }
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name).filter(|value| !value.is_null())
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    pub fn attributes(&self) -> &Map<String, Value> {
        &self.attributes
    }

    /// Write an attribute, checking it against the schema.
    pub fn set<T: Serialize>(&mut self, name: &str, value: T) -> Result<(), StateError> {
        let attr = self
            .schema
            .attribute(name)
            .ok_or_else(|| StateError::UnknownAttribute {
                resource: self.schema.name.to_string(),
                attribute: name.to_string(),
            })?;

        let value = serde_json::to_value(value).map_err(|e| StateError::Serialization {
            attribute: name.to_string(),
            message: e.to_string(),
        })?;

        if !attr.data_type.accepts(&value) {
            return Err(StateError::TypeMismatch {
                attribute: name.to_string(),
                expected: attr.data_type.as_str().to_string(),
                actual: describe_value(&value).to_string(),
            });
        }

        self.attributes.insert(name.to_string(), value);
        Ok(())
    }

    /// Decode the attribute bag into a typed view.
    pub fn decode<T: DeserializeOwned>(&self) -> ReconcileResult<T> {
        Ok(serde_json::from_value(Value::Object(self.attributes.clone()))?)
    }

    /// Serialize the record as persisted by the hosting runtime.
    pub fn to_json(&self) -> Value {
        let mut state = self.attributes.clone();
        state.insert(
            IDENTITY_ATTRIBUTE.to_string(),
            self.id.clone().map(Value::String).unwrap_or(Value::Null),
        );
        Value::Object(state)
    }
}
