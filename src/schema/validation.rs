//! Validation of declared configuration against a resource schema.
//!
//! Runs at the boundary where the hosting runtime hands over an attribute bag,
//! before it is decoded into a typed configuration struct.

use super::types::{Presence, ResourceSchema, describe_value};
use crate::error::{ValidationError, ValidationErrors, ValidationResult};
use serde_json::Value;

impl ResourceSchema {
    /// Validate a declared configuration object against this schema.
    ///
    /// All problems are collected: unknown attributes, computed attributes given
    /// as input, values of the wrong type, and missing required attributes.
    pub fn validate_config(&self, config: &Value) -> ValidationResult<()> {
        let obj = config.as_object().ok_or_else(|| {
            ValidationErrors::from(ValidationError::NotAnObject {
                actual: describe_value(config).to_string(),
            })
        })?;

        let mut errors = ValidationErrors::new();

        for (name, value) in obj {
            let Some(attr) = self.attribute(name) else {
                errors.push(ValidationError::UnknownAttribute {
                    attribute: name.clone(),
                    resource: self.name.to_string(),
                });
                continue;
            };

            if attr.presence == Presence::Computed {
                errors.push(ValidationError::ComputedAttributeDeclared {
                    attribute: name.clone(),
                });
                continue;
            }

            if !attr.data_type.accepts(value) {
                errors.push(ValidationError::invalid_type(
                    name.as_str(),
                    attr.data_type.as_str(),
                    describe_value(value),
                ));
            }
        }

        for attr in self.required_attributes() {
            if obj.get(attr.name).is_none_or(Value::is_null) {
                errors.push(ValidationError::missing_required(attr.name));
            }
        }

        errors.into_result()
    }
}
