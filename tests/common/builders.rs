//! Test data builders for declared configurations.
//!
//! Each builder starts from a minimal valid configuration that can be
//! modified attribute by attribute.

use serde::Serialize;
use serde_json::{Value, json};

/// Builder for registration field configurations.
#[derive(Debug, Clone)]
pub struct RegistrationFieldConfigBuilder {
    data: Value,
}

impl RegistrationFieldConfigBuilder {
    /// A required text field `firstname`.
    pub fn new() -> Self {
        Self {
            data: json!({
                "required": true,
                "internal": false,
                "claimable": true,
                "scopes": ["profile"],
                "enabled": true,
                "is_group": false,
                "parent_group_id": "DEFAULT",
                "field_type": "CUSTOM",
                "data_type": "TEXT",
                "field_key": "firstname",
                "read_only": false,
                "order": 1,
                "locale_text_locale": "en-US",
                "locale_text_name": "First Name",
                "locale_text_language": "en",
                "locale_text_min_length": 1,
                "locale_text_max_length": 64,
                "required_msg": "First name is required"
            }),
        }
    }

    pub fn with_field_key(self, field_key: &str) -> Self {
        self.with("field_key", field_key)
    }

    pub fn with_order(self, order: i64) -> Self {
        self.with("order", order)
    }

    pub fn with<T: Serialize>(mut self, attribute: &str, value: T) -> Self {
        self.data[attribute] = serde_json::to_value(value).expect("serializable test value");
        self
    }

    pub fn without(mut self, attribute: &str) -> Self {
        if let Some(object) = self.data.as_object_mut() {
            object.remove(attribute);
        }
        self
    }

    pub fn build(self) -> Value {
        self.data
    }
}

impl Default for RegistrationFieldConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for scope configurations.
#[derive(Debug, Clone)]
pub struct ScopeConfigBuilder {
    data: Value,
}

impl ScopeConfigBuilder {
    /// Scope `read:profile` at medium security level.
    pub fn new() -> Self {
        Self {
            data: json!({
                "locale": "en-US",
                "language": "en",
                "description": "Read the user profile",
                "title": "Profile",
                "security_level": "medium",
                "scope_key": "read:profile",
                "group_name": ["default"],
                "required_user_consent": false
            }),
        }
    }

    pub fn with_scope_key(self, scope_key: &str) -> Self {
        self.with("scope_key", scope_key)
    }

    pub fn with_security_level(self, security_level: &str) -> Self {
        self.with("security_level", security_level)
    }

    pub fn with<T: Serialize>(mut self, attribute: &str, value: T) -> Self {
        self.data[attribute] = serde_json::to_value(value).expect("serializable test value");
        self
    }

    pub fn build(self) -> Value {
        self.data
    }
}

impl Default for ScopeConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
