//! Attribute schemas of the managed Cidaas resources.
//!
//! Attribute names are the contract with callers and must stay stable.

use crate::schema::types::{AttributeSchema, AttributeType as T, ResourceSchema};

/// Schema of the `cidaas_registration_field` resource.
pub static REGISTRATION_FIELD: ResourceSchema = ResourceSchema {
    name: "cidaas_registration_field",
    attributes: &[
        AttributeSchema::required("required", T::Bool),
        AttributeSchema::required("internal", T::Bool),
        AttributeSchema::required("claimable", T::Bool),
        AttributeSchema::required("scopes", T::StringList),
        AttributeSchema::required("enabled", T::Bool),
        AttributeSchema::required("is_group", T::Bool),
        AttributeSchema::computed("is_list", T::Bool),
        AttributeSchema::required("parent_group_id", T::String),
        AttributeSchema::required("field_type", T::String),
        AttributeSchema::required("data_type", T::String),
        AttributeSchema::required("field_key", T::String),
        AttributeSchema::required("read_only", T::Bool),
        AttributeSchema::required("order", T::Integer),
        AttributeSchema::required("locale_text_locale", T::String),
        AttributeSchema::required("locale_text_name", T::String),
        AttributeSchema::required("locale_text_language", T::String),
        AttributeSchema::optional("locale_text_min_length", T::Integer),
        AttributeSchema::optional("locale_text_max_length", T::Integer),
        AttributeSchema::optional("min_length_error_msg", T::String),
        AttributeSchema::optional("max_length_error_msg", T::String),
        AttributeSchema::optional("required_msg", T::String),
        AttributeSchema::computed("registration_field_id", T::String),
        AttributeSchema::computed("base_data_type", T::String),
        AttributeSchema::computed("app_attributes", T::ObjectList),
    ],
};

/// Schema of the `cidaas_scope` resource.
pub static SCOPE: ResourceSchema = ResourceSchema {
    name: "cidaas_scope",
    attributes: &[
        AttributeSchema::computed("_id", T::String),
        AttributeSchema::computed("id", T::String),
        AttributeSchema::required("locale", T::String),
        AttributeSchema::required("language", T::String),
        AttributeSchema::required("description", T::String),
        AttributeSchema::required("title", T::String),
        AttributeSchema::required("security_level", T::String),
        AttributeSchema::required("scope_key", T::String),
        AttributeSchema::required("group_name", T::StringList),
        AttributeSchema::required("required_user_consent", T::Bool),
    ],
};
