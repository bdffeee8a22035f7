//! Registration field resource.
//!
//! A registration field is a form-field definition on the Cidaas registration
//! page: typed attributes, one locale entry of display text and validation
//! messages, and length constraints. The external identity is `field_key`;
//! `registration_field_id` is assigned by the server on create and must be
//! round-tripped on every update since updates replace the whole object.

use crate::error::StateError;
use crate::resource::mapper::{Unflatten, null_as_default, primary_locale};
use crate::resource::{EntityKind, ResourceData};
use serde::{Deserialize, Serialize};

/// Declared configuration of a registration field, decoded from the attribute bag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationFieldConfig {
    pub required: bool,
    pub internal: bool,
    pub claimable: bool,
    pub scopes: Vec<String>,
    pub enabled: bool,
    pub is_group: bool,
    pub parent_group_id: String,
    pub field_type: String,
    pub data_type: String,
    pub field_key: String,
    pub read_only: bool,
    pub order: i64,
    pub locale_text_locale: String,
    pub locale_text_name: String,
    pub locale_text_language: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub locale_text_min_length: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub locale_text_max_length: i64,
    #[serde(default)]
    pub min_length_error_msg: Option<String>,
    #[serde(default)]
    pub max_length_error_msg: Option<String>,
    #[serde(default)]
    pub required_msg: Option<String>,
}

impl RegistrationFieldConfig {
    /// Build the create payload. The remote id is left unset and
    /// `base_data_type` takes the given write-side default.
    pub fn flatten(&self, base_data_type: &str) -> RegistrationField {
        RegistrationField {
            id: None,
            parent_group_id: self.parent_group_id.clone(),
            is_group: self.is_group,
            data_type: self.data_type.clone(),
            field_key: self.field_key.clone(),
            field_type: self.field_type.clone(),
            base_data_type: base_data_type.to_string(),
            required: self.required,
            enabled: self.enabled,
            read_only: self.read_only,
            internal: self.internal,
            claimable: self.claimable,
            order: self.order,
            scopes: self.scopes.clone(),
            locale_text: LocaleText {
                locale: self.locale_text_locale.clone(),
                name: self.locale_text_name.clone(),
                language: self.locale_text_language.clone(),
                required_msg: self.required_msg.clone(),
                min_length_msg: self.min_length_error_msg.clone(),
                max_length_msg: self.max_length_error_msg.clone(),
            },
            field_definition: FieldDefinition {
                locale: self.locale_text_locale.clone(),
                name: self.locale_text_name.clone(),
                language: self.locale_text_language.clone(),
                min_length: self.locale_text_min_length,
                max_length: self.locale_text_max_length,
            },
        }
    }
}

/// Registration field as written to the Cidaas API (create and update payload).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationField {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(rename = "parent_group_id")]
    pub parent_group_id: String,
    #[serde(rename = "is_group")]
    pub is_group: bool,
    pub data_type: String,
    pub field_key: String,
    pub field_type: String,
    pub base_data_type: String,
    pub required: bool,
    pub enabled: bool,
    pub read_only: bool,
    pub internal: bool,
    pub claimable: bool,
    pub order: i64,
    pub scopes: Vec<String>,
    pub locale_text: LocaleText,
    pub field_definition: FieldDefinition,
}

/// Registration field as returned by the Cidaas API.
///
/// Unlike the write payload it carries every locale entry, the server-computed
/// `is_list` flag and app-specific attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegistrationFieldRecord {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "parent_group_id")]
    pub parent_group_id: String,
    #[serde(rename = "is_group")]
    pub is_group: bool,
    #[serde(rename = "is_list")]
    pub is_list: bool,
    pub data_type: String,
    pub field_key: String,
    pub field_type: String,
    pub base_data_type: String,
    pub required: bool,
    pub enabled: bool,
    pub read_only: bool,
    pub internal: bool,
    pub claimable: bool,
    pub order: i64,
    pub scopes: Vec<String>,
    pub locale_text: Vec<LocaleText>,
    pub field_definition: FieldDefinition,
    pub app_attributes: Vec<AppAttribute>,
}

impl RegistrationFieldRecord {
    /// The record a server holds after accepting `field` under `id`.
    pub fn echo(field: &RegistrationField, id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            parent_group_id: field.parent_group_id.clone(),
            is_group: field.is_group,
            is_list: false,
            data_type: field.data_type.clone(),
            field_key: field.field_key.clone(),
            field_type: field.field_type.clone(),
            base_data_type: field.base_data_type.clone(),
            required: field.required,
            enabled: field.enabled,
            read_only: field.read_only,
            internal: field.internal,
            claimable: field.claimable,
            order: field.order,
            scopes: field.scopes.clone(),
            locale_text: vec![field.locale_text.clone()],
            field_definition: field.field_definition.clone(),
            app_attributes: Vec::new(),
        }
    }
}

/// Display text and validation messages for one locale.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocaleText {
    pub locale: String,
    pub name: String,
    pub language: String,
    #[serde(rename = "required", skip_serializing_if = "Option::is_none")]
    pub required_msg: Option<String>,
    #[serde(rename = "minLength", skip_serializing_if = "Option::is_none")]
    pub min_length_msg: Option<String>,
    #[serde(rename = "maxLength", skip_serializing_if = "Option::is_none")]
    pub max_length_msg: Option<String>,
}

/// Length constraints of a field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FieldDefinition {
    pub locale: String,
    pub name: String,
    pub language: String,
    pub min_length: i64,
    pub max_length: i64,
}

/// Server-side app metadata attached to a field. Never written.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppAttribute {
    pub name: String,
    pub value: String,
    pub datatype: String,
}

impl Unflatten for RegistrationFieldRecord {
    fn unflatten(&self, data: &mut ResourceData) -> Result<(), StateError> {
        data.set("enabled", self.enabled)?;
        data.set("field_key", &self.field_key)?;
        data.set("parent_group_id", &self.parent_group_id)?;
        data.set("is_group", self.is_group)?;
        data.set("data_type", &self.data_type)?;
        data.set("required", self.required)?;
        data.set("read_only", self.read_only)?;
        data.set("internal", self.internal)?;
        data.set("scopes", &self.scopes)?;
        data.set("claimable", self.claimable)?;
        data.set("order", self.order)?;
        data.set("field_type", &self.field_type)?;
        data.set("registration_field_id", &self.id)?;
        data.set("base_data_type", &self.base_data_type)?;
        data.set("is_list", self.is_list)?;
        data.set("app_attributes", &self.app_attributes)?;

        if let Some(text) =
            primary_locale(EntityKind::RegistrationField, &self.field_key, &self.locale_text)
        {
            data.set("locale_text_locale", &text.locale)?;
            data.set("locale_text_name", &text.name)?;
            data.set("locale_text_language", &text.language)?;
            data.set("min_length_error_msg", &text.min_length_msg)?;
            data.set("max_length_error_msg", &text.max_length_msg)?;
            data.set("required_msg", &text.required_msg)?;
        }

        data.set("locale_text_min_length", self.field_definition.min_length)?;
        data.set("locale_text_max_length", self.field_definition.max_length)?;
        Ok(())
    }
}
