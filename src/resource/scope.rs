//! Scope resource.
//!
//! An authorization scope with one locale entry of title and description, a
//! security level, consent requirement and group membership. Create and update
//! both go through the remote create-or-update call; `_id` distinguishes them.

use crate::error::StateError;
use crate::resource::mapper::{Unflatten, primary_locale};
use crate::resource::{EntityKind, ResourceData};
use serde::{Deserialize, Serialize};

/// Declared configuration of a scope, decoded from the attribute bag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopeConfig {
    pub locale: String,
    pub language: String,
    pub description: String,
    pub title: String,
    pub security_level: String,
    pub scope_key: String,
    pub group_name: Vec<String>,
    pub required_user_consent: bool,
}

impl ScopeConfig {
    /// Build the scope payload with every attribute taken verbatim.
    pub fn flatten(&self) -> Scope {
        Scope {
            id: None,
            locale_wise_description: vec![ScopeLocaleDescription {
                locale: self.locale.clone(),
                language: self.language.clone(),
                title: self.title.clone(),
                description: self.description.clone(),
            }],
            security_level: self.security_level.clone(),
            scope_key: self.scope_key.clone(),
            required_user_consent: self.required_user_consent,
            group_name: self.group_name.clone(),
        }
    }
}

/// Scope as exchanged with the Cidaas API, both as payload and as response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Scope {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub locale_wise_description: Vec<ScopeLocaleDescription>,
    pub security_level: String,
    pub scope_key: String,
    pub required_user_consent: bool,
    #[serde(rename = "group_name")]
    pub group_name: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScopeLocaleDescription {
    pub locale: String,
    pub language: String,
    pub title: String,
    pub description: String,
}

impl Unflatten for Scope {
    fn unflatten(&self, data: &mut ResourceData) -> Result<(), StateError> {
        if let Some(text) =
            primary_locale(EntityKind::Scope, &self.scope_key, &self.locale_wise_description)
        {
            data.set("locale", &text.locale)?;
            data.set("language", &text.language)?;
            data.set("description", &text.description)?;
            data.set("title", &text.title)?;
        }
        data.set("security_level", &self.security_level)?;
        data.set("required_user_consent", self.required_user_consent)?;
        data.set("_id", &self.id)?;
        data.set("scope_key", &self.scope_key)?;
        data.set("group_name", &self.group_name)?;
        Ok(())
    }
}
