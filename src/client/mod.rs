//! Remote service client contracts.
//!
//! The reconcilers never talk HTTP themselves. They are handed an implementation
//! of [`RegistrationFieldClient`] or [`ScopeClient`] which owns transport,
//! authentication and retry. Every operation resolves to a typed response or a
//! [`ClientError`]; implementations must report a missing entity as
//! [`ClientError::NotFound`] so that reads can tell drift from failure.
//!
//! [`InMemoryCidaasClient`] implements both traits over in-process state and
//! records every call, for tests and local development.

pub mod in_memory;

pub use in_memory::{ClientCall, InMemoryCidaasClient};

use crate::resource::{RegistrationField, RegistrationFieldRecord, Scope};
use std::future::Future;
use thiserror::Error;

/// Errors reported by a remote service client.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    #[error("{resource} '{key}' not found")]
    NotFound {
        /// Kind of remote object looked up
        resource: String,
        /// Key used for the lookup
        key: String,
    },

    #[error("API error (status {status}): {message}")]
    Api {
        /// HTTP status returned by the API
        status: u16,
        /// Error message from the response body
        message: String,
    },

    #[error("Transport error: {message}")]
    Transport {
        /// Description of the connection failure
        message: String,
    },

    #[error("Failed to decode response: {message}")]
    Decode {
        /// Description of the malformed response
        message: String,
    },
}

impl ClientError {
    pub fn not_found(resource: impl Into<String>, key: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
            key: key.into(),
        }
    }

    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Whether the remote object does not exist. A 404 API status counts too.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ClientError::NotFound { .. } | ClientError::Api { status: 404, .. }
        )
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(error: serde_json::Error) -> Self {
        ClientError::Decode {
            message: error.to_string(),
        }
    }
}

/// Registration field endpoints of the Cidaas API.
pub trait RegistrationFieldClient: Send + Sync {
    /// Create a field. The response echoes the stored field including its new id.
    fn create_registration_field(
        &self,
        field: &RegistrationField,
    ) -> impl Future<Output = Result<RegistrationFieldRecord, ClientError>> + Send;

    /// Fetch a field by its field key.
    fn get_registration_field(
        &self,
        field_key: &str,
    ) -> impl Future<Output = Result<RegistrationFieldRecord, ClientError>> + Send;

    /// Replace a field. `field.id` carries the remote identifier.
    fn update_registration_field(
        &self,
        field: &RegistrationField,
    ) -> impl Future<Output = Result<(), ClientError>> + Send;

    /// Delete a field by its field key.
    fn delete_registration_field(
        &self,
        field_key: &str,
    ) -> impl Future<Output = Result<(), ClientError>> + Send;
}

/// Scope endpoints of the Cidaas API.
pub trait ScopeClient: Send + Sync {
    /// Upsert a scope. A scope with `id` set updates the existing entity.
    /// The response carries the stored `_id` and scope key.
    fn create_or_update_scope(
        &self,
        scope: &Scope,
    ) -> impl Future<Output = Result<Scope, ClientError>> + Send;

    /// Fetch a scope by its scope key.
    fn get_scope(&self, scope_key: &str)
    -> impl Future<Output = Result<Scope, ClientError>> + Send;

    /// Delete a scope by its scope key.
    fn delete_scope(&self, scope_key: &str)
    -> impl Future<Output = Result<(), ClientError>> + Send;
}
