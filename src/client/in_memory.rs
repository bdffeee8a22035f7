//! In-memory implementation of the Cidaas client contracts.
//!
//! [`InMemoryCidaasClient`] keeps registration fields and scopes in process
//! memory and mimics the server-side behavior the reconcilers depend on:
//!
//! * remote ids are assigned on create (UUID v4)
//! * `base_data_type` falls back to `"string"` and `is_list` is derived from the
//!   data type
//! * scope keys are normalized to lower case when stored
//! * field updates are addressed by the `fieldKey` in the payload
//!
//! Every call is recorded before it is served, and failures can be queued with
//! [`InMemoryCidaasClient::fail_next`] and [`InMemoryCidaasClient::fail_after`],
//! which makes the client usable as a test double for asserting what a
//! reconciler sent and in which order.
//!
//! # Example Usage
//!
//! ```rust
//! use cidaas_provider::client::{InMemoryCidaasClient, ScopeClient};
//! use cidaas_provider::resource::Scope;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = InMemoryCidaasClient::new();
//! let scope = Scope {
//!     scope_key: "Read:Profile".to_string(),
//!     ..Scope::default()
//! };
//!
//! let stored = client.create_or_update_scope(&scope).await?;
//! assert_eq!(stored.scope_key, "read:profile");
//! assert_eq!(client.call_count().await, 1);
//! # Ok(())
//! # }
//! ```

use crate::client::{ClientError, RegistrationFieldClient, ScopeClient};
use crate::resource::{AppAttribute, RegistrationField, RegistrationFieldRecord, Scope};
use log::{debug, trace};
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tokio::sync::{RwLock, RwLockWriteGuard};

const DEFAULT_BASE_DATA_TYPE: &str = "string";

/// A call received by the in-memory client, with its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientCall {
    CreateRegistrationField(RegistrationField),
    GetRegistrationField(String),
    UpdateRegistrationField(RegistrationField),
    DeleteRegistrationField(String),
    CreateOrUpdateScope(Scope),
    GetScope(String),
    DeleteScope(String),
}

#[derive(Debug, Default)]
struct State {
    // field_key -> record
    fields: HashMap<String, RegistrationFieldRecord>,
    // normalized scope_key -> scope
    scopes: HashMap<String, Scope>,
    calls: Vec<ClientCall>,
    // one entry per upcoming call; `None` lets that call through
    failures: VecDeque<Option<ClientError>>,
}

/// Thread-safe in-memory Cidaas client.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCidaasClient {
    state: Arc<RwLock<State>>,
}

impl InMemoryCidaasClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call received so far, oldest first.
    pub async fn calls(&self) -> Vec<ClientCall> {
        self.state.read().await.calls.clone()
    }

    pub async fn call_count(&self) -> usize {
        self.state.read().await.calls.len()
    }

    /// Forget recorded calls, keeping stored entities.
    pub async fn clear_calls(&self) {
        self.state.write().await.calls.clear();
    }

    /// Make the next call fail with `error`. Queued failures are served in order.
    pub async fn fail_next(&self, error: ClientError) {
        self.state.write().await.failures.push_back(Some(error));
    }

    /// Let the next `skip` calls through, then fail one with `error`.
    pub async fn fail_after(&self, skip: usize, error: ClientError) {
        let mut state = self.state.write().await;
        state.failures.extend(std::iter::repeat_n(None, skip));
        state.failures.push_back(Some(error));
    }

    /// Stored registration field, bypassing call recording.
    pub async fn registration_field(&self, field_key: &str) -> Option<RegistrationFieldRecord> {
        self.state.read().await.fields.get(field_key).cloned()
    }

    /// Stored scope by exact key, bypassing call recording.
    pub async fn scope(&self, scope_key: &str) -> Option<Scope> {
        self.state.read().await.scopes.get(scope_key).cloned()
    }

    /// Seed a registration field as if created out of band.
    pub async fn insert_registration_field(&self, record: RegistrationFieldRecord) {
        self.state
            .write()
            .await
            .fields
            .insert(record.field_key.clone(), record);
    }

    /// Attach server-side app attributes to a stored field.
    ///
    /// Returns `false` if no field with that key exists.
    pub async fn set_app_attributes(&self, field_key: &str, attributes: Vec<AppAttribute>) -> bool {
        match self.state.write().await.fields.get_mut(field_key) {
            Some(record) => {
                record.app_attributes = attributes;
                true
            }
            None => false,
        }
    }

    /// Record the call and take the write lock, or fail with a queued error.
    async fn begin(&self, call: ClientCall) -> Result<RwLockWriteGuard<'_, State>, ClientError> {
        let mut state = self.state.write().await;
        trace!("In-memory client call: {:?}", call);
        state.calls.push(call);
        match state.failures.pop_front().flatten() {
            Some(error) => {
                debug!("In-memory client failing call with queued error: {}", error);
                Err(error)
            }
            None => Ok(state),
        }
    }

    fn generate_id() -> String {
        uuid::Uuid::new_v4().to_string()
    }

    /// Apply the server-side derivations to a written field.
    fn store_record(field: &RegistrationField, id: String) -> RegistrationFieldRecord {
        let mut record = RegistrationFieldRecord::echo(field, id);
        if record.base_data_type.trim().is_empty() {
            record.base_data_type = DEFAULT_BASE_DATA_TYPE.to_string();
        }
        record.is_list = record.data_type.eq_ignore_ascii_case("array");
        record
    }
}

impl RegistrationFieldClient for InMemoryCidaasClient {
    async fn create_registration_field(
        &self,
        field: &RegistrationField,
    ) -> Result<RegistrationFieldRecord, ClientError> {
        let mut state = self
            .begin(ClientCall::CreateRegistrationField(field.clone()))
            .await?;

        if state.fields.contains_key(&field.field_key) {
            return Err(ClientError::api(
                409,
                format!("registration field '{}' already exists", field.field_key),
            ));
        }

        let record = Self::store_record(field, Self::generate_id());
        debug!(
            "Stored registration field '{}' with id '{}'",
            record.field_key, record.id
        );
        state.fields.insert(record.field_key.clone(), record.clone());
        Ok(record)
    }

    async fn get_registration_field(
        &self,
        field_key: &str,
    ) -> Result<RegistrationFieldRecord, ClientError> {
        let state = self
            .begin(ClientCall::GetRegistrationField(field_key.to_string()))
            .await?;

        state
            .fields
            .get(field_key)
            .cloned()
            .ok_or_else(|| ClientError::not_found("registration field", field_key))
    }

    async fn update_registration_field(&self, field: &RegistrationField) -> Result<(), ClientError> {
        let mut state = self
            .begin(ClientCall::UpdateRegistrationField(field.clone()))
            .await?;

        let Some(existing) = state.fields.get(&field.field_key) else {
            return Err(ClientError::not_found("registration field", &field.field_key));
        };

        if field.id.as_deref() != Some(existing.id.as_str()) {
            return Err(ClientError::api(
                409,
                format!(
                    "registration field '{}' has id '{}', payload carries {:?}",
                    field.field_key, existing.id, field.id
                ),
            ));
        }

        let mut record = Self::store_record(field, existing.id.clone());
        record.app_attributes = existing.app_attributes.clone();
        state.fields.insert(record.field_key.clone(), record);
        Ok(())
    }

    async fn delete_registration_field(&self, field_key: &str) -> Result<(), ClientError> {
        let mut state = self
            .begin(ClientCall::DeleteRegistrationField(field_key.to_string()))
            .await?;

        state
            .fields
            .remove(field_key)
            .map(|_| ())
            .ok_or_else(|| ClientError::not_found("registration field", field_key))
    }
}

impl ScopeClient for InMemoryCidaasClient {
    async fn create_or_update_scope(&self, scope: &Scope) -> Result<Scope, ClientError> {
        let mut state = self
            .begin(ClientCall::CreateOrUpdateScope(scope.clone()))
            .await?;

        let key = scope.scope_key.to_lowercase();

        let id = match &scope.id {
            Some(id) => {
                let previous_key = state
                    .scopes
                    .iter()
                    .find(|(_, stored)| stored.id.as_deref() == Some(id.as_str()))
                    .map(|(stored_key, _)| stored_key.clone())
                    .ok_or_else(|| ClientError::not_found("scope", id))?;
                state.scopes.remove(&previous_key);
                id.clone()
            }
            None => state
                .scopes
                .get(&key)
                .and_then(|stored| stored.id.clone())
                .unwrap_or_else(Self::generate_id),
        };

        let stored = Scope {
            id: Some(id),
            scope_key: key.clone(),
            ..scope.clone()
        };
        debug!("Stored scope '{}' with id {:?}", key, stored.id);
        state.scopes.insert(key, stored.clone());
        Ok(stored)
    }

    async fn get_scope(&self, scope_key: &str) -> Result<Scope, ClientError> {
        let state = self.begin(ClientCall::GetScope(scope_key.to_string())).await?;

        state
            .scopes
            .get(scope_key)
            .cloned()
            .ok_or_else(|| ClientError::not_found("scope", scope_key))
    }

    async fn delete_scope(&self, scope_key: &str) -> Result<(), ClientError> {
        let mut state = self
            .begin(ClientCall::DeleteScope(scope_key.to_string()))
            .await?;

        state
            .scopes
            .remove(scope_key)
            .map(|_| ())
            .ok_or_else(|| ClientError::not_found("scope", scope_key))
    }
}
