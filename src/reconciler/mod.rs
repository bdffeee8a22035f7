//! Lifecycle reconcilers.
//!
//! A reconciler drives one entity kind through create, read, update and delete
//! against the remote service, keeping the external state record in step with
//! what the server holds. Each lifecycle call runs its steps strictly in
//! sequence and returns on the first failure; the hosting runtime guarantees
//! that calls for the same resource never overlap.
//!
//! # Example
//!
//! ```rust
//! use cidaas_provider::client::InMemoryCidaasClient;
//! use cidaas_provider::reconciler::{ReadOutcome, ResourceReconciler, ScopeReconciler};
//! use cidaas_provider::resource::ResourceData;
//! use cidaas_provider::schema::SCOPE;
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let reconciler = ScopeReconciler::new(InMemoryCidaasClient::new());
//! let mut data = ResourceData::from_config(&SCOPE, json!({
//!     "locale": "en-US",
//!     "language": "en",
//!     "description": "Read the user profile",
//!     "title": "Profile",
//!     "security_level": "medium",
//!     "scope_key": "read:profile",
//!     "group_name": [],
//!     "required_user_consent": false
//! }))?;
//!
//! reconciler.create(&mut data).await?;
//! assert_eq!(data.id(), Some("read:profile"));
//! assert_eq!(reconciler.read(&mut data).await?, ReadOutcome::Found);
//! # Ok(())
//! # }
//! ```

pub mod registration_field;
pub mod scope;

pub use registration_field::RegistrationFieldReconciler;
pub use scope::ScopeReconciler;

use crate::client::ClientError;
use crate::config::NotFoundPolicy;
use crate::error::{ReconcileError, ReconcileResult};
use crate::resource::{EntityKind, Operation, ResourceData};
use crate::schema::ResourceSchema;
use log::debug;
use std::future::Future;

/// Result of reading an entity back from the remote service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadOutcome {
    /// The entity exists and the state record was refreshed
    Found,
    /// The entity no longer exists and the identity was cleared
    Absent,
}

/// Lifecycle operations for one kind of remotely managed entity.
pub trait ResourceReconciler: Send + Sync {
    /// Kind of entity this reconciler manages.
    fn entity(&self) -> EntityKind;

    /// Attribute schema of the state records this reconciler works on.
    fn schema(&self) -> &'static ResourceSchema;

    /// Create the entity from the declared configuration in `data` and
    /// capture its external identity.
    fn create(&self, data: &mut ResourceData)
    -> impl Future<Output = ReconcileResult<()>> + Send;

    /// Refresh `data` from the remote entity addressed by its external identity.
    fn read(
        &self,
        data: &mut ResourceData,
    ) -> impl Future<Output = ReconcileResult<ReadOutcome>> + Send;

    /// Push the declared configuration in `data` to the existing entity.
    fn update(&self, data: &mut ResourceData)
    -> impl Future<Output = ReconcileResult<()>> + Send;

    /// Delete the entity and clear the external identity.
    fn delete(&self, data: &mut ResourceData)
    -> impl Future<Output = ReconcileResult<()>> + Send;

    /// Adopt an existing entity by its external identity.
    ///
    /// Builds an empty state record carrying `id` and reads it. An entity that
    /// cannot be found is an error whatever the not-found policy.
    fn import(&self, id: &str) -> impl Future<Output = ReconcileResult<ResourceData>> + Send {
        async move {
            let entity = self.entity();
            debug!("Importing {} '{}'", entity, id);

            let mut data = ResourceData::new(self.schema());
            data.set_id(id);
            match self.read(&mut data).await? {
                ReadOutcome::Found => Ok(data),
                ReadOutcome::Absent => Err(ReconcileError::entity_not_found(entity, id)),
            }
        }
    }
}

/// The external identity of `data`, or an error naming the entity kind.
pub(crate) fn require_identity(data: &ResourceData, entity: EntityKind) -> ReconcileResult<String> {
    data.id()
        .map(str::to_owned)
        .ok_or(ReconcileError::MissingIdentity { entity })
}

/// Apply the not-found policy to a failed remote read.
///
/// Errors other than not-found are always surfaced. Under
/// [`NotFoundPolicy::MarkAbsent`] a missing entity clears the identity instead.
pub(crate) fn read_failure(
    policy: NotFoundPolicy,
    entity: EntityKind,
    key: &str,
    error: ClientError,
    data: &mut ResourceData,
) -> ReconcileResult<ReadOutcome> {
    if error.is_not_found() {
        debug!("{} '{}' not found remotely", entity, key);
        if policy == NotFoundPolicy::MarkAbsent {
            data.clear_id();
            return Ok(ReadOutcome::Absent);
        }
    }
    Err(ReconcileError::remote(Operation::Read, entity, key, error))
}
