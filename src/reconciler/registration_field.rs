//! Registration field reconciler.
//!
//! Lifecycle: absent, created, read back, updated any number of times, deleted.
//! The external identity is the `field_key`. Updates replace the remote object
//! wholesale, so the server-assigned `registration_field_id` and
//! `base_data_type` captured on create are carried over into every update.

use crate::client::RegistrationFieldClient;
use crate::config::{DeleteKeySource, NotFoundPolicy, ReconcilerConfig};
use crate::error::{ReconcileError, ReconcileResult};
use crate::reconciler::{ReadOutcome, ResourceReconciler, read_failure, require_identity};
use crate::resource::{
    EntityKind, Operation, RegistrationFieldConfig, ResourceData, Unflatten,
};
use crate::schema::{REGISTRATION_FIELD, ResourceSchema};
use crate::validation::{OperationContext, Validate};
use log::{debug, info, trace, warn};

const ENTITY: EntityKind = EntityKind::RegistrationField;

/// Reconciles `cidaas_registration_field` resources.
#[derive(Debug, Clone)]
pub struct RegistrationFieldReconciler<C> {
    client: C,
    config: ReconcilerConfig,
}

impl<C: RegistrationFieldClient> RegistrationFieldReconciler<C> {
    /// Create a reconciler with the default configuration.
    pub fn new(client: C) -> Self {
        Self::with_config(client, ReconcilerConfig::default())
    }

    pub fn with_config(client: C, config: ReconcilerConfig) -> Self {
        Self { client, config }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn config(&self) -> &ReconcilerConfig {
        &self.config
    }

    async fn fetch(
        &self,
        data: &mut ResourceData,
        not_found: NotFoundPolicy,
    ) -> ReconcileResult<ReadOutcome> {
        let key = require_identity(data, ENTITY)?;
        debug!("Reading registration field '{}'", key);

        let record = match self.client.get_registration_field(&key).await {
            Ok(record) => record,
            Err(e) => return read_failure(not_found, ENTITY, &key, e, data),
        };
        trace!("Registration field '{}' response: {:?}", key, record);

        record.unflatten(data)?;
        Ok(ReadOutcome::Found)
    }

    /// Stored `base_data_type`, falling back to the configured default for
    /// state written before it was captured.
    fn stored_base_data_type(&self, data: &ResourceData, field_key: &str) -> String {
        match data.get_str("base_data_type") {
            Some(base_data_type) => base_data_type.to_string(),
            None => {
                warn!(
                    "Registration field '{}' has no stored base_data_type, using '{}'",
                    field_key, self.config.default_base_data_type
                );
                self.config.default_base_data_type.clone()
            }
        }
    }

    fn delete_key(&self, data: &ResourceData) -> ReconcileResult<String> {
        match self.config.delete_key {
            DeleteKeySource::Configuration => data
                .get_str("field_key")
                .map(str::to_owned)
                .ok_or(ReconcileError::MissingIdentity { entity: ENTITY }),
            DeleteKeySource::CapturedIdentity => require_identity(data, ENTITY),
        }
    }
}

impl<C: RegistrationFieldClient> ResourceReconciler for RegistrationFieldReconciler<C> {
    fn entity(&self) -> EntityKind {
        ENTITY
    }

    fn schema(&self) -> &'static ResourceSchema {
        &REGISTRATION_FIELD
    }

    async fn create(&self, data: &mut ResourceData) -> ReconcileResult<()> {
        let config: RegistrationFieldConfig = data.decode()?;
        let field = config.flatten(&self.config.default_base_data_type);
        field.validate(OperationContext::Create)?;

        info!("Creating registration field '{}'", field.field_key);
        trace!("Registration field payload: {:?}", field);

        let created = self
            .client
            .create_registration_field(&field)
            .await
            .map_err(|e| ReconcileError::remote(Operation::Create, ENTITY, &field.field_key, e))?;

        // Identity first, so a failure below still leaves the entity addressable.
        data.set_id(field.field_key.clone());
        data.set("registration_field_id", &created.id)?;
        debug!(
            "Created registration field '{}' with id '{}'",
            field.field_key, created.id
        );

        // Read back ignoring the not-found policy so the captured identity survives.
        if self.config.read_after_create {
            self.fetch(data, NotFoundPolicy::Error).await?;
        }
        Ok(())
    }

    async fn read(&self, data: &mut ResourceData) -> ReconcileResult<ReadOutcome> {
        self.fetch(data, self.config.not_found).await
    }

    async fn update(&self, data: &mut ResourceData) -> ReconcileResult<()> {
        let config: RegistrationFieldConfig = data.decode()?;
        let base_data_type = self.stored_base_data_type(data, &config.field_key);
        let mut field = config.flatten(&base_data_type);
        field.id = data.get_str("registration_field_id").map(str::to_owned);
        field.validate(OperationContext::Update)?;

        info!("Updating registration field '{}'", field.field_key);
        trace!("Registration field payload: {:?}", field);

        self.client
            .update_registration_field(&field)
            .await
            .map_err(|e| ReconcileError::remote(Operation::Update, ENTITY, &field.field_key, e))?;

        data.set_id(field.field_key);
        Ok(())
    }

    async fn delete(&self, data: &mut ResourceData) -> ReconcileResult<()> {
        let key = self.delete_key(data)?;
        info!("Deleting registration field '{}'", key);

        self.client
            .delete_registration_field(&key)
            .await
            .map_err(|e| ReconcileError::remote(Operation::Delete, ENTITY, &key, e))?;

        data.clear_id();
        Ok(())
    }
}
