//! Scope reconciler.
//!
//! Create and update both go through the remote create-or-update call; an
//! update is told apart by carrying the stored `_id`. The external identity is
//! the scope key as returned by the server on create.
//!
//! Casing is not symmetric across operations. Create upper-cases
//! `security_level` while update sends it verbatim, and read looks the scope up
//! by its lower-cased key while delete uses the identity as-is. Both follow the
//! behavior the remote API has been driven with so far.

use crate::client::ScopeClient;
use crate::config::ReconcilerConfig;
use crate::error::{ReconcileError, ReconcileResult};
use crate::reconciler::{ReadOutcome, ResourceReconciler, read_failure, require_identity};
use crate::resource::{EntityKind, Operation, ResourceData, ScopeConfig, Unflatten};
use crate::schema::{ResourceSchema, SCOPE};
use crate::validation::{OperationContext, Validate};
use log::{debug, info, trace, warn};

const ENTITY: EntityKind = EntityKind::Scope;

/// Reconciles `cidaas_scope` resources.
#[derive(Debug, Clone)]
pub struct ScopeReconciler<C> {
    client: C,
    config: ReconcilerConfig,
}

impl<C: ScopeClient> ScopeReconciler<C> {
    pub fn new(client: C) -> Self {
        Self::with_config(client, ReconcilerConfig::default())
    }

    /// Only the not-found policy applies to scopes.
    pub fn with_config(client: C, config: ReconcilerConfig) -> Self {
        Self { client, config }
    }

    pub fn client(&self) -> &C {
        &self.client
    }
}

impl<C: ScopeClient> ResourceReconciler for ScopeReconciler<C> {
    fn entity(&self) -> EntityKind {
        ENTITY
    }

    fn schema(&self) -> &'static ResourceSchema {
        &SCOPE
    }

    async fn create(&self, data: &mut ResourceData) -> ReconcileResult<()> {
        let config: ScopeConfig = data.decode()?;
        let mut scope = config.flatten();
        scope.security_level = scope.security_level.to_uppercase();
        scope.validate(OperationContext::Create)?;

        info!("Creating scope '{}'", scope.scope_key);
        trace!("Scope payload: {:?}", scope);

        let stored = self
            .client
            .create_or_update_scope(&scope)
            .await
            .map_err(|e| ReconcileError::remote(Operation::Create, ENTITY, &scope.scope_key, e))?;

        let identity = if stored.scope_key.is_empty() {
            warn!(
                "Scope '{}' created without a scope key in the response",
                scope.scope_key
            );
            scope.scope_key
        } else {
            stored.scope_key
        };
        data.set_id(identity);
        data.set("_id", &stored.id)?;
        debug!("Created scope '{}'", data.id().unwrap_or_default());
        Ok(())
    }

    async fn read(&self, data: &mut ResourceData) -> ReconcileResult<ReadOutcome> {
        let key = require_identity(data, ENTITY)?;
        let lookup = key.to_lowercase();
        debug!("Reading scope '{}' as '{}'", key, lookup);

        let scope = match self.client.get_scope(&lookup).await {
            Ok(scope) => scope,
            Err(e) => return read_failure(self.config.not_found, ENTITY, &key, e, data),
        };
        trace!("Scope '{}' response: {:?}", key, scope);

        scope.unflatten(data)?;
        Ok(ReadOutcome::Found)
    }

    async fn update(&self, data: &mut ResourceData) -> ReconcileResult<()> {
        let config: ScopeConfig = data.decode()?;
        let mut scope = config.flatten();
        scope.id = data.get_str("_id").map(str::to_owned);
        scope.validate(OperationContext::Update)?;

        info!("Updating scope '{}'", scope.scope_key);
        trace!("Scope payload: {:?}", scope);

        self.client
            .create_or_update_scope(&scope)
            .await
            .map_err(|e| ReconcileError::remote(Operation::Update, ENTITY, &scope.scope_key, e))?;
        Ok(())
    }

    async fn delete(&self, data: &mut ResourceData) -> ReconcileResult<()> {
        let key = require_identity(data, ENTITY)?;
        info!("Deleting scope '{}'", key);

        self.client
            .delete_scope(&key)
            .await
            .map_err(|e| ReconcileError::remote(Operation::Delete, ENTITY, &key, e))?;

        data.clear_id();
        Ok(())
    }
}
