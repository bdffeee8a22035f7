//! Common test utilities for reconciler testing.

use cidaas_provider::schema::{REGISTRATION_FIELD, SCOPE};
use cidaas_provider::{
    InMemoryCidaasClient, ReconcilerConfig, RegistrationFieldReconciler, ResourceData,
    ResourceReconciler, ScopeReconciler,
};
use serde_json::Value;

pub mod builders;

/// Install a test logger once. Honors `RUST_LOG`.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn field_reconciler(
    client: &InMemoryCidaasClient,
) -> RegistrationFieldReconciler<InMemoryCidaasClient> {
    RegistrationFieldReconciler::new(client.clone())
}

pub fn field_reconciler_with(
    client: &InMemoryCidaasClient,
    config: ReconcilerConfig,
) -> RegistrationFieldReconciler<InMemoryCidaasClient> {
    RegistrationFieldReconciler::with_config(client.clone(), config)
}

pub fn scope_reconciler(client: &InMemoryCidaasClient) -> ScopeReconciler<InMemoryCidaasClient> {
    ScopeReconciler::new(client.clone())
}

pub fn field_state(config: Value) -> ResourceData {
    ResourceData::from_config(&REGISTRATION_FIELD, config).expect("field config should be valid")
}

pub fn scope_state(config: Value) -> ResourceData {
    ResourceData::from_config(&SCOPE, config).expect("scope config should be valid")
}

/// Create the entity and forget the calls it took.
pub async fn create_and_reset<R: ResourceReconciler>(
    reconciler: &R,
    client: &InMemoryCidaasClient,
    data: &mut ResourceData,
) {
    reconciler.create(data).await.expect("create should succeed");
    client.clear_calls().await;
}
