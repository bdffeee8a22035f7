//! Registration field lifecycle scenarios.

use crate::common::builders::RegistrationFieldConfigBuilder;
use crate::common::{
    create_and_reset, field_reconciler, field_reconciler_with, field_state, init_logging,
};
use cidaas_provider::client::ClientCall;
use cidaas_provider::resource::{AppAttribute, RegistrationFieldRecord};
use cidaas_provider::{
    ClientError, DeleteKeySource, InMemoryCidaasClient, NotFoundPolicy, ReadOutcome,
    ReconcileError, ReconcilerConfig, ResourceReconciler,
};
use serde_json::json;

#[tokio::test]
async fn test_create_populates_server_computed_attributes() {
    init_logging();
    let client = InMemoryCidaasClient::new();
    let reconciler = field_reconciler(&client);
    let mut data = field_state(RegistrationFieldConfigBuilder::new().build());

    reconciler.create(&mut data).await.unwrap();

    assert_eq!(data.id(), Some("firstname"));
    let registration_field_id = data.get_str("registration_field_id").unwrap();
    assert!(!registration_field_id.is_empty());
    assert_eq!(data.get_str("base_data_type"), Some("string"));
    assert_eq!(
        client.registration_field("firstname").await.unwrap().id,
        registration_field_id
    );
}

#[tokio::test]
async fn test_create_sends_assembled_payload() {
    init_logging();
    let client = InMemoryCidaasClient::new();
    let reconciler = field_reconciler(&client);
    let mut data = field_state(
        RegistrationFieldConfigBuilder::new()
            .with("scopes", ["profile", "openid", "profile"])
            .build(),
    );

    reconciler.create(&mut data).await.unwrap();

    let calls = client.calls().await;
    let ClientCall::CreateRegistrationField(sent) = &calls[0] else {
        panic!("expected create first, got {:?}", calls);
    };
    assert_eq!(sent.id, None);
    assert_eq!(sent.base_data_type, "string");
    assert_eq!(sent.scopes, vec!["profile", "openid", "profile"]);
    assert_eq!(sent.locale_text.required_msg.as_deref(), Some("First name is required"));
    assert_eq!(sent.field_definition.max_length, 64);
}

#[tokio::test]
async fn test_failed_read_back_keeps_created_field_addressable() {
    init_logging();
    let client = InMemoryCidaasClient::new();
    let reconciler = field_reconciler(&client);
    let mut data = field_state(RegistrationFieldConfigBuilder::new().build());
    client.fail_after(1, ClientError::transport("connection reset")).await;

    let error = reconciler.create(&mut data).await.unwrap_err();

    assert!(error.to_string().starts_with("failed to read registration field 'firstname'"));
    assert_eq!(data.id(), Some("firstname"));
    let registration_field_id = data.get_str("registration_field_id").unwrap();
    assert_eq!(
        client.registration_field("firstname").await.unwrap().id,
        registration_field_id
    );

    reconciler.delete(&mut data).await.unwrap();
    assert!(client.registration_field("firstname").await.is_none());
}

#[tokio::test]
async fn test_read_back_not_found_keeps_identity_when_marking_absent() {
    init_logging();
    let client = InMemoryCidaasClient::new();
    let config = ReconcilerConfig::builder()
        .with_not_found(NotFoundPolicy::MarkAbsent)
        .with_delete_key(DeleteKeySource::CapturedIdentity)
        .build()
        .unwrap();
    let reconciler = field_reconciler_with(&client, config);
    let mut data = field_state(RegistrationFieldConfigBuilder::new().build());
    client.fail_after(1, ClientError::not_found("registration field", "firstname")).await;

    let error = reconciler.create(&mut data).await.unwrap_err();

    assert!(error.is_not_found());
    assert!(matches!(error, ReconcileError::RemoteCall { .. }));
    assert_eq!(data.id(), Some("firstname"));
    assert!(data.get_str("registration_field_id").is_some());

    reconciler.delete(&mut data).await.unwrap();
    assert!(client.registration_field("firstname").await.is_none());
}

#[tokio::test]
async fn test_update_carries_over_id_and_base_data_type() {
    init_logging();
    let client = InMemoryCidaasClient::new();
    let reconciler = field_reconciler(&client);
    let mut data = field_state(RegistrationFieldConfigBuilder::new().build());
    create_and_reset(&reconciler, &client, &mut data).await;
    let registration_field_id = data.get_str("registration_field_id").unwrap().to_string();

    data.apply_config(RegistrationFieldConfigBuilder::new().with_order(2).build())
        .unwrap();
    reconciler.update(&mut data).await.unwrap();

    let calls = client.calls().await;
    assert_eq!(calls.len(), 1, "update must not re-read");
    let ClientCall::UpdateRegistrationField(sent) = &calls[0] else {
        panic!("expected update, got {:?}", calls);
    };
    assert_eq!(sent.id.as_deref(), Some(registration_field_id.as_str()));
    assert_eq!(sent.base_data_type, "string");
    assert_eq!(sent.order, 2);
    assert_eq!(data.id(), Some("firstname"));
    assert_eq!(client.registration_field("firstname").await.unwrap().order, 2);
}

#[tokio::test]
async fn test_delete_uses_drifted_field_key_by_default() {
    init_logging();
    let client = InMemoryCidaasClient::new();
    let reconciler = field_reconciler(&client);
    let mut data = field_state(RegistrationFieldConfigBuilder::new().build());
    create_and_reset(&reconciler, &client, &mut data).await;

    data.apply_config(
        RegistrationFieldConfigBuilder::new()
            .with_field_key("first_name")
            .build(),
    )
    .unwrap();
    let error = reconciler.delete(&mut data).await.unwrap_err();

    assert_eq!(
        client.calls().await,
        vec![ClientCall::DeleteRegistrationField("first_name".to_string())]
    );
    assert!(error.is_not_found());
    assert!(error.to_string().contains("'first_name'"));
    // The entity that was actually created is left behind.
    assert!(client.registration_field("firstname").await.is_some());
    assert_eq!(data.id(), Some("firstname"));
}

#[tokio::test]
async fn test_delete_by_captured_identity_survives_drift() {
    init_logging();
    let client = InMemoryCidaasClient::new();
    let config = ReconcilerConfig::builder()
        .with_delete_key(DeleteKeySource::CapturedIdentity)
        .build()
        .unwrap();
    let reconciler = field_reconciler_with(&client, config);
    let mut data = field_state(RegistrationFieldConfigBuilder::new().build());
    create_and_reset(&reconciler, &client, &mut data).await;

    data.apply_config(
        RegistrationFieldConfigBuilder::new()
            .with_field_key("first_name")
            .build(),
    )
    .unwrap();
    reconciler.delete(&mut data).await.unwrap();

    assert!(client.registration_field("firstname").await.is_none());
    assert_eq!(data.id(), None);
}

#[tokio::test]
async fn test_invalid_field_makes_no_remote_call() {
    init_logging();
    let client = InMemoryCidaasClient::new();
    let reconciler = field_reconciler(&client);
    let mut data = field_state(
        RegistrationFieldConfigBuilder::new()
            .with("field_type", " ")
            .with("locale_text_min_length", 100)
            .build(),
    );
    let before = data.clone();

    let error = reconciler.create(&mut data).await.unwrap_err();

    let errors = error.validation_errors().expect("validation error");
    assert_eq!(errors.len(), 2);
    assert!(error.to_string().contains("field_type"));
    assert_eq!(client.call_count().await, 0);
    assert_eq!(data, before);
}

#[tokio::test]
async fn test_read_of_missing_field_names_the_key() {
    init_logging();
    let client = InMemoryCidaasClient::new();
    let reconciler = field_reconciler(&client);
    let mut data = field_state(RegistrationFieldConfigBuilder::new().build());
    data.set_id("firstname");
    let before = data.clone();

    let error = reconciler.read(&mut data).await.unwrap_err();

    assert!(matches!(error, ReconcileError::RemoteCall { .. }));
    assert!(error.to_string().contains("'firstname'"));
    assert_eq!(data, before, "no defaults may be written on a failed read");
}

#[tokio::test]
async fn test_read_of_missing_field_marks_absent() {
    init_logging();
    let client = InMemoryCidaasClient::new();
    let config = ReconcilerConfig::builder()
        .with_not_found(NotFoundPolicy::MarkAbsent)
        .build()
        .unwrap();
    let reconciler = field_reconciler_with(&client, config);
    let mut data = field_state(RegistrationFieldConfigBuilder::new().build());
    create_and_reset(&reconciler, &client, &mut data).await;

    // Deleted out of band.
    client.fail_next(ClientError::api(404, "field not found")).await;

    assert_eq!(reconciler.read(&mut data).await.unwrap(), ReadOutcome::Absent);
    assert_eq!(data.id(), None);
}

#[tokio::test]
async fn test_read_surfaces_server_side_changes() {
    init_logging();
    let client = InMemoryCidaasClient::new();
    let reconciler = field_reconciler(&client);
    let mut data = field_state(RegistrationFieldConfigBuilder::new().build());
    create_and_reset(&reconciler, &client, &mut data).await;

    client
        .set_app_attributes(
            "firstname",
            vec![AppAttribute {
                name: "source".to_string(),
                value: "crm".to_string(),
                datatype: "string".to_string(),
            }],
        )
        .await;
    reconciler.read(&mut data).await.unwrap();

    assert_eq!(
        data.get("app_attributes"),
        Some(&json!([{"name": "source", "value": "crm", "datatype": "string"}]))
    );
    assert_eq!(
        client.calls().await,
        vec![ClientCall::GetRegistrationField("firstname".to_string())]
    );
}

#[tokio::test]
async fn test_is_list_derived_for_array_fields() {
    init_logging();
    let client = InMemoryCidaasClient::new();
    let reconciler = field_reconciler(&client);
    let mut data = field_state(
        RegistrationFieldConfigBuilder::new()
            .with_field_key("interests")
            .with("data_type", "ARRAY")
            .build(),
    );

    reconciler.create(&mut data).await.unwrap();

    assert_eq!(data.get("is_list"), Some(&json!(true)));
}

#[tokio::test]
async fn test_failed_update_is_not_followed_by_read() {
    init_logging();
    let client = InMemoryCidaasClient::new();
    let reconciler = field_reconciler(&client);
    let mut data = field_state(RegistrationFieldConfigBuilder::new().build());
    create_and_reset(&reconciler, &client, &mut data).await;

    client.fail_next(ClientError::transport("connection reset")).await;
    data.apply_config(RegistrationFieldConfigBuilder::new().with_order(3).build())
        .unwrap();
    let error = reconciler.update(&mut data).await.unwrap_err();

    assert!(
        error
            .to_string()
            .starts_with("failed to update registration field 'firstname'")
    );
    assert_eq!(client.call_count().await, 1);
}

#[tokio::test]
async fn test_renamed_field_key_cannot_be_updated() {
    init_logging();
    let client = InMemoryCidaasClient::new();
    let reconciler = field_reconciler(&client);
    let mut data = field_state(RegistrationFieldConfigBuilder::new().build());
    create_and_reset(&reconciler, &client, &mut data).await;

    data.apply_config(
        RegistrationFieldConfigBuilder::new()
            .with_field_key("first_name")
            .build(),
    )
    .unwrap();
    let error = reconciler.update(&mut data).await.unwrap_err();

    // Updates are addressed by the field key in the payload.
    assert!(error.is_not_found());
    assert!(error.to_string().contains("'first_name'"));
    assert_eq!(data.id(), Some("firstname"));
}

#[tokio::test]
async fn test_import_adopts_existing_field() {
    init_logging();
    let client = InMemoryCidaasClient::new();
    client
        .insert_registration_field(RegistrationFieldRecord {
            id: "4d2c".to_string(),
            field_key: "nickname".to_string(),
            field_type: "CUSTOM".to_string(),
            data_type: "TEXT".to_string(),
            base_data_type: "string".to_string(),
            order: 4,
            ..RegistrationFieldRecord::default()
        })
        .await;
    let reconciler = field_reconciler(&client);

    let data = reconciler.import("nickname").await.unwrap();

    assert_eq!(data.id(), Some("nickname"));
    assert_eq!(data.get_str("registration_field_id"), Some("4d2c"));
    assert_eq!(data.get("order"), Some(&json!(4)));
    // No locale entries remotely, so none are surfaced.
    assert_eq!(data.get("locale_text_name"), None);
}

#[tokio::test]
async fn test_import_of_missing_field_fails_under_either_policy() {
    init_logging();
    let client = InMemoryCidaasClient::new();

    let error = field_reconciler(&client).import("nickname").await.unwrap_err();
    assert!(error.is_not_found());

    let config = ReconcilerConfig::builder()
        .with_not_found(NotFoundPolicy::MarkAbsent)
        .build()
        .unwrap();
    let error = field_reconciler_with(&client, config)
        .import("nickname")
        .await
        .unwrap_err();
    assert!(matches!(error, ReconcileError::EntityNotFound { .. }));
}
