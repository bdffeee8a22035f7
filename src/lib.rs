//! Cidaas registration field and scope reconciliation for Rust.
//!
//! Keeps declared registration fields and authorization scopes in step with a
//! Cidaas instance. A hosting infrastructure-as-code runtime hands each
//! lifecycle call a flat attribute bag; the reconcilers turn it into the nested
//! API objects, validate them, call the remote service and write the response
//! back into external state.
//!
//! # Core Components
//!
//! - [`ResourceReconciler`] - Create/read/update/delete/import lifecycle
//! - [`RegistrationFieldClient`] / [`ScopeClient`] - Remote service contracts
//! - [`ResourceData`] - Schema-checked external state record
//! - [`ReconcilerConfig`] - Not-found and delete-key policies
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use cidaas_provider::{
//!     InMemoryCidaasClient, RegistrationFieldReconciler, ResourceData, ResourceReconciler,
//!     schema::REGISTRATION_FIELD,
//! };
//! use serde_json::json;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let reconciler = RegistrationFieldReconciler::new(InMemoryCidaasClient::new());
//! let mut data = ResourceData::from_config(&REGISTRATION_FIELD, json!({
//!     "required": true, "internal": false, "claimable": true, "scopes": ["profile"],
//!     "enabled": true, "is_group": false, "parent_group_id": "DEFAULT",
//!     "field_type": "CUSTOM", "data_type": "TEXT", "field_key": "firstname",
//!     "read_only": false, "order": 1, "locale_text_locale": "en-US",
//!     "locale_text_name": "First Name", "locale_text_language": "en"
//! }))?;
//!
//! reconciler.create(&mut data).await?;
//! assert_eq!(data.get_str("base_data_type"), Some("string"));
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod reconciler;
pub mod resource;
pub mod schema;
pub mod validation;

// Re-export commonly used types for convenience
pub use client::{ClientError, InMemoryCidaasClient, RegistrationFieldClient, ScopeClient};
pub use config::{DeleteKeySource, NotFoundPolicy, ReconcilerConfig, ReconcilerConfigBuilder};
pub use error::{ReconcileError, ReconcileResult, ValidationError, ValidationErrors};
pub use reconciler::{
    ReadOutcome, RegistrationFieldReconciler, ResourceReconciler, ScopeReconciler,
};
pub use resource::{EntityKind, Operation, ResourceData};
pub use validation::{OperationContext, Validate};
