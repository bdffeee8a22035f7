//! Attribute schemas of the managed resources.
//!
//! Each resource kind publishes a static [`ResourceSchema`] describing its
//! external configuration surface. State records check every assignment
//! against it and declared configuration is validated against it before it is
//! decoded into a typed struct.
//!
//! # Examples
//!
//! ```rust
//! use cidaas_provider::schema::{REGISTRATION_FIELD, Presence};
//!
//! let attr = REGISTRATION_FIELD.attribute("registration_field_id").unwrap();
//! assert_eq!(attr.presence, Presence::Computed);
//! ```

pub mod embedded;
pub mod types;
pub mod validation;

pub use embedded::{REGISTRATION_FIELD, SCOPE};
pub use types::{AttributeSchema, AttributeType, Presence, ResourceSchema};
