//! Lifecycle scenarios against the in-memory Cidaas client.
//!
//! - `field_lifecycle` - registration field reconciler, including drift and
//!   not-found handling
//! - `scope_lifecycle` - scope reconciler, including the casing rules of each
//!   operation
//! - `properties` - generated configurations through flatten and unflatten

pub mod field_lifecycle;
