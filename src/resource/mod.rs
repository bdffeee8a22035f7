//! Managed resources and their three representations.
//!
//! For each entity kind this module holds:
//!
//! - the typed declared configuration, decoded once from the attribute bag
//!   ([`RegistrationFieldConfig`], [`ScopeConfig`]),
//! - the domain objects exchanged with the Cidaas API ([`RegistrationField`],
//!   [`RegistrationFieldRecord`], [`Scope`]),
//! - the external state record ([`ResourceData`]) they are unflattened into.

pub mod data;
pub mod mapper;
pub mod registration_field;
pub mod scope;

pub use data::ResourceData;
pub use mapper::Unflatten;
pub use registration_field::{
    AppAttribute, FieldDefinition, LocaleText, RegistrationField, RegistrationFieldConfig,
    RegistrationFieldRecord,
};
pub use scope::{Scope, ScopeConfig, ScopeLocaleDescription};

use std::fmt;

/// Kinds of entity managed by this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    RegistrationField,
    Scope,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::RegistrationField => write!(f, "registration field"),
            EntityKind::Scope => write!(f, "scope"),
        }
    }
}

/// Lifecycle operations, used to label remote failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Create,
    Read,
    Update,
    Delete,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::Create => "create",
            Operation::Read => "read",
            Operation::Update => "update",
            Operation::Delete => "delete",
        };
        write!(f, "{}", name)
    }
}
