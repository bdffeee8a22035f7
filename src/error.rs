//! Error types for reconciliation operations.
//!
//! Every lifecycle call returns a single [`ReconcileResult`]. Local validation
//! failures are collected into [`ValidationErrors`] so that all problems with a
//! configuration are reported together, while remote failures wrap the
//! collaborator error with the operation, entity kind and key involved.

use crate::client::ClientError;
use crate::resource::{EntityKind, Operation};
use std::fmt;

/// Main error type for reconciler operations.
#[derive(Debug, thiserror::Error)]
pub enum ReconcileError {
    /// The assembled domain object failed local validation; no remote call was made
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),

    /// The remote service client reported an error
    #[error("failed to {operation} {entity} '{key}': {source}")]
    RemoteCall {
        operation: Operation,
        entity: EntityKind,
        key: String,
        #[source]
        source: ClientError,
    },

    /// Writing an attribute into the external state record failed
    #[error("State assignment error: {0}")]
    StateAssignment(#[from] StateError),

    /// The attribute bag could not be decoded into the typed configuration
    #[error("Malformed configuration: {0}")]
    Configuration(#[from] serde_json::Error),

    /// The state record carries no external identity to address the entity with
    #[error("{entity} state has no identity")]
    MissingIdentity { entity: EntityKind },

    /// The entity was expected to exist remotely but could not be found
    #[error("{entity} '{key}' does not exist")]
    EntityNotFound { entity: EntityKind, key: String },
}

impl ReconcileError {
    /// Wrap a collaborator error for the given operation and entity key.
    pub fn remote(
        operation: Operation,
        entity: EntityKind,
        key: impl Into<String>,
        source: ClientError,
    ) -> Self {
        Self::RemoteCall {
            operation,
            entity,
            key: key.into(),
            source,
        }
    }

    /// Create an entity-not-found error
    pub fn entity_not_found(entity: EntityKind, key: impl Into<String>) -> Self {
        Self::EntityNotFound {
            entity,
            key: key.into(),
        }
    }

    /// Whether this error reports a remote entity that does not exist.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::RemoteCall { source, .. } => source.is_not_found(),
            Self::EntityNotFound { .. } => true,
            _ => false,
        }
    }

    /// The individual validation failures, if this is a validation error.
    pub fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            Self::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}

/// A single local validation failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Required attribute is missing from the declared configuration
    #[error("Required attribute '{attribute}' is missing")]
    MissingRequiredAttribute { attribute: String },

    /// Attribute value doesn't match the declared attribute type
    #[error("Attribute '{attribute}' has invalid type, expected {expected}, got {actual}")]
    InvalidAttributeType {
        attribute: String,
        expected: String,
        actual: String,
    },

    /// Attribute is not part of the resource schema
    #[error("Unknown attribute '{attribute}' for {resource}")]
    UnknownAttribute { attribute: String, resource: String },

    /// Computed attribute supplied as configuration input
    #[error("Attribute '{attribute}' is computed and cannot be configured")]
    ComputedAttributeDeclared { attribute: String },

    /// String attribute is empty or whitespace only
    #[error("Attribute '{attribute}' must not be blank")]
    BlankAttribute { attribute: String },

    /// Integer attribute below zero
    #[error("Attribute '{attribute}' must not be negative, got {value}")]
    NegativeValue { attribute: String, value: i64 },

    /// Lower bound greater than upper bound
    #[error("Attribute '{lower}' ({lower_value}) must not exceed '{upper}' ({upper_value})")]
    InvertedBounds {
        lower: String,
        lower_value: i64,
        upper: String,
        upper_value: i64,
    },

    /// Remote-assigned identifier supplied on create
    #[error("Attribute '{attribute}' is assigned by the server and cannot be sent on create")]
    ClientProvidedId { attribute: String },

    /// Remote-assigned identifier missing on update
    #[error("Attribute '{attribute}' is required for update")]
    MissingId { attribute: String },

    /// The configuration is not an attribute object
    #[error("Configuration must be an object, got {actual}")]
    NotAnObject { actual: String },
}

impl ValidationError {
    /// Create a missing required attribute error
    pub fn missing_required(attribute: impl Into<String>) -> Self {
        Self::MissingRequiredAttribute {
            attribute: attribute.into(),
        }
    }

    /// Create an invalid type error
    pub fn invalid_type(
        attribute: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self::InvalidAttributeType {
            attribute: attribute.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Create a blank attribute error
    pub fn blank(attribute: impl Into<String>) -> Self {
        Self::BlankAttribute {
            attribute: attribute.into(),
        }
    }
}

/// Every validation failure found for one configuration, in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: ValidationError) {
        self.0.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.0.iter()
    }

    /// `Ok(())` when nothing was collected, otherwise the collected errors.
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.0.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl From<ValidationError> for ValidationErrors {
    fn from(error: ValidationError) -> Self {
        Self(vec![error])
    }
}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, error) in self.0.iter().enumerate() {
            if index > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}", error)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Errors raised while writing attributes into an external state record.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StateError {
    /// Attribute is not declared by the resource schema
    #[error("Unknown attribute '{attribute}' for {resource}")]
    UnknownAttribute { resource: String, attribute: String },

    /// Value does not match the declared attribute type
    #[error("Attribute '{attribute}' expects {expected}, got {actual}")]
    TypeMismatch {
        attribute: String,
        expected: String,
        actual: String,
    },

    /// Value could not be converted to an attribute value
    #[error("Failed to serialize attribute '{attribute}': {message}")]
    Serialization { attribute: String, message: String },

    /// Persisted state is neither an attribute object nor empty
    #[error("Persisted state for {resource} must be an object, got {actual}")]
    NotAnObject { resource: String, actual: String },
}

// Result type aliases for convenience
pub type ReconcileResult<T> = Result<T, ReconcileError>;
pub type ValidationResult<T> = Result<T, ValidationErrors>;
