//! Pre-flight validation of assembled domain objects.
//!
//! Validation runs on the object exactly as it will be sent, after defaults and
//! carried-over identifiers have been applied, and before any remote call. All
//! failures for one object are reported together.
//!
//! The rule set is deliberately small. New rules are added to the `validate`
//! implementations below; a rule must never reject a configuration the remote
//! API accepts today.

use crate::error::{ValidationError, ValidationErrors, ValidationResult};
use crate::resource::{RegistrationField, Scope};

/// The lifecycle step an object is validated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationContext {
    /// Remote identifier must not be set yet
    Create,
    /// Remote identifier must be carried over from state
    Update,
}

/// Validation of a domain object before it is sent.
pub trait Validate {
    fn validate(&self, context: OperationContext) -> ValidationResult<()>;
}

/// Collects rule failures for one object.
#[derive(Debug, Default)]
struct Rules {
    errors: ValidationErrors,
}

impl Rules {
    fn non_blank(&mut self, attribute: &str, value: &str) -> &mut Self {
        if value.trim().is_empty() {
            self.errors.push(ValidationError::blank(attribute));
        }
        self
    }

    fn non_negative(&mut self, attribute: &str, value: i64) -> &mut Self {
        if value < 0 {
            self.errors.push(ValidationError::NegativeValue {
                attribute: attribute.to_string(),
                value,
            });
        }
        self
    }

    /// Upper bound of zero means unbounded.
    fn ordered_bounds(&mut self, lower: (&str, i64), upper: (&str, i64)) -> &mut Self {
        if upper.1 > 0 && lower.1 > upper.1 {
            self.errors.push(ValidationError::InvertedBounds {
                lower: lower.0.to_string(),
                lower_value: lower.1,
                upper: upper.0.to_string(),
                upper_value: upper.1,
            });
        }
        self
    }

    fn remote_id(
        &mut self,
        attribute: &str,
        id: Option<&str>,
        context: OperationContext,
    ) -> &mut Self {
        match (context, id) {
            (OperationContext::Create, Some(_)) => {
                self.errors.push(ValidationError::ClientProvidedId {
                    attribute: attribute.to_string(),
                });
            }
            (OperationContext::Update, None) => {
                self.errors.push(ValidationError::MissingId {
                    attribute: attribute.to_string(),
                });
            }
            (OperationContext::Update, Some(id)) if id.trim().is_empty() => {
                self.errors.push(ValidationError::MissingId {
                    attribute: attribute.to_string(),
                });
            }
            _ => {}
        }
        self
    }

    fn finish(&mut self) -> ValidationResult<()> {
        std::mem::take(&mut self.errors).into_result()
    }
}

impl Validate for RegistrationField {
    fn validate(&self, context: OperationContext) -> ValidationResult<()> {
        Rules::default()
            .remote_id("registration_field_id", self.id.as_deref(), context)
            .non_blank("field_key", &self.field_key)
            .non_blank("field_type", &self.field_type)
            .non_blank("data_type", &self.data_type)
            .non_blank("base_data_type", &self.base_data_type)
            .non_blank("locale_text_locale", &self.locale_text.locale)
            .non_blank("locale_text_language", &self.locale_text.language)
            .non_blank("locale_text_name", &self.locale_text.name)
            .non_negative("order", self.order)
            .non_negative("locale_text_min_length", self.field_definition.min_length)
            .non_negative("locale_text_max_length", self.field_definition.max_length)
            .ordered_bounds(
                ("locale_text_min_length", self.field_definition.min_length),
                ("locale_text_max_length", self.field_definition.max_length),
            )
            .finish()
    }
}

impl Validate for Scope {
    fn validate(&self, context: OperationContext) -> ValidationResult<()> {
        let mut rules = Rules::default();
        rules
            .remote_id("_id", self.id.as_deref(), context)
            .non_blank("scope_key", &self.scope_key);
        for text in &self.locale_wise_description {
            rules
                .non_blank("locale", &text.locale)
                .non_blank("language", &text.language);
        }
        rules.finish()
    }
}
