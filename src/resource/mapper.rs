//! Shared flatten/unflatten helpers.
//!
//! Flattening (declared configuration to domain object) is per entity and
//! infallible once the configuration has been decoded. Unflattening (remote
//! response to external state) follows one policy for both entities: scalars
//! are copied verbatim, and locale-specific attributes are taken from the first
//! remote locale entry only, leaving existing state untouched when the remote
//! list is empty.

use crate::error::StateError;
use crate::resource::{EntityKind, ResourceData};
use log::warn;
use serde::{Deserialize, Deserializer};

/// Write a remote response into an external state record.
pub trait Unflatten {
    fn unflatten(&self, data: &mut ResourceData) -> Result<(), StateError>;
}

/// Pick the locale entry surfaced in external state.
///
/// Only the first entry is representable. `None` means the caller must leave
/// its locale attributes as they are.
pub fn primary_locale<'a, T>(entity: EntityKind, key: &str, entries: &'a [T]) -> Option<&'a T> {
    match entries {
        [] => {
            warn!(
                "{} '{}' returned no locale entries, keeping existing locale attributes",
                entity, key
            );
            None
        }
        [first] => Some(first),
        [first, rest @ ..] => {
            warn!(
                "{} '{}' has {} locale entries, only the first is kept",
                entity,
                key,
                rest.len() + 1
            );
            Some(first)
        }
    }
}

/// Deserialize an explicit `null` as the type's default.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
