//! Strongly-typed identifiers shared by every Whippet entity.
//!
//! All three are UUIDv7 newtypes so they sort by creation time. External systems
//! keep their own keys (Magento entity ids, MOM customer numbers, Salesforce ids);
//! these are ours and never change once assigned.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

macro_rules! uuid_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Type name used in parse errors.
            pub const NAME: &'static str = stringify!($name);

            /// Fresh time-ordered identifier.
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<Uuid> for $name {
            fn from(value: Uuid) -> Self {
                Self(value)
            }
        }

        impl From<$name> for Uuid {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl FromStr for $name {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                parse_uuid(Self::NAME, s).map(Self)
            }
        }
    };
}

/// Surrounding whitespace is ignored; the nil UUID never identifies anything.
fn parse_uuid(name: &str, raw: &str) -> Result<Uuid, DomainError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(DomainError::invalid_id(format!("{name}: empty")));
    }
    let uuid = Uuid::from_str(trimmed)
        .map_err(|e| DomainError::invalid_id(format!("{name}: {e}")))?;
    if uuid.is_nil() {
        return Err(DomainError::invalid_id(format!("{name}: nil uuid")));
    }
    Ok(uuid)
}

uuid_id!(
    /// Multi-tenant boundary. Every repository call and command is scoped by one.
    TenantId
);

uuid_id!(
    /// Actor that issued a command.
    UserId
);

uuid_id!(
    /// Whippet-side identity of a persisted entity.
    EntityId
);
