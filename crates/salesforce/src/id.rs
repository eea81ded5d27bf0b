use serde::{Deserialize, Serialize};

use whippet_core::{DomainError, ValueObject};

/// Salesforce record id: 15 characters (case-sensitive) or 18 characters (with the
/// case-insensitive checksum suffix).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SalesforceId(String);

impl ValueObject for SalesforceId {}

impl SalesforceId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The 15-character form, which identifies a record on its own.
    pub fn short(&self) -> &str {
        &self.0[..15]
    }

    /// Three-character key prefix naming the object type (`001` accounts, `003` contacts).
    pub fn key_prefix(&self) -> &str {
        &self.0[..3]
    }

    /// Whether two ids name the same record, whatever their length.
    pub fn same_record(&self, other: &SalesforceId) -> bool {
        self.short() == other.short()
    }
}

impl core::fmt::Display for SalesforceId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

impl core::str::FromStr for SalesforceId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if !matches!(s.len(), 15 | 18) || !s.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(DomainError::invalid_id(format!(
                "SalesforceId: {s:?} is not a 15 or 18 character alphanumeric id"
            )));
        }
        Ok(Self(s.to_string()))
    }
}

impl TryFrom<String> for SalesforceId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SalesforceId> for String {
    fn from(id: SalesforceId) -> Self {
        id.0
    }
}
