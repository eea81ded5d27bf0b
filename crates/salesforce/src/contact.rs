use serde::{Deserialize, Serialize};

use whippet_core::validate::{len_between, max_len_opt};
use whippet_core::{DomainError, DomainResult, Entity, EntityId, Validate};

use crate::id::SalesforceId;

pub const FIRST_NAME_MAX: usize = 40;
pub const LAST_NAME_MAX: usize = 80;
pub const EMAIL_MAX: usize = 80;
pub const PHONE_MAX: usize = 40;
pub const TITLE_MAX: usize = 128;

pub trait SalesforceContactRecord {
    fn contact_id(&self) -> EntityId;
    fn salesforce_id(&self) -> Option<&SalesforceId>;
    fn account_id(&self) -> Option<EntityId>;
    fn first_name(&self) -> Option<&str>;
    fn last_name(&self) -> &str;
    fn email(&self) -> Option<&str>;
    fn phone(&self) -> Option<&str>;
    fn title(&self) -> Option<&str>;
}

/// A Salesforce `Contact`, optionally attached to an account.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SalesforceContact {
    pub id: EntityId,
    pub salesforce_id: Option<SalesforceId>,
    /// Whippet id of the owning [`SalesforceAccount`](crate::SalesforceAccount).
    pub account_id: Option<EntityId>,
    pub first_name: Option<String>,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub title: Option<String>,
}

impl SalesforceContact {
    pub fn new(last_name: impl Into<String>) -> Self {
        Self {
            id: EntityId::new(),
            salesforce_id: None,
            account_id: None,
            first_name: None,
            last_name: last_name.into(),
            email: None,
            phone: None,
            title: None,
        }
    }

    pub fn for_account(mut self, account_id: EntityId) -> Self {
        self.account_id = Some(account_id);
        self
    }

    pub fn with_first_name(mut self, first_name: impl Into<String>) -> Self {
        self.first_name = Some(first_name.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// "First Last", or just the last name.
    pub fn full_name(&self) -> String {
        match self.first_name.as_deref().map(str::trim) {
            Some(first) if !first.is_empty() => format!("{first} {}", self.last_name),
            _ => self.last_name.clone(),
        }
    }
}

impl Entity for SalesforceContact {
    type Id = EntityId;
    const ENTITY_TYPE: &'static str = "salesforce.contact";

    fn id(&self) -> &EntityId {
        &self.id
    }
}

impl SalesforceContactRecord for SalesforceContact {
    fn contact_id(&self) -> EntityId {
        self.id
    }
    fn salesforce_id(&self) -> Option<&SalesforceId> {
        self.salesforce_id.as_ref()
    }
    fn account_id(&self) -> Option<EntityId> {
        self.account_id
    }
    fn first_name(&self) -> Option<&str> {
        self.first_name.as_deref()
    }
    fn last_name(&self) -> &str {
        &self.last_name
    }
    fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }
    fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }
    fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }
}

impl Validate for SalesforceContact {
    fn validate(&self) -> DomainResult<()> {
        max_len_opt("first_name", self.first_name.as_deref(), FIRST_NAME_MAX)?;
        len_between("last_name", &self.last_name, 1, LAST_NAME_MAX)?;
        if let Some(email) = self.email.as_deref() {
            len_between("email", email, 3, EMAIL_MAX)?;
            if !email.contains('@') {
                return Err(DomainError::field("email", "must contain '@'"));
            }
        }
        max_len_opt("phone", self.phone.as_deref(), PHONE_MAX)?;
        max_len_opt("title", self.title.as_deref(), TITLE_MAX)
    }
}

pub trait ToSalesforceContact {
    fn to_salesforce_contact(&self) -> SalesforceContact;
}

impl<T: SalesforceContactRecord + ?Sized> ToSalesforceContact for T {
    fn to_salesforce_contact(&self) -> SalesforceContact {
        SalesforceContact {
            id: self.contact_id(),
            salesforce_id: self.salesforce_id().cloned(),
            account_id: self.account_id(),
            first_name: self.first_name().map(str::to_string),
            last_name: self.last_name().to_string(),
            email: self.email().map(str::to_string),
            phone: self.phone().map(str::to_string),
            title: self.title().map(str::to_string),
        }
    }
}
