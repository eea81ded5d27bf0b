use serde::{Deserialize, Serialize};

use whippet_addressing::{Address, AddressRecord, ToAddress};
use whippet_core::validate::{len_between, max_len_opt};
use whippet_core::{DomainResult, Entity, EntityId, Validate};

use crate::id::SalesforceId;

pub const ACCOUNT_NAME_MAX: usize = 255;
pub const ACCOUNT_NUMBER_MAX: usize = 40;
pub const PHONE_MAX: usize = 40;
pub const PICKLIST_MAX: usize = 255;
pub const WEBSITE_MAX: usize = 255;

pub trait SalesforceAccountRecord {
    fn account_id(&self) -> EntityId;
    fn salesforce_id(&self) -> Option<&SalesforceId>;
    fn name(&self) -> &str;
    fn account_number(&self) -> Option<&str>;
    fn account_type(&self) -> Option<&str>;
    fn industry(&self) -> Option<&str>;
    fn billing_address(&self) -> Option<&dyn AddressRecord>;
    fn phone(&self) -> Option<&str>;
    fn website(&self) -> Option<&str>;
}

/// A Salesforce `Account` (a company or household).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SalesforceAccount {
    pub id: EntityId,
    pub salesforce_id: Option<SalesforceId>,
    pub name: String,
    pub account_number: Option<String>,
    /// The `Type` picklist ("Customer - Direct", "Partner", ...).
    pub account_type: Option<String>,
    pub industry: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub billing_address: Option<Address>,
    pub phone: Option<String>,
    pub website: Option<String>,
}

impl SalesforceAccount {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: EntityId::new(),
            salesforce_id: None,
            name: name.into(),
            account_number: None,
            account_type: None,
            industry: None,
            billing_address: None,
            phone: None,
            website: None,
        }
    }

    pub fn with_salesforce_id(mut self, salesforce_id: SalesforceId) -> Self {
        self.salesforce_id = Some(salesforce_id);
        self
    }

    pub fn with_billing_address(mut self, address: Address) -> Self {
        self.billing_address = Some(address);
        self
    }

    pub fn is_synced(&self) -> bool {
        self.salesforce_id.is_some()
    }
}

impl Entity for SalesforceAccount {
    type Id = EntityId;
    const ENTITY_TYPE: &'static str = "salesforce.account";

    fn id(&self) -> &EntityId {
        &self.id
    }
}

impl SalesforceAccountRecord for SalesforceAccount {
    fn account_id(&self) -> EntityId {
        self.id
    }
    fn salesforce_id(&self) -> Option<&SalesforceId> {
        self.salesforce_id.as_ref()
    }
    fn name(&self) -> &str {
        &self.name
    }
    fn account_number(&self) -> Option<&str> {
        self.account_number.as_deref()
    }
    fn account_type(&self) -> Option<&str> {
        self.account_type.as_deref()
    }
    fn industry(&self) -> Option<&str> {
        self.industry.as_deref()
    }
    fn billing_address(&self) -> Option<&dyn AddressRecord> {
        self.billing_address
            .as_ref()
            .map(|a| a as &dyn AddressRecord)
    }
    fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }
    fn website(&self) -> Option<&str> {
        self.website.as_deref()
    }
}

impl Validate for SalesforceAccount {
    fn validate(&self) -> DomainResult<()> {
        len_between("name", &self.name, 1, ACCOUNT_NAME_MAX)?;
        max_len_opt("account_number", self.account_number.as_deref(), ACCOUNT_NUMBER_MAX)?;
        max_len_opt("account_type", self.account_type.as_deref(), PICKLIST_MAX)?;
        max_len_opt("industry", self.industry.as_deref(), PICKLIST_MAX)?;
        max_len_opt("phone", self.phone.as_deref(), PHONE_MAX)?;
        max_len_opt("website", self.website.as_deref(), WEBSITE_MAX)?;
        self.billing_address.validate()
    }
}

pub trait ToSalesforceAccount {
    fn to_salesforce_account(&self) -> SalesforceAccount;
}

impl<T: SalesforceAccountRecord + ?Sized> ToSalesforceAccount for T {
    fn to_salesforce_account(&self) -> SalesforceAccount {
        SalesforceAccount {
            id: self.account_id(),
            salesforce_id: self.salesforce_id().cloned(),
            name: self.name().to_string(),
            account_number: self.account_number().map(str::to_string),
            account_type: self.account_type().map(str::to_string),
            industry: self.industry().map(str::to_string),
            billing_address: self.billing_address().map(|a| a.to_address()),
            phone: self.phone().map(str::to_string),
            website: self.website().map(str::to_string),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use whippet_core::DomainError;

    fn acme() -> SalesforceAccount {
        let mut a = SalesforceAccount::new("Acme Corp")
            .with_salesforce_id("001D000000IRFmaIAH".parse().unwrap())
            .with_billing_address(Address::new("1 Main St"));
        a.industry = Some("Manufacturing".into());
        a.website = Some("https://acme.example".into());
        a
    }

    #[test]
    fn validate_requires_name_within_limit() {
        assert!(acme().validate().is_ok());

        let mut a = acme();
        a.name = " ".into();
        assert_eq!(
            a.validate().unwrap_err(),
            DomainError::Validation("name: cannot be empty".into())
        );

        let mut a = acme();
        a.name = "n".repeat(256);
        assert!(a.validate().is_err());
    }

    #[test]
    fn validate_cascades_into_billing_address() {
        let a = acme().with_billing_address(Address::new("x".repeat(300)));
        assert!(a.validate().is_err());
    }

    #[test]
    fn conversion_copies_billing_address() {
        let a = acme();
        let copy = (&a as &dyn SalesforceAccountRecord).to_salesforce_account();
        assert_eq!(copy, a);
        assert!(copy.is_synced());
        assert!(!SalesforceAccount::new("New").is_synced());
    }
}
