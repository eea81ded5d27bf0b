use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use whippet_core::validate::{len_between, max_len_opt};
use whippet_core::{DomainError, DomainResult, EntityId, Validate};

use super::address::{
    MagentoCustomerAddress, MagentoCustomerAddressRecord, ToMagentoCustomerAddress,
};
use crate::entity::{MagentoId, impl_magento_entity};

pub const CUSTOMER_FIELD_MAX: usize = 255;

/// Magento gender attribute (`1` male, `2` female, `3` not specified).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Male,
    Female,
    #[default]
    NotSpecified,
}

impl Gender {
    pub fn code(self) -> u8 {
        match self {
            Gender::Male => 1,
            Gender::Female => 2,
            Gender::NotSpecified => 3,
        }
    }

    /// Unknown codes (including Magento's `0`) map to `NotSpecified`.
    pub fn from_code(code: u8) -> Self {
        match code {
            1 => Gender::Male,
            2 => Gender::Female,
            _ => Gender::NotSpecified,
        }
    }
}

pub trait MagentoCustomerRecord {
    fn customer_id(&self) -> EntityId;
    fn magento_entity_id(&self) -> Option<MagentoId>;
    fn group_id(&self) -> MagentoId;
    fn email(&self) -> &str;
    fn prefix(&self) -> Option<&str>;
    fn first_name(&self) -> &str;
    fn middle_name(&self) -> Option<&str>;
    fn last_name(&self) -> &str;
    fn suffix(&self) -> Option<&str>;
    fn date_of_birth(&self) -> Option<NaiveDate>;
    fn gender(&self) -> Gender;
    fn store_id(&self) -> MagentoId;
    fn website_id(&self) -> MagentoId;
    fn tax_vat(&self) -> Option<&str>;
    fn created_in(&self) -> Option<&str>;
    fn disable_auto_group_change(&self) -> bool;
    fn created_at(&self) -> Option<DateTime<Utc>>;
    fn updated_at(&self) -> Option<DateTime<Utc>>;
    fn addresses(&self) -> Vec<&dyn MagentoCustomerAddressRecord>;
}

/// A Magento customer account together with its address book.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MagentoCustomer {
    pub id: EntityId,
    pub magento_id: Option<MagentoId>,
    pub group_id: MagentoId,
    pub email: String,
    pub prefix: Option<String>,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub suffix: Option<String>,
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default)]
    pub gender: Gender,
    pub store_id: MagentoId,
    pub website_id: MagentoId,
    pub tax_vat: Option<String>,
    /// Store view name the account was created in.
    pub created_in: Option<String>,
    #[serde(default)]
    pub disable_auto_group_change: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub addresses: Vec<MagentoCustomerAddress>,
}

impl_magento_entity!(MagentoCustomer, "magento.customer");

impl MagentoCustomer {
    /// New customer in the default group (1, "General") of store/website 1.
    pub fn new(
        email: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            id: EntityId::new(),
            magento_id: None,
            group_id: 1,
            email: email.into(),
            prefix: None,
            first_name: first_name.into(),
            middle_name: None,
            last_name: last_name.into(),
            suffix: None,
            date_of_birth: None,
            gender: Gender::NotSpecified,
            store_id: 1,
            website_id: 1,
            tax_vat: None,
            created_in: None,
            disable_auto_group_change: false,
            created_at: None,
            updated_at: None,
            addresses: Vec::new(),
        }
    }

    /// Prefix, first, middle, last and suffix joined by single spaces, skipping blanks.
    pub fn full_name(&self) -> String {
        [
            self.prefix.as_deref(),
            Some(self.first_name.as_str()),
            self.middle_name.as_deref(),
            Some(self.last_name.as_str()),
            self.suffix.as_deref(),
        ]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
    }

    pub fn default_billing_address(&self) -> Option<&MagentoCustomerAddress> {
        self.addresses.iter().find(|a| a.default_billing)
    }

    pub fn default_shipping_address(&self) -> Option<&MagentoCustomerAddress> {
        self.addresses.iter().find(|a| a.default_shipping)
    }

    /// Append an address, claiming it for this customer.
    ///
    /// The first address added while no default exists becomes the default billing
    /// and/or shipping address. An incoming address flagged as default takes the flag
    /// over from the current default.
    pub fn add_address(&mut self, mut address: MagentoCustomerAddress) {
        address.customer_id = Some(self.id);
        if address.default_billing {
            self.addresses.iter_mut().for_each(|a| a.default_billing = false);
        } else if self.default_billing_address().is_none() {
            address.default_billing = true;
        }
        if address.default_shipping {
            self.addresses.iter_mut().for_each(|a| a.default_shipping = false);
        } else if self.default_shipping_address().is_none() {
            address.default_shipping = true;
        }
        self.addresses.push(address);
    }

    pub fn remove_address(&mut self, address_id: EntityId) -> DomainResult<MagentoCustomerAddress> {
        let idx = self
            .addresses
            .iter()
            .position(|a| a.id == address_id)
            .ok_or(DomainError::NotFound)?;
        Ok(self.addresses.remove(idx))
    }

    pub fn set_default_billing(&mut self, address_id: EntityId) -> DomainResult<()> {
        self.ensure_address(address_id)?;
        for a in &mut self.addresses {
            a.default_billing = a.id == address_id;
        }
        Ok(())
    }

    pub fn set_default_shipping(&mut self, address_id: EntityId) -> DomainResult<()> {
        self.ensure_address(address_id)?;
        for a in &mut self.addresses {
            a.default_shipping = a.id == address_id;
        }
        Ok(())
    }

    fn ensure_address(&self, address_id: EntityId) -> DomainResult<()> {
        if self.addresses.iter().any(|a| a.id == address_id) {
            Ok(())
        } else {
            Err(DomainError::NotFound)
        }
    }
}

impl MagentoCustomerRecord for MagentoCustomer {
    fn customer_id(&self) -> EntityId {
        self.id
    }
    fn magento_entity_id(&self) -> Option<MagentoId> {
        self.magento_id
    }
    fn group_id(&self) -> MagentoId {
        self.group_id
    }
    fn email(&self) -> &str {
        &self.email
    }
    fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }
    fn first_name(&self) -> &str {
        &self.first_name
    }
    fn middle_name(&self) -> Option<&str> {
        self.middle_name.as_deref()
    }
    fn last_name(&self) -> &str {
        &self.last_name
    }
    fn suffix(&self) -> Option<&str> {
        self.suffix.as_deref()
    }
    fn date_of_birth(&self) -> Option<NaiveDate> {
        self.date_of_birth
    }
    fn gender(&self) -> Gender {
        self.gender
    }
    fn store_id(&self) -> MagentoId {
        self.store_id
    }
    fn website_id(&self) -> MagentoId {
        self.website_id
    }
    fn tax_vat(&self) -> Option<&str> {
        self.tax_vat.as_deref()
    }
    fn created_in(&self) -> Option<&str> {
        self.created_in.as_deref()
    }
    fn disable_auto_group_change(&self) -> bool {
        self.disable_auto_group_change
    }
    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }
    fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }
    fn addresses(&self) -> Vec<&dyn MagentoCustomerAddressRecord> {
        self.addresses
            .iter()
            .map(|a| a as &dyn MagentoCustomerAddressRecord)
            .collect()
    }
}

impl Validate for MagentoCustomer {
    fn validate(&self) -> DomainResult<()> {
        len_between("email", &self.email, 1, CUSTOMER_FIELD_MAX)?;
        match self.email.split_once('@') {
            Some((local, domain)) if !local.is_empty() && !domain.is_empty() => {}
            _ => return Err(DomainError::field("email", "is not a valid address")),
        }
        len_between("first_name", &self.first_name, 1, CUSTOMER_FIELD_MAX)?;
        len_between("last_name", &self.last_name, 1, CUSTOMER_FIELD_MAX)?;
        max_len_opt("middle_name", self.middle_name.as_deref(), CUSTOMER_FIELD_MAX)?;
        max_len_opt("prefix", self.prefix.as_deref(), 40)?;
        max_len_opt("suffix", self.suffix.as_deref(), 40)?;
        max_len_opt("tax_vat", self.tax_vat.as_deref(), 50)?;

        for address in &self.addresses {
            if address.customer_id.is_some_and(|owner| owner != self.id) {
                return Err(DomainError::invariant(format!(
                    "address {} belongs to another customer",
                    address.id
                )));
            }
            address.validate()?;
        }
        if self.addresses.iter().filter(|a| a.default_billing).count() > 1 {
            return Err(DomainError::invariant("more than one default billing address"));
        }
        if self.addresses.iter().filter(|a| a.default_shipping).count() > 1 {
            return Err(DomainError::invariant("more than one default shipping address"));
        }
        Ok(())
    }
}

pub trait ToMagentoCustomer {
    fn to_magento_customer(&self) -> MagentoCustomer;
}

impl<T: MagentoCustomerRecord + ?Sized> ToMagentoCustomer for T {
    fn to_magento_customer(&self) -> MagentoCustomer {
        MagentoCustomer {
            id: self.customer_id(),
            magento_id: self.magento_entity_id(),
            group_id: self.group_id(),
            email: self.email().to_string(),
            prefix: self.prefix().map(str::to_string),
            first_name: self.first_name().to_string(),
            middle_name: self.middle_name().map(str::to_string),
            last_name: self.last_name().to_string(),
            suffix: self.suffix().map(str::to_string),
            date_of_birth: self.date_of_birth(),
            gender: self.gender(),
            store_id: self.store_id(),
            website_id: self.website_id(),
            tax_vat: self.tax_vat().map(str::to_string),
            created_in: self.created_in().map(str::to_string),
            disable_auto_group_change: self.disable_auto_group_change(),
            created_at: self.created_at(),
            updated_at: self.updated_at(),
            addresses: self
                .addresses()
                .into_iter()
                .map(|a| a.to_magento_customer_address())
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::customer::address::CustomerAddressRegion;

    fn veronica() -> MagentoCustomer {
        MagentoCustomer::new("roni_cost@example.com", "Veronica", "Costello")
    }

    fn address(street: &str) -> MagentoCustomerAddress {
        MagentoCustomerAddress::new(
            "Veronica",
            "Costello",
            vec![street.to_string()],
            "Calder",
            "49628-7978",
            "US",
            "(555) 229-3326",
        )
        .with_region(CustomerAddressRegion::new("MI", "Michigan", 33))
    }

    #[test]
    fn full_name_skips_missing_parts() {
        let mut c = veronica();
        assert_eq!(c.full_name(), "Veronica Costello");

        c.prefix = Some("Dr.".into());
        c.middle_name = Some(" ".into());
        c.suffix = Some("PhD".into());
        assert_eq!(c.full_name(), "Dr. Veronica Costello PhD");
    }

    #[test]
    fn first_address_becomes_default_billing_and_shipping() {
        let mut c = veronica();
        let first = address("6146 Honey Bluff Parkway");
        let second = address("1 Infinite Loop");
        let first_id = first.id;

        c.add_address(first);
        c.add_address(second);

        assert_eq!(c.default_billing_address().map(|a| a.id), Some(first_id));
        assert_eq!(c.default_shipping_address().map(|a| a.id), Some(first_id));
        assert!(c.addresses.iter().all(|a| a.customer_id == Some(c.id)));
        assert!(c.validate().is_ok());
    }

    #[test]
    fn set_default_shipping_moves_the_flag() {
        let mut c = veronica();
        c.add_address(address("6146 Honey Bluff Parkway"));
        let second = address("1 Infinite Loop");
        let second_id = second.id;
        c.add_address(second);

        c.set_default_shipping(second_id).unwrap();

        assert_eq!(c.default_shipping_address().map(|a| a.id), Some(second_id));
        assert_ne!(c.default_billing_address().map(|a| a.id), Some(second_id));
        assert_eq!(c.set_default_billing(EntityId::new()), Err(DomainError::NotFound));
    }

    #[test]
    fn validate_rejects_bad_email() {
        let mut c = veronica();
        c.email = "roni_cost.example.com".into();
        assert!(c.validate().is_err());
        c.email = "@example.com".into();
        assert!(c.validate().is_err());
        c.email = "roni@".into();
        assert!(c.validate().is_err());
        c.email = "roni@localhost".into();
        assert!(c.validate().is_ok());
    }

    #[test]
    fn added_default_address_takes_over_the_flags() {
        let mut c = veronica();
        let first = address("6146 Honey Bluff Parkway");
        let first_id = first.id;
        c.add_address(first);

        let mut billing = address("1 Infinite Loop");
        billing.default_billing = true;
        let billing_id = billing.id;
        c.add_address(billing);

        assert_eq!(c.default_billing_address().map(|a| a.id), Some(billing_id));
        assert_eq!(c.default_shipping_address().map(|a| a.id), Some(first_id));
        assert_eq!(c.addresses.iter().filter(|a| a.default_billing).count(), 1);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn validate_rejects_two_default_billing_addresses() {
        let mut c = veronica();
        c.add_address(address("a"));
        let mut b = address("b");
        b.default_billing = true;
        c.addresses.push(b);
        assert!(matches!(c.validate(), Err(DomainError::InvariantViolation(_))));
    }

    #[test]
    fn validate_rejects_address_of_another_customer() {
        let mut c = veronica();
        let mut a = address("a");
        a.customer_id = Some(EntityId::new());
        c.addresses.push(a);
        assert!(matches!(c.validate(), Err(DomainError::InvariantViolation(_))));
    }

    #[test]
    fn gender_codes_match_magento() {
        assert_eq!(Gender::from_code(1), Gender::Male);
        assert_eq!(Gender::from_code(2).code(), 2);
        assert_eq!(Gender::from_code(0), Gender::NotSpecified);
    }

    #[test]
    fn conversion_copies_address_book() {
        let mut c = veronica();
        c.add_address(address("6146 Honey Bluff Parkway"));
        let copy = (&c as &dyn MagentoCustomerRecord).to_magento_customer();
        assert_eq!(copy, c);
        assert_eq!(copy.addresses.len(), 1);
    }

    #[test]
    fn remove_address_returns_it() {
        let mut c = veronica();
        let a = address("a");
        let id = a.id;
        c.add_address(a);
        assert_eq!(c.remove_address(id).unwrap().id, id);
        assert!(c.addresses.is_empty());
        assert_eq!(c.remove_address(id).unwrap_err(), DomainError::NotFound);
    }
}
