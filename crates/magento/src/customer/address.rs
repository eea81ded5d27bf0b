use serde::{Deserialize, Serialize};

use whippet_core::validate::{len_between, max_len, max_len_opt};
use whippet_core::{DomainError, DomainResult, EntityId, Validate, ValueObject};

use crate::entity::{MagentoId, impl_magento_entity, validate_country_id};

pub const STREET_LINES_MAX: usize = 4;
pub const ADDRESS_FIELD_MAX: usize = 255;

/// Region part of a Magento customer address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CustomerAddressRegion {
    pub region_code: Option<String>,
    pub region: Option<String>,
    pub region_id: Option<MagentoId>,
}

impl ValueObject for CustomerAddressRegion {}

impl CustomerAddressRegion {
    pub fn new(region_code: impl Into<String>, region: impl Into<String>, region_id: MagentoId) -> Self {
        Self {
            region_code: Some(region_code.into()),
            region: Some(region.into()),
            region_id: Some(region_id),
        }
    }
}

pub trait MagentoCustomerAddressRecord {
    fn address_id(&self) -> EntityId;
    fn magento_entity_id(&self) -> Option<MagentoId>;
    fn customer_id(&self) -> Option<EntityId>;
    fn region(&self) -> &CustomerAddressRegion;
    fn country_id(&self) -> &str;
    fn street(&self) -> &[String];
    fn company(&self) -> Option<&str>;
    fn telephone(&self) -> &str;
    fn fax(&self) -> Option<&str>;
    fn postcode(&self) -> &str;
    fn city(&self) -> &str;
    fn first_name(&self) -> &str;
    fn last_name(&self) -> &str;
    fn vat_id(&self) -> Option<&str>;
    fn default_shipping(&self) -> bool;
    fn default_billing(&self) -> bool;
}

/// A customer address as Magento's `customer_address_entity` holds it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MagentoCustomerAddress {
    pub id: EntityId,
    pub magento_id: Option<MagentoId>,
    /// Owning customer (Whippet id).
    pub customer_id: Option<EntityId>,
    #[serde(default)]
    pub region: CustomerAddressRegion,
    pub country_id: String,
    pub street: Vec<String>,
    pub company: Option<String>,
    pub telephone: String,
    pub fax: Option<String>,
    pub postcode: String,
    pub city: String,
    pub first_name: String,
    pub last_name: String,
    pub vat_id: Option<String>,
    #[serde(default)]
    pub default_shipping: bool,
    #[serde(default)]
    pub default_billing: bool,
}

impl_magento_entity!(MagentoCustomerAddress, "magento.customer_address");

impl MagentoCustomerAddress {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        street: Vec<String>,
        city: impl Into<String>,
        postcode: impl Into<String>,
        country_id: impl Into<String>,
        telephone: impl Into<String>,
    ) -> Self {
        Self {
            id: EntityId::new(),
            magento_id: None,
            customer_id: None,
            region: CustomerAddressRegion::default(),
            country_id: country_id.into(),
            street,
            company: None,
            telephone: telephone.into(),
            fax: None,
            postcode: postcode.into(),
            city: city.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            vat_id: None,
            default_shipping: false,
            default_billing: false,
        }
    }

    pub fn with_region(mut self, region: CustomerAddressRegion) -> Self {
        self.region = region;
        self
    }
}

impl MagentoCustomerAddressRecord for MagentoCustomerAddress {
    fn address_id(&self) -> EntityId {
        self.id
    }
    fn magento_entity_id(&self) -> Option<MagentoId> {
        self.magento_id
    }
    fn customer_id(&self) -> Option<EntityId> {
        self.customer_id
    }
    fn region(&self) -> &CustomerAddressRegion {
        &self.region
    }
    fn country_id(&self) -> &str {
        &self.country_id
    }
    fn street(&self) -> &[String] {
        &self.street
    }
    fn company(&self) -> Option<&str> {
        self.company.as_deref()
    }
    fn telephone(&self) -> &str {
        &self.telephone
    }
    fn fax(&self) -> Option<&str> {
        self.fax.as_deref()
    }
    fn postcode(&self) -> &str {
        &self.postcode
    }
    fn city(&self) -> &str {
        &self.city
    }
    fn first_name(&self) -> &str {
        &self.first_name
    }
    fn last_name(&self) -> &str {
        &self.last_name
    }
    fn vat_id(&self) -> Option<&str> {
        self.vat_id.as_deref()
    }
    fn default_shipping(&self) -> bool {
        self.default_shipping
    }
    fn default_billing(&self) -> bool {
        self.default_billing
    }
}

impl Validate for MagentoCustomerAddress {
    fn validate(&self) -> DomainResult<()> {
        if self.street.is_empty() || self.street.len() > STREET_LINES_MAX {
            return Err(DomainError::field(
                "street",
                format!("expected 1..={STREET_LINES_MAX} lines, got {}", self.street.len()),
            ));
        }
        len_between("street", &self.street[0], 1, ADDRESS_FIELD_MAX)?;
        for line in &self.street[1..] {
            max_len("street", line, ADDRESS_FIELD_MAX)?;
        }
        validate_country_id("country_id", &self.country_id)?;
        len_between("telephone", &self.telephone, 1, ADDRESS_FIELD_MAX)?;
        len_between("city", &self.city, 1, ADDRESS_FIELD_MAX)?;
        len_between("first_name", &self.first_name, 1, ADDRESS_FIELD_MAX)?;
        len_between("last_name", &self.last_name, 1, ADDRESS_FIELD_MAX)?;
        max_len("postcode", &self.postcode, ADDRESS_FIELD_MAX)?;
        max_len_opt("company", self.company.as_deref(), ADDRESS_FIELD_MAX)?;
        max_len_opt("fax", self.fax.as_deref(), ADDRESS_FIELD_MAX)?;
        max_len_opt("vat_id", self.vat_id.as_deref(), ADDRESS_FIELD_MAX)?;
        max_len_opt("region", self.region.region.as_deref(), ADDRESS_FIELD_MAX)?;
        Ok(())
    }
}

pub trait ToMagentoCustomerAddress {
    fn to_magento_customer_address(&self) -> MagentoCustomerAddress;
}

impl<T: MagentoCustomerAddressRecord + ?Sized> ToMagentoCustomerAddress for T {
    fn to_magento_customer_address(&self) -> MagentoCustomerAddress {
        MagentoCustomerAddress {
            id: self.address_id(),
            magento_id: self.magento_entity_id(),
            customer_id: self.customer_id(),
            region: self.region().clone(),
            country_id: self.country_id().to_string(),
            street: self.street().to_vec(),
            company: self.company().map(str::to_string),
            telephone: self.telephone().to_string(),
            fax: self.fax().map(str::to_string),
            postcode: self.postcode().to_string(),
            city: self.city().to_string(),
            first_name: self.first_name().to_string(),
            last_name: self.last_name().to_string(),
            vat_id: self.vat_id().map(str::to_string),
            default_shipping: self.default_shipping(),
            default_billing: self.default_billing(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> MagentoCustomerAddress {
        MagentoCustomerAddress::new(
            "Veronica",
            "Costello",
            vec!["6146 Honey Bluff Parkway".into()],
            "Calder",
            "49628-7978",
            "US",
            "(555) 229-3326",
        )
        .with_region(CustomerAddressRegion::new("MI", "Michigan", 33))
    }

    #[test]
    fn sample_address_is_valid() {
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn street_must_have_one_to_four_lines() {
        let mut a = sample();
        a.street.clear();
        assert!(a.validate().is_err());

        a.street = vec!["a".into(), "b".into(), "c".into(), "d".into(), "e".into()];
        assert!(a.validate().is_err());
    }

    #[test]
    fn blank_first_street_line_is_rejected() {
        let mut a = sample();
        a.street = vec!["  ".into(), "Unit 2".into()];
        assert!(a.validate().is_err());
    }

    #[test]
    fn country_id_must_be_iso_alpha2() {
        let mut a = sample();
        a.country_id = "USA".into();
        assert_eq!(
            a.validate().unwrap_err(),
            DomainError::Validation("country_id: must be a two-letter ISO country code".into())
        );
    }

    #[test]
    fn conversion_preserves_region() {
        let a = sample();
        let copy = (&a as &dyn MagentoCustomerAddressRecord).to_magento_customer_address();
        assert_eq!(copy, a);
        assert_eq!(copy.region.region_code.as_deref(), Some("MI"));
    }
}
