use serde::{Deserialize, Serialize};

use whippet_core::validate::{len_between, max_len, max_len_opt};
use whippet_core::{DomainError, DomainResult, Entity, EntityId, Validate};

/// MOM `CUST` table column widths.
pub mod widths {
    pub const FIRST_NAME: usize = 15;
    pub const LAST_NAME: usize = 20;
    pub const COMPANY: usize = 40;
    pub const ADDRESS: usize = 40;
    pub const CITY: usize = 20;
    pub const STATE: usize = 3;
    pub const ZIP: usize = 10;
    pub const COUNTRY: usize = 3;
    pub const PHONE: usize = 20;
    pub const EMAIL: usize = 80;
}

pub trait MomCustomerRecord {
    fn customer_id(&self) -> EntityId;
    fn customer_number(&self) -> u32;
    fn first_name(&self) -> &str;
    fn last_name(&self) -> &str;
    fn company(&self) -> Option<&str>;
    fn address_one(&self) -> &str;
    fn address_two(&self) -> Option<&str>;
    fn city(&self) -> &str;
    fn state(&self) -> &str;
    fn zip(&self) -> &str;
    fn country(&self) -> Option<&str>;
    fn phone(&self) -> Option<&str>;
    fn email(&self) -> Option<&str>;
}

/// A MOM customer, keyed on the MOM side by its customer number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MomCustomer {
    pub id: EntityId,
    pub customer_number: u32,
    pub first_name: String,
    pub last_name: String,
    pub company: Option<String>,
    pub address_one: String,
    pub address_two: Option<String>,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub country: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

impl MomCustomer {
    pub fn new(
        customer_number: u32,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            id: EntityId::new(),
            customer_number,
            first_name: first_name.into(),
            last_name: last_name.into(),
            company: None,
            address_one: String::new(),
            address_two: None,
            city: String::new(),
            state: String::new(),
            zip: String::new(),
            country: None,
            phone: None,
            email: None,
        }
    }

    pub fn with_address(
        mut self,
        address_one: impl Into<String>,
        city: impl Into<String>,
        state: impl Into<String>,
        zip: impl Into<String>,
    ) -> Self {
        self.address_one = address_one.into();
        self.city = city.into();
        self.state = state.into();
        self.zip = zip.into();
        self
    }

    /// "First Last", or the company when the customer is a business without a contact name.
    pub fn display_name(&self) -> String {
        let person = format!("{} {}", self.first_name.trim(), self.last_name.trim());
        let person = person.trim();
        match self.company.as_deref().map(str::trim) {
            Some(company) if person.is_empty() && !company.is_empty() => company.to_string(),
            _ => person.to_string(),
        }
    }
}

impl Entity for MomCustomer {
    type Id = EntityId;
    const ENTITY_TYPE: &'static str = "mom.customer";

    fn id(&self) -> &EntityId {
        &self.id
    }
}

impl MomCustomerRecord for MomCustomer {
    fn customer_id(&self) -> EntityId {
        self.id
    }
    fn customer_number(&self) -> u32 {
        self.customer_number
    }
    fn first_name(&self) -> &str {
        &self.first_name
    }
    fn last_name(&self) -> &str {
        &self.last_name
    }
    fn company(&self) -> Option<&str> {
        self.company.as_deref()
    }
    fn address_one(&self) -> &str {
        &self.address_one
    }
    fn address_two(&self) -> Option<&str> {
        self.address_two.as_deref()
    }
    fn city(&self) -> &str {
        &self.city
    }
    fn state(&self) -> &str {
        &self.state
    }
    fn zip(&self) -> &str {
        &self.zip
    }
    fn country(&self) -> Option<&str> {
        self.country.as_deref()
    }
    fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }
    fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }
}

impl Validate for MomCustomer {
    fn validate(&self) -> DomainResult<()> {
        if self.customer_number == 0 {
            return Err(DomainError::field("customer_number", "must be positive"));
        }
        max_len("first_name", &self.first_name, widths::FIRST_NAME)?;
        max_len("last_name", &self.last_name, widths::LAST_NAME)?;
        max_len_opt("company", self.company.as_deref(), widths::COMPANY)?;
        if self.last_name.trim().is_empty()
            && self.company.as_deref().is_none_or(|c| c.trim().is_empty())
        {
            return Err(DomainError::field("last_name", "required when no company is set"));
        }
        max_len("address_one", &self.address_one, widths::ADDRESS)?;
        max_len_opt("address_two", self.address_two.as_deref(), widths::ADDRESS)?;
        max_len("city", &self.city, widths::CITY)?;
        max_len("state", &self.state, widths::STATE)?;
        max_len("zip", &self.zip, widths::ZIP)?;
        max_len_opt("country", self.country.as_deref(), widths::COUNTRY)?;
        max_len_opt("phone", self.phone.as_deref(), widths::PHONE)?;
        if let Some(email) = self.email.as_deref() {
            len_between("email", email, 3, widths::EMAIL)?;
            if !email.contains('@') {
                return Err(DomainError::field("email", "must contain '@'"));
            }
        }
        Ok(())
    }
}

pub trait ToMomCustomer {
    fn to_mom_customer(&self) -> MomCustomer;
}

impl<T: MomCustomerRecord + ?Sized> ToMomCustomer for T {
    fn to_mom_customer(&self) -> MomCustomer {
        MomCustomer {
            id: self.customer_id(),
            customer_number: self.customer_number(),
            first_name: self.first_name().to_string(),
            last_name: self.last_name().to_string(),
            company: self.company().map(str::to_string),
            address_one: self.address_one().to_string(),
            address_two: self.address_two().map(str::to_string),
            city: self.city().to_string(),
            state: self.state().to_string(),
            zip: self.zip().to_string(),
            country: self.country().map(str::to_string),
            phone: self.phone().map(str::to_string),
            email: self.email().map(str::to_string),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn jane() -> MomCustomer {
        let mut c = MomCustomer::new(1001, "Jane", "Doe").with_address(
            "12 Elm St",
            "Columbus",
            "OH",
            "43215",
        );
        c.email = Some("jane@example.com".into());
        c
    }

    #[test]
    fn valid_customer_passes() {
        assert!(jane().validate().is_ok());
    }

    #[test]
    fn customer_number_must_be_positive() {
        let mut c = jane();
        c.customer_number = 0;
        assert_eq!(
            c.validate().unwrap_err(),
            DomainError::Validation("customer_number: must be positive".into())
        );
    }

    #[test]
    fn enforces_mom_column_widths() {
        let mut c = jane();
        c.state = "OHIO".into();
        assert!(c.validate().is_err());

        let mut c = jane();
        c.city = "A".repeat(21);
        assert!(c.validate().is_err());

        let mut c = jane();
        c.email = Some("not-an-email".into());
        assert!(c.validate().is_err());
    }

    #[test]
    fn business_customer_may_omit_names() {
        let mut c = MomCustomer::new(7, "", "");
        c.company = Some("Acme Tools".into());
        assert!(c.validate().is_ok());
        assert_eq!(c.display_name(), "Acme Tools");
        assert_eq!(jane().display_name(), "Jane Doe");

        c.company = None;
        assert!(c.validate().is_err());
    }

    #[test]
    fn conversion_from_record_is_lossless() {
        let c = jane();
        assert_eq!((&c as &dyn MomCustomerRecord).to_mom_customer(), c);
    }

    proptest! {
        #[test]
        fn first_name_width_is_fifteen(name in "[A-Za-z]{0,30}") {
            let mut c = jane();
            c.first_name = name.clone();
            prop_assert_eq!(c.validate().is_ok(), name.len() <= widths::FIRST_NAME);
        }
    }
}
