use serde::{Deserialize, Serialize};

use whippet_core::validate::{len_between, max_len_opt};
use whippet_core::{DomainError, DomainResult, Entity, EntityId, Validate};

use crate::city::{City, CityRecord, ToCity};
use crate::postal_code::{PostalCode, PostalCodeRecord, ToPostalCode};

pub const ADDRESS_LINE_MAX: usize = 255;

pub trait AddressRecord {
    fn address_id(&self) -> EntityId;
    fn line_one(&self) -> &str;
    fn line_two(&self) -> Option<&str>;
    fn city(&self) -> Option<&dyn CityRecord>;
    fn postal_code(&self) -> Option<&dyn PostalCodeRecord>;
}

/// A street address. City, state and country come from the navigation chain.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Address {
    pub id: EntityId,
    pub line_one: String,
    pub line_two: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<City>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<PostalCode>,
}

impl Address {
    pub fn new(line_one: impl Into<String>) -> Self {
        Self {
            id: EntityId::new(),
            line_one: line_one.into(),
            line_two: None,
            city: None,
            postal_code: None,
        }
    }

    pub fn with_line_two(mut self, line_two: impl Into<String>) -> Self {
        self.line_two = Some(line_two.into());
        self
    }

    pub fn with_city(mut self, city: City) -> Self {
        self.city = Some(city);
        self
    }

    pub fn with_postal_code(mut self, postal_code: PostalCode) -> Self {
        self.postal_code = Some(postal_code);
        self
    }

    /// Comma-separated mailing form, e.g. `"1 Main St, Suite 4, Columbus, OH 43215, US"`.
    ///
    /// Parts that are not loaded are left out.
    pub fn single_line(&self) -> String {
        let mut parts: Vec<String> = vec![self.line_one.trim().to_string()];
        if let Some(two) = self.line_two.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            parts.push(two.to_string());
        }

        let state = self.city.as_ref().and_then(|c| c.state_province.as_deref());
        if let Some(city) = &self.city {
            parts.push(city.name.clone());
        }

        let region = match (state, &self.postal_code) {
            (Some(s), Some(p)) => Some(format!("{} {}", s.abbreviation, p.code)),
            (Some(s), None) => Some(s.abbreviation.clone()),
            (None, Some(p)) => Some(p.code.clone()),
            (None, None) => None,
        };
        parts.extend(region);

        if let Some(country) = state.and_then(|s| s.country.as_deref()) {
            parts.push(country.abbreviation.clone());
        }

        parts.retain(|p| !p.is_empty());
        parts.join(", ")
    }
}

impl Entity for Address {
    type Id = EntityId;
    const ENTITY_TYPE: &'static str = "addressing.address";

    fn id(&self) -> &EntityId {
        &self.id
    }
}

impl AddressRecord for Address {
    fn address_id(&self) -> EntityId {
        self.id
    }

    fn line_one(&self) -> &str {
        &self.line_one
    }

    fn line_two(&self) -> Option<&str> {
        self.line_two.as_deref()
    }

    fn city(&self) -> Option<&dyn CityRecord> {
        self.city.as_ref().map(|c| c as &dyn CityRecord)
    }

    fn postal_code(&self) -> Option<&dyn PostalCodeRecord> {
        self.postal_code.as_ref().map(|p| p as &dyn PostalCodeRecord)
    }
}

impl Validate for Address {
    fn validate(&self) -> DomainResult<()> {
        len_between("line_one", &self.line_one, 1, ADDRESS_LINE_MAX)?;
        max_len_opt("line_two", self.line_two.as_deref(), ADDRESS_LINE_MAX)?;
        if let (Some(city), Some(postal)) = (&self.city, &self.postal_code) {
            if postal.city_id != city.id {
                return Err(DomainError::invariant(format!(
                    "postal code {} belongs to another city than {}",
                    postal.code, city.name
                )));
            }
        }
        self.city.validate()?;
        self.postal_code.validate()
    }
}

pub trait ToAddress {
    fn to_address(&self) -> Address;
}

impl<T: AddressRecord + ?Sized> ToAddress for T {
    fn to_address(&self) -> Address {
        Address {
            id: self.address_id(),
            line_one: self.line_one().to_string(),
            line_two: self.line_two().map(str::to_string),
            city: self.city().map(|c| c.to_city()),
            postal_code: self.postal_code().map(|p| p.to_postal_code()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::country::Country;
    use crate::state_province::StateProvince;

    fn columbus() -> City {
        let state = StateProvince::new("Ohio", "OH", EntityId::new())
            .with_country(Country::new("United States", "US"));
        City::new("Columbus", state.id).with_state_province(state)
    }

    #[test]
    fn single_line_uses_full_navigation_chain() {
        let city = columbus();
        let zip = PostalCode::new("43215", city.id);
        let address = Address::new("1 Main St")
            .with_line_two("Suite 4")
            .with_city(city)
            .with_postal_code(zip);

        assert_eq!(address.single_line(), "1 Main St, Suite 4, Columbus, OH 43215, US");
        assert!(address.validate().is_ok());
    }

    #[test]
    fn single_line_skips_missing_parts() {
        let address = Address::new("PO Box 9").with_line_two("  ");
        assert_eq!(address.single_line(), "PO Box 9");
    }

    #[test]
    fn postal_code_from_other_city_is_rejected() {
        let address = Address::new("1 Main St")
            .with_city(columbus())
            .with_postal_code(PostalCode::new("10001", EntityId::new()));
        assert!(matches!(
            address.validate(),
            Err(DomainError::InvariantViolation(_))
        ));
    }

    #[test]
    fn to_address_round_trips_through_record_view() {
        let city = columbus();
        let address = Address::new("1 Main St")
            .with_postal_code(PostalCode::new("43215", city.id))
            .with_city(city);
        let record: &dyn AddressRecord = &address;
        assert_eq!(record.to_address(), address);
    }
}
