use serde::{Deserialize, Serialize};

use whippet_core::validate::len_between;
use whippet_core::{DomainError, DomainResult, Entity, EntityId, Validate};

use crate::country::{Country, CountryRecord, ToCountry};

pub const STATE_NAME_MAX: usize = 100;
pub const STATE_ABBREVIATION_MAX: usize = 3;

/// Read view of a state or province.
pub trait StateProvinceRecord {
    fn state_province_id(&self) -> EntityId;
    fn name(&self) -> &str;
    fn abbreviation(&self) -> &str;
    fn country_id(&self) -> EntityId;
    /// Loaded parent country, if any.
    fn country(&self) -> Option<&dyn CountryRecord>;
}

/// A first-level subdivision of a country.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StateProvince {
    pub id: EntityId,
    pub name: String,
    pub abbreviation: String,
    pub country_id: EntityId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<Box<Country>>,
}

impl StateProvince {
    pub fn new(
        name: impl Into<String>,
        abbreviation: impl Into<String>,
        country_id: EntityId,
    ) -> Self {
        Self {
            id: EntityId::new(),
            name: name.into(),
            abbreviation: abbreviation.into(),
            country_id,
            country: None,
        }
    }

    /// Attach the parent country, keeping `country_id` in step.
    pub fn with_country(mut self, country: Country) -> Self {
        self.country_id = country.id;
        self.country = Some(Box::new(country));
        self
    }

    /// Navigation property must agree with the foreign key when loaded.
    pub fn check_navigation(&self) -> DomainResult<()> {
        match &self.country {
            Some(c) if c.id != self.country_id => Err(DomainError::invariant(format!(
                "state/province {} points at country {} but carries country {}",
                self.id, self.country_id, c.id
            ))),
            _ => Ok(()),
        }
    }
}

impl Entity for StateProvince {
    type Id = EntityId;
    const ENTITY_TYPE: &'static str = "addressing.state_province";

    fn id(&self) -> &EntityId {
        &self.id
    }
}

impl StateProvinceRecord for StateProvince {
    fn state_province_id(&self) -> EntityId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn abbreviation(&self) -> &str {
        &self.abbreviation
    }

    fn country_id(&self) -> EntityId {
        self.country_id
    }

    fn country(&self) -> Option<&dyn CountryRecord> {
        self.country.as_deref().map(|c| c as &dyn CountryRecord)
    }
}

impl Validate for StateProvince {
    fn validate(&self) -> DomainResult<()> {
        len_between("name", &self.name, 1, STATE_NAME_MAX)?;
        len_between("abbreviation", &self.abbreviation, 1, STATE_ABBREVIATION_MAX)?;
        self.check_navigation()?;
        if let Some(country) = &self.country {
            country.validate()?;
        }
        Ok(())
    }
}

pub trait ToStateProvince {
    fn to_state_province(&self) -> StateProvince;
}

impl<T: StateProvinceRecord + ?Sized> ToStateProvince for T {
    fn to_state_province(&self) -> StateProvince {
        StateProvince {
            id: self.state_province_id(),
            name: self.name().to_string(),
            abbreviation: self.abbreviation().to_string(),
            country_id: self.country_id(),
            country: self.country().map(|c| Box::new(c.to_country())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usa() -> Country {
        Country::new("United States", "US")
    }

    #[test]
    fn with_country_sets_foreign_key() {
        let country = usa();
        let state = StateProvince::new("Ohio", "OH", EntityId::new()).with_country(country.clone());
        assert_eq!(state.country_id, country.id);
        assert!(state.validate().is_ok());
    }

    #[test]
    fn mismatched_navigation_is_an_invariant_violation() {
        let mut state = StateProvince::new("Ohio", "OH", EntityId::new());
        state.country = Some(Box::new(usa()));
        match state.validate().unwrap_err() {
            DomainError::InvariantViolation(_) => {}
            other => panic!("expected InvariantViolation, got {other:?}"),
        }
    }

    #[test]
    fn to_state_province_converts_nested_country() {
        let state = StateProvince::new("Québec", "QC", EntityId::new())
            .with_country(Country::new("Canada", "CA"));
        let record: &dyn StateProvinceRecord = &state;
        let copy = record.to_state_province();
        assert_eq!(copy, state);
        assert_eq!(copy.country.as_ref().map(|c| c.abbreviation.as_str()), Some("CA"));
    }

    #[test]
    fn validate_checks_abbreviation_width() {
        let state = StateProvince::new("Nuevo León", "NLEO", EntityId::new());
        assert!(state.validate().is_err());
    }
}
