use serde::{Deserialize, Serialize};

use whippet_core::validate::len_between;
use whippet_core::{DomainError, DomainResult, Entity, EntityId, Validate};

use crate::state_province::{StateProvince, StateProvinceRecord, ToStateProvince};

pub const CITY_NAME_MAX: usize = 100;

pub trait CityRecord {
    fn city_id(&self) -> EntityId;
    fn name(&self) -> &str;
    fn state_province_id(&self) -> EntityId;
    fn state_province(&self) -> Option<&dyn StateProvinceRecord>;
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct City {
    pub id: EntityId,
    pub name: String,
    pub state_province_id: EntityId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_province: Option<Box<StateProvince>>,
}

impl City {
    pub fn new(name: impl Into<String>, state_province_id: EntityId) -> Self {
        Self {
            id: EntityId::new(),
            name: name.into(),
            state_province_id,
            state_province: None,
        }
    }

    pub fn with_state_province(mut self, state: StateProvince) -> Self {
        self.state_province_id = state.id;
        self.state_province = Some(Box::new(state));
        self
    }

    /// "Columbus, OH" when the state is loaded, otherwise just the city name.
    pub fn display_name(&self) -> String {
        match &self.state_province {
            Some(s) => format!("{}, {}", self.name, s.abbreviation),
            None => self.name.clone(),
        }
    }
}

impl Entity for City {
    type Id = EntityId;
    const ENTITY_TYPE: &'static str = "addressing.city";

    fn id(&self) -> &EntityId {
        &self.id
    }
}

impl CityRecord for City {
    fn city_id(&self) -> EntityId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn state_province_id(&self) -> EntityId {
        self.state_province_id
    }

    fn state_province(&self) -> Option<&dyn StateProvinceRecord> {
        self.state_province
            .as_deref()
            .map(|s| s as &dyn StateProvinceRecord)
    }
}

impl Validate for City {
    fn validate(&self) -> DomainResult<()> {
        len_between("name", &self.name, 1, CITY_NAME_MAX)?;
        if let Some(state) = &self.state_province {
            if state.id != self.state_province_id {
                return Err(DomainError::invariant(format!(
                    "city {} carries state/province {} but references {}",
                    self.id, state.id, self.state_province_id
                )));
            }
            state.validate()?;
        }
        Ok(())
    }
}

pub trait ToCity {
    fn to_city(&self) -> City;
}

impl<T: CityRecord + ?Sized> ToCity for T {
    fn to_city(&self) -> City {
        City {
            id: self.city_id(),
            name: self.name().to_string(),
            state_province_id: self.state_province_id(),
            state_province: self
                .state_province()
                .map(|s| Box::new(s.to_state_province())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::country::Country;

    fn ohio() -> StateProvince {
        StateProvince::new("Ohio", "OH", EntityId::new())
            .with_country(Country::new("United States", "US"))
    }

    #[test]
    fn display_name_includes_state_abbreviation_when_loaded() {
        let city = City::new("Columbus", EntityId::new()).with_state_province(ohio());
        assert_eq!(city.display_name(), "Columbus, OH");
        assert_eq!(City::new("Columbus", EntityId::new()).display_name(), "Columbus");
    }

    #[test]
    fn to_city_keeps_the_whole_navigation_chain() {
        let city = City::new("Dayton", EntityId::new()).with_state_province(ohio());
        let copy = (&city as &dyn CityRecord).to_city();
        assert_eq!(copy, city);
        let country = copy.state_province.and_then(|s| s.country).unwrap();
        assert_eq!(country.abbreviation, "US");
    }

    #[test]
    fn validate_cascades_into_loaded_parents() {
        let mut state = ohio();
        state.name = String::new();
        let city = City::new("Akron", EntityId::new()).with_state_province(state);
        assert!(matches!(city.validate(), Err(DomainError::Validation(_))));
    }
}
