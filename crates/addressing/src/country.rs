use serde::{Deserialize, Serialize};

use whippet_core::validate::{len_between, require};
use whippet_core::{DomainError, DomainResult, Entity, EntityId, Validate};

pub const COUNTRY_NAME_MAX: usize = 100;

/// Read view of a country, implemented by anything that can describe one.
pub trait CountryRecord {
    fn country_id(&self) -> EntityId;
    fn name(&self) -> &str;
    /// ISO 3166-1 alpha-2 code.
    fn abbreviation(&self) -> &str;
}

/// A country, keyed by its ISO alpha-2 abbreviation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Country {
    pub id: EntityId,
    pub name: String,
    pub abbreviation: String,
}

impl Country {
    pub fn new(name: impl Into<String>, abbreviation: impl Into<String>) -> Self {
        Self {
            id: EntityId::new(),
            name: name.into(),
            abbreviation: abbreviation.into(),
        }
    }
}

impl Entity for Country {
    type Id = EntityId;
    const ENTITY_TYPE: &'static str = "addressing.country";

    fn id(&self) -> &EntityId {
        &self.id
    }
}

impl CountryRecord for Country {
    fn country_id(&self) -> EntityId {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn abbreviation(&self) -> &str {
        &self.abbreviation
    }
}

impl Validate for Country {
    fn validate(&self) -> DomainResult<()> {
        len_between("name", &self.name, 1, COUNTRY_NAME_MAX)?;
        require("abbreviation", &self.abbreviation)?;
        if self.abbreviation.len() != 2
            || !self.abbreviation.chars().all(|c| c.is_ascii_uppercase())
        {
            return Err(DomainError::field(
                "abbreviation",
                "must be two uppercase ASCII letters",
            ));
        }
        Ok(())
    }
}

/// Conversion from any [`CountryRecord`] to the concrete [`Country`].
pub trait ToCountry {
    fn to_country(&self) -> Country;
}

impl<T: CountryRecord + ?Sized> ToCountry for T {
    fn to_country(&self) -> Country {
        Country {
            id: self.country_id(),
            name: self.name().to_string(),
            abbreviation: self.abbreviation().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    struct IsoRow {
        id: EntityId,
        alpha2: &'static str,
        label: &'static str,
    }

    impl CountryRecord for IsoRow {
        fn country_id(&self) -> EntityId {
            self.id
        }
        fn name(&self) -> &str {
            self.label
        }
        fn abbreviation(&self) -> &str {
            self.alpha2
        }
    }

    #[test]
    fn to_country_copies_every_field_from_a_foreign_record() {
        let row = IsoRow {
            id: EntityId::new(),
            alpha2: "CA",
            label: "Canada",
        };
        let country = row.to_country();
        assert_eq!(country.id, row.id);
        assert_eq!(country.name, "Canada");
        assert_eq!(country.abbreviation, "CA");
    }

    #[test]
    fn to_country_works_through_trait_objects() {
        let original = Country::new("United States", "US");
        let record: &dyn CountryRecord = &original;
        assert_eq!(record.to_country(), original);
    }

    #[test]
    fn equality_is_by_value() {
        let a = Country::new("Mexico", "MX");
        let b = a.clone();
        assert_eq!(a, b);

        let mut c = a.clone();
        c.name = "Estados Unidos Mexicanos".into();
        assert_ne!(a, c);
    }

    #[test]
    fn validate_rejects_lowercase_or_long_abbreviations() {
        assert!(Country::new("Germany", "DE").validate().is_ok());
        assert!(Country::new("Germany", "de").validate().is_err());
        assert!(Country::new("Germany", "DEU").validate().is_err());
        assert!(Country::new("", "DE").validate().is_err());
    }

    proptest! {
        #[test]
        fn any_two_uppercase_letters_is_a_valid_abbreviation(abbr in "[A-Z]{2}") {
            prop_assert!(Country::new("Somewhere", abbr).validate().is_ok());
        }
    }
}
