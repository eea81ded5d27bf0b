use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use whippet_core::validate::{in_range, len_between};
use whippet_core::{DomainError, DomainResult, Entity, EntityId, Validate};

use crate::city::{City, CityRecord, ToCity};

pub const POSTAL_CODE_MAX: usize = 10;

pub trait PostalCodeRecord {
    fn postal_code_id(&self) -> EntityId;
    fn code(&self) -> &str;
    fn city_id(&self) -> EntityId;
    fn city(&self) -> Option<&dyn CityRecord>;
    fn latitude(&self) -> Option<Decimal>;
    fn longitude(&self) -> Option<Decimal>;
}

/// A postal/ZIP code, optionally geolocated at its centroid.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PostalCode {
    pub id: EntityId,
    pub code: String,
    pub city_id: EntityId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<Box<City>>,
    pub latitude: Option<Decimal>,
    pub longitude: Option<Decimal>,
}

impl PostalCode {
    pub fn new(code: impl Into<String>, city_id: EntityId) -> Self {
        Self {
            id: EntityId::new(),
            code: code.into(),
            city_id,
            city: None,
            latitude: None,
            longitude: None,
        }
    }

    pub fn with_city(mut self, city: City) -> Self {
        self.city_id = city.id;
        self.city = Some(Box::new(city));
        self
    }

    pub fn located_at(mut self, latitude: Decimal, longitude: Decimal) -> Self {
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
        self
    }
}

impl Entity for PostalCode {
    type Id = EntityId;
    const ENTITY_TYPE: &'static str = "addressing.postal_code";

    fn id(&self) -> &EntityId {
        &self.id
    }
}

impl PostalCodeRecord for PostalCode {
    fn postal_code_id(&self) -> EntityId {
        self.id
    }

    fn code(&self) -> &str {
        &self.code
    }

    fn city_id(&self) -> EntityId {
        self.city_id
    }

    fn city(&self) -> Option<&dyn CityRecord> {
        self.city.as_deref().map(|c| c as &dyn CityRecord)
    }

    fn latitude(&self) -> Option<Decimal> {
        self.latitude
    }

    fn longitude(&self) -> Option<Decimal> {
        self.longitude
    }
}

impl Validate for PostalCode {
    fn validate(&self) -> DomainResult<()> {
        len_between("code", &self.code, 1, POSTAL_CODE_MAX)?;
        if let Some(lat) = self.latitude {
            in_range("latitude", lat, Decimal::from(-90), Decimal::from(90))?;
        }
        if let Some(lon) = self.longitude {
            in_range("longitude", lon, Decimal::from(-180), Decimal::from(180))?;
        }
        if let Some(city) = &self.city {
            if city.id != self.city_id {
                return Err(DomainError::invariant(format!(
                    "postal code {} carries city {} but references {}",
                    self.code, city.id, self.city_id
                )));
            }
            city.validate()?;
        }
        Ok(())
    }
}

pub trait ToPostalCode {
    fn to_postal_code(&self) -> PostalCode;
}

impl<T: PostalCodeRecord + ?Sized> ToPostalCode for T {
    fn to_postal_code(&self) -> PostalCode {
        PostalCode {
            id: self.postal_code_id(),
            code: self.code().to_string(),
            city_id: self.city_id(),
            city: self.city().map(|c| Box::new(c.to_city())),
            latitude: self.latitude(),
            longitude: self.longitude(),
        }
    }
}
