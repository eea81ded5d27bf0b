//! Addressing entities: countries, states/provinces, cities, postal codes and addresses.
//!
//! Each entity comes with a record trait (read view) and a `to_*` conversion building the
//! concrete type from any record, navigation properties included.

pub mod address;
pub mod city;
pub mod country;
pub mod postal_code;
pub mod repository;
pub mod state_province;

pub use address::{Address, AddressRecord, ToAddress};
pub use city::{City, CityRecord, ToCity};
pub use country::{Country, CountryRecord, ToCountry};
pub use postal_code::{PostalCode, PostalCodeRecord, ToPostalCode};
pub use repository::{
    AddressRepository, CityRepository, CountryRepository, PostalCodeRepository,
    StateProvinceRepository,
};
pub use state_province::{StateProvince, StateProvinceRecord, ToStateProvince};
