//! Repository interfaces for addressing entities.
//!
//! Query methods default to scanning [`Repository::list`]; indexed backends override them.

use whippet_core::{DomainResult, EntityId, Repository, TenantId};

use crate::{Address, City, Country, PostalCode, StateProvince};

pub trait CountryRepository: Repository<Country> {
    /// Lookup by ISO alpha-2 code, ignoring case.
    fn find_by_abbreviation(
        &self,
        tenant_id: TenantId,
        abbreviation: &str,
    ) -> DomainResult<Option<Country>> {
        self.find_first(tenant_id, &|c: &Country| {
            c.abbreviation.eq_ignore_ascii_case(abbreviation)
        })
    }
}

pub trait StateProvinceRepository: Repository<StateProvince> {
    fn find_by_abbreviation(
        &self,
        tenant_id: TenantId,
        country_id: EntityId,
        abbreviation: &str,
    ) -> DomainResult<Option<StateProvince>> {
        self.find_first(tenant_id, &|s: &StateProvince| {
            s.country_id == country_id && s.abbreviation.eq_ignore_ascii_case(abbreviation)
        })
    }

    fn list_for_country(
        &self,
        tenant_id: TenantId,
        country_id: EntityId,
    ) -> DomainResult<Vec<StateProvince>> {
        self.filter(tenant_id, &|s: &StateProvince| s.country_id == country_id)
    }
}

pub trait CityRepository: Repository<City> {
    /// Case-insensitive name lookup within one state/province.
    fn find_by_name(
        &self,
        tenant_id: TenantId,
        state_province_id: EntityId,
        name: &str,
    ) -> DomainResult<Option<City>> {
        let wanted = name.trim().to_lowercase();
        self.find_first(tenant_id, &|c: &City| {
            c.state_province_id == state_province_id && c.name.trim().to_lowercase() == wanted
        })
    }

    fn list_for_state_province(
        &self,
        tenant_id: TenantId,
        state_province_id: EntityId,
    ) -> DomainResult<Vec<City>> {
        self.filter(tenant_id, &|c: &City| c.state_province_id == state_province_id)
    }
}

pub trait PostalCodeRepository: Repository<PostalCode> {
    fn find_by_code(&self, tenant_id: TenantId, code: &str) -> DomainResult<Option<PostalCode>> {
        let wanted = normalize_postal_code(code);
        self.find_first(tenant_id, &|p: &PostalCode| {
            normalize_postal_code(&p.code) == wanted
        })
    }

    fn list_for_city(&self, tenant_id: TenantId, city_id: EntityId) -> DomainResult<Vec<PostalCode>> {
        self.filter(tenant_id, &|p: &PostalCode| p.city_id == city_id)
    }
}

pub trait AddressRepository: Repository<Address> {}

/// Uppercase and drop spaces so "m5v 2t6" matches "M5V2T6".
pub fn normalize_postal_code(code: &str) -> String {
    code.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_uppercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_postal_code_ignores_case_and_spaces() {
        assert_eq!(normalize_postal_code(" m5v 2t6"), "M5V2T6");
        assert_eq!(normalize_postal_code("43215"), "43215");
    }
}
