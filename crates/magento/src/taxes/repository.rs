use whippet_core::{DomainResult, Repository, TenantId};

use super::{TaxClass, TaxClassType, TaxRate, TaxRule};
use crate::entity::MagentoId;

pub trait TaxRateRepository: Repository<TaxRate> {
    fn find_by_code(&self, tenant_id: TenantId, code: &str) -> DomainResult<Option<TaxRate>> {
        self.find_first(tenant_id, &|r: &TaxRate| r.code == code)
    }

    fn list_for_country(&self, tenant_id: TenantId, country_id: &str) -> DomainResult<Vec<TaxRate>> {
        self.filter(tenant_id, &|r: &TaxRate| {
            r.tax_country_id.eq_ignore_ascii_case(country_id)
        })
    }
}

pub trait TaxRuleRepository: Repository<TaxRule> {
    fn find_by_code(&self, tenant_id: TenantId, code: &str) -> DomainResult<Option<TaxRule>> {
        self.find_first(tenant_id, &|r: &TaxRule| r.code == code)
    }

    /// Rules referencing the Magento tax rate `rate_id`.
    fn list_using_rate(&self, tenant_id: TenantId, rate_id: MagentoId) -> DomainResult<Vec<TaxRule>> {
        self.filter(tenant_id, &|r: &TaxRule| r.uses_rate(rate_id))
    }
}

pub trait TaxClassRepository: Repository<TaxClass> {
    fn find_by_name(
        &self,
        tenant_id: TenantId,
        class_type: TaxClassType,
        class_name: &str,
    ) -> DomainResult<Option<TaxClass>> {
        self.find_first(tenant_id, &|c: &TaxClass| {
            c.class_type == class_type && c.class_name == class_name
        })
    }

    fn list_by_type(&self, tenant_id: TenantId, class_type: TaxClassType) -> DomainResult<Vec<TaxClass>> {
        self.filter(tenant_id, &|c: &TaxClass| c.class_type == class_type)
    }
}
