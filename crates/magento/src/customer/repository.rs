use whippet_core::{DomainResult, EntityId, Repository, TenantId};

use super::{MagentoCustomer, MagentoCustomerAddress, MagentoCustomerGroup};
use crate::entity::MagentoId;

pub trait MagentoCustomerRepository: Repository<MagentoCustomer> {
    /// Email lookup, case-insensitive. Magento scopes emails per website, so callers
    /// sharing customers across websites should use [`Self::find_by_email_in_website`].
    fn find_by_email(&self, tenant_id: TenantId, email: &str) -> DomainResult<Option<MagentoCustomer>> {
        self.find_first(tenant_id, &|c: &MagentoCustomer| {
            c.email.eq_ignore_ascii_case(email.trim())
        })
    }

    fn find_by_email_in_website(
        &self,
        tenant_id: TenantId,
        website_id: MagentoId,
        email: &str,
    ) -> DomainResult<Option<MagentoCustomer>> {
        self.find_first(tenant_id, &|c: &MagentoCustomer| {
            c.website_id == website_id && c.email.eq_ignore_ascii_case(email.trim())
        })
    }

    fn list_for_website(
        &self,
        tenant_id: TenantId,
        website_id: MagentoId,
    ) -> DomainResult<Vec<MagentoCustomer>> {
        self.filter(tenant_id, &|c: &MagentoCustomer| c.website_id == website_id)
    }

    fn list_for_group(
        &self,
        tenant_id: TenantId,
        group_id: MagentoId,
    ) -> DomainResult<Vec<MagentoCustomer>> {
        self.filter(tenant_id, &|c: &MagentoCustomer| c.group_id == group_id)
    }
}

pub trait MagentoCustomerAddressRepository: Repository<MagentoCustomerAddress> {
    fn list_for_customer(
        &self,
        tenant_id: TenantId,
        customer_id: EntityId,
    ) -> DomainResult<Vec<MagentoCustomerAddress>> {
        self.filter(tenant_id, &|a: &MagentoCustomerAddress| {
            a.customer_id == Some(customer_id)
        })
    }
}

pub trait MagentoCustomerGroupRepository: Repository<MagentoCustomerGroup> {
    fn find_by_code(&self, tenant_id: TenantId, code: &str) -> DomainResult<Option<MagentoCustomerGroup>> {
        self.find_first(tenant_id, &|g: &MagentoCustomerGroup| {
            g.code.eq_ignore_ascii_case(code)
        })
    }
}
