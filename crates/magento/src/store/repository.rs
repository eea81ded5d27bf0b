use whippet_core::{DomainResult, Repository, TenantId};

use super::{EavAttributeSet, StoreGroup, StoreView, StoreWebsite};
use crate::entity::MagentoId;

pub trait StoreWebsiteRepository: Repository<StoreWebsite> {
    fn find_by_code(&self, tenant_id: TenantId, code: &str) -> DomainResult<Option<StoreWebsite>> {
        self.find_first(tenant_id, &|w: &StoreWebsite| w.code == code)
    }
}

pub trait StoreGroupRepository: Repository<StoreGroup> {
    fn find_by_code(&self, tenant_id: TenantId, code: &str) -> DomainResult<Option<StoreGroup>> {
        self.find_first(tenant_id, &|g: &StoreGroup| g.code == code)
    }

    fn list_for_website(
        &self,
        tenant_id: TenantId,
        website_id: MagentoId,
    ) -> DomainResult<Vec<StoreGroup>> {
        self.filter(tenant_id, &|g: &StoreGroup| g.website_id == website_id)
    }
}

pub trait StoreViewRepository: Repository<StoreView> {
    fn find_by_code(&self, tenant_id: TenantId, code: &str) -> DomainResult<Option<StoreView>> {
        self.find_first(tenant_id, &|v: &StoreView| v.code == code)
    }

    fn list_for_group(
        &self,
        tenant_id: TenantId,
        store_group_id: MagentoId,
    ) -> DomainResult<Vec<StoreView>> {
        self.filter(tenant_id, &|v: &StoreView| v.store_group_id == store_group_id)
    }

    fn list_active(&self, tenant_id: TenantId) -> DomainResult<Vec<StoreView>> {
        self.filter(tenant_id, &|v: &StoreView| v.is_active)
    }
}

pub trait EavAttributeSetRepository: Repository<EavAttributeSet> {
    fn find_by_name(
        &self,
        tenant_id: TenantId,
        entity_type_id: MagentoId,
        name: &str,
    ) -> DomainResult<Option<EavAttributeSet>> {
        self.find_first(tenant_id, &|s: &EavAttributeSet| {
            s.entity_type_id == entity_type_id && s.attribute_set_name.eq_ignore_ascii_case(name)
        })
    }

    /// Sets of one entity type, in `sort_order`.
    fn list_for_entity_type(
        &self,
        tenant_id: TenantId,
        entity_type_id: MagentoId,
    ) -> DomainResult<Vec<EavAttributeSet>> {
        let mut sets = self.filter(tenant_id, &|s: &EavAttributeSet| {
            s.entity_type_id == entity_type_id
        })?;
        sets.sort_by_key(|s| s.sort_order);
        Ok(sets)
    }
}
