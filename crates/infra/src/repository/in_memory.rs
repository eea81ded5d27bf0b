use std::sync::Arc;

use whippet_core::{DomainError, DomainResult, Entity, Repository, TenantId, Validate};

use crate::config::WhippetConfig;
use crate::store::{InMemoryTenantStore, TenantStore};

/// [`Repository`] over an in-memory tenant store.
///
/// Writes are validated unless disabled. Every domain repository trait is implemented for
/// the matching `InMemoryRepository<E>`, so the default query methods work out of the box.
#[derive(Debug)]
pub struct InMemoryRepository<E: Entity> {
    store: Arc<InMemoryTenantStore<E::Id, E>>,
    validate_on_write: bool,
}

impl<E: Entity> InMemoryRepository<E> {
    pub fn new() -> Self {
        Self {
            store: Arc::new(InMemoryTenantStore::new()),
            validate_on_write: true,
        }
    }

    pub fn from_config(config: &WhippetConfig) -> Self {
        Self::new().with_validation(config.validate_on_write)
    }

    pub fn with_validation(mut self, validate_on_write: bool) -> Self {
        self.validate_on_write = validate_on_write;
        self
    }

    pub fn validates_on_write(&self) -> bool {
        self.validate_on_write
    }

    /// The underlying store, shared with this repository.
    pub fn store(&self) -> Arc<InMemoryTenantStore<E::Id, E>> {
        self.store.clone()
    }
}

impl<E: Entity> Default for InMemoryRepository<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> InMemoryRepository<E>
where
    E: Entity + Validate,
{
    fn check(&self, entity: &E) -> DomainResult<()> {
        if !self.validate_on_write {
            return Ok(());
        }
        entity.validate().inspect_err(|e| {
            tracing::debug!(
                entity_type = E::ENTITY_TYPE,
                entity_id = %entity.id(),
                error = %e,
                "rejected invalid entity"
            );
        })
    }
}

impl<E> Repository<E> for InMemoryRepository<E>
where
    E: Entity + Validate + Clone + Send + Sync + 'static,
    E::Id: Send + Sync + 'static,
{
    fn get(&self, tenant_id: TenantId, id: &E::Id) -> DomainResult<Option<E>> {
        Ok(self.store.get(tenant_id, id))
    }

    fn list(&self, tenant_id: TenantId) -> DomainResult<Vec<E>> {
        Ok(self.store.list(tenant_id))
    }

    fn create(&self, tenant_id: TenantId, entity: E) -> DomainResult<E> {
        self.check(&entity)?;
        if !self
            .store
            .insert_new(tenant_id, entity.id().clone(), entity.clone())
        {
            return Err(DomainError::conflict(format!(
                "{} {} already exists",
                E::ENTITY_TYPE,
                entity.id()
            )));
        }
        tracing::debug!(
            tenant_id = %tenant_id,
            entity_type = E::ENTITY_TYPE,
            entity_id = %entity.id(),
            "entity created"
        );
        Ok(entity)
    }

    fn update(&self, tenant_id: TenantId, entity: E) -> DomainResult<E> {
        self.check(&entity)?;
        if !self
            .store
            .replace(tenant_id, entity.id().clone(), entity.clone())
        {
            return Err(DomainError::not_found());
        }
        tracing::debug!(
            tenant_id = %tenant_id,
            entity_type = E::ENTITY_TYPE,
            entity_id = %entity.id(),
            "entity updated"
        );
        Ok(entity)
    }

    fn delete(&self, tenant_id: TenantId, id: &E::Id) -> DomainResult<()> {
        self.store
            .remove(tenant_id, id)
            .ok_or_else(DomainError::not_found)?;
        tracing::debug!(
            tenant_id = %tenant_id,
            entity_type = E::ENTITY_TYPE,
            entity_id = %id,
            "entity deleted"
        );
        Ok(())
    }
}

macro_rules! impl_domain_repositories {
    ($($repository:path => $entity:ty),+ $(,)?) => {
        $(impl $repository for InMemoryRepository<$entity> {})+
    };
}

impl_domain_repositories! {
    whippet_addressing::CountryRepository => whippet_addressing::Country,
    whippet_addressing::StateProvinceRepository => whippet_addressing::StateProvince,
    whippet_addressing::CityRepository => whippet_addressing::City,
    whippet_addressing::PostalCodeRepository => whippet_addressing::PostalCode,
    whippet_addressing::AddressRepository => whippet_addressing::Address,
    whippet_magento::MagentoCustomerRepository => whippet_magento::MagentoCustomer,
    whippet_magento::MagentoCustomerAddressRepository => whippet_magento::MagentoCustomerAddress,
    whippet_magento::MagentoCustomerGroupRepository => whippet_magento::MagentoCustomerGroup,
    whippet_magento::StoreWebsiteRepository => whippet_magento::StoreWebsite,
    whippet_magento::StoreGroupRepository => whippet_magento::StoreGroup,
    whippet_magento::StoreViewRepository => whippet_magento::StoreView,
    whippet_magento::EavAttributeSetRepository => whippet_magento::EavAttributeSet,
    whippet_magento::TaxRateRepository => whippet_magento::TaxRate,
    whippet_magento::TaxRuleRepository => whippet_magento::TaxRule,
    whippet_magento::TaxClassRepository => whippet_magento::TaxClass,
    whippet_mom::MomCustomerRepository => whippet_mom::MomCustomer,
    whippet_mom::MomOrderRepository => whippet_mom::MomOrder,
    whippet_mom::MomStockItemRepository => whippet_mom::MomStockItem,
    whippet_mom::MomWarehouseRepository => whippet_mom::MomWarehouse,
    whippet_salesforce::SalesforceAccountRepository => whippet_salesforce::SalesforceAccount,
    whippet_salesforce::SalesforceContactRepository => whippet_salesforce::SalesforceContact,
}
