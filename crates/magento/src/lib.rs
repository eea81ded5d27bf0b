//! Magento 2 entities: customers, store configuration and tax setup.
//!
//! Every entity carries its own Whippet `id` plus an optional Magento key
//! ([`MagentoEntity::magento_id`]); the latter is set once the record is linked.

pub mod customer;
pub mod entity;
pub mod store;
pub mod taxes;

pub use customer::{
    CustomerAddressRegion, Gender, MagentoCustomer, MagentoCustomerAddress,
    MagentoCustomerAddressRecord, MagentoCustomerAddressRepository, MagentoCustomerGroup,
    MagentoCustomerGroupRecord, MagentoCustomerGroupRepository, MagentoCustomerRecord,
    MagentoCustomerRepository, ToMagentoCustomer, ToMagentoCustomerAddress,
    ToMagentoCustomerGroup,
};
pub use entity::{MagentoEntity, MagentoId, MagentoLookup};
pub use store::{
    EavAttributeSet, EavAttributeSetRecord, EavAttributeSetRepository, StoreGroup,
    StoreGroupRecord, StoreGroupRepository, StoreView, StoreViewRecord, StoreViewRepository,
    StoreWebsite, StoreWebsiteRecord, StoreWebsiteRepository, ToEavAttributeSet, ToStoreGroup,
    ToStoreView, ToStoreWebsite,
};
pub use taxes::{
    TaxClass, TaxClassRecord, TaxClassRepository, TaxClassType, TaxRate, TaxRateRecord,
    TaxRateRepository, TaxRateTitle, TaxRule, TaxRuleRecord, TaxRuleRepository, ToTaxClass,
    ToTaxRate, ToTaxRule, ZipRange,
};
