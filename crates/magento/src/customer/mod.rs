//! Magento customers, their address book and customer groups.

pub mod account;
pub mod address;
pub mod group;
pub mod repository;

pub use account::{Gender, MagentoCustomer, MagentoCustomerRecord, ToMagentoCustomer};
pub use address::{
    CustomerAddressRegion, MagentoCustomerAddress, MagentoCustomerAddressRecord,
    ToMagentoCustomerAddress,
};
pub use group::{MagentoCustomerGroup, MagentoCustomerGroupRecord, ToMagentoCustomerGroup};
pub use repository::{
    MagentoCustomerAddressRepository, MagentoCustomerGroupRepository, MagentoCustomerRepository,
};
