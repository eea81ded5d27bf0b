//! Multichannel Order Manager (MOM) entities: customers, orders, stock and warehouses.
//!
//! MOM keys records by natural numbers and codes (customer number, order number, item
//! number, warehouse code); those are kept as plain fields next to the Whippet id.

pub mod customer;
pub mod order;
pub mod repository;
pub mod stock_item;
pub mod warehouse;

pub use customer::{MomCustomer, MomCustomerRecord, ToMomCustomer};
pub use order::{
    MomOrder, MomOrderLine, MomOrderLineRecord, MomOrderRecord, MomOrderStatus, ToMomOrder,
    ToMomOrderLine,
};
pub use repository::{
    MomCustomerRepository, MomOrderRepository, MomStockItemRepository, MomWarehouseRepository,
};
pub use stock_item::{MomStockItem, MomStockItemRecord, ToMomStockItem};
pub use warehouse::{MomWarehouse, MomWarehouseRecord, ToMomWarehouse};
