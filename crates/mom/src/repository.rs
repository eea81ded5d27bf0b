use whippet_core::{DomainResult, Repository, TenantId};

use crate::{MomCustomer, MomOrder, MomStockItem, MomWarehouse};

pub trait MomCustomerRepository: Repository<MomCustomer> {
    fn find_by_customer_number(
        &self,
        tenant_id: TenantId,
        customer_number: u32,
    ) -> DomainResult<Option<MomCustomer>> {
        self.find_first(tenant_id, &|c: &MomCustomer| c.customer_number == customer_number)
    }

    fn find_by_email(&self, tenant_id: TenantId, email: &str) -> DomainResult<Option<MomCustomer>> {
        self.find_first(tenant_id, &|c: &MomCustomer| {
            c.email.as_deref().is_some_and(|e| e.eq_ignore_ascii_case(email))
        })
    }
}

pub trait MomOrderRepository: Repository<MomOrder> {
    fn find_by_order_number(
        &self,
        tenant_id: TenantId,
        order_number: u32,
    ) -> DomainResult<Option<MomOrder>> {
        self.find_first(tenant_id, &|o: &MomOrder| o.order_number == order_number)
    }

    /// Orders of a customer, oldest first.
    fn list_for_customer(
        &self,
        tenant_id: TenantId,
        customer_number: u32,
    ) -> DomainResult<Vec<MomOrder>> {
        let mut orders =
            self.filter(tenant_id, &|o: &MomOrder| o.customer_number == customer_number)?;
        orders.sort_by_key(|o| (o.order_date, o.order_number));
        Ok(orders)
    }
}

pub trait MomStockItemRepository: Repository<MomStockItem> {
    fn find_by_item_number(
        &self,
        tenant_id: TenantId,
        item_number: &str,
    ) -> DomainResult<Option<MomStockItem>> {
        self.find_first(tenant_id, &|i: &MomStockItem| {
            i.item_number.eq_ignore_ascii_case(item_number)
        })
    }

    fn list_in_stock(&self, tenant_id: TenantId) -> DomainResult<Vec<MomStockItem>> {
        self.filter(tenant_id, &|i: &MomStockItem| i.is_in_stock())
    }
}

pub trait MomWarehouseRepository: Repository<MomWarehouse> {
    fn find_by_code(&self, tenant_id: TenantId, code: &str) -> DomainResult<Option<MomWarehouse>> {
        self.find_first(tenant_id, &|w: &MomWarehouse| w.code.eq_ignore_ascii_case(code))
    }
}
