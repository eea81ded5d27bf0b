use std::sync::Arc;

use whippet_core::{DomainResult, EntityId, Repository, TenantId};

use crate::{SalesforceAccount, SalesforceContact, SalesforceId};

pub trait SalesforceAccountRepository: Repository<SalesforceAccount> {
    /// Matches 15- and 18-character forms of the same id.
    fn find_by_salesforce_id(
        &self,
        tenant_id: TenantId,
        salesforce_id: &SalesforceId,
    ) -> DomainResult<Option<SalesforceAccount>> {
        self.find_first(tenant_id, &|a: &SalesforceAccount| {
            a.salesforce_id
                .as_ref()
                .is_some_and(|id| id.same_record(salesforce_id))
        })
    }

    /// Case-insensitive exact name match.
    fn find_by_name(&self, tenant_id: TenantId, name: &str) -> DomainResult<Option<SalesforceAccount>> {
        let name = name.trim().to_lowercase();
        self.find_first(tenant_id, &|a: &SalesforceAccount| {
            a.name.trim().to_lowercase() == name
        })
    }
}

pub trait SalesforceContactRepository: Repository<SalesforceContact> {
    fn find_by_salesforce_id(
        &self,
        tenant_id: TenantId,
        salesforce_id: &SalesforceId,
    ) -> DomainResult<Option<SalesforceContact>> {
        self.find_first(tenant_id, &|c: &SalesforceContact| {
            c.salesforce_id
                .as_ref()
                .is_some_and(|id| id.same_record(salesforce_id))
        })
    }

    fn list_for_account(
        &self,
        tenant_id: TenantId,
        account_id: EntityId,
    ) -> DomainResult<Vec<SalesforceContact>> {
        self.filter(tenant_id, &|c: &SalesforceContact| c.account_id == Some(account_id))
    }

    fn find_by_email(&self, tenant_id: TenantId, email: &str) -> DomainResult<Option<SalesforceContact>> {
        self.find_first(tenant_id, &|c: &SalesforceContact| {
            c.email.as_deref().is_some_and(|e| e.eq_ignore_ascii_case(email))
        })
    }
}

impl<R: SalesforceAccountRepository + ?Sized> SalesforceAccountRepository for Arc<R> {}

impl<R: SalesforceContactRepository + ?Sized> SalesforceContactRepository for Arc<R> {}
