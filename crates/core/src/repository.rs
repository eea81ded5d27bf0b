//! Repository port: tenant-scoped persistence of a single entity type.
//!
//! Domain crates extend this with query methods (`find_by_email`, `list_for_country`, ...)
//! declared as default methods over [`Repository::list`], so a backend only has to supply
//! the five primitives. Backends with real indexes override the defaults.

use crate::entity::Entity;
use crate::error::DomainResult;
use crate::id::TenantId;

/// Tenant-scoped CRUD over one entity type.
///
/// Contract shared by every implementation:
/// - `create` of an id that already exists fails with `DomainError::Conflict`;
/// - `update` and `delete` of a missing id fail with `DomainError::NotFound`;
/// - nothing written for one tenant is visible to another.
pub trait Repository<E: Entity>: Send + Sync {
    fn get(&self, tenant_id: TenantId, id: &E::Id) -> DomainResult<Option<E>>;

    fn list(&self, tenant_id: TenantId) -> DomainResult<Vec<E>>;

    /// Insert a new entity and return it as stored.
    fn create(&self, tenant_id: TenantId, entity: E) -> DomainResult<E>;

    /// Replace an existing entity and return it as stored.
    fn update(&self, tenant_id: TenantId, entity: E) -> DomainResult<E>;

    fn delete(&self, tenant_id: TenantId, id: &E::Id) -> DomainResult<()>;

    fn exists(&self, tenant_id: TenantId, id: &E::Id) -> DomainResult<bool> {
        Ok(self.get(tenant_id, id)?.is_some())
    }

    /// First entity matching `predicate`, in the backend's listing order.
    fn find_first(
        &self,
        tenant_id: TenantId,
        predicate: &dyn Fn(&E) -> bool,
    ) -> DomainResult<Option<E>> {
        Ok(self.list(tenant_id)?.into_iter().find(|e| predicate(e)))
    }

    /// All entities matching `predicate`.
    fn filter(&self, tenant_id: TenantId, predicate: &dyn Fn(&E) -> bool) -> DomainResult<Vec<E>> {
        Ok(self
            .list(tenant_id)?
            .into_iter()
            .filter(|e| predicate(e))
            .collect())
    }
}

impl<E, R> Repository<E> for std::sync::Arc<R>
where
    E: Entity,
    R: Repository<E> + ?Sized,
{
    fn get(&self, tenant_id: TenantId, id: &E::Id) -> DomainResult<Option<E>> {
        (**self).get(tenant_id, id)
    }

    fn list(&self, tenant_id: TenantId) -> DomainResult<Vec<E>> {
        (**self).list(tenant_id)
    }

    fn create(&self, tenant_id: TenantId, entity: E) -> DomainResult<E> {
        (**self).create(tenant_id, entity)
    }

    fn update(&self, tenant_id: TenantId, entity: E) -> DomainResult<E> {
        (**self).update(tenant_id, entity)
    }

    fn delete(&self, tenant_id: TenantId, id: &E::Id) -> DomainResult<()> {
        (**self).delete(tenant_id, id)
    }
}
