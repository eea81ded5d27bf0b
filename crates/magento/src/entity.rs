//! Base trait for entities mirrored from Magento.

use whippet_core::validate::len_between;
use whippet_core::{DomainError, DomainResult, Entity, Repository, TenantId};

/// Magento's own numeric entity key.
pub type MagentoId = u32;

/// Maximum width of Magento store/website/group codes.
pub const MAGENTO_CODE_MAX: usize = 32;

/// An entity with a Magento-side counterpart.
///
/// `magento_id` is `None` until the record has been pushed to (or pulled from) Magento.
pub trait MagentoEntity: Entity {
    fn magento_id(&self) -> Option<MagentoId>;

    fn set_magento_id(&mut self, magento_id: MagentoId);

    /// Whether the record is linked to a Magento entity.
    fn is_synced(&self) -> bool {
        self.magento_id().is_some()
    }
}

/// Implements [`Entity`] (keyed by `id: EntityId`) and [`MagentoEntity`] (backed by a
/// `magento_id: Option<MagentoId>` field).
macro_rules! impl_magento_entity {
    ($t:ty, $entity_type:literal) => {
        impl whippet_core::Entity for $t {
            type Id = whippet_core::EntityId;
            const ENTITY_TYPE: &'static str = $entity_type;

            fn id(&self) -> &whippet_core::EntityId {
                &self.id
            }
        }

        impl $crate::entity::MagentoEntity for $t {
            fn magento_id(&self) -> Option<$crate::entity::MagentoId> {
                self.magento_id
            }

            fn set_magento_id(&mut self, magento_id: $crate::entity::MagentoId) {
                self.magento_id = Some(magento_id);
            }
        }
    };
}

pub(crate) use impl_magento_entity;

/// Lookup by Magento key, available on every repository of Magento entities.
pub trait MagentoLookup<E: MagentoEntity>: Repository<E> {
    fn find_by_magento_id(
        &self,
        tenant_id: TenantId,
        magento_id: MagentoId,
    ) -> DomainResult<Option<E>> {
        self.find_first(tenant_id, &|e: &E| e.magento_id() == Some(magento_id))
    }

    /// Entities not yet linked to Magento (pending first push).
    fn list_unsynced(&self, tenant_id: TenantId) -> DomainResult<Vec<E>> {
        self.filter(tenant_id, &|e: &E| !e.is_synced())
    }
}

impl<E, R> MagentoLookup<E> for R
where
    E: MagentoEntity,
    R: Repository<E> + ?Sized,
{
}

/// Magento store/website/group code: starts with a lowercase letter, then lowercase
/// letters, digits or `_`, at most 32 characters.
pub fn validate_code(field: &str, code: &str) -> DomainResult<()> {
    len_between(field, code, 1, MAGENTO_CODE_MAX)?;
    let mut chars = code.chars();
    let starts_with_letter = chars.next().is_some_and(|c| c.is_ascii_lowercase());
    let rest_ok = chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');
    if !starts_with_letter || !rest_ok {
        return Err(DomainError::field(
            field,
            "must start with a lowercase letter and use only a-z, 0-9 and _",
        ));
    }
    Ok(())
}

/// ISO 3166-1 alpha-2 country id as Magento stores it.
pub fn validate_country_id(field: &str, country_id: &str) -> DomainResult<()> {
    if country_id.len() != 2 || !country_id.chars().all(|c| c.is_ascii_uppercase()) {
        return Err(DomainError::field(field, "must be a two-letter ISO country code"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_follow_magento_rules() {
        assert!(validate_code("code", "main_website").is_ok());
        assert!(validate_code("code", "us2").is_ok());
        assert!(validate_code("code", "2us").is_err());
        assert!(validate_code("code", "Main").is_err());
        assert!(validate_code("code", "default-store").is_err());
        assert!(validate_code("code", &"a".repeat(33)).is_err());
        assert!(validate_code("code", "").is_err());
    }

    #[test]
    fn country_ids_are_two_uppercase_letters() {
        assert!(validate_country_id("country_id", "US").is_ok());
        assert!(validate_country_id("country_id", "us").is_err());
        assert!(validate_country_id("country_id", "USA").is_err());
    }
}
