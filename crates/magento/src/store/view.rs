use serde::{Deserialize, Serialize};

use whippet_core::validate::len_between;
use whippet_core::{DomainResult, EntityId, Validate};

use crate::entity::{MagentoId, impl_magento_entity, validate_code};

pub trait StoreViewRecord {
    fn store_id(&self) -> EntityId;
    fn magento_entity_id(&self) -> Option<MagentoId>;
    fn code(&self) -> &str;
    fn name(&self) -> &str;
    fn website_id(&self) -> MagentoId;
    fn store_group_id(&self) -> MagentoId;
    fn is_active(&self) -> bool;
}

/// A store view: the unit customers browse (typically one per locale).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StoreView {
    pub id: EntityId,
    pub magento_id: Option<MagentoId>,
    pub code: String,
    pub name: String,
    pub website_id: MagentoId,
    pub store_group_id: MagentoId,
    pub is_active: bool,
}

impl_magento_entity!(StoreView, "magento.store_view");

impl StoreView {
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        website_id: MagentoId,
        store_group_id: MagentoId,
    ) -> Self {
        Self {
            id: EntityId::new(),
            magento_id: None,
            code: code.into(),
            name: name.into(),
            website_id,
            store_group_id,
            is_active: true,
        }
    }
}

impl StoreViewRecord for StoreView {
    fn store_id(&self) -> EntityId {
        self.id
    }
    fn magento_entity_id(&self) -> Option<MagentoId> {
        self.magento_id
    }
    fn code(&self) -> &str {
        &self.code
    }
    fn name(&self) -> &str {
        &self.name
    }
    fn website_id(&self) -> MagentoId {
        self.website_id
    }
    fn store_group_id(&self) -> MagentoId {
        self.store_group_id
    }
    fn is_active(&self) -> bool {
        self.is_active
    }
}

impl Validate for StoreView {
    fn validate(&self) -> DomainResult<()> {
        validate_code("code", &self.code)?;
        len_between("name", &self.name, 1, 255)
    }
}

pub trait ToStoreView {
    fn to_store_view(&self) -> StoreView;
}

impl<T: StoreViewRecord + ?Sized> ToStoreView for T {
    fn to_store_view(&self) -> StoreView {
        StoreView {
            id: self.store_id(),
            magento_id: self.magento_entity_id(),
            code: self.code().to_string(),
            name: self.name().to_string(),
            website_id: self.website_id(),
            store_group_id: self.store_group_id(),
            is_active: self.is_active(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_views_are_active() {
        let v = StoreView::new("default", "Default Store View", 1, 1);
        assert!(v.is_active);
        assert!(v.validate().is_ok());
    }

    #[test]
    fn conversion_preserves_activity_flag() {
        let mut v = StoreView::new("fr", "French", 1, 1);
        v.is_active = false;
        let copy = (&v as &dyn StoreViewRecord).to_store_view();
        assert!(!copy.is_active);
        assert_eq!(copy, v);
    }
}
