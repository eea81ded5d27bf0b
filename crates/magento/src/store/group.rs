use serde::{Deserialize, Serialize};

use whippet_core::validate::len_between;
use whippet_core::{DomainResult, EntityId, Validate};

use crate::entity::{MagentoId, impl_magento_entity, validate_code};

pub trait StoreGroupRecord {
    fn group_id(&self) -> EntityId;
    fn magento_entity_id(&self) -> Option<MagentoId>;
    fn website_id(&self) -> MagentoId;
    fn root_category_id(&self) -> MagentoId;
    fn default_store_id(&self) -> MagentoId;
    fn code(&self) -> &str;
    fn name(&self) -> &str;
}

/// A store group ("store" in the admin UI): shares one root catalog category.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StoreGroup {
    pub id: EntityId,
    pub magento_id: Option<MagentoId>,
    pub website_id: MagentoId,
    pub root_category_id: MagentoId,
    pub default_store_id: MagentoId,
    pub code: String,
    pub name: String,
}

impl_magento_entity!(StoreGroup, "magento.store_group");

impl StoreGroup {
    pub fn new(
        code: impl Into<String>,
        name: impl Into<String>,
        website_id: MagentoId,
        root_category_id: MagentoId,
    ) -> Self {
        Self {
            id: EntityId::new(),
            magento_id: None,
            website_id,
            root_category_id,
            default_store_id: 0,
            code: code.into(),
            name: name.into(),
        }
    }
}

impl StoreGroupRecord for StoreGroup {
    fn group_id(&self) -> EntityId {
        self.id
    }
    fn magento_entity_id(&self) -> Option<MagentoId> {
        self.magento_id
    }
    fn website_id(&self) -> MagentoId {
        self.website_id
    }
    fn root_category_id(&self) -> MagentoId {
        self.root_category_id
    }
    fn default_store_id(&self) -> MagentoId {
        self.default_store_id
    }
    fn code(&self) -> &str {
        &self.code
    }
    fn name(&self) -> &str {
        &self.name
    }
}

impl Validate for StoreGroup {
    fn validate(&self) -> DomainResult<()> {
        validate_code("code", &self.code)?;
        len_between("name", &self.name, 1, 255)
    }
}

pub trait ToStoreGroup {
    fn to_store_group(&self) -> StoreGroup;
}

impl<T: StoreGroupRecord + ?Sized> ToStoreGroup for T {
    fn to_store_group(&self) -> StoreGroup {
        StoreGroup {
            id: self.group_id(),
            magento_id: self.magento_entity_id(),
            website_id: self.website_id(),
            root_category_id: self.root_category_id(),
            default_store_id: self.default_store_id(),
            code: self.code().to_string(),
            name: self.name().to_string(),
        }
    }
}
