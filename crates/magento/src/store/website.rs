use serde::{Deserialize, Serialize};

use whippet_core::validate::len_between;
use whippet_core::{DomainResult, EntityId, Validate};

use crate::entity::{MagentoId, impl_magento_entity, validate_code};

/// Magento's reserved admin website (`website_id = 0`, code `admin`).
pub const ADMIN_WEBSITE_ID: MagentoId = 0;

pub trait StoreWebsiteRecord {
    fn website_id(&self) -> EntityId;
    fn magento_entity_id(&self) -> Option<MagentoId>;
    fn code(&self) -> &str;
    fn name(&self) -> &str;
    fn default_group_id(&self) -> MagentoId;
}

/// Top of Magento's store hierarchy: website → store group → store view.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StoreWebsite {
    pub id: EntityId,
    pub magento_id: Option<MagentoId>,
    pub code: String,
    pub name: String,
    pub default_group_id: MagentoId,
}

impl_magento_entity!(StoreWebsite, "magento.store_website");

impl StoreWebsite {
    pub fn new(code: impl Into<String>, name: impl Into<String>, default_group_id: MagentoId) -> Self {
        Self {
            id: EntityId::new(),
            magento_id: None,
            code: code.into(),
            name: name.into(),
            default_group_id,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.magento_id == Some(ADMIN_WEBSITE_ID)
    }
}

impl StoreWebsiteRecord for StoreWebsite {
    fn website_id(&self) -> EntityId {
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
    fn default_group_id(&self) -> MagentoId {
        self.default_group_id
    }
}

impl Validate for StoreWebsite {
    fn validate(&self) -> DomainResult<()> {
        validate_code("code", &self.code)?;
        len_between("name", &self.name, 1, 255)
    }
}

pub trait ToStoreWebsite {
    fn to_store_website(&self) -> StoreWebsite;
}

impl<T: StoreWebsiteRecord + ?Sized> ToStoreWebsite for T {
    fn to_store_website(&self) -> StoreWebsite {
        StoreWebsite {
            id: self.website_id(),
            magento_id: self.magento_entity_id(),
            code: self.code().to_string(),
            name: self.name().to_string(),
            default_group_id: self.default_group_id(),
        }
    }
}
