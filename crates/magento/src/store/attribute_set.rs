use serde::{Deserialize, Serialize};

use whippet_core::validate::len_between;
use whippet_core::{DomainResult, EntityId, Validate};

use crate::entity::{MagentoId, impl_magento_entity};

/// Magento EAV entity type ids for the sets Whippet cares about.
pub const CUSTOMER_ENTITY_TYPE_ID: MagentoId = 1;
pub const CUSTOMER_ADDRESS_ENTITY_TYPE_ID: MagentoId = 2;
pub const PRODUCT_ENTITY_TYPE_ID: MagentoId = 4;

pub trait EavAttributeSetRecord {
    fn attribute_set_id(&self) -> EntityId;
    fn magento_entity_id(&self) -> Option<MagentoId>;
    fn attribute_set_name(&self) -> &str;
    fn sort_order(&self) -> i32;
    fn entity_type_id(&self) -> MagentoId;
}

/// An EAV attribute set (e.g. the "Default" product attribute set).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EavAttributeSet {
    pub id: EntityId,
    pub magento_id: Option<MagentoId>,
    pub attribute_set_name: String,
    pub sort_order: i32,
    pub entity_type_id: MagentoId,
}

impl_magento_entity!(EavAttributeSet, "magento.eav_attribute_set");

impl EavAttributeSet {
    pub fn new(attribute_set_name: impl Into<String>, entity_type_id: MagentoId) -> Self {
        Self {
            id: EntityId::new(),
            magento_id: None,
            attribute_set_name: attribute_set_name.into(),
            sort_order: 0,
            entity_type_id,
        }
    }
}

impl EavAttributeSetRecord for EavAttributeSet {
    fn attribute_set_id(&self) -> EntityId {
        self.id
    }
    fn magento_entity_id(&self) -> Option<MagentoId> {
        self.magento_id
    }
    fn attribute_set_name(&self) -> &str {
        &self.attribute_set_name
    }
    fn sort_order(&self) -> i32 {
        self.sort_order
    }
    fn entity_type_id(&self) -> MagentoId {
        self.entity_type_id
    }
}

impl Validate for EavAttributeSet {
    fn validate(&self) -> DomainResult<()> {
        len_between("attribute_set_name", &self.attribute_set_name, 1, 255)
    }
}

pub trait ToEavAttributeSet {
    fn to_eav_attribute_set(&self) -> EavAttributeSet;
}

impl<T: EavAttributeSetRecord + ?Sized> ToEavAttributeSet for T {
    fn to_eav_attribute_set(&self) -> EavAttributeSet {
        EavAttributeSet {
            id: self.attribute_set_id(),
            magento_id: self.magento_entity_id(),
            attribute_set_name: self.attribute_set_name().to_string(),
            sort_order: self.sort_order(),
            entity_type_id: self.entity_type_id(),
        }
    }
}
