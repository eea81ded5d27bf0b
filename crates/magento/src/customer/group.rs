use serde::{Deserialize, Serialize};

use whippet_core::validate::{len_between, max_len_opt};
use whippet_core::{DomainResult, EntityId, Validate};

use crate::entity::{MagentoId, impl_magento_entity};

pub const GROUP_CODE_MAX: usize = 32;

/// Magento's built-in "NOT LOGGED IN" group.
pub const NOT_LOGGED_IN_GROUP_ID: MagentoId = 0;

pub trait MagentoCustomerGroupRecord {
    fn group_id(&self) -> EntityId;
    fn magento_entity_id(&self) -> Option<MagentoId>;
    fn code(&self) -> &str;
    fn tax_class_id(&self) -> MagentoId;
    fn tax_class_name(&self) -> Option<&str>;
}

/// Customer group; decides the customer tax class applied at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MagentoCustomerGroup {
    pub id: EntityId,
    pub magento_id: Option<MagentoId>,
    pub code: String,
    pub tax_class_id: MagentoId,
    pub tax_class_name: Option<String>,
}

impl_magento_entity!(MagentoCustomerGroup, "magento.customer_group");

impl MagentoCustomerGroup {
    pub fn new(code: impl Into<String>, tax_class_id: MagentoId) -> Self {
        Self {
            id: EntityId::new(),
            magento_id: None,
            code: code.into(),
            tax_class_id,
            tax_class_name: None,
        }
    }

    pub fn is_not_logged_in(&self) -> bool {
        self.magento_id == Some(NOT_LOGGED_IN_GROUP_ID)
    }
}

impl MagentoCustomerGroupRecord for MagentoCustomerGroup {
    fn group_id(&self) -> EntityId {
        self.id
    }
    fn magento_entity_id(&self) -> Option<MagentoId> {
        self.magento_id
    }
    fn code(&self) -> &str {
        &self.code
    }
    fn tax_class_id(&self) -> MagentoId {
        self.tax_class_id
    }
    fn tax_class_name(&self) -> Option<&str> {
        self.tax_class_name.as_deref()
    }
}

impl Validate for MagentoCustomerGroup {
    fn validate(&self) -> DomainResult<()> {
        len_between("code", &self.code, 1, GROUP_CODE_MAX)?;
        max_len_opt("tax_class_name", self.tax_class_name.as_deref(), 255)
    }
}

pub trait ToMagentoCustomerGroup {
    fn to_magento_customer_group(&self) -> MagentoCustomerGroup;
}

impl<T: MagentoCustomerGroupRecord + ?Sized> ToMagentoCustomerGroup for T {
    fn to_magento_customer_group(&self) -> MagentoCustomerGroup {
        MagentoCustomerGroup {
            id: self.group_id(),
            magento_id: self.magento_entity_id(),
            code: self.code().to_string(),
            tax_class_id: self.tax_class_id(),
            tax_class_name: self.tax_class_name().map(str::to_string),
        }
    }
}
