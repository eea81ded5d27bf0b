use serde::{Deserialize, Serialize};

use whippet_core::validate::len_between;
use whippet_core::{DomainError, DomainResult, EntityId, Validate};

use crate::entity::{MagentoId, impl_magento_entity};

pub const TAX_CLASS_NAME_MAX: usize = 255;

/// Which side of a tax rule a class sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaxClassType {
    Customer,
    Product,
}

impl TaxClassType {
    /// Magento's `class_type` column value.
    pub fn as_str(self) -> &'static str {
        match self {
            TaxClassType::Customer => "CUSTOMER",
            TaxClassType::Product => "PRODUCT",
        }
    }
}

impl core::fmt::Display for TaxClassType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl core::str::FromStr for TaxClassType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "CUSTOMER" => Ok(TaxClassType::Customer),
            "PRODUCT" => Ok(TaxClassType::Product),
            other => Err(DomainError::field(
                "class_type",
                format!("unknown tax class type {other:?}"),
            )),
        }
    }
}

pub trait TaxClassRecord {
    fn tax_class_id(&self) -> EntityId;
    fn magento_entity_id(&self) -> Option<MagentoId>;
    fn class_name(&self) -> &str;
    fn class_type(&self) -> TaxClassType;
}

/// Customer or product tax class (e.g. "Retail Customer", "Taxable Goods").
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaxClass {
    pub id: EntityId,
    pub magento_id: Option<MagentoId>,
    pub class_name: String,
    pub class_type: TaxClassType,
}

impl_magento_entity!(TaxClass, "magento.tax_class");

impl TaxClass {
    pub fn new(class_name: impl Into<String>, class_type: TaxClassType) -> Self {
        Self {
            id: EntityId::new(),
            magento_id: None,
            class_name: class_name.into(),
            class_type,
        }
    }

    pub fn customer(class_name: impl Into<String>) -> Self {
        Self::new(class_name, TaxClassType::Customer)
    }

    pub fn product(class_name: impl Into<String>) -> Self {
        Self::new(class_name, TaxClassType::Product)
    }
}

impl TaxClassRecord for TaxClass {
    fn tax_class_id(&self) -> EntityId {
        self.id
    }
    fn magento_entity_id(&self) -> Option<MagentoId> {
        self.magento_id
    }
    fn class_name(&self) -> &str {
        &self.class_name
    }
    fn class_type(&self) -> TaxClassType {
        self.class_type
    }
}

impl Validate for TaxClass {
    fn validate(&self) -> DomainResult<()> {
        len_between("class_name", &self.class_name, 1, TAX_CLASS_NAME_MAX)
    }
}

pub trait ToTaxClass {
    fn to_tax_class(&self) -> TaxClass;
}

impl<T: TaxClassRecord + ?Sized> ToTaxClass for T {
    fn to_tax_class(&self) -> TaxClass {
        TaxClass {
            id: self.tax_class_id(),
            magento_id: self.magento_entity_id(),
            class_name: self.class_name().to_string(),
            class_type: self.class_type(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_type_uses_magento_spelling() {
        assert_eq!(TaxClassType::Product.to_string(), "PRODUCT");
        assert_eq!("customer".parse::<TaxClassType>().unwrap(), TaxClassType::Customer);
        assert!("SHIPPING".parse::<TaxClassType>().is_err());
        assert_eq!(
            serde_json::to_string(&TaxClassType::Customer).unwrap(),
            "\"CUSTOMER\""
        );
    }

    #[test]
    fn validate_requires_name() {
        assert!(TaxClass::product("Taxable Goods").validate().is_ok());
        assert!(TaxClass::product("  ").validate().is_err());
        assert!(TaxClass::customer("x".repeat(256)).validate().is_err());
    }

    #[test]
    fn converts_from_record() {
        let mut class = TaxClass::customer("Retail Customer");
        class.magento_id = Some(3);
        assert_eq!(class.to_tax_class(), class);
    }
}
