use serde::{Deserialize, Serialize};

use whippet_core::validate::len_between;
use whippet_core::{DomainError, DomainResult, EntityId, Validate};

use super::{TaxClass, TaxClassType, TaxRate};
use crate::entity::{MagentoEntity, MagentoId, impl_magento_entity};

pub const TAX_RULE_CODE_MAX: usize = 255;

pub trait TaxRuleRecord {
    fn tax_rule_id(&self) -> EntityId;
    fn magento_entity_id(&self) -> Option<MagentoId>;
    fn code(&self) -> &str;
    fn priority(&self) -> u32;
    fn position(&self) -> u32;
    fn customer_tax_class_ids(&self) -> &[MagentoId];
    fn product_tax_class_ids(&self) -> &[MagentoId];
    fn tax_rate_ids(&self) -> &[MagentoId];
    fn calculate_subtotal(&self) -> bool;
}

/// Binds customer classes and product classes to a set of tax rates.
///
/// Rules of equal priority add up; a higher priority compounds on top of lower ones.
/// All references are Magento ids, since rules are only meaningful once their classes
/// and rates exist in Magento.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaxRule {
    pub id: EntityId,
    pub magento_id: Option<MagentoId>,
    pub code: String,
    pub priority: u32,
    pub position: u32,
    pub customer_tax_class_ids: Vec<MagentoId>,
    pub product_tax_class_ids: Vec<MagentoId>,
    pub tax_rate_ids: Vec<MagentoId>,
    pub calculate_subtotal: bool,
}

impl_magento_entity!(TaxRule, "magento.tax_rule");

impl TaxRule {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            id: EntityId::new(),
            magento_id: None,
            code: code.into(),
            priority: 0,
            position: 0,
            customer_tax_class_ids: Vec::new(),
            product_tax_class_ids: Vec::new(),
            tax_rate_ids: Vec::new(),
            calculate_subtotal: false,
        }
    }

    /// Adds a linked class to the matching side of the rule.
    pub fn add_class(&mut self, class: &TaxClass) -> DomainResult<()> {
        let magento_id = class
            .magento_id()
            .ok_or_else(|| DomainError::invariant(format!(
                "tax class {:?} has no Magento id yet",
                class.class_name
            )))?;
        let ids = match class.class_type {
            TaxClassType::Customer => &mut self.customer_tax_class_ids,
            TaxClassType::Product => &mut self.product_tax_class_ids,
        };
        if !ids.contains(&magento_id) {
            ids.push(magento_id);
        }
        Ok(())
    }

    pub fn add_rate(&mut self, rate: &TaxRate) -> DomainResult<()> {
        let magento_id = rate.magento_id().ok_or_else(|| {
            DomainError::invariant(format!("tax rate {:?} has no Magento id yet", rate.code))
        })?;
        if !self.tax_rate_ids.contains(&magento_id) {
            self.tax_rate_ids.push(magento_id);
        }
        Ok(())
    }

    pub fn uses_rate(&self, rate_id: MagentoId) -> bool {
        self.tax_rate_ids.contains(&rate_id)
    }

    /// Whether the rule applies to a customer/product class combination.
    pub fn covers(&self, customer_class_id: MagentoId, product_class_id: MagentoId) -> bool {
        self.customer_tax_class_ids.contains(&customer_class_id)
            && self.product_tax_class_ids.contains(&product_class_id)
    }

    /// Serialize to the Magento REST body `{"rule":{...}}`; `id` only once linked.
    pub fn to_magento_json_string(&self) -> DomainResult<String> {
        #[derive(Serialize)]
        struct Document<'a> {
            rule: Body<'a>,
        }

        #[derive(Serialize)]
        struct Body<'a> {
            #[serde(skip_serializing_if = "Option::is_none")]
            id: Option<MagentoId>,
            code: &'a str,
            priority: u32,
            position: u32,
            customer_tax_class_ids: &'a [MagentoId],
            product_tax_class_ids: &'a [MagentoId],
            tax_rate_ids: &'a [MagentoId],
            calculate_subtotal: bool,
        }

        serde_json::to_string(&Document {
            rule: Body {
                id: self.magento_id,
                code: &self.code,
                priority: self.priority,
                position: self.position,
                customer_tax_class_ids: &self.customer_tax_class_ids,
                product_tax_class_ids: &self.product_tax_class_ids,
                tax_rate_ids: &self.tax_rate_ids,
                calculate_subtotal: self.calculate_subtotal,
            },
        })
        .map_err(|e| DomainError::validation(format!("tax rule serialization failed: {e}")))
    }
}

impl TaxRuleRecord for TaxRule {
    fn tax_rule_id(&self) -> EntityId {
        self.id
    }
    fn magento_entity_id(&self) -> Option<MagentoId> {
        self.magento_id
    }
    fn code(&self) -> &str {
        &self.code
    }
    fn priority(&self) -> u32 {
        self.priority
    }
    fn position(&self) -> u32 {
        self.position
    }
    fn customer_tax_class_ids(&self) -> &[MagentoId] {
        &self.customer_tax_class_ids
    }
    fn product_tax_class_ids(&self) -> &[MagentoId] {
        &self.product_tax_class_ids
    }
    fn tax_rate_ids(&self) -> &[MagentoId] {
        &self.tax_rate_ids
    }
    fn calculate_subtotal(&self) -> bool {
        self.calculate_subtotal
    }
}

impl Validate for TaxRule {
    fn validate(&self) -> DomainResult<()> {
        len_between("code", &self.code, 1, TAX_RULE_CODE_MAX)?;
        for (field, ids) in [
            ("customer_tax_class_ids", &self.customer_tax_class_ids),
            ("product_tax_class_ids", &self.product_tax_class_ids),
            ("tax_rate_ids", &self.tax_rate_ids),
        ] {
            if ids.is_empty() {
                return Err(DomainError::field(field, "requires at least one entry"));
            }
        }
        Ok(())
    }
}

pub trait ToTaxRule {
    fn to_tax_rule(&self) -> TaxRule;
}

impl<T: TaxRuleRecord + ?Sized> ToTaxRule for T {
    fn to_tax_rule(&self) -> TaxRule {
        TaxRule {
            id: self.tax_rule_id(),
            magento_id: self.magento_entity_id(),
            code: self.code().to_string(),
            priority: self.priority(),
            position: self.position(),
            customer_tax_class_ids: self.customer_tax_class_ids().to_vec(),
            product_tax_class_ids: self.product_tax_class_ids().to_vec(),
            tax_rate_ids: self.tax_rate_ids().to_vec(),
            calculate_subtotal: self.calculate_subtotal(),
        }
    }
}
