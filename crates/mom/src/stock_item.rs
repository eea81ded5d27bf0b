use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use whippet_core::validate::{at_least, len_between, max_len};
use whippet_core::{DomainError, DomainResult, Entity, EntityId, Validate};

pub const ITEM_NUMBER_MAX: usize = 20;
pub const DESCRIPTION_MAX: usize = 60;

pub trait MomStockItemRecord {
    fn stock_item_id(&self) -> EntityId;
    fn item_number(&self) -> &str;
    fn description(&self) -> &str;
    fn price(&self) -> Decimal;
    fn cost(&self) -> Decimal;
    fn units_on_hand(&self) -> i32;
    fn weight(&self) -> Option<Decimal>;
    fn warehouse_code(&self) -> Option<&str>;
}

/// An inventory item (`STOCK` table).
///
/// `units_on_hand` goes negative when MOM allows overselling.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MomStockItem {
    pub id: EntityId,
    pub item_number: String,
    pub description: String,
    pub price: Decimal,
    pub cost: Decimal,
    pub units_on_hand: i32,
    pub weight: Option<Decimal>,
    pub warehouse_code: Option<String>,
}

impl MomStockItem {
    pub fn new(item_number: impl Into<String>, description: impl Into<String>, price: Decimal) -> Self {
        Self {
            id: EntityId::new(),
            item_number: item_number.into(),
            description: description.into(),
            price,
            cost: Decimal::ZERO,
            units_on_hand: 0,
            weight: None,
            warehouse_code: None,
        }
    }

    pub fn is_in_stock(&self) -> bool {
        self.units_on_hand > 0
    }

    /// Price minus cost.
    pub fn margin(&self) -> DomainResult<Decimal> {
        self.price
            .checked_sub(self.cost)
            .ok_or_else(|| DomainError::invariant(format!("item {} margin overflow", self.item_number)))
    }

    /// Adds (or with a negative delta removes) units.
    pub fn adjust_units(&mut self, delta: i32) {
        self.units_on_hand = self.units_on_hand.saturating_add(delta);
    }
}

impl Entity for MomStockItem {
    type Id = EntityId;
    const ENTITY_TYPE: &'static str = "mom.stock_item";

    fn id(&self) -> &EntityId {
        &self.id
    }
}

impl MomStockItemRecord for MomStockItem {
    fn stock_item_id(&self) -> EntityId {
        self.id
    }
    fn item_number(&self) -> &str {
        &self.item_number
    }
    fn description(&self) -> &str {
        &self.description
    }
    fn price(&self) -> Decimal {
        self.price
    }
    fn cost(&self) -> Decimal {
        self.cost
    }
    fn units_on_hand(&self) -> i32 {
        self.units_on_hand
    }
    fn weight(&self) -> Option<Decimal> {
        self.weight
    }
    fn warehouse_code(&self) -> Option<&str> {
        self.warehouse_code.as_deref()
    }
}

impl Validate for MomStockItem {
    fn validate(&self) -> DomainResult<()> {
        len_between("item_number", &self.item_number, 1, ITEM_NUMBER_MAX)?;
        max_len("description", &self.description, DESCRIPTION_MAX)?;
        at_least("price", self.price, Decimal::ZERO)?;
        at_least("cost", self.cost, Decimal::ZERO)?;
        if let Some(weight) = self.weight {
            at_least("weight", weight, Decimal::ZERO)?;
        }
        Ok(())
    }
}

pub trait ToMomStockItem {
    fn to_mom_stock_item(&self) -> MomStockItem;
}

impl<T: MomStockItemRecord + ?Sized> ToMomStockItem for T {
    fn to_mom_stock_item(&self) -> MomStockItem {
        MomStockItem {
            id: self.stock_item_id(),
            item_number: self.item_number().to_string(),
            description: self.description().to_string(),
            price: self.price(),
            cost: self.cost(),
            units_on_hand: self.units_on_hand(),
            weight: self.weight(),
            warehouse_code: self.warehouse_code().map(str::to_string),
        }
    }
}
