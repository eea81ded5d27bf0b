use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use whippet_core::validate::{at_least, len_between, max_len_opt};
use whippet_core::{DomainError, DomainResult, Entity, EntityId, Validate};

use crate::stock_item::ITEM_NUMBER_MAX;

pub const SHIP_METHOD_MAX: usize = 10;

/// Order status as MOM reports it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MomOrderStatus {
    #[default]
    Open,
    BackOrdered,
    OnHold,
    Shipped,
    Cancelled,
}

impl MomOrderStatus {
    /// Shipped and cancelled orders no longer change.
    pub fn is_closed(self) -> bool {
        matches!(self, MomOrderStatus::Shipped | MomOrderStatus::Cancelled)
    }
}

pub trait MomOrderLineRecord {
    fn line_id(&self) -> EntityId;
    fn item_number(&self) -> &str;
    fn description(&self) -> Option<&str>;
    fn quantity(&self) -> u32;
    fn unit_price(&self) -> Decimal;
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MomOrderLine {
    pub id: EntityId,
    pub item_number: String,
    pub description: Option<String>,
    pub quantity: u32,
    pub unit_price: Decimal,
}

impl MomOrderLine {
    pub fn new(item_number: impl Into<String>, quantity: u32, unit_price: Decimal) -> Self {
        Self {
            id: EntityId::new(),
            item_number: item_number.into(),
            description: None,
            quantity,
            unit_price,
        }
    }

    /// Quantity times unit price.
    pub fn extended_price(&self) -> DomainResult<Decimal> {
        self.unit_price
            .checked_mul(Decimal::from(self.quantity))
            .ok_or_else(|| {
                DomainError::invariant(format!("line {} amount overflow", self.item_number))
            })
    }
}

impl MomOrderLineRecord for MomOrderLine {
    fn line_id(&self) -> EntityId {
        self.id
    }
    fn item_number(&self) -> &str {
        &self.item_number
    }
    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
    fn quantity(&self) -> u32 {
        self.quantity
    }
    fn unit_price(&self) -> Decimal {
        self.unit_price
    }
}

impl Validate for MomOrderLine {
    fn validate(&self) -> DomainResult<()> {
        len_between("item_number", &self.item_number, 1, ITEM_NUMBER_MAX)?;
        max_len_opt("description", self.description.as_deref(), 60)?;
        if self.quantity == 0 {
            return Err(DomainError::field("quantity", "must be positive"));
        }
        at_least("unit_price", self.unit_price, Decimal::ZERO)
    }
}

pub trait ToMomOrderLine {
    fn to_mom_order_line(&self) -> MomOrderLine;
}

impl<T: MomOrderLineRecord + ?Sized> ToMomOrderLine for T {
    fn to_mom_order_line(&self) -> MomOrderLine {
        MomOrderLine {
            id: self.line_id(),
            item_number: self.item_number().to_string(),
            description: self.description().map(str::to_string),
            quantity: self.quantity(),
            unit_price: self.unit_price(),
        }
    }
}

pub trait MomOrderRecord {
    fn order_id(&self) -> EntityId;
    fn order_number(&self) -> u32;
    fn customer_number(&self) -> u32;
    fn order_date(&self) -> NaiveDate;
    fn status(&self) -> MomOrderStatus;
    fn ship_method(&self) -> Option<&str>;
    fn lines(&self) -> Vec<&dyn MomOrderLineRecord>;
}

/// A MOM sales order with its lines.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MomOrder {
    pub id: EntityId,
    pub order_number: u32,
    pub customer_number: u32,
    pub order_date: NaiveDate,
    pub status: MomOrderStatus,
    pub ship_method: Option<String>,
    #[serde(default)]
    pub lines: Vec<MomOrderLine>,
}

impl MomOrder {
    pub fn new(order_number: u32, customer_number: u32, order_date: NaiveDate) -> Self {
        Self {
            id: EntityId::new(),
            order_number,
            customer_number,
            order_date,
            status: MomOrderStatus::Open,
            ship_method: None,
            lines: Vec::new(),
        }
    }

    pub fn with_line(mut self, line: MomOrderLine) -> Self {
        self.lines.push(line);
        self
    }

    /// Appends a line; closed orders reject changes.
    pub fn add_line(&mut self, line: MomOrderLine) -> DomainResult<()> {
        if self.status.is_closed() {
            return Err(DomainError::invariant(format!(
                "order {} is {:?} and cannot take new lines",
                self.order_number, self.status
            )));
        }
        self.lines.push(line);
        Ok(())
    }

    /// Sum of the lines' extended prices.
    pub fn order_total(&self) -> DomainResult<Decimal> {
        self.lines.iter().try_fold(Decimal::ZERO, |total, line| {
            total
                .checked_add(line.extended_price()?)
                .ok_or_else(|| DomainError::invariant("order total overflow"))
        })
    }

    pub fn total_quantity(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }
}

impl Entity for MomOrder {
    type Id = EntityId;
    const ENTITY_TYPE: &'static str = "mom.order";

    fn id(&self) -> &EntityId {
        &self.id
    }
}

impl MomOrderRecord for MomOrder {
    fn order_id(&self) -> EntityId {
        self.id
    }
    fn order_number(&self) -> u32 {
        self.order_number
    }
    fn customer_number(&self) -> u32 {
        self.customer_number
    }
    fn order_date(&self) -> NaiveDate {
        self.order_date
    }
    fn status(&self) -> MomOrderStatus {
        self.status
    }
    fn ship_method(&self) -> Option<&str> {
        self.ship_method.as_deref()
    }
    fn lines(&self) -> Vec<&dyn MomOrderLineRecord> {
        self.lines
            .iter()
            .map(|l| l as &dyn MomOrderLineRecord)
            .collect()
    }
}

impl Validate for MomOrder {
    fn validate(&self) -> DomainResult<()> {
        if self.order_number == 0 {
            return Err(DomainError::field("order_number", "must be positive"));
        }
        if self.customer_number == 0 {
            return Err(DomainError::field("customer_number", "must be positive"));
        }
        max_len_opt("ship_method", self.ship_method.as_deref(), SHIP_METHOD_MAX)?;
        self.lines.validate()?;
        self.order_total().map(|_| ())
    }
}

pub trait ToMomOrder {
    fn to_mom_order(&self) -> MomOrder;
}

impl<T: MomOrderRecord + ?Sized> ToMomOrder for T {
    fn to_mom_order(&self) -> MomOrder {
        MomOrder {
            id: self.order_id(),
            order_number: self.order_number(),
            customer_number: self.customer_number(),
            order_date: self.order_date(),
            status: self.status(),
            ship_method: self.ship_method().map(str::to_string),
            lines: self
                .lines()
                .into_iter()
                .map(|l| l.to_mom_order_line())
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    fn order() -> MomOrder {
        MomOrder::new(5001, 1001, date())
            .with_line(MomOrderLine::new("WIDGET-1", 3, Decimal::new(1999, 2)))
            .with_line(MomOrderLine::new("GADGET-9", 1, Decimal::new(500, 2)))
    }

    #[test]
    fn order_total_sums_extended_prices() {
        let o = order();
        assert_eq!(o.lines[0].extended_price().unwrap(), Decimal::new(5997, 2));
        assert_eq!(o.order_total().unwrap(), Decimal::new(6497, 2));
        assert_eq!(o.total_quantity(), 4);
        assert_eq!(MomOrder::new(1, 1, date()).order_total().unwrap(), Decimal::ZERO);
    }

    #[test]
    fn overflowing_amounts_are_errors_not_panics() {
        let o = MomOrder::new(1, 1, date()).with_line(MomOrderLine::new("BIG", 2, Decimal::MAX));
        assert!(matches!(
            o.lines[0].extended_price(),
            Err(DomainError::InvariantViolation(_))
        ));
        assert!(matches!(o.order_total(), Err(DomainError::InvariantViolation(_))));
        assert!(o.validate().is_err());

        let o = MomOrder::new(1, 1, date())
            .with_line(MomOrderLine::new("A", 1, Decimal::MAX))
            .with_line(MomOrderLine::new("B", 1, Decimal::MAX));
        assert_eq!(
            o.order_total().unwrap_err(),
            DomainError::InvariantViolation("order total overflow".into())
        );
    }

    #[test]
    fn closed_orders_reject_new_lines() {
        let mut o = order();
        o.status = MomOrderStatus::Shipped;
        let err = o
            .add_line(MomOrderLine::new("X", 1, Decimal::ONE))
            .unwrap_err();
        match err {
            DomainError::InvariantViolation(_) => {}
            _ => panic!("Expected InvariantViolation"),
        }

        let mut open = order();
        open.add_line(MomOrderLine::new("X", 1, Decimal::ONE)).unwrap();
        assert_eq!(open.lines.len(), 3);
    }

    #[test]
    fn validate_checks_numbers_and_lines() {
        assert!(order().validate().is_ok());

        let mut o = order();
        o.order_number = 0;
        assert!(o.validate().is_err());

        let mut o = order();
        o.lines[1].quantity = 0;
        assert_eq!(
            o.validate().unwrap_err(),
            DomainError::Validation("quantity: must be positive".into())
        );

        let mut o = order();
        o.lines[0].unit_price = Decimal::new(-1, 0);
        assert!(o.validate().is_err());
    }

    #[test]
    fn conversion_copies_lines() {
        let o = order();
        let copy = (&o as &dyn MomOrderRecord).to_mom_order();
        assert_eq!(copy, o);
        assert_eq!(copy.order_total().unwrap(), o.order_total().unwrap());
    }

    proptest! {
        #[test]
        fn total_is_sum_of_line_totals(lines in proptest::collection::vec((1u32..100, 0i64..100_000), 0..10)) {
            let mut o = MomOrder::new(1, 1, date());
            let mut expected = Decimal::ZERO;
            for (qty, cents) in lines {
                let price = Decimal::new(cents, 2);
                expected += price * Decimal::from(qty);
                o.lines.push(MomOrderLine::new("SKU", qty, price));
            }
            prop_assert_eq!(o.order_total().unwrap(), expected);
            prop_assert!(o.validate().is_ok());
        }
    }
}
