//! Tax classes, rates and rules.

pub mod class;
pub mod rate;
pub mod repository;
pub mod rule;

pub use class::{TaxClass, TaxClassRecord, TaxClassType, ToTaxClass};
pub use rate::{TaxRate, TaxRateRecord, TaxRateTitle, ToTaxRate, ZipRange};
pub use repository::{TaxClassRepository, TaxRateRepository, TaxRuleRepository};
pub use rule::{TaxRule, TaxRuleRecord, ToTaxRule};
