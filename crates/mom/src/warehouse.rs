use serde::{Deserialize, Serialize};

use whippet_core::validate::{len_between, max_len};
use whippet_core::{DomainResult, Entity, EntityId, Validate};

pub const WAREHOUSE_CODE_MAX: usize = 6;
pub const WAREHOUSE_NAME_MAX: usize = 40;

pub trait MomWarehouseRecord {
    fn warehouse_id(&self) -> EntityId;
    fn code(&self) -> &str;
    fn name(&self) -> &str;
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MomWarehouse {
    pub id: EntityId,
    pub code: String,
    pub name: String,
}

impl MomWarehouse {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: EntityId::new(),
            code: code.into(),
            name: name.into(),
        }
    }
}

impl Entity for MomWarehouse {
    type Id = EntityId;
    const ENTITY_TYPE: &'static str = "mom.warehouse";

    fn id(&self) -> &EntityId {
        &self.id
    }
}

impl MomWarehouseRecord for MomWarehouse {
    fn warehouse_id(&self) -> EntityId {
        self.id
    }
    fn code(&self) -> &str {
        &self.code
    }
    fn name(&self) -> &str {
        &self.name
    }
}

impl Validate for MomWarehouse {
    fn validate(&self) -> DomainResult<()> {
        len_between("code", &self.code, 1, WAREHOUSE_CODE_MAX)?;
        max_len("name", &self.name, WAREHOUSE_NAME_MAX)
    }
}

pub trait ToMomWarehouse {
    fn to_mom_warehouse(&self) -> MomWarehouse;
}

impl<T: MomWarehouseRecord + ?Sized> ToMomWarehouse for T {
    fn to_mom_warehouse(&self) -> MomWarehouse {
        MomWarehouse {
            id: self.warehouse_id(),
            code: self.code().to_string(),
            name: self.name().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_is_one_to_six_characters() {
        assert!(MomWarehouse::new("MAIN", "Main warehouse").validate().is_ok());
        assert!(MomWarehouse::new("", "Nowhere").validate().is_err());
        assert!(MomWarehouse::new("TOOLONG", "Too long").validate().is_err());
        assert!(MomWarehouse::new("W2", "n".repeat(41)).validate().is_err());
    }

    #[test]
    fn converts_from_record() {
        let w = MomWarehouse::new("EAST", "East coast");
        assert_eq!(w.to_mom_warehouse(), w);
    }
}
