//! Magento EAV/store configuration: websites, store groups, store views, attribute sets.

pub mod attribute_set;
pub mod group;
pub mod repository;
pub mod view;
pub mod website;

pub use attribute_set::{EavAttributeSet, EavAttributeSetRecord, ToEavAttributeSet};
pub use group::{StoreGroup, StoreGroupRecord, ToStoreGroup};
pub use repository::{
    EavAttributeSetRepository, StoreGroupRepository, StoreViewRepository, StoreWebsiteRepository,
};
pub use view::{StoreView, StoreViewRecord, ToStoreView};
pub use website::{StoreWebsite, StoreWebsiteRecord, ToStoreWebsite};
