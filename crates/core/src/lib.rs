//! `whippet-core`: framework base types shared by every Whippet entity module.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! identifiers, the entity and repository traits, the error model and field validation.

pub mod entity;
pub mod error;
pub mod id;
pub mod repository;
pub mod validate;
pub mod value_object;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{EntityId, TenantId, UserId};
pub use repository::Repository;
pub use validate::Validate;
pub use value_object::ValueObject;
