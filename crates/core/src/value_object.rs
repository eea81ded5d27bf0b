//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects have no identity of their own: an address region or a tax-rate title is
/// defined entirely by its fields, and two with the same fields are interchangeable.
/// Entities embed them by value and compare them with `==`.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
