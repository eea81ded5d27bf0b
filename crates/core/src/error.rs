//! Domain error model.

use thiserror::Error;

/// Result type used across entity, repository and command code.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Covers deterministic failures only: field validation, broken invariants between
/// related entities, missing or duplicate records. Transport and storage failures of a
/// concrete backend are mapped into these before they reach callers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A field failed validation (length, range, format).
    #[error("validation failed: {0}")]
    Validation(String),

    /// Related values disagree (e.g. a navigation property pointing at another parent).
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    /// An identifier could not be parsed.
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// The requested record does not exist for this tenant.
    #[error("not found")]
    NotFound,

    /// The record already exists, or a write raced another one.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Authorization failure at the domain boundary.
    #[error("unauthorized")]
    Unauthorized,
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Validation failure attributed to a single field, rendered as `field: reason`.
    pub fn field(field: &str, reason: impl core::fmt::Display) -> Self {
        Self::Validation(format!("{field}: {reason}"))
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }
}
