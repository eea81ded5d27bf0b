//! Field-level validation helpers.
//!
//! Entities mirror columns of external systems, so most rules are column widths and
//! numeric ranges. Every helper names the offending field in its error.

use crate::error::{DomainError, DomainResult};

/// Field-level validation of an entity or value object.
pub trait Validate {
    fn validate(&self) -> DomainResult<()>;
}

impl<T: Validate> Validate for [T] {
    fn validate(&self) -> DomainResult<()> {
        self.iter().try_for_each(Validate::validate)
    }
}

impl<T: Validate> Validate for Option<T> {
    fn validate(&self) -> DomainResult<()> {
        match self {
            Some(v) => v.validate(),
            None => Ok(()),
        }
    }
}

/// Value must be present and not blank.
pub fn require(field: &str, value: &str) -> DomainResult<()> {
    if value.trim().is_empty() {
        return Err(DomainError::field(field, "cannot be empty"));
    }
    Ok(())
}

/// Value may be empty but must not exceed `max` characters.
pub fn max_len(field: &str, value: &str, max: usize) -> DomainResult<()> {
    let len = value.chars().count();
    if len > max {
        return Err(DomainError::field(
            field,
            format!("length {len} exceeds maximum of {max}"),
        ));
    }
    Ok(())
}

/// Same as [`max_len`] for optional columns; `None` always passes.
pub fn max_len_opt(field: &str, value: Option<&str>, max: usize) -> DomainResult<()> {
    match value {
        Some(v) => max_len(field, v, max),
        None => Ok(()),
    }
}

/// Value must be non-blank and between `min` and `max` characters (inclusive).
pub fn len_between(field: &str, value: &str, min: usize, max: usize) -> DomainResult<()> {
    if min > 0 {
        require(field, value)?;
    }
    let len = value.chars().count();
    if len < min || len > max {
        return Err(DomainError::field(
            field,
            format!("length {len} outside {min}..={max}"),
        ));
    }
    Ok(())
}

/// Numeric value must lie within `min..=max`.
pub fn in_range<T>(field: &str, value: T, min: T, max: T) -> DomainResult<()>
where
    T: PartialOrd + core::fmt::Display,
{
    if value < min || value > max {
        return Err(DomainError::field(
            field,
            format!("{value} outside {min}..={max}"),
        ));
    }
    Ok(())
}

/// Numeric value must be at least `min`.
pub fn at_least<T>(field: &str, value: T, min: T) -> DomainResult<()>
where
    T: PartialOrd + core::fmt::Display,
{
    if value < min {
        return Err(DomainError::field(field, format!("{value} is below {min}")));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn require_rejects_whitespace() {
        let err = require("name", "   ").unwrap_err();
        assert_eq!(err, DomainError::Validation("name: cannot be empty".into()));
    }

    #[test]
    fn max_len_counts_chars_not_bytes() {
        assert!(max_len("city", "Zürich", 6).is_ok());
        assert!(max_len("city", "Zürich!", 6).is_err());
    }

    #[test]
    fn len_between_with_zero_min_allows_empty() {
        assert!(len_between("fax", "", 0, 10).is_ok());
        assert!(len_between("code", "", 1, 10).is_err());
    }

    #[test]
    fn in_range_is_inclusive() {
        assert!(in_range("rate", 0, 0, 100).is_ok());
        assert!(in_range("rate", 100, 0, 100).is_ok());
        let err = in_range("rate", 101, 0, 100).unwrap_err();
        assert_eq!(err, DomainError::Validation("rate: 101 outside 0..=100".into()));
    }

    #[test]
    fn option_and_slice_validate_each_element() {
        struct Even(u32);
        impl Validate for Even {
            fn validate(&self) -> DomainResult<()> {
                if self.0 % 2 == 0 { Ok(()) } else { Err(DomainError::validation("odd")) }
            }
        }

        assert!(None::<Even>.validate().is_ok());
        assert!(Some(Even(3)).validate().is_err());
        assert!([Even(2), Even(4)][..].validate().is_ok());
        assert!([Even(2), Even(5)][..].validate().is_err());
    }

    proptest! {
        #[test]
        fn max_len_accepts_exactly_up_to_limit(s in "[a-z]{0,40}", max in 0usize..40) {
            let ok = max_len("f", &s, max).is_ok();
            prop_assert_eq!(ok, s.chars().count() <= max);
        }
    }
}
