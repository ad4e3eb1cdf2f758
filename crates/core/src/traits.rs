//! Core traits for Scaffold
//!
//! This module defines the traits shared by the schema model and the
//! generators.

use crate::error::ScaffoldResult;

// ============================================================================
// Validatable Trait
// ============================================================================

/// Trait for types that can be validated
///
/// Types implementing this trait can check their internal consistency
/// and return validation errors if the state is invalid.
///
/// # Example
///
/// ```rust,ignore
/// use scaffold_core::{ScaffoldError, ScaffoldResult, Validatable};
///
/// struct Table {
///     singular: String,
/// }
///
/// impl Validatable for Table {
///     fn validate(&self) -> ScaffoldResult<()> {
///         if self.singular.is_empty() {
///             return Err(ScaffoldError::validation("Singular name cannot be empty"));
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait Validatable {
    /// Validate the current state of the object
    ///
    /// Returns `Ok(())` if valid, or a `ScaffoldError` describing the problem.
    fn validate(&self) -> ScaffoldResult<()>;

    /// Check if the object is valid without returning error details
    fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ScaffoldError;

    struct Named(&'static str);

    impl Validatable for Named {
        fn validate(&self) -> ScaffoldResult<()> {
            if self.0.is_empty() {
                return Err(ScaffoldError::validation("Name cannot be empty"));
            }
            Ok(())
        }
    }

    #[test]
    fn test_is_valid_follows_validate() {
        assert!(Named("users").is_valid());
        assert!(!Named("").is_valid());
    }
}
