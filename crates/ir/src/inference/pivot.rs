//! Pivot table classification
//!
//! A pivot (junction) table is named `<singular>_<singular>` where both
//! parts are the singular label of some declared table. Names with more
//! than one separator cannot be split unambiguously and abort the run.

use crate::schema_index::SchemaIndex;
use scaffold_core::{ScaffoldError, ScaffoldResult};

/// Separator between the two singular parts of a pivot table name
pub const PIVOT_SEPARATOR: char = '_';

/// Split a table name into its two pivot parts.
///
/// Returns `Ok(None)` when the name has no separator and
/// `AmbiguousNaming` when it has more than two parts.
pub fn pivot_parts(name: &str) -> ScaffoldResult<Option<(&str, &str)>> {
    let parts: Vec<&str> = name.split(PIVOT_SEPARATOR).collect();

    match parts.as_slice() {
        [_] => Ok(None),
        [first, second] => Ok(Some((*first, *second))),
        _ => Err(ScaffoldError::ambiguous_naming(name)),
    }
}

/// Decide whether `name` is a many-to-many junction between known tables.
///
/// Both parts must independently match a singular label; they may match
/// the same table (self-referential pivot).
pub fn is_pivot_table(index: &SchemaIndex, name: &str) -> ScaffoldResult<bool> {
    let Some((first, second)) = pivot_parts(name)? else {
        return Ok(false);
    };

    Ok(index.has_singular(first) && index.has_singular(second))
}

impl SchemaIndex {
    /// See [`is_pivot_table`].
    pub fn is_pivot_table(&self, name: &str) -> ScaffoldResult<bool> {
        is_pivot_table(self, name)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Schema, TableDef};

    fn index() -> SchemaIndex {
        Schema::new()
            .with_table("roles", TableDef::new("role"))
            .with_table("users", TableDef::new("user"))
            .with_table("role_user", TableDef::new("role_user"))
            .into()
    }

    #[test]
    fn test_pivot_parts() {
        assert_eq!(pivot_parts("roles").unwrap(), None);
        assert_eq!(pivot_parts("role_user").unwrap(), Some(("role", "user")));
        assert!(matches!(
            pivot_parts("a_b_c"),
            Err(ScaffoldError::AmbiguousNaming { ref table }) if table == "a_b_c"
        ));
    }

    #[test]
    fn test_pivot_table_detected() {
        let index = index();
        assert!(index.is_pivot_table("role_user").unwrap());
    }

    #[test]
    fn test_plain_table_is_not_pivot() {
        let index = index();
        assert!(!index.is_pivot_table("roles").unwrap());
    }

    #[test]
    fn test_unknown_part_is_not_pivot() {
        let index = index();
        assert!(!index.is_pivot_table("role_team").unwrap());
        assert!(!index.is_pivot_table("password_resets").unwrap());
    }

    #[test]
    fn test_self_referential_pivot() {
        let index = index();
        assert!(index.is_pivot_table("user_user").unwrap());
    }

    #[test]
    fn test_multiple_separators_fail() {
        let index = index();
        let err = index.is_pivot_table("a_b_c").unwrap_err();
        assert!(err.is_fatal_inference());
    }

    #[test]
    fn test_leading_separator() {
        let index = index();
        assert!(!index.is_pivot_table("_user").unwrap());
    }
}
