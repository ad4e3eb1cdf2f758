//! Core types used throughout Scaffold
//!
//! This module contains the relationship kinds shared by the inference
//! engine and the emitters, and the static registry of schema-builder
//! column types used to validate column definitions.

use serde::{Deserialize, Serialize};

// ============================================================================
// Relationship Kinds
// ============================================================================

/// Kind of relationship recorded on a table
///
/// Serialized with the Eloquent method names (`belongsTo`, `hasMany`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RelationKind {
    /// The owning table holds a foreign key to the referenced table
    BelongsTo,
    /// Many-to-many through a pivot table
    BelongsToMany,
    /// The owning table has exactly one referenced record
    HasOne,
    /// The owning table has many referenced records
    HasMany,
}

impl RelationKind {
    /// Eloquent relationship method for this kind
    pub fn method_name(&self) -> &'static str {
        match self {
            RelationKind::BelongsTo => "belongsTo",
            RelationKind::BelongsToMany => "belongsToMany",
            RelationKind::HasOne => "hasOne",
            RelationKind::HasMany => "hasMany",
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            RelationKind::BelongsTo => "Belongs To",
            RelationKind::BelongsToMany => "Belongs To Many",
            RelationKind::HasOne => "Has One",
            RelationKind::HasMany => "Has Many",
        }
    }

    /// Get arrow symbol for visual representation
    pub fn arrow_symbol(&self) -> &'static str {
        match self {
            RelationKind::BelongsTo => "* >─── 1",
            RelationKind::BelongsToMany => "* >──< *",
            RelationKind::HasOne => "1 ─── 1",
            RelationKind::HasMany => "1 ───< *",
        }
    }

    /// Whether the far side is a collection (plural accessor name)
    pub fn is_collection(&self) -> bool {
        matches!(self, RelationKind::HasMany | RelationKind::BelongsToMany)
    }
}

impl std::fmt::Display for RelationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.method_name())
    }
}

// ============================================================================
// Column Type Registry
// ============================================================================

/// Argument arity of a schema-builder column type
///
/// `required` counts the leading column-name parameter when the type takes
/// one; `optional` counts the remaining defaulted parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnTypeSpec {
    /// Type tag as written in the schema description (e.g. `integer`)
    pub tag: &'static str,
    /// Number of required parameters
    pub required: usize,
    /// Number of optional parameters
    pub optional: usize,
}

impl ColumnTypeSpec {
    const fn new(tag: &'static str, required: usize, optional: usize) -> Self {
        Self {
            tag,
            required,
            optional,
        }
    }

    /// Total number of parameters the type accepts
    pub fn total(&self) -> usize {
        self.required + self.optional
    }

    /// Whether the column must carry a name
    pub fn requires_name(&self) -> bool {
        self.required > 0
    }
}

/// Every column type accepted in a schema description
pub const COLUMN_TYPES: &[ColumnTypeSpec] = &[
    ColumnTypeSpec::new("bigIncrements", 1, 0),
    ColumnTypeSpec::new("bigInteger", 1, 2),
    ColumnTypeSpec::new("binary", 1, 0),
    ColumnTypeSpec::new("boolean", 1, 0),
    ColumnTypeSpec::new("char", 1, 1),
    ColumnTypeSpec::new("date", 1, 0),
    ColumnTypeSpec::new("dateTime", 1, 1),
    ColumnTypeSpec::new("dateTimeTz", 1, 1),
    ColumnTypeSpec::new("decimal", 1, 2),
    ColumnTypeSpec::new("double", 1, 2),
    ColumnTypeSpec::new("enum", 2, 0),
    ColumnTypeSpec::new("float", 1, 2),
    ColumnTypeSpec::new("geometry", 1, 0),
    ColumnTypeSpec::new("geometryCollection", 1, 0),
    ColumnTypeSpec::new("increments", 1, 0),
    ColumnTypeSpec::new("integer", 1, 2),
    ColumnTypeSpec::new("ipAddress", 1, 0),
    ColumnTypeSpec::new("json", 1, 0),
    ColumnTypeSpec::new("jsonb", 1, 0),
    ColumnTypeSpec::new("lineString", 1, 0),
    ColumnTypeSpec::new("longText", 1, 0),
    ColumnTypeSpec::new("macAddress", 1, 0),
    ColumnTypeSpec::new("mediumIncrements", 1, 0),
    ColumnTypeSpec::new("mediumInteger", 1, 2),
    ColumnTypeSpec::new("mediumText", 1, 0),
    ColumnTypeSpec::new("morphs", 1, 1),
    ColumnTypeSpec::new("multiLineString", 1, 0),
    ColumnTypeSpec::new("multiPoint", 1, 0),
    ColumnTypeSpec::new("multiPolygon", 1, 0),
    ColumnTypeSpec::new("nullableMorphs", 1, 1),
    ColumnTypeSpec::new("nullableTimestamps", 0, 1),
    ColumnTypeSpec::new("point", 1, 0),
    ColumnTypeSpec::new("polygon", 1, 0),
    ColumnTypeSpec::new("rememberToken", 0, 0),
    ColumnTypeSpec::new("smallIncrements", 1, 0),
    ColumnTypeSpec::new("smallInteger", 1, 2),
    ColumnTypeSpec::new("softDeletes", 0, 2),
    ColumnTypeSpec::new("softDeletesTz", 0, 1),
    ColumnTypeSpec::new("string", 1, 1),
    ColumnTypeSpec::new("text", 1, 0),
    ColumnTypeSpec::new("time", 1, 1),
    ColumnTypeSpec::new("timeTz", 1, 1),
    ColumnTypeSpec::new("timestamp", 1, 1),
    ColumnTypeSpec::new("timestampTz", 1, 1),
    ColumnTypeSpec::new("timestamps", 0, 1),
    ColumnTypeSpec::new("timestampsTz", 0, 1),
    ColumnTypeSpec::new("tinyIncrements", 1, 0),
    ColumnTypeSpec::new("tinyInteger", 1, 2),
    ColumnTypeSpec::new("unsignedBigInteger", 1, 1),
    ColumnTypeSpec::new("unsignedDecimal", 1, 2),
    ColumnTypeSpec::new("unsignedInteger", 1, 1),
    ColumnTypeSpec::new("unsignedMediumInteger", 1, 1),
    ColumnTypeSpec::new("unsignedSmallInteger", 1, 1),
    ColumnTypeSpec::new("unsignedTinyInteger", 1, 1),
    ColumnTypeSpec::new("uuid", 1, 0),
    ColumnTypeSpec::new("year", 1, 0),
];

/// Look up a column type by its tag (case-sensitive)
pub fn column_type(tag: &str) -> Option<&'static ColumnTypeSpec> {
    COLUMN_TYPES.iter().find(|spec| spec.tag == tag)
}

/// Column type whose presence marks a table as soft-deleting
pub const SOFT_DELETES: &str = "softDeletes";

/// The only column type considered by foreign-key detection
pub const INTEGER: &str = "integer";

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_relation_kind_method_names() {
        assert_eq!(RelationKind::BelongsTo.method_name(), "belongsTo");
        assert_eq!(RelationKind::BelongsToMany.to_string(), "belongsToMany");
        assert_eq!(RelationKind::HasOne.arrow_symbol(), "1 ─── 1");
    }

    #[test]
    fn test_relation_kind_serde() {
        let json = serde_json::to_string(&RelationKind::HasMany).unwrap();
        assert_eq!(json, "\"hasMany\"");

        let kind: RelationKind = serde_json::from_str("\"belongsToMany\"").unwrap();
        assert_eq!(kind, RelationKind::BelongsToMany);
    }

    #[test]
    fn test_relation_kind_collections() {
        assert!(RelationKind::HasMany.is_collection());
        assert!(RelationKind::BelongsToMany.is_collection());
        assert!(!RelationKind::HasOne.is_collection());
        assert!(!RelationKind::BelongsTo.is_collection());
    }

    #[test]
    fn test_column_type_lookup() {
        let integer = column_type("integer").unwrap();
        assert!(integer.requires_name());
        assert_eq!(integer.total(), 3);

        let token = column_type("rememberToken").unwrap();
        assert!(!token.requires_name());
        assert_eq!(token.total(), 0);

        assert!(column_type("Integer").is_none());
        assert!(column_type("varchar").is_none());
    }

    #[test]
    fn test_column_registry_has_unique_tags() {
        let mut tags: Vec<_> = COLUMN_TYPES.iter().map(|spec| spec.tag).collect();
        tags.sort_unstable();
        let before = tags.len();
        tags.dedup();
        assert_eq!(before, tags.len());
    }
}
