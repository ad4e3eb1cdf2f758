//! Foreign-key relationship detection
//!
//! Every integer column named `<singular>_id` whose `<singular>s` table
//! exists produces a forward relationship on the owning table. Columns
//! that do not match are skipped without a diagnostic; an integer column
//! named like a foreign key does not have to be one.

use crate::inference::pivot::is_pivot_table;
use crate::relationship::{Relationship, RelationshipSet};
use crate::schema::Column;
use crate::schema_index::SchemaIndex;
use scaffold_core::types::INTEGER;
use scaffold_core::{RelationKind, ScaffoldResult};

/// Separator between the segments of a foreign-key column name
pub const COLUMN_SEPARATOR: char = '_';

/// Last segment of every foreign-key column name
pub const KEY_SUFFIX: &str = "id";

/// Table name a column refers to under the foreign-key naming convention.
///
/// Pluralization is always `segments + "s"`; irregular plurals are not
/// detected.
pub fn candidate_table(column: &Column) -> Option<String> {
    let name = column.name()?;

    if column.column_type != INTEGER || !name.contains(COLUMN_SEPARATOR) {
        return None;
    }

    let (stem, last) = name.rsplit_once(COLUMN_SEPARATOR)?;
    if last != KEY_SUFFIX {
        return None;
    }

    Some(format!("{}s", stem))
}

/// Scan every column of every table in declaration order and propose the
/// forward relationships.
///
/// Fails only when an owning table name is ambiguous as a pivot name.
pub fn detect(index: &SchemaIndex) -> ScaffoldResult<RelationshipSet> {
    let mut set = RelationshipSet::new();

    for (table_name, table) in index.all_tables() {
        for column in &table.columns {
            let Some(referenced) = candidate_table(column) else {
                continue;
            };

            if !index.contains_table(&referenced) {
                tracing::debug!(
                    "Column '{}.{}' looks like a foreign key but table '{}' does not exist",
                    table_name,
                    column.name().unwrap_or_default(),
                    referenced
                );
                continue;
            }

            let kind = if is_pivot_table(index, table_name)? {
                RelationKind::BelongsToMany
            } else {
                RelationKind::BelongsTo
            };

            let foreign_column = column.name().unwrap_or_default();
            tracing::debug!(
                "Detected relationship: {} --[{}]--> {} (via {}.{})",
                table_name,
                kind,
                referenced,
                table_name,
                foreign_column
            );

            set.push(
                table_name,
                Relationship::forward(foreign_column, referenced, kind),
            );
        }
    }

    Ok(set)
}

// ============================================================================
// Tests
// ============================================================================
