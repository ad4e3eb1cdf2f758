//! Read-only lookups over a schema description
//!
//! The `SchemaIndex` is the leaf dependency of relationship inference: it
//! answers table lookups by plural name and reverse lookups by singular
//! label, always in declaration order.

use crate::schema::{Schema, TableDef};
use scaffold_core::{ScaffoldError, ScaffoldResult};
use std::collections::HashMap;

/// Read-only view over the tables of a schema
#[derive(Debug, Clone)]
pub struct SchemaIndex {
    schema: Schema,

    /// Lookup: singular label → table name (first declared table wins)
    by_singular: HashMap<String, String>,
}

impl SchemaIndex {
    /// Build an index over a schema
    pub fn new(schema: Schema) -> Self {
        let mut by_singular = HashMap::with_capacity(schema.len());
        for (name, table) in schema.iter() {
            by_singular
                .entry(table.singular.clone())
                .or_insert_with(|| name.to_string());
        }

        Self {
            schema,
            by_singular,
        }
    }

    /// The indexed schema
    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Look up a table by name
    pub fn lookup_table(&self, name: &str) -> Option<&TableDef> {
        self.schema.table(name)
    }

    /// Look up a table by name, failing if it does not exist
    pub fn require_table(&self, name: &str) -> ScaffoldResult<&TableDef> {
        self.lookup_table(name)
            .ok_or_else(|| ScaffoldError::TableNotFound(name.to_string()))
    }

    /// Check whether a table exists
    pub fn contains_table(&self, name: &str) -> bool {
        self.schema.contains(name)
    }

    /// Singular label of a table
    pub fn singular_of(&self, name: &str) -> Option<&str> {
        self.lookup_table(name).map(|table| table.singular.as_str())
    }

    /// Reverse lookup: the table whose singular label is `singular`
    ///
    /// Callers that expect a match must treat `None` as a data-integrity
    /// error.
    pub fn table_name_for_singular(&self, singular: &str) -> Option<&str> {
        self.by_singular.get(singular).map(String::as_str)
    }

    /// Check whether any table carries the singular label
    pub fn has_singular(&self, singular: &str) -> bool {
        self.by_singular.contains_key(singular)
    }

    /// All tables as `(name, table)` pairs in declaration order
    pub fn all_tables(&self) -> impl Iterator<Item = (&str, &TableDef)> {
        self.schema.iter()
    }

    /// Number of tables
    pub fn table_count(&self) -> usize {
        self.schema.len()
    }
}

impl From<Schema> for SchemaIndex {
    fn from(schema: Schema) -> Self {
        Self::new(schema)
    }
}

// ============================================================================
// Tests
// ============================================================================
